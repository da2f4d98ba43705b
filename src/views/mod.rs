//! View assemblers
//!
//! Each view consumes the joined/filtered tables plus the binner's ordered
//! labels and color maps, and produces serializable chart primitives. No
//! drawing happens here; a renderer owns geometry, markers, and axes.

pub mod bubble;
pub mod map;
pub mod stream;

use crate::error::Result;
use polars::prelude::*;

/// Extract a column as f64 with NaN treated as missing.
pub(crate) fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let cast = df.column(name)?.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|opt| opt.filter(|v| !v.is_nan()))
        .collect())
}

/// Extract a column as owned strings.
pub(crate) fn column_str(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|opt| opt.map(str::to_string))
        .collect())
}
