//! Row thresholds and derived columns for the bubble view
//!
//! Ordering matters: range filters run first, `drop_incomplete` after, so a
//! missing value in a filter column never suppresses rows the view still
//! needs. Rows whose filter column is null are dropped by the comparison
//! itself, matching the expected visual filtering behavior.

use crate::error::Result;
use polars::prelude::*;

/// Which min-max formula scales a size attribute.
///
/// `Legacy` computes `(v - min) / max - min`, dividing by `max` and then
/// subtracting `min`. That operator-precedence quirk is what the bubble view
/// was tuned against, so it stays selectable rather than silently fixed.
/// `MinMax` is the corrected `(v - min) / (max - min)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeScaling {
    #[default]
    Legacy,
    MinMax,
}

/// Keep rows where `min <= column <= max` (inclusive both ends).
pub fn filter_by_range(df: &DataFrame, column: &str, min: f64, max: f64) -> Result<DataFrame> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col(column).gt_eq(lit(min)).and(col(column).lt_eq(lit(max))))
        .collect()?;
    Ok(filtered)
}

/// Keep rows where `column >= min` (inclusive).
pub fn filter_by_minimum(df: &DataFrame, column: &str, min: f64) -> Result<DataFrame> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col(column).gt_eq(lit(min)))
        .collect()?;
    Ok(filtered)
}

/// Drop rows with a null in any of `required`. Run this after the range
/// filters, not before.
pub fn drop_incomplete(df: &DataFrame, required: &[&str]) -> Result<DataFrame> {
    let subset: Vec<Expr> = required.iter().map(|c| col(*c)).collect();
    let complete = df.clone().lazy().drop_nulls(Some(subset)).collect()?;
    Ok(complete)
}

/// Append `{column}_scaled`, the min-max scaled copy of `column` used for
/// sizing a visual mark. Missing values stay missing; an empty table gets an
/// all-null column.
pub fn normalize_column(df: &DataFrame, column: &str, scaling: SizeScaling) -> Result<DataFrame> {
    let cast = df.column(column)?.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = cast
        .f64()?
        .into_iter()
        .map(|opt| opt.filter(|v| !v.is_nan()))
        .collect();

    let present: Vec<f64> = values.iter().copied().flatten().collect();
    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let scaled: Vec<Option<f64>> = values
        .iter()
        .map(|opt| {
            opt.map(|v| match scaling {
                SizeScaling::Legacy => (v - min) / max - min,
                SizeScaling::MinMax => {
                    if max > min {
                        (v - min) / (max - min)
                    } else {
                        0.0
                    }
                }
            })
        })
        .collect();

    let name = format!("{column}_scaled");
    let mut out = df.clone();
    out.with_column(Series::new(name.into(), scaled))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df! {
            "SVI" => &[Some(0.2f64), Some(0.5), None, Some(0.9)],
            "county_population" => &[30_000i64, 20_000, 40_000, 50_000],
            "percent_hesitant" => &[Some(0.1f64), Some(0.2), Some(0.3), None],
        }
        .unwrap()
    }

    #[test]
    fn test_range_filter_inclusive_bounds() {
        let out = filter_by_range(&frame(), "SVI", 0.2, 0.5).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn test_minimum_filter_inclusive() {
        let out = filter_by_minimum(&frame(), "county_population", 30_000.0).unwrap();
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn test_null_filter_column_drops_only_that_row() {
        // The null SVI row goes; the null percent_hesitant row stays.
        let out = filter_by_range(&frame(), "SVI", 0.0, 1.0).unwrap();
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn test_drop_incomplete_subset() {
        let out = drop_incomplete(&frame(), &["SVI", "percent_hesitant"]).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn test_legacy_scaling_reproduces_quirk() {
        let df = df! { "v" => &[1.0f64, 2.0, 3.0] }.unwrap();
        let out = normalize_column(&df, "v", SizeScaling::Legacy).unwrap();
        let scaled = out.column("v_scaled").unwrap();
        let scaled = scaled.f64().unwrap();
        // (v - 1) / 3 - 1
        assert_relative_eq!(scaled.get(0).unwrap(), -1.0);
        assert_relative_eq!(scaled.get(1).unwrap(), 1.0 / 3.0 - 1.0);
        assert_relative_eq!(scaled.get(2).unwrap(), 2.0 / 3.0 - 1.0);
    }

    #[test]
    fn test_minmax_scaling_corrected() {
        let df = df! { "v" => &[1.0f64, 2.0, 3.0] }.unwrap();
        let out = normalize_column(&df, "v", SizeScaling::MinMax).unwrap();
        let scaled = out.column("v_scaled").unwrap();
        let scaled = scaled.f64().unwrap();
        assert_relative_eq!(scaled.get(0).unwrap(), 0.0);
        assert_relative_eq!(scaled.get(1).unwrap(), 0.5);
        assert_relative_eq!(scaled.get(2).unwrap(), 1.0);
    }

    #[test]
    fn test_minmax_constant_column_scales_to_zero() {
        let df = df! { "v" => &[2.0f64, 2.0] }.unwrap();
        let out = normalize_column(&df, "v", SizeScaling::MinMax).unwrap();
        let scaled = out.column("v_scaled").unwrap();
        assert_relative_eq!(scaled.f64().unwrap().get(0).unwrap(), 0.0);
    }

    #[test]
    fn test_scaling_preserves_missing_values() {
        let df = df! { "v" => &[Some(1.0f64), None, Some(3.0)] }.unwrap();
        let out = normalize_column(&df, "v", SizeScaling::MinMax).unwrap();
        let scaled = out.column("v_scaled").unwrap();
        assert_eq!(scaled.f64().unwrap().get(1), None);
    }

    #[test]
    fn test_empty_table_passes_through() {
        let df = df! { "v" => &Vec::<f64>::new() }.unwrap();
        let out = normalize_column(&df, "v", SizeScaling::MinMax).unwrap();
        assert_eq!(out.height(), 0);
        assert!(out.column("v_scaled").is_ok());
    }
}
