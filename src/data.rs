//! Data loading and session state
//!
//! Loads the two CDC CSVs once per session and holds them immutably. The
//! joined table is the only piece recomputed afterwards, via
//! [`Session::reselect`] on every report-date change.

use crate::error::{AtlasError, Result};
use crate::join;
use crate::schema;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Read one CSV into a DataFrame, failing fast on a missing path so no
/// partial session is ever constructed.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(AtlasError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Immutable base tables plus the current date's joined table.
#[derive(Debug)]
pub struct Session {
    /// Normalized community-levels table, all report dates.
    pub community: DataFrame,
    /// Normalized hesitancy table, date-invariant.
    pub hesitancy: DataFrame,
    /// Currently selected report date.
    pub date: String,
    /// Inner join of the date-filtered community table with the
    /// hesitancy table.
    pub joined: DataFrame,
}

impl Session {
    /// Load, normalize, and join both sources. `date = None` selects the
    /// earliest report date present, the one closest to when the hesitancy
    /// estimates were collected.
    pub fn load(
        community_path: &Path,
        hesitancy_path: &Path,
        date: Option<&str>,
    ) -> Result<Self> {
        let community_raw = load_csv(community_path)?;
        let hesitancy_raw = load_csv(hesitancy_path)?;
        info!(
            community_rows = community_raw.height(),
            hesitancy_rows = hesitancy_raw.height(),
            "loaded source tables"
        );

        let community = schema::normalize_community(community_raw)?;
        let hesitancy = schema::normalize_hesitancy(hesitancy_raw)?;

        let date = match date {
            Some(d) => d.to_string(),
            None => {
                let dates = join::distinct_dates(&community)?;
                dates.first().cloned().unwrap_or_default()
            }
        };

        let for_date = join::select_date(&community, &date)?;
        let joined = join::join_on_fips(&for_date, &hesitancy)?;
        info!(date = %date, joined_rows = joined.height(), "session ready");

        Ok(Session {
            community,
            hesitancy,
            date,
            joined,
        })
    }

    /// Recompute the joined table for a new report date. The base tables
    /// are untouched; an invalid date leaves the session as it was.
    pub fn reselect(&mut self, date: &str) -> Result<()> {
        let for_date = join::select_date(&self.community, date)?;
        let joined = join::join_on_fips(&for_date, &self.hesitancy)?;
        info!(date = %date, joined_rows = joined.height(), "reselected report date");
        self.date = date.to_string();
        self.joined = joined;
        Ok(())
    }
}
