//! Date selection and the FIPS inner join
//!
//! Counties present in only one source are dropped silently by the join;
//! partial coverage between the two public datasets is expected, not an
//! error. All operations here are pure and repeatable for the same inputs.

use crate::data::Session;
use crate::error::{AtlasError, Result};
use crate::schema;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

/// Sorted distinct report dates present in the community table. Populates
/// the date selector, and defines the valid set for [`select_date`].
pub fn distinct_dates(community: &DataFrame) -> Result<Vec<String>> {
    let dates = community.column(schema::DATE_UPDATED)?.str()?;
    let set: BTreeSet<String> = dates.into_iter().flatten().map(str::to_string).collect();
    Ok(set.into_iter().collect())
}

/// Filter the community table to a single report date.
///
/// A date outside `distinct(date_updated)` is recoverable: the error carries
/// the full valid set so a caller can retry.
pub fn select_date(community: &DataFrame, date: &str) -> Result<DataFrame> {
    let valid = distinct_dates(community)?;
    if !valid.iter().any(|d| d == date) {
        return Err(AtlasError::InvalidDate {
            requested: date.to_string(),
            valid,
        });
    }
    let filtered = community
        .clone()
        .lazy()
        .filter(col(schema::DATE_UPDATED).eq(lit(date)))
        .collect()?;
    Ok(filtered)
}

/// Inner join of the date-filtered community table with the hesitancy table
/// on the county FIPS key.
pub fn join_on_fips(community_for_date: &DataFrame, hesitancy: &DataFrame) -> Result<DataFrame> {
    let joined = community_for_date
        .clone()
        .lazy()
        .join(
            hesitancy.clone().lazy(),
            [col(schema::COUNTY_FIPS)],
            [col(schema::COUNTY_FIPS)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;
    Ok(joined)
}

/// Load both sources, normalize, select `date` (or the earliest), and join.
/// Convenience entry point for non-interactive callers.
pub fn process(
    community_path: &Path,
    hesitancy_path: &Path,
    date: Option<&str>,
) -> Result<Session> {
    Session::load(community_path, hesitancy_path, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn community() -> DataFrame {
        df! {
            "county" => &["A County", "B County", "A County", "B County"],
            "county_fips" => &[1001i64, 1003, 1001, 1003],
            "state" => &["Alabama"; 4],
            "county_population" => &[10_000i64; 4],
            "hospital_100k" => &[1.0f64, 2.0, 3.0, 4.0],
            "cases_100k" => &[10.0f64, 20.0, 30.0, 40.0],
            "community_level" => &["Low", "Medium", "High", "Low"],
            "date_updated" => &["2022-02-24", "2022-02-24", "2022-03-03", "2022-03-03"],
        }
        .unwrap()
    }

    fn hesitancy() -> DataFrame {
        df! {
            "county_fips" => &[1001i64, 9999],
            "percent_hesitant" => &[0.12f64, 0.30],
            "SVI" => &[0.5f64, 0.9],
        }
        .unwrap()
    }

    #[test]
    fn test_distinct_dates_sorted() {
        let dates = distinct_dates(&community()).unwrap();
        assert_eq!(dates, vec!["2022-02-24".to_string(), "2022-03-03".to_string()]);
    }

    #[test]
    fn test_select_date_filters_rows() {
        let filtered = select_date(&community(), "2022-03-03").unwrap();
        assert_eq!(filtered.height(), 2);
        let levels = filtered.column("community_level").unwrap();
        let levels = levels.str().unwrap();
        assert_eq!(levels.get(0), Some("High"));
    }

    #[test]
    fn test_select_date_rejects_unknown_date_with_valid_set() {
        match select_date(&community(), "2099-01-01") {
            Err(AtlasError::InvalidDate { requested, valid }) => {
                assert_eq!(requested, "2099-01-01");
                assert_eq!(valid, vec!["2022-02-24".to_string(), "2022-03-03".to_string()]);
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_inner_join_drops_unmatched_counties() {
        let for_date = select_date(&community(), "2022-02-24").unwrap();
        let joined = join_on_fips(&for_date, &hesitancy()).unwrap();

        // 1003 has no hesitancy row, 9999 has no community row.
        assert_eq!(joined.height(), 1);
        let fips = joined.column("county_fips").unwrap();
        assert_eq!(fips.i64().unwrap().get(0), Some(1001));
        // Columns from both sides survive.
        assert!(joined.column("percent_hesitant").is_ok());
        assert!(joined.column("community_level").is_ok());
    }

    #[test]
    fn test_join_row_count_bounded_by_both_sides() {
        let for_date = select_date(&community(), "2022-02-24").unwrap();
        let joined = join_on_fips(&for_date, &hesitancy()).unwrap();
        assert!(joined.height() <= for_date.height().min(hesitancy().height()));
    }
}
