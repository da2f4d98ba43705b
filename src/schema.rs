//! Schema normalization for the two CDC source tables
//!
//! Both sources arrive with verbose, inconsistent column names. This module
//! verifies the required columns exist, then projects each table down to a
//! fixed internal schema via a lazy select. Nothing else is transformed.
//!
//! Normalization is not idempotent: re-applying it to its own output fails
//! with `MissingColumn` because the source names genuinely diverge from the
//! internal names.

use crate::error::{AtlasError, Result};
use polars::prelude::*;

/// Geographic join key shared by both normalized tables.
pub const COUNTY_FIPS: &str = "county_fips";

pub const COUNTY: &str = "county";
pub const STATE: &str = "state";
pub const COUNTY_POPULATION: &str = "county_population";
pub const HOSPITAL_100K: &str = "hospital_100k";
pub const CASES_100K: &str = "cases_100k";
pub const COMMUNITY_LEVEL: &str = "community_level";
pub const DATE_UPDATED: &str = "date_updated";

pub const PERCENT_HESITANT: &str = "percent_hesitant";
pub const PERCENT_STRONGLY_HESITANT: &str = "percent_strongly_hesitant";
pub const SVI: &str = "SVI";
pub const SVI_CATEGORY: &str = "SVI_category";
pub const PERCENT_VACCINATED: &str = "percent_vaccinated";
pub const PERCENT_HISPANIC: &str = "percent_hispanic";
pub const PERCENT_AIAN: &str = "percent_AIAN";
pub const PERCENT_ASIAN: &str = "percent_asian";
pub const PERCENT_BLACK: &str = "percent_black";
pub const PERCENT_NHPI: &str = "percent_NHPI";
pub const PERCENT_WHITE: &str = "percent_white";
pub const COUNTY_BOUNDARY: &str = "county_boundary";
pub const STATE_BOUNDARY: &str = "state_boundary";

/// (source column, internal column) pairs for the community-levels table.
pub const COMMUNITY_COLUMNS: [(&str, &str); 8] = [
    ("county", COUNTY),
    ("county_fips", COUNTY_FIPS),
    ("state", STATE),
    ("county_population", COUNTY_POPULATION),
    ("covid_hospital_admissions_per_100k", HOSPITAL_100K),
    ("covid_cases_per_100k", CASES_100K),
    ("covid-19_community_level", COMMUNITY_LEVEL),
    ("date_updated", DATE_UPDATED),
];

/// (source column, internal column) pairs for the hesitancy table.
pub const HESITANCY_COLUMNS: [(&str, &str); 14] = [
    ("FIPS Code", COUNTY_FIPS),
    ("Estimated hesitant", PERCENT_HESITANT),
    ("Estimated strongly hesitant", PERCENT_STRONGLY_HESITANT),
    ("Social Vulnerability Index (SVI)", SVI),
    ("SVI Category", SVI_CATEGORY),
    (
        "Percent adults fully vaccinated against COVID-19 (as of 6/10/21)",
        PERCENT_VACCINATED,
    ),
    ("Percent Hispanic", PERCENT_HISPANIC),
    (
        "Percent non-Hispanic American Indian/Alaska Native",
        PERCENT_AIAN,
    ),
    ("Percent non-Hispanic Asian", PERCENT_ASIAN),
    ("Percent non-Hispanic Black", PERCENT_BLACK),
    (
        "Percent non-Hispanic Native Hawaiian/Pacific Islander",
        PERCENT_NHPI,
    ),
    ("Percent non-Hispanic White", PERCENT_WHITE),
    ("County Boundary", COUNTY_BOUNDARY),
    ("State Boundary", STATE_BOUNDARY),
];

/// Verify every expected source column is present before projecting.
fn check_columns(
    df: &DataFrame,
    table: &'static str,
    columns: &[(&str, &str)],
) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    for (source, _) in columns {
        if !present.iter().any(|c| c == source) {
            return Err(AtlasError::MissingColumn {
                table,
                column: (*source).to_string(),
            });
        }
    }
    Ok(())
}

fn project(df: DataFrame, columns: &[(&str, &str)]) -> Result<DataFrame> {
    let exprs: Vec<Expr> = columns
        .iter()
        .map(|(source, internal)| col(*source).alias(*internal))
        .collect();
    Ok(df.lazy().select(exprs).collect()?)
}

/// Normalize the raw community-levels table to the internal schema.
pub fn normalize_community(raw: DataFrame) -> Result<DataFrame> {
    check_columns(&raw, "community", &COMMUNITY_COLUMNS)?;
    project(raw, &COMMUNITY_COLUMNS)
}

/// Normalize the raw hesitancy table to the internal schema. The source's
/// `FIPS Code` key is renamed to match the community table's join key.
pub fn normalize_hesitancy(raw: DataFrame) -> Result<DataFrame> {
    check_columns(&raw, "hesitancy", &HESITANCY_COLUMNS)?;
    project(raw, &HESITANCY_COLUMNS)
}
