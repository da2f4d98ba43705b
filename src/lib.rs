//! COVID-19 vaccine-hesitancy county explorer
//!
//! Joins the CDC community-levels and vaccine-hesitancy datasets on county
//! FIPS code and assembles the plotting data for three views:
//! - `views::bubble`: hesitancy vs. unvaccinated scatter, sized by a
//!   demographic attribute
//! - `views::map`: country/state choropleth over quantile-binned attributes
//! - `views::stream`: counties per category per report date
//!
//! The pipeline modules are pure DataFrame transforms:
//! - `schema`: source-column verification and renaming
//! - `join`: report-date selection and the FIPS inner join
//! - `filter`: thresholds and derived size columns
//! - `binning`: quantile intervals plus label and color assignment
//!
//! Rendering is out of scope; view output is plain serializable data.

pub mod attributes;
pub mod binning;
pub mod data;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod join;
pub mod palette;
pub mod schema;
pub mod views;

// Re-export commonly used types
pub use attributes::{MapAttribute, SizeAttribute, StreamAttribute, REPORT_DATES, US_STATES};
pub use binning::{bin_column, BinnedColumn, Interval, NAN_LABEL};
pub use data::Session;
pub use error::AtlasError;
pub use filter::SizeScaling;
pub use palette::{Color, NAN_COLOR};
