//! Attribute catalog: the fixed set of plottable encodings
//!
//! Each attribute carries its UI label, internal column name, and (for
//! binned attributes) its quantile bucket count, so view code never does a
//! stringly-typed dictionary lookup.

use crate::schema;
use serde::Serialize;

/// Attributes selectable for choropleth shading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MapAttribute {
    Cases100k,
    Hospital100k,
    PercentVaccinated,
    Svi,
    PercentStronglyHesitant,
}

impl MapAttribute {
    pub const ALL: [MapAttribute; 5] = [
        MapAttribute::Cases100k,
        MapAttribute::Hospital100k,
        MapAttribute::PercentVaccinated,
        MapAttribute::Svi,
        MapAttribute::PercentStronglyHesitant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MapAttribute::Cases100k => "Cases Per 100k",
            MapAttribute::Hospital100k => "Hospital Admissions Per 100k",
            MapAttribute::PercentVaccinated => "Vaccination Percentage",
            MapAttribute::Svi => "Social Vulnerability Index",
            MapAttribute::PercentStronglyHesitant => "Percent Strongly Hesitant",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            MapAttribute::Cases100k => schema::CASES_100K,
            MapAttribute::Hospital100k => schema::HOSPITAL_100K,
            MapAttribute::PercentVaccinated => schema::PERCENT_VACCINATED,
            MapAttribute::Svi => schema::SVI,
            MapAttribute::PercentStronglyHesitant => schema::PERCENT_STRONGLY_HESITANT,
        }
    }

    /// Quantile bucket count for this attribute.
    pub fn buckets(&self) -> usize {
        match self {
            MapAttribute::Cases100k => 7,
            MapAttribute::Hospital100k => 4,
            MapAttribute::PercentVaccinated => 6,
            MapAttribute::Svi => 6,
            MapAttribute::PercentStronglyHesitant => 6,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.label() == label)
    }
}

/// Attributes selectable for the stream graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StreamAttribute {
    CommunityLevel,
    Cases100k,
    Hospital100k,
}

impl StreamAttribute {
    pub const ALL: [StreamAttribute; 3] = [
        StreamAttribute::CommunityLevel,
        StreamAttribute::Cases100k,
        StreamAttribute::Hospital100k,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StreamAttribute::CommunityLevel => "Community Level",
            StreamAttribute::Cases100k => "Cases Per 100k",
            StreamAttribute::Hospital100k => "Hospital Admissions Per 100k",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            StreamAttribute::CommunityLevel => schema::COMMUNITY_LEVEL,
            StreamAttribute::Cases100k => schema::CASES_100K,
            StreamAttribute::Hospital100k => schema::HOSPITAL_100K,
        }
    }
}

/// Attributes selectable for bubble sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SizeAttribute {
    Svi,
    PercentHispanic,
    PercentAian,
    PercentAsian,
    PercentBlack,
    PercentNhpi,
    PercentWhite,
}

impl SizeAttribute {
    pub const ALL: [SizeAttribute; 7] = [
        SizeAttribute::Svi,
        SizeAttribute::PercentHispanic,
        SizeAttribute::PercentAian,
        SizeAttribute::PercentAsian,
        SizeAttribute::PercentBlack,
        SizeAttribute::PercentNhpi,
        SizeAttribute::PercentWhite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SizeAttribute::Svi => "SVI",
            SizeAttribute::PercentHispanic => "Percent Hispanic",
            SizeAttribute::PercentAian => "Percent American Indian/Alaska Native",
            SizeAttribute::PercentAsian => "Percent Asian",
            SizeAttribute::PercentBlack => "Percent Black",
            SizeAttribute::PercentNhpi => "Percent Native Hawaiian/Pacific Islander",
            SizeAttribute::PercentWhite => "Percent White",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SizeAttribute::Svi => schema::SVI,
            SizeAttribute::PercentHispanic => schema::PERCENT_HISPANIC,
            SizeAttribute::PercentAian => schema::PERCENT_AIAN,
            SizeAttribute::PercentAsian => schema::PERCENT_ASIAN,
            SizeAttribute::PercentBlack => schema::PERCENT_BLACK,
            SizeAttribute::PercentNhpi => schema::PERCENT_NHPI,
            SizeAttribute::PercentWhite => schema::PERCENT_WHITE,
        }
    }
}

/// The 35 weekly community-level report dates covered by the dataset.
pub const REPORT_DATES: [&str; 35] = [
    "2022-02-24", "2022-03-03", "2022-03-10", "2022-03-17", "2022-03-24",
    "2022-03-31", "2022-04-07", "2022-04-14", "2022-04-21", "2022-04-28",
    "2022-05-05", "2022-05-12", "2022-05-19", "2022-05-26", "2022-06-02",
    "2022-06-09", "2022-06-16", "2022-06-23", "2022-06-30", "2022-07-07",
    "2022-07-14", "2022-07-21", "2022-07-28", "2022-08-04", "2022-08-11",
    "2022-08-18", "2022-08-25", "2022-09-01", "2022-09-08", "2022-09-15",
    "2022-09-22", "2022-09-29", "2022-10-06", "2022-10-13", "2022-10-20",
];

/// Map scope options: the country view plus the 50 states.
pub const US_STATES: [&str; 51] = [
    "Country View", "Alabama", "Alaska", "Arizona", "Arkansas", "California",
    "Colorado", "Connecticut", "Delaware", "Florida", "Georgia", "Hawaii",
    "Idaho", "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana",
    "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada",
    "New Hampshire", "New Jersey", "New Mexico", "New York", "North Carolina",
    "North Dakota", "Ohio", "Oklahoma", "Oregon", "Pennsylvania",
    "Rhode Island", "South Carolina", "South Dakota", "Tennessee", "Texas",
    "Utah", "Vermont", "Virginia", "Washington", "West Virginia", "Wisconsin",
    "Wyoming",
];
