//! Bubble scatter assembler
//!
//! One series per community level present after filtering: x is the hesitant
//! plus strongly-hesitant share, y the unvaccinated share, mark size the
//! scaled size attribute. Thresholds run before the completeness drop, and
//! the size legend shows the max/median/min of the scaled attribute.

use crate::attributes::SizeAttribute;
use crate::error::Result;
use crate::filter::{self, SizeScaling};
use crate::palette::{self, Color};
use crate::schema;
use crate::views::{column_f64, column_str};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::debug;

/// User-adjustable thresholds for the bubble view.
#[derive(Clone, Copy, Debug)]
pub struct BubbleOptions {
    /// Inclusive county population floor.
    pub population_floor: f64,
    /// Inclusive SVI range.
    pub svi_range: (f64, f64),
    pub scaling: SizeScaling,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        BubbleOptions {
            population_floor: 25_000.0,
            svi_range: (0.0, 1.0),
            scaling: SizeScaling::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BubbleSeries {
    pub level: String,
    pub color: Color,
    pub points: Vec<BubblePoint>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BubbleChart {
    pub series: Vec<BubbleSeries>,
    /// Max, median, min of the scaled size attribute, scaled by 100 for the
    /// size legend.
    pub size_legend: [f64; 3],
    pub size_legend_title: String,
    pub level_legend_title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub title: &'static str,
    pub y_range: (f64, f64),
}

/// Assemble the bubble chart from the joined table for the current date.
pub fn assemble(
    joined: &DataFrame,
    size_attribute: SizeAttribute,
    options: &BubbleOptions,
) -> Result<BubbleChart> {
    let filtered = filter::filter_by_minimum(
        joined,
        schema::COUNTY_POPULATION,
        options.population_floor,
    )?;
    let filtered =
        filter::filter_by_range(&filtered, schema::SVI, options.svi_range.0, options.svi_range.1)?;

    let required = [
        schema::COMMUNITY_LEVEL,
        schema::PERCENT_HESITANT,
        schema::PERCENT_STRONGLY_HESITANT,
        schema::PERCENT_VACCINATED,
        size_attribute.column(),
    ];
    let complete = filter::drop_incomplete(&filtered, &required)?;
    debug!(rows = complete.height(), "bubble rows after thresholds");

    let scaled = filter::normalize_column(&complete, size_attribute.column(), options.scaling)?;
    let scaled_column = format!("{}_scaled", size_attribute.column());

    let levels = column_str(&scaled, schema::COMMUNITY_LEVEL)?;
    let hesitant = column_f64(&scaled, schema::PERCENT_HESITANT)?;
    let strongly = column_f64(&scaled, schema::PERCENT_STRONGLY_HESITANT)?;
    let vaccinated = column_f64(&scaled, schema::PERCENT_VACCINATED)?;
    let sizes = column_f64(&scaled, &scaled_column)?;

    // Distinct levels in order of appearance; the palette sizes itself to
    // the categories actually present.
    let mut present: Vec<String> = Vec::new();
    for level in levels.iter().flatten() {
        if !present.iter().any(|l| l == level) {
            present.push(level.clone());
        }
    }
    let colors = palette::sequential(present.len());

    let mut series: Vec<BubbleSeries> = present
        .iter()
        .zip(colors)
        .map(|(level, color)| BubbleSeries {
            level: level.clone(),
            color,
            points: Vec::new(),
        })
        .collect();

    for row in 0..scaled.height() {
        let (Some(level), Some(h), Some(s), Some(v), Some(size)) = (
            levels[row].as_ref(),
            hesitant[row],
            strongly[row],
            vaccinated[row],
            sizes[row],
        ) else {
            continue;
        };
        if let Some(entry) = series.iter_mut().find(|e| &e.level == level) {
            entry.points.push(BubblePoint {
                x: h + s,
                y: 1.0 - v,
                size: size * 150.0,
            });
        }
    }

    let mut sorted_sizes: Vec<f64> = sizes.iter().copied().flatten().collect();
    sorted_sizes.sort_by(f64::total_cmp);
    let size_legend = if sorted_sizes.is_empty() {
        [0.0; 3]
    } else {
        let median = sorted_sizes[sorted_sizes.len() / 2];
        [
            sorted_sizes[sorted_sizes.len() - 1] * 100.0,
            median * 100.0,
            sorted_sizes[0] * 100.0,
        ]
    };

    Ok(BubbleChart {
        series,
        size_legend,
        size_legend_title: size_attribute.label().to_string(),
        level_legend_title: "Community Level",
        x_label: "Percentage of Adults Hesitant/Strongly Hesitant",
        y_label: "Percentage of Adults Unvaccinated",
        title: "Percentage of County Hesitant vs. Unvaccinated",
        y_range: (0.2, 0.8),
    })
}
