//! Stream graph assembler
//!
//! Counts counties per report date per category over the full community
//! table. Community level uses the fixed Low/Medium/High order; numeric
//! attributes are quantile-binned once over the whole table so every date
//! shares the same intervals, stacked in ascending order.

use crate::attributes::{StreamAttribute, REPORT_DATES};
use crate::binning::{self, BinnedColumn};
use crate::error::Result;
use crate::palette::{self, Color};
use crate::schema;
use crate::views::column_str;
use polars::prelude::DataFrame;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Bucket count for numeric stream attributes.
pub const STREAM_BUCKETS: usize = 6;

const COMMUNITY_LEVELS: [&str; 3] = ["Low", "Medium", "High"];

#[derive(Clone, Debug, Serialize)]
pub struct StreamLayer {
    pub label: String,
    pub color: Color,
    /// One count per report date, in report-date order.
    pub counts: Vec<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StreamGraph {
    pub attribute: String,
    pub dates: Vec<String>,
    /// Stack order matches this order: ascending intervals, or
    /// Low/Medium/High for the community level.
    pub layers: Vec<StreamLayer>,
    pub x_label: &'static str,
    pub y_label: String,
}

fn date_indices(community: &DataFrame) -> Result<Vec<Option<usize>>> {
    let index: FxHashMap<&str, usize> = REPORT_DATES
        .iter()
        .enumerate()
        .map(|(i, d)| (*d, i))
        .collect();
    let dates = column_str(community, schema::DATE_UPDATED)?;
    Ok(dates
        .iter()
        .map(|opt| opt.as_deref().and_then(|d| index.get(d).copied()))
        .collect())
}

fn level_layers(community: &DataFrame, dates: &[Option<usize>]) -> Result<Vec<StreamLayer>> {
    let levels = column_str(community, schema::COMMUNITY_LEVEL)?;
    let colors = palette::sequential(COMMUNITY_LEVELS.len());
    let mut counts = vec![vec![0u32; REPORT_DATES.len()]; COMMUNITY_LEVELS.len()];

    for (row, date_idx) in dates.iter().enumerate() {
        let (Some(date_idx), Some(level)) = (date_idx, levels[row].as_deref()) else {
            continue;
        };
        if let Some(layer) = COMMUNITY_LEVELS.iter().position(|l| *l == level) {
            counts[layer][*date_idx] += 1;
        }
    }

    Ok(COMMUNITY_LEVELS
        .iter()
        .zip(colors)
        .zip(counts)
        .map(|((label, color), counts)| StreamLayer {
            label: (*label).to_string(),
            color,
            counts,
        })
        .collect())
}

fn binned_layers(binned: &BinnedColumn, dates: &[Option<usize>]) -> Vec<StreamLayer> {
    let mut counts = vec![vec![0u32; REPORT_DATES.len()]; binned.intervals.len()];
    for (row, date_idx) in dates.iter().enumerate() {
        let (Some(date_idx), Some(bucket)) =
            (date_idx, binned.assignments.get(row).copied().flatten())
        else {
            continue;
        };
        counts[bucket][*date_idx] += 1;
    }

    binned
        .labels
        .iter()
        .zip(counts)
        .map(|(label, counts)| StreamLayer {
            label: label.clone(),
            color: binned.colors[label],
            counts,
        })
        .collect()
}

/// Assemble the stream graph for `attribute` over the full community table.
pub fn assemble(community: &DataFrame, attribute: StreamAttribute) -> Result<StreamGraph> {
    let dates = date_indices(community)?;

    let layers = match attribute {
        StreamAttribute::CommunityLevel => level_layers(community, &dates)?,
        StreamAttribute::Cases100k | StreamAttribute::Hospital100k => {
            let binned = binning::bin_column(community, attribute.column(), STREAM_BUCKETS)?;
            binned_layers(&binned, &dates)
        }
    };

    Ok(StreamGraph {
        attribute: attribute.label().to_string(),
        dates: REPORT_DATES.iter().map(|d| (*d).to_string()).collect(),
        layers,
        x_label: "Report Date",
        y_label: format!("Number of Counties for each range of: {}", attribute.label()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn community() -> DataFrame {
        df! {
            "county_fips" => &[1i64, 2, 3, 1, 2, 3],
            "community_level" => &["Low", "Low", "High", "Medium", "High", "High"],
            "cases_100k" => &[10.0f64, 10.0, 10.0, 50.0, 50.0, 90.0],
            "date_updated" => &[
                "2022-02-24", "2022-02-24", "2022-02-24",
                "2022-03-03", "2022-03-03", "2022-03-03",
            ],
        }
        .unwrap()
    }

    #[test]
    fn test_community_level_fixed_order() {
        let graph = assemble(&community(), StreamAttribute::CommunityLevel).unwrap();
        let labels: Vec<&str> = graph.layers.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Low", "Medium", "High"]);

        assert_eq!(graph.layers[0].counts[0], 2); // Low on 2022-02-24
        assert_eq!(graph.layers[1].counts[1], 1); // Medium on 2022-03-03
        assert_eq!(graph.layers[2].counts[0], 1);
        assert_eq!(graph.layers[2].counts[1], 2);
    }

    #[test]
    fn test_numeric_attribute_binned_over_all_dates() {
        let graph = assemble(&community(), StreamAttribute::Cases100k).unwrap();
        // Three distinct values collapse to three intervals.
        assert_eq!(graph.layers.len(), 3);

        // All 10.0 rows land on the first date, in the lowest interval.
        assert_eq!(graph.layers[0].counts[0], 3);
        assert_eq!(graph.layers[0].counts[1], 0);
        assert_eq!(graph.layers[1].counts[1], 2);
        assert_eq!(graph.layers[2].counts[1], 1);
    }

    #[test]
    fn test_dates_span_full_report_range() {
        let graph = assemble(&community(), StreamAttribute::CommunityLevel).unwrap();
        assert_eq!(graph.dates.len(), REPORT_DATES.len());
        assert_eq!(graph.layers[0].counts.len(), REPORT_DATES.len());
        // Dates with no data count zero.
        assert_eq!(graph.layers[0].counts[34], 0);
    }

    #[test]
    fn test_empty_table_yields_empty_numeric_layers() {
        let df = df! {
            "community_level" => &Vec::<String>::new(),
            "cases_100k" => &Vec::<f64>::new(),
            "date_updated" => &Vec::<String>::new(),
        }
        .unwrap();
        let graph = assemble(&df, StreamAttribute::Cases100k).unwrap();
        assert!(graph.layers.is_empty());
    }
}
