//! Quantile interval binning shared by the map and stream views
//!
//! Bins a numeric column into `bucket_count` quantile buckets with the same
//! semantics the views were tuned against: linear-interpolation quantile
//! edges, duplicate edges collapsed (fewer effective buckets, never an
//! error), half-open `(lo, hi]` intervals labeled to 2 decimal places, and a
//! `"nan"` sentinel bucket for missing values that renders in a fixed
//! neutral gray and never joins the ordered label sequence.
//!
//! The first edge is nudged downward by 0.1% of the value range (0.001 when
//! the range is zero) so the column minimum lands inside the first half-open
//! bucket. This is why a lowest label can display a negative or zero lower
//! bound; the map view rewrites that bound to 0 for display.

use crate::error::Result;
use crate::palette::{self, Color, NAN_COLOR};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Label under which missing values are counted and colored.
pub const NAN_LABEL: &str = "nan";

/// Half-open numeric range `(lower, upper]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn contains(&self, value: f64) -> bool {
        value > self.lower && value <= self.upper
    }

    /// Canonical display label, bounds rounded to 2 decimal places.
    pub fn label(&self) -> String {
        format!("({:.2}, {:.2}]", self.lower, self.upper)
    }
}

/// Result of binning one column: per-row bucket assignments, the effective
/// intervals in ascending order, their labels in the same order, and the
/// label→color map (sentinel included in the map, never in the label list).
#[derive(Clone, Debug)]
pub struct BinnedColumn {
    pub assignments: Vec<Option<usize>>,
    pub intervals: Vec<Interval>,
    pub labels: Vec<String>,
    pub colors: FxHashMap<String, Color>,
}

impl BinnedColumn {
    /// Display label for a row: its interval label, or the sentinel.
    pub fn label_for_row(&self, row: usize) -> &str {
        match self.assignments.get(row).copied().flatten() {
            Some(bucket) => &self.labels[bucket],
            None => NAN_LABEL,
        }
    }

    /// Row count per interval, ascending interval order.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.intervals.len()];
        for assignment in self.assignments.iter().flatten() {
            counts[*assignment] += 1;
        }
        counts
    }

    fn empty(rows: usize) -> Self {
        let mut colors = FxHashMap::default();
        colors.insert(NAN_LABEL.to_string(), NAN_COLOR);
        BinnedColumn {
            assignments: vec![None; rows],
            intervals: Vec::new(),
            labels: Vec::new(),
            colors,
        }
    }
}

/// Linear-interpolation quantile over pre-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Extract a column as f64 with NaN treated as missing.
fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let cast = df.column(column)?.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    Ok(ca
        .into_iter()
        .map(|opt| opt.filter(|v| !v.is_nan()))
        .collect())
}

/// Quantile-bin `column` into at most `bucket_count` intervals.
///
/// A zero-row (or all-missing) input yields an empty `BinnedColumn` whose
/// color map holds only the sentinel; downstream views degrade to an empty
/// legend and no drawn marks.
pub fn bin_column(df: &DataFrame, column: &str, bucket_count: usize) -> Result<BinnedColumn> {
    let values = numeric_values(df, column)?;

    let mut non_missing: Vec<f64> = values.iter().copied().flatten().collect();
    if non_missing.is_empty() || bucket_count == 0 {
        return Ok(BinnedColumn::empty(values.len()));
    }
    non_missing.sort_by(f64::total_cmp);

    // Quantile edges with duplicate collapse. More buckets than distinct
    // values just produces fewer intervals.
    let mut edges: Vec<f64> = Vec::with_capacity(bucket_count + 1);
    for i in 0..=bucket_count {
        let edge = quantile(&non_missing, i as f64 / bucket_count as f64);
        if edges.last() != Some(&edge) {
            edges.push(edge);
        }
    }

    let span = non_missing[non_missing.len() - 1] - non_missing[0];
    let adjust = if span > 0.0 { span * 0.001 } else { 0.001 };

    let intervals: Vec<Interval> = if edges.len() == 1 {
        // All values identical: one interval containing them.
        vec![Interval {
            lower: edges[0] - adjust,
            upper: edges[0],
        }]
    } else {
        edges
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Interval {
                lower: if i == 0 { pair[0] - adjust } else { pair[0] },
                upper: pair[1],
            })
            .collect()
    };

    let assignments: Vec<Option<usize>> = values
        .iter()
        .map(|opt| {
            opt.map(|v| {
                intervals
                    .iter()
                    .position(|interval| interval.contains(v))
                    // Values sit inside [min, max] by construction; guard the
                    // top edge against float drift.
                    .unwrap_or(intervals.len() - 1)
            })
        })
        .collect();

    let labels: Vec<String> = intervals.iter().map(Interval::label).collect();
    let palette = palette::sequential(intervals.len());
    let mut colors: FxHashMap<String, Color> = labels
        .iter()
        .cloned()
        .zip(palette.into_iter())
        .collect();
    colors.insert(NAN_LABEL.to_string(), NAN_COLOR);

    Ok(BinnedColumn {
        assignments,
        intervals,
        labels,
        colors,
    })
}

/// Append the per-row bucket labels as a string column named `name`.
pub fn with_bucket_labels(df: &DataFrame, binned: &BinnedColumn, name: &str) -> Result<DataFrame> {
    let labels: Vec<&str> = (0..df.height()).map(|row| binned.label_for_row(row)).collect();
    let mut out = df.clone();
    out.with_column(Series::new(name.into(), labels))?;
    Ok(out)
}
