//! Choropleth assembler for the country and state map views
//!
//! Bins the selected attribute, colors one region per county, and emits the
//! legend in ascending interval order. State scope additionally yields a
//! zoom extent from the state boundary (Alaska east-capped). An optional
//! secondary attribute is binned independently and emitted as centroid
//! markers with its own legend.

use crate::attributes::MapAttribute;
use crate::binning::{self, BinnedColumn};
use crate::error::Result;
use crate::geometry::{self, Extent};
use crate::palette::{Color, NAN_COLOR};
use crate::schema;
use crate::views::{column_f64, column_str};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Which slice of the country the map shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapScope<'a> {
    Country,
    State(&'a str),
}

#[derive(Clone, Debug, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

#[derive(Clone, Debug, Serialize)]
pub struct Region {
    pub fips: i64,
    pub county: String,
    pub state: String,
    /// County boundary as WKT text, passed through for the renderer.
    pub boundary: String,
    pub fill: Color,
    pub value: Option<f64>,
    pub tooltip: String,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Choropleth {
    pub attribute: String,
    pub regions: Vec<Region>,
    /// Ascending interval order; stacking and legends must follow it.
    pub legend: Vec<LegendEntry>,
    pub extent: Option<Extent>,
    pub markers: Option<Vec<Marker>>,
    pub marker_legend: Option<Vec<LegendEntry>>,
}

/// Legend labels with the lowest bucket's displayed lower bound rewritten to
/// 0 when quantile-edge adjustment pushed it to zero or below.
fn display_labels(binned: &BinnedColumn) -> Vec<String> {
    let mut labels = binned.labels.clone();
    if let (Some(first), Some(label)) = (binned.intervals.first(), labels.first_mut()) {
        if first.lower <= 0.0 {
            *label = format!("(0.00, {:.2}]", first.upper);
        }
    }
    labels
}

fn legend_entries(binned: &BinnedColumn) -> Vec<LegendEntry> {
    display_labels(binned)
        .into_iter()
        .zip(binned.labels.iter())
        .map(|(display, internal)| LegendEntry {
            label: display,
            color: binned.colors[internal],
        })
        .collect()
}

fn fill_for_row(binned: &BinnedColumn, row: usize) -> Color {
    match binned.assignments.get(row).copied().flatten() {
        Some(bucket) => binned.colors[&binned.labels[bucket]],
        None => NAN_COLOR,
    }
}

/// Assemble the choropleth for `attribute` over the joined table.
pub fn assemble(
    joined: &DataFrame,
    attribute: MapAttribute,
    secondary: Option<MapAttribute>,
    scope: MapScope<'_>,
) -> Result<Choropleth> {
    let scoped = match scope {
        MapScope::Country => joined.clone(),
        MapScope::State(name) => joined
            .clone()
            .lazy()
            .filter(col(schema::STATE).eq(lit(name)))
            .collect()?,
    };
    debug!(rows = scoped.height(), ?scope, "map scope selected");

    let binned = binning::bin_column(&scoped, attribute.column(), attribute.buckets())?;
    let legend = legend_entries(&binned);

    let fips = scoped.column(schema::COUNTY_FIPS)?.i64()?.to_vec();
    let counties = column_str(&scoped, schema::COUNTY)?;
    let states = column_str(&scoped, schema::STATE)?;
    let boundaries = column_str(&scoped, schema::COUNTY_BOUNDARY)?;
    let values = column_f64(&scoped, attribute.column())?;

    let mut regions = Vec::with_capacity(scoped.height());
    for row in 0..scoped.height() {
        let county = counties[row].clone().unwrap_or_default();
        let state = states[row].clone().unwrap_or_default();
        let value = values[row];
        let tooltip = match value {
            Some(v) => format!("{county}, {state}: {} = {v:.2}", attribute.label()),
            None => format!("{county}, {state}: {} = no data", attribute.label()),
        };
        regions.push(Region {
            fips: fips[row].unwrap_or_default(),
            county,
            state,
            boundary: boundaries[row].clone().unwrap_or_default(),
            fill: fill_for_row(&binned, row),
            value,
            tooltip,
        });
    }

    let extent = match scope {
        MapScope::State(name) => {
            let state_boundaries = column_str(&scoped, schema::STATE_BOUNDARY)?;
            match state_boundaries.iter().flatten().next() {
                Some(wkt_text) => geometry::state_extent(name, wkt_text)?,
                None => None,
            }
        }
        MapScope::Country => None,
    };

    let (markers, marker_legend) = match secondary {
        Some(attr) => {
            let secondary_binned =
                binning::bin_column(&scoped, attr.column(), attr.buckets())?;
            let secondary_values = column_f64(&scoped, attr.column())?;
            let mut points = Vec::with_capacity(scoped.height());
            for row in 0..scoped.height() {
                let Some(wkt_text) = boundaries[row].as_deref() else {
                    continue;
                };
                let Ok(geom) = geometry::parse_boundary(wkt_text) else {
                    debug!(row, "skipping marker for unparseable county boundary");
                    continue;
                };
                let Some((x, y)) = geometry::centroid(&geom) else {
                    continue;
                };
                points.push(Marker {
                    x,
                    y,
                    color: fill_for_row(&secondary_binned, row),
                    value: secondary_values[row],
                });
            }
            (Some(points), Some(legend_entries(&secondary_binned)))
        }
        None => (None, None),
    };

    Ok(Choropleth {
        attribute: attribute.label().to_string(),
        regions,
        legend,
        extent,
        markers,
        marker_legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::bin_column;
    use polars::prelude::*;

    const SQUARE: &str =
        "POLYGON ((-86.7 40.2, -86.6 40.2, -86.6 40.5, -86.7 40.5, -86.7 40.2))";
    const STATE_SQUARE: &str =
        "POLYGON ((-88.0 38.0, -85.0 38.0, -85.0 41.8, -88.0 41.8, -88.0 38.0))";

    fn joined() -> DataFrame {
        df! {
            "county_fips" => &[18157i64, 18097, 17001, 17002, 17003, 17004],
            "county" => &["Tippecanoe", "Marion", "Adams", "Brown", "Cass", "Clark"],
            "state" => &["Indiana", "Indiana", "Illinois", "Illinois", "Illinois", "Illinois"],
            "SVI" => &[Some(0.10f64), Some(0.35), Some(0.55), Some(0.75), Some(0.95), None],
            "cases_100k" => &[12.0f64, 44.0, 80.0, 120.0, 160.0, 200.0],
            "county_boundary" => &[SQUARE; 6],
            "state_boundary" => &[STATE_SQUARE; 6],
        }
        .unwrap()
    }

    #[test]
    fn test_legend_ascending_with_region_per_row() {
        let chart = assemble(&joined(), MapAttribute::Svi, None, MapScope::Country).unwrap();
        assert_eq!(chart.regions.len(), 6);
        assert!(!chart.legend.is_empty());
        assert!(chart.extent.is_none());
        assert!(chart.markers.is_none());
    }

    #[test]
    fn test_missing_value_renders_neutral_gray() {
        let chart = assemble(&joined(), MapAttribute::Svi, None, MapScope::Country).unwrap();
        assert_eq!(chart.regions[5].fill, NAN_COLOR);
        assert_eq!(chart.regions[5].value, None);
        assert!(chart.regions[5].tooltip.contains("no data"));
        // The sentinel never appears in the legend.
        assert!(!chart.legend.iter().any(|e| e.label == binning::NAN_LABEL));
    }

    #[test]
    fn test_state_scope_filters_and_zooms() {
        let chart =
            assemble(&joined(), MapAttribute::Svi, None, MapScope::State("Indiana")).unwrap();
        assert_eq!(chart.regions.len(), 2);
        let extent = chart.extent.unwrap();
        assert_eq!(extent.min_x, -88.0);
        assert_eq!(extent.max_y, 41.8);
    }

    #[test]
    fn test_lowest_legend_bound_rewritten_to_zero() {
        // Data minimum near 0 makes the adjusted first edge negative.
        let df = df! { "x" => &[0.0f64, 0.2, 0.4, 0.6, 0.8, 1.0] }.unwrap();
        let binned = bin_column(&df, "x", 3).unwrap();
        assert!(binned.intervals[0].lower <= 0.0);

        let labels = display_labels(&binned);
        assert!(labels[0].starts_with("(0.00,"));
        // Internal labels unchanged; only the display is rewritten.
        assert!(binned.labels[0].starts_with("(-0.00,"));
    }

    #[test]
    fn test_secondary_attribute_emits_markers() {
        let chart = assemble(
            &joined(),
            MapAttribute::Svi,
            Some(MapAttribute::Cases100k),
            MapScope::Country,
        )
        .unwrap();
        let markers = chart.markers.unwrap();
        assert_eq!(markers.len(), 6);
        // Centroid of the shared square boundary.
        assert!((markers[0].x + 86.65).abs() < 1e-9);
        assert!((markers[0].y - 40.35).abs() < 1e-9);
        assert!(chart.marker_legend.unwrap().len() <= 7);
    }

    #[test]
    fn test_empty_scope_degrades_to_empty_chart() {
        let chart =
            assemble(&joined(), MapAttribute::Svi, None, MapScope::State("Ohio")).unwrap();
        assert!(chart.regions.is_empty());
        assert!(chart.legend.is_empty());
        assert!(chart.extent.is_none());
    }
}
