//! Boundary geometry helpers
//!
//! The hesitancy source carries county and state boundaries as WKT text.
//! The pipeline never projects or redraws geometry; it only needs bounding
//! rectangles for state zoom extents and centroids for secondary-attribute
//! markers.

use crate::error::{AtlasError, Result};
use geo::{BoundingRect, Centroid};
use geo_types::Geometry;
use serde::Serialize;
use wkt::TryFromWkt;

/// Alaska's rendered eastern boundary is capped at this longitude; the
/// Aleutian chain crosses the anti-meridian and would otherwise stretch the
/// extent across the whole map.
pub const ALASKA_EAST_CAP: f64 = -130.0;

/// Axis-aligned lon/lat bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Parse a boundary's WKT text into a geometry.
pub fn parse_boundary(wkt_text: &str) -> Result<Geometry<f64>> {
    Geometry::try_from_wkt_str(wkt_text).map_err(|e| AtlasError::Geometry {
        detail: e.to_string(),
    })
}

/// Bounding box of a geometry, `None` for empty geometries.
pub fn bounding_extent(geometry: &Geometry<f64>) -> Option<Extent> {
    geometry.bounding_rect().map(|rect| Extent {
        min_x: rect.min().x,
        min_y: rect.min().y,
        max_x: rect.max().x,
        max_y: rect.max().y,
    })
}

/// Centroid of a geometry as `(lon, lat)`.
pub fn centroid(geometry: &Geometry<f64>) -> Option<(f64, f64)> {
    geometry.centroid().map(|p| (p.x(), p.y()))
}

/// Zoom extent for a state view, computed from the state boundary's WKT,
/// with the Alaska east-cap applied.
pub fn state_extent(state: &str, boundary_wkt: &str) -> Result<Option<Extent>> {
    let geometry = parse_boundary(boundary_wkt)?;
    let mut extent = bounding_extent(&geometry);
    if state == "Alaska" {
        if let Some(e) = extent.as_mut() {
            e.max_x = e.max_x.min(ALASKA_EAST_CAP);
        }
    }
    Ok(extent)
}
