//! Sequential color palette for interval shading
//!
//! A single cividis colormap drives every categorical/interval encoding:
//! choropleth fills, stream layers, and the bubble view's community-level
//! legend all request `sequential(n)` sized to the number of categories
//! actually present. Missing values always render as [`NAN_COLOR`].

use serde::{Serialize, Serializer};

/// RGB color, serialized as a `#rrggbb` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Fixed neutral gray for the missing-value sentinel bucket.
pub const NAN_COLOR: Color = Color {
    r: 0x80,
    g: 0x80,
    b: 0x80,
};

/// Cividis anchor stops, darkest to brightest.
const CIVIDIS_STOPS: [Color; 10] = [
    Color { r: 0x00, g: 0x20, b: 0x4d },
    Color { r: 0x00, g: 0x33, b: 0x6f },
    Color { r: 0x39, g: 0x48, b: 0x6b },
    Color { r: 0x57, g: 0x5d, b: 0x6d },
    Color { r: 0x70, g: 0x71, b: 0x73 },
    Color { r: 0x8a, g: 0x87, b: 0x79 },
    Color { r: 0xa6, g: 0x9d, b: 0x75 },
    Color { r: 0xc4, g: 0xb5, b: 0x6c },
    Color { r: 0xe4, g: 0xcf, b: 0x5b },
    Color { r: 0xff, g: 0xea, b: 0x46 },
];

impl Color {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Componentwise linear interpolation, `t` clamped to [0, 1].
    fn lerp(a: Color, b: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| -> u8 { (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8 };
        Color {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Sample the colormap at `t` in [0, 1] by interpolating between the
/// bracketing anchor stops.
fn sample(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let segments = (CIVIDIS_STOPS.len() - 1) as f64;
    let pos = t * segments;
    let lo = pos.floor() as usize;
    if lo >= CIVIDIS_STOPS.len() - 1 {
        return CIVIDIS_STOPS[CIVIDIS_STOPS.len() - 1];
    }
    Color::lerp(CIVIDIS_STOPS[lo], CIVIDIS_STOPS[lo + 1], pos - lo as f64)
}

/// `n` evenly spaced colors spanning the colormap, darkest first.
///
/// `n = 1` yields the darkest stop, matching how the upstream palette
/// generator sizes itself to a single category.
pub fn sequential(n: usize) -> Vec<Color> {
    match n {
        0 => Vec::new(),
        1 => vec![CIVIDIS_STOPS[0]],
        _ => (0..n)
            .map(|i| sample(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_sizes() {
        assert!(sequential(0).is_empty());
        assert_eq!(sequential(1), vec![CIVIDIS_STOPS[0]]);
        for n in [2usize, 3, 6, 7, 12] {
            assert_eq!(sequential(n).len(), n);
        }
    }

    #[test]
    fn test_sequential_spans_full_range() {
        let colors = sequential(5);
        assert_eq!(colors[0], CIVIDIS_STOPS[0]);
        assert_eq!(colors[4], CIVIDIS_STOPS[9]);
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(NAN_COLOR.to_hex(), "#808080");
        assert_eq!(CIVIDIS_STOPS[0].to_hex(), "#00204d");
    }

    #[test]
    fn test_serializes_as_hex() {
        let json = serde_json::to_string(&NAN_COLOR).unwrap();
        assert_eq!(json, "\"#808080\"");
    }
}
