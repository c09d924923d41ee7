//! Column-keyed grid colors.
//!
//! Grid tile names start with their two-digit UTM column (`"01CCV"` is in
//! column 1). Each of the 60 columns gets a fixed palette entry so adjacent
//! columns are easy to tell apart.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Number of UTM columns.
pub const COLUMN_COUNT: usize = 60;
/// Hue step between consecutive palette entries.
pub const GOLDEN_ANGLE_DEG: f64 = 137.508;

const SATURATIONS: [f64; 3] = [70.0, 80.0, 90.0];
const LIGHTNESSES: [f64; 2] = [45.0, 60.0];

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Neutral grey used for names without a valid column prefix.
pub const FALLBACK_COLOR: Hsl = Hsl::new(0.0, 0.0, 53.0);

static PALETTE: Lazy<[Hsl; COLUMN_COUNT]> = Lazy::new(|| {
    std::array::from_fn(|i| {
        Hsl::new(
            (i as f64 * GOLDEN_ANGLE_DEG) % 360.0,
            SATURATIONS[i % SATURATIONS.len()],
            LIGHTNESSES[i % LIGHTNESSES.len()],
        )
    })
});

/// The 60 column colors, index `column - 1`.
pub fn palette_colors() -> &'static [Hsl; COLUMN_COUNT] {
    &PALETTE
}

/// Column number parsed from the first two characters of `name`, if they
/// are ASCII digits forming a value in `1..=60`.
pub fn column_number(name: &str) -> Option<usize> {
    let prefix = name.get(0..2)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let column: usize = prefix.parse().ok()?;
    (1..=COLUMN_COUNT).contains(&column).then_some(column)
}

pub fn color_for(name: &str) -> Hsl {
    column_number(name)
        .map(|column| palette_colors()[column - 1])
        .unwrap_or(FALLBACK_COLOR)
}

/// Stroke/fill parameters for one drawn grid primitive.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GridStyle {
    pub stroke: Hsl,
    pub fill: Hsl,
    pub weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
    /// Marker radius; only meaningful for points.
    pub radius_px: f32,
}

pub fn polygon_style(name: &str) -> GridStyle {
    let color = color_for(name);
    GridStyle {
        stroke: color,
        fill: color,
        weight: 1.5,
        opacity: 0.9,
        fill_opacity: 0.15,
        radius_px: 0.0,
    }
}

pub fn point_style(name: &str) -> GridStyle {
    let color = color_for(name);
    GridStyle {
        stroke: color,
        fill: color,
        weight: 1.0,
        opacity: 1.0,
        fill_opacity: 0.8,
        radius_px: 4.0,
    }
}

/// Style of the transient search-result highlight.
pub const HIGHLIGHT_STYLE: GridStyle = GridStyle {
    stroke: Hsl::new(51.0, 100.0, 50.0),
    fill: Hsl::new(51.0, 100.0, 50.0),
    weight: 4.0,
    opacity: 1.0,
    fill_opacity: 0.35,
    radius_px: 0.0,
};

#[cfg(test)]
mod tests {
    use super::{
        FALLBACK_COLOR, GOLDEN_ANGLE_DEG, Hsl, color_for, column_number, palette_colors,
        polygon_style,
    };

    #[test]
    fn palette_cycles_saturation_and_lightness() {
        let p = palette_colors();
        assert_eq!(p.len(), 60);
        assert_eq!(p[0], Hsl::new(0.0, 70.0, 45.0));
        assert_eq!(p[1], Hsl::new(GOLDEN_ANGLE_DEG, 80.0, 60.0));
        assert_eq!((p[2].s, p[2].l), (90.0, 45.0));
        assert_eq!((p[3].s, p[3].l), (70.0, 60.0));
        assert!(p.iter().all(|c| (0.0..360.0).contains(&c.h)));
    }

    #[test]
    fn color_is_deterministic_per_column() {
        assert_eq!(color_for("01CCV"), color_for("01CCV"));
        assert_eq!(color_for("01CCV"), palette_colors()[0]);
        assert_eq!(color_for("60XWA"), palette_colors()[59]);
        assert_ne!(color_for("01CCV"), color_for("02CCV"));
    }

    #[test]
    fn invalid_columns_fall_back() {
        assert_eq!(color_for("99XXX"), FALLBACK_COLOR);
        assert_eq!(color_for("00AAA"), FALLBACK_COLOR);
        assert_eq!(color_for("A1"), FALLBACK_COLOR);
        assert_eq!(color_for("7"), FALLBACK_COLOR);
        assert_eq!(color_for(""), FALLBACK_COLOR);
        assert_eq!(column_number("+1ABC"), None);
        assert_eq!(column_number("32TQM"), Some(32));
    }

    #[test]
    fn multibyte_names_do_not_panic() {
        assert_eq!(color_for("é1"), FALLBACK_COLOR);
    }

    #[test]
    fn polygon_style_uses_column_color() {
        let s = polygon_style("05ABC");
        assert_eq!(s.stroke, palette_colors()[4]);
        assert_eq!(s.fill, s.stroke);
    }
}
