//! # Room Dimensions
//!
//! Parses free-form dimension and area text into canonical metric geometry.
//!
//! ## Accepted Formats
//!
//! - Imperial pairs with feet marks, inches optional: `12'-6" x 14'-0"`, `15' x 20'`, `12 ft x 14 ft`
//! - Metric pairs, comma or dot decimals: `3,5 x 4,2`, `3.5 m x 4.2 m`
//! - Metric areas: `14.8 m²`, `14,8 m2`, `20 sq m`
//! - Imperial areas: `150 sq ft`, `150 sqft`, `150 sf`, `150 ft²`
//!
//! Unmarked numbers (`16 x 12`, `192`) follow the unit hint: feet and square
//! feet when the hint is imperial, meters and square meters otherwise.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::dimensions::DimensionParser;
//!
//! let dims = DimensionParser::parse("12'-6\" x 14'-0\"").unwrap();
//! assert!((dims.width_m - 3.81).abs() < 0.01);
//! assert!((dims.length_m - 4.27).abs() < 0.01);
//!
//! let area = DimensionParser::parse_area("150 sq ft").unwrap();
//! assert!((area - 13.94).abs() < 0.01);
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{Feet, Meters, SquareFeet, SquareMeters, FEET_PER_METER, SQFT_PER_SQM};

/// Default ceiling height in meters (8 ft)
pub const DEFAULT_CEILING_HEIGHT_M: f64 = 2.4;

const FEET_MARK: &str = r#"(?:'|’|′|ft\.?|feet|foot)"#;
const INCH_MARK: &str = r#"(?:''|"|”|″|in\.?|inches)"#;

// Thousands grouping (`1,200`, `12,500.5`) before a single decimal comma or dot.
const AREA_NUMBER: &str = r"(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:[.,]\d+)?)";

// Numbers never start in the middle of another number.
static IMPERIAL_PAIR: Lazy<Regex> = Lazy::new(|| {
    let axis = format!(r"(\d+(?:\.\d+)?)\s*(?:({FEET_MARK})\s*-?\s*(?:(\d+(?:\.\d+)?)\s*{INCH_MARK}?)?)?");
    Regex::new(&format!(r"(?i)(?:^|[^\d.,]){axis}\s*[x×*]\s*{axis}")).expect("imperial pair pattern is valid")
});

static METRIC_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\d.,])(\d+(?:[.,]\d+)?)\s*(m|meters?|metres?)?\s*[x×*]\s*(\d+(?:[.,]\d+)?)\s*(m|meters?|metres?)?",
    )
    .expect("metric pair pattern is valid")
});

static AREA_METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:^|[^\d.,]){AREA_NUMBER}\s*(?:m²|m2|m\^2|sq\.?\s*m(?:eters?|etres?)?\b|sqm|square\s+met(?:er|re)s?)"
    ))
    .expect("metric area pattern is valid")
});

static AREA_IMPERIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:^|[^\d.,]){AREA_NUMBER}\s*(?:sq\.?\s*f(?:ee)?t\.?|sqft|sf\b|ft²|ft2|ft\^2|square\s+f(?:ee|oo)t)"
    ))
    .expect("imperial area pattern is valid")
});

static BARE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\s*{AREA_NUMBER}\s*$")).expect("bare number pattern is valid"));

static GROUPED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:,\d{3})+(?:\.\d+)?$").expect("grouped number pattern is valid"));

/// Unit system declared for a room's dimension strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Meters and square meters
    Metric,
    /// Feet, inches and square feet
    Imperial,
}

impl UnitSystem {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" | "m" => Ok(UnitSystem::Metric),
            "imperial" | "us" | "customary" | "ft" => Ok(UnitSystem::Imperial),
            _ => Err(EstimateError::invalid_config(
                "unit_system",
                s,
                "Expected 'metric' or 'imperial'",
            )),
        }
    }
}

/// How a room's footprint was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DimensionSource {
    /// Width and length were read from the input
    #[default]
    Measured,
    /// Only an area was known; the footprint is a square of the same area
    EstimatedFromArea,
}

/// Canonical room geometry in meters.
///
/// Wall area counts four full walls with no door or window openings deducted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Room width (m)
    pub width_m: f64,
    /// Room length (m)
    pub length_m: f64,
    /// Ceiling height (m)
    pub height_m: f64,
    /// Whether the footprint was measured or estimated
    #[serde(default)]
    pub source: DimensionSource,
}

impl Dimensions {
    /// Create measured dimensions, rejecting non-positive or non-finite values.
    pub fn new(width_m: f64, length_m: f64, height_m: f64) -> EstimateResult<Self> {
        check_positive("width_m", width_m)?;
        check_positive("length_m", length_m)?;
        check_positive("height_m", height_m)?;
        Ok(Dimensions {
            width_m,
            length_m,
            height_m,
            source: DimensionSource::Measured,
        })
    }

    /// Estimate a square footprint (side = √area) from a floor area alone.
    pub fn square_from_area(area_m2: f64, height_m: f64) -> EstimateResult<Self> {
        check_positive("area_m2", area_m2)?;
        let side = area_m2.sqrt();
        let mut dims = Dimensions::new(side, side, height_m)?;
        dims.source = DimensionSource::EstimatedFromArea;
        Ok(dims)
    }

    /// Replace the ceiling height.
    pub fn with_height(self, height_m: f64) -> EstimateResult<Self> {
        check_positive("height_m", height_m)?;
        Ok(Dimensions { height_m, ..self })
    }

    /// Floor area = width × length (m²)
    pub fn floor_area_m2(&self) -> f64 {
        self.width_m * self.length_m
    }

    /// Perimeter = 2 × (width + length) (m)
    pub fn perimeter_m(&self) -> f64 {
        2.0 * (self.width_m + self.length_m)
    }

    /// Wall area = perimeter × height (m²)
    pub fn wall_area_m2(&self) -> f64 {
        self.perimeter_m() * self.height_m
    }

    pub fn floor_area_sqft(&self) -> f64 {
        self.floor_area_m2() * SQFT_PER_SQM
    }

    pub fn wall_area_sqft(&self) -> f64 {
        self.wall_area_m2() * SQFT_PER_SQM
    }

    pub fn width_ft(&self) -> f64 {
        self.width_m * FEET_PER_METER
    }

    pub fn length_ft(&self) -> f64 {
        self.length_m * FEET_PER_METER
    }

    /// True when the footprint is a square estimated from area
    pub fn is_estimated(&self) -> bool {
        self.source == DimensionSource::EstimatedFromArea
    }
}

fn check_positive(field: &str, value: f64) -> EstimateResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive, finite number",
        ))
    }
}

/// Parses dimension and area strings.
pub struct DimensionParser;

impl DimensionParser {
    /// Parse a dimension pair with no unit hint (unmarked numbers are meters).
    ///
    /// The returned dimensions use [`DEFAULT_CEILING_HEIGHT_M`].
    pub fn parse(dimension: &str) -> Option<Dimensions> {
        Self::parse_with_hint(dimension, None)
    }

    /// Parse a dimension pair such as `12'-6" x 14'-0"` or `3,5 x 4,2`.
    ///
    /// Imperial feet-inches pairs are tried first, then metric decimal pairs.
    /// When only one axis carries a feet mark (`12' x 14`) the other is read
    /// in feet too. Returns `None` when nothing matches or an axis is zero.
    pub fn parse_with_hint(dimension: &str, hint: Option<UnitSystem>) -> Option<Dimensions> {
        let text = dimension.trim();
        if text.is_empty() {
            return None;
        }

        // One feet mark makes the whole pair imperial.
        let imperial = IMPERIAL_PAIR
            .captures(text)
            .filter(|caps| caps.get(2).is_some() || caps.get(5).is_some());
        if let Some(caps) = imperial {
            let width = Feet::from_feet_inches(number(&caps, 1)?, number(&caps, 3).unwrap_or(0.0));
            let length = Feet::from_feet_inches(number(&caps, 4)?, number(&caps, 6).unwrap_or(0.0));
            let width_m: Meters = width.into();
            let length_m: Meters = length.into();
            return Dimensions::new(width_m.0, length_m.0, DEFAULT_CEILING_HEIGHT_M).ok();
        }

        if let Some(caps) = METRIC_PAIR.captures(text) {
            let width = number(&caps, 1)?;
            let length = number(&caps, 3)?;
            let marked_metric = caps.get(2).is_some() || caps.get(4).is_some();
            let (width_m, length_m) = if !marked_metric && hint == Some(UnitSystem::Imperial) {
                (Meters::from(Feet(width)).0, Meters::from(Feet(length)).0)
            } else {
                (width, length)
            };
            return Dimensions::new(width_m, length_m, DEFAULT_CEILING_HEIGHT_M).ok();
        }

        None
    }

    /// Parse an area string with no unit hint, returning m².
    pub fn parse_area(area: &str) -> Option<f64> {
        Self::parse_area_with_hint(area, None)
    }

    /// Parse an area string, returning m².
    ///
    /// Metric areas are tried first, then imperial (converted at 10.7639 sq ft/m²),
    /// then a bare number interpreted through the hint. `1,200` is a thousands
    /// group; a lone comma with other digit counts (`14,8`) is a decimal.
    /// Mixed European grouping such as `1.200,5` is not read at all.
    pub fn parse_area_with_hint(area: &str, hint: Option<UnitSystem>) -> Option<f64> {
        let text = area.trim();
        if text.is_empty() {
            return None;
        }

        let area_m2 = if let Some(caps) = AREA_METRIC.captures(text) {
            area_number(&caps, 1)?
        } else if let Some(caps) = AREA_IMPERIAL.captures(text) {
            SquareMeters::from(SquareFeet(area_number(&caps, 1)?)).0
        } else if let Some(caps) = BARE_NUMBER.captures(text) {
            let value = area_number(&caps, 1)?;
            match hint {
                Some(UnitSystem::Imperial) => SquareMeters::from(SquareFeet(value)).0,
                Some(UnitSystem::Metric) | None => value,
            }
        } else {
            return None;
        };

        (area_m2.is_finite() && area_m2 > 0.0).then_some(area_m2)
    }

    /// Resolve a room's geometry from optional width/length and area strings.
    ///
    /// Width and length win when both parse; otherwise the area is turned into
    /// a square footprint. `None` means the room has no usable geometry.
    pub fn resolve(
        width: Option<&str>,
        length: Option<&str>,
        area: Option<&str>,
        hint: Option<UnitSystem>,
        height_m: f64,
    ) -> Option<Dimensions> {
        let width = width.map(str::trim).filter(|s| !s.is_empty());
        let length = length.map(str::trim).filter(|s| !s.is_empty());

        if let (Some(w), Some(l)) = (width, length) {
            let pair = format!("{} x {}", w, l);
            if let Some(dims) = Self::parse_with_hint(&pair, hint) {
                return dims.with_height(height_m).ok();
            }
        }

        let area_m2 = Self::parse_area_with_hint(area?, hint)?;
        Dimensions::square_from_area(area_m2, height_m).ok()
    }
}

fn number(caps: &Captures<'_>, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().replace(',', ".").parse().ok()
}

fn area_number(caps: &Captures<'_>, index: usize) -> Option<f64> {
    let raw = caps.get(index)?.as_str();
    if GROUPED_NUMBER.is_match(raw) {
        raw.replace(',', "").parse().ok()
    } else {
        raw.replace(',', ".").parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_derived_geometry() {
        for (w, l, h) in [(3.0, 4.0, 2.4), (0.5, 12.25, 3.1), (7.7, 7.7, 2.0)] {
            let dims = Dimensions::new(w, l, h).unwrap();
            assert!(close(dims.floor_area_m2(), w * l, 1e-6));
            assert!(close(dims.wall_area_m2(), 2.0 * (w + l) * h, 1e-6));
            assert!(close(dims.perimeter_m(), 2.0 * (w + l), 1e-6));
        }
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(Dimensions::new(0.0, 3.0, 2.4).is_err());
        assert!(Dimensions::new(3.0, -1.0, 2.4).is_err());
        assert!(Dimensions::new(3.0, 3.0, f64::NAN).is_err());
        assert!(Dimensions::square_from_area(0.0, 2.4).is_err());
    }

    #[test]
    fn test_parse_imperial_feet_inches() {
        let dims = DimensionParser::parse("12'-6\" x 14'-0\"").unwrap();
        assert!(close(dims.width_m, 3.81, 0.01));
        assert!(close(dims.length_m, 4.27, 0.01));
        assert_eq!(dims.height_m, DEFAULT_CEILING_HEIGHT_M);
        assert!(!dims.is_estimated());
    }

    #[test]
    fn test_parse_imperial_feet_only() {
        let dims = DimensionParser::parse("15' x 20'").unwrap();
        assert!(close(dims.width_ft(), 15.0, 1e-3));
        assert!(close(dims.length_ft(), 20.0, 1e-3));

        let dims = DimensionParser::parse("12 ft x 14 ft").unwrap();
        assert!(close(dims.floor_area_sqft(), 168.0, 0.01));
    }

    #[test]
    fn test_parse_metric_comma_decimal() {
        let dims = DimensionParser::parse("3,5 x 4,2").unwrap();
        assert!(close(dims.width_m, 3.5, 1e-9));
        assert!(close(dims.length_m, 4.2, 1e-9));
    }

    #[test]
    fn test_parse_metric_with_units() {
        let dims = DimensionParser::parse("3.5 m × 4.2 m").unwrap();
        assert!(close(dims.floor_area_m2(), 14.7, 1e-9));

        // Explicit meters ignore an imperial hint
        let dims = DimensionParser::parse_with_hint("3.5m x 4.2m", Some(UnitSystem::Imperial)).unwrap();
        assert!(close(dims.width_m, 3.5, 1e-9));
    }

    #[test]
    fn test_parse_pair_with_one_feet_mark() {
        let dims = DimensionParser::parse_with_hint("12' x 14", Some(UnitSystem::Imperial)).unwrap();
        assert!(close(dims.width_ft(), 12.0, 1e-3));
        assert!(close(dims.length_ft(), 14.0, 1e-3));

        let dims = DimensionParser::parse("12 x 14'-6\"").unwrap();
        assert!(close(dims.width_ft(), 12.0, 1e-3));
        assert!(close(dims.length_ft(), 14.5, 1e-3));

        let dims = DimensionParser::resolve(Some("12'"), Some("14"), None, Some(UnitSystem::Imperial), 2.4).unwrap();
        assert!(close(dims.floor_area_sqft(), 168.0, 0.05));
        assert!(!dims.is_estimated());
    }

    #[test]
    fn test_unmarked_numbers_follow_hint() {
        let metric = DimensionParser::parse_with_hint("16 x 12", Some(UnitSystem::Metric)).unwrap();
        assert!(close(metric.width_m, 16.0, 1e-9));

        let imperial = DimensionParser::parse_with_hint("16 x 12", Some(UnitSystem::Imperial)).unwrap();
        assert!(close(imperial.width_ft(), 16.0, 1e-3));
        assert!(close(imperial.length_ft(), 12.0, 1e-3));
    }

    #[test]
    fn test_parse_rejects_garbage_and_zero() {
        assert!(DimensionParser::parse("").is_none());
        assert!(DimensionParser::parse("about twelve by fourteen").is_none());
        assert!(DimensionParser::parse("0 x 4").is_none());
    }

    #[test]
    fn test_parse_area_metric() {
        assert!(close(DimensionParser::parse_area("14.8 m²").unwrap(), 14.8, 1e-9));
        assert!(close(DimensionParser::parse_area("14,8 m2").unwrap(), 14.8, 1e-9));
        assert!(close(DimensionParser::parse_area("20 sq m").unwrap(), 20.0, 1e-9));
    }

    #[test]
    fn test_parse_area_imperial() {
        let area = DimensionParser::parse_area("150 sq ft").unwrap();
        assert!(close(area, 150.0 / 10.7639, 1e-9));
        assert!(DimensionParser::parse_area("150 sqft").is_some());
        assert!(DimensionParser::parse_area("150 SF").is_some());
        assert!(DimensionParser::parse_area("Approx. 80 sq. ft.").is_some());
    }

    #[test]
    fn test_parse_area_thousands_separator() {
        let area = DimensionParser::parse_area("1,200 sq ft").unwrap();
        assert!(close(area, 1200.0 / 10.7639, 1e-9));

        assert!(close(DimensionParser::parse_area("1,234.5 m²").unwrap(), 1234.5, 1e-9));
        assert!(close(DimensionParser::parse_area("12,500 sqft").unwrap(), 12500.0 / 10.7639, 1e-9));

        let bare = DimensionParser::parse_area_with_hint("1,200", Some(UnitSystem::Imperial)).unwrap();
        assert!(close(bare, 1200.0 / 10.7639, 1e-9));

        // Single decimal comma still reads as a decimal
        assert!(close(DimensionParser::parse_area("14,8 m2").unwrap(), 14.8, 1e-9));
        assert!(close(DimensionParser::parse_area("1,25 m²").unwrap(), 1.25, 1e-9));
    }

    #[test]
    fn test_parse_area_rejects_mixed_grouping() {
        assert!(DimensionParser::parse_area("1.200,5 m²").is_none());
        let room = DimensionParser::resolve(None, None, Some("1.200,5 m²"), None, 2.4);
        assert!(room.is_none());
    }

    #[test]
    fn test_parse_area_bare_number() {
        let metric = DimensionParser::parse_area("192").unwrap();
        assert!(close(metric, 192.0, 1e-9));

        let imperial = DimensionParser::parse_area_with_hint("192", Some(UnitSystem::Imperial)).unwrap();
        assert!(close(imperial, 192.0 / 10.7639, 1e-9));

        assert!(DimensionParser::parse_area("large").is_none());
        assert!(DimensionParser::parse_area("0 m²").is_none());
    }

    #[test]
    fn test_resolve_prefers_width_length() {
        let dims = DimensionParser::resolve(Some("15'"), Some("20'"), Some("999 sq ft"), None, 2.7).unwrap();
        assert!(close(dims.floor_area_sqft(), 300.0, 0.05));
        assert_eq!(dims.height_m, 2.7);
        assert!(!dims.is_estimated());
    }

    #[test]
    fn test_resolve_from_area_square_footprint() {
        let dims = DimensionParser::resolve(None, None, Some("16 m²"), None, 2.4).unwrap();
        assert!(dims.is_estimated());
        assert!(close(dims.width_m, 4.0, 1e-9));
        assert!(close(dims.perimeter_m(), 16.0, 1e-9));
        assert!(close(dims.wall_area_m2(), 4.0 * 4.0 * 2.4, 1e-9));
    }

    #[test]
    fn test_resolve_falls_back_when_pair_unreadable() {
        let dims = DimensionParser::resolve(Some("wide"), Some("long"), Some("10 m²"), None, 2.4).unwrap();
        assert!(dims.is_estimated());
        assert!(DimensionParser::resolve(Some("wide"), None, None, None, 2.4).is_none());
        assert!(DimensionParser::resolve(None, None, None, None, 2.4).is_none());
    }

    #[test]
    fn test_unit_system_parsing() {
        assert_eq!(UnitSystem::from_str_flexible("Imperial").unwrap(), UnitSystem::Imperial);
        assert_eq!(UnitSystem::from_str_flexible(" metric ").unwrap(), UnitSystem::Metric);
        assert!(UnitSystem::from_str_flexible("cubits").is_err());
    }
}
