//! # Unit Types
//!
//! Type-safe wrappers for the lengths and areas that flow through a takeoff.
//! Geometry is canonical in meters and square meters; feet and square feet
//! appear at the edges (imperial input strings, labor rates, report notes).
//!
//! ## Conversion Factors
//!
//! - 1 ft = 0.3048 m, 1 m = 3.28084 ft
//! - 1 m² = 10.7639 sq ft
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Feet, Meters, SquareFeet, SquareMeters};
//!
//! let width: Meters = Feet(12.5).into();
//! assert!((width.0 - 3.81).abs() < 1e-9);
//!
//! let area: SquareMeters = SquareFeet(150.0).into();
//! assert!((area.0 - 13.935).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

/// Meters per foot (exact by definition)
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Feet per meter
pub const FEET_PER_METER: f64 = 3.28084;

/// Square feet per square meter
pub const SQFT_PER_SQM: f64 = 10.7639;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * METERS_PER_FOOT)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 * FEET_PER_METER)
    }
}

impl Feet {
    /// Build a length from a feet-and-inches pair (e.g. 12'-6")
    pub fn from_feet_inches(feet: f64, inches: f64) -> Self {
        Feet(feet + inches / INCHES_PER_FOOT)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareFeet(pub f64);

impl From<SquareFeet> for SquareMeters {
    fn from(sqft: SquareFeet) -> Self {
        SquareMeters(sqft.0 / SQFT_PER_SQM)
    }
}

impl From<SquareMeters> for SquareFeet {
    fn from(sqm: SquareMeters) -> Self {
        SquareFeet(sqm.0 * SQFT_PER_SQM)
    }
}

// ============================================================================
// Currency
// ============================================================================

/// Round a monetary amount to whole cents.
///
/// Applied wherever a cost is computed so that sums of rounded values stay
/// stable under repeated aggregation.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_err(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn test_feet_to_meters() {
        let m: Meters = Feet(10.0).into();
        assert!((m.0 - 3.048).abs() < 1e-12);
    }

    #[test]
    fn test_feet_inches() {
        let ft = Feet::from_feet_inches(12.0, 6.0);
        assert_eq!(ft.0, 12.5);
    }

    #[test]
    fn test_length_round_trip() {
        for value in [0.5, 1.0, 12.5, 14.0, 137.25, 1000.0] {
            let m: Meters = Feet(value).into();
            let back: Feet = m.into();
            assert!(rel_err(back.0, value) < 1e-4, "{} ft came back as {}", value, back.0);
        }
    }

    #[test]
    fn test_area_round_trip() {
        for value in [1.0, 30.0, 80.0, 150.0, 168.0, 2500.0] {
            let sqm: SquareMeters = SquareFeet(value).into();
            let back: SquareFeet = sqm.into();
            assert!(rel_err(back.0, value) < 1e-4);
        }
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.344), 12.34);
        assert_eq!(round_cents(12.346), 12.35);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_serialization() {
        let area = SquareMeters(14.8);
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, "14.8");

        let roundtrip: SquareMeters = serde_json::from_str(&json).unwrap();
        assert_eq!(area, roundtrip);
    }
}
