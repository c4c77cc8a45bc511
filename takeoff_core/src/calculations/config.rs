//! Calculator configuration.
//!
//! The kitchen and bathroom figures are policy heuristics rather than
//! measurements. They are kept as named defaults so a caller can override
//! them without touching the calculation code.

use serde::{Deserialize, Serialize};

use crate::dimensions::DEFAULT_CEILING_HEIGHT_M;
use crate::errors::{EstimateError, EstimateResult};

/// Floor area above which a bathroom is a full bath (adds shower/tub tile)
pub const FULL_BATH_MIN_AREA_M2: f64 = 4.0;

/// Floor area above which a bathroom is a large bath (shower door + separate tub)
pub const LARGE_BATH_MIN_AREA_M2: f64 = 7.0;

/// Share of the room perimeter run with base cabinets
pub const BASE_CABINET_SHARE: f64 = 0.60;

/// Share of the room perimeter run with wall cabinets
pub const WALL_CABINET_SHARE: f64 = 0.40;

/// Countertop depth (25")
pub const COUNTERTOP_DEPTH_M: f64 = 0.635;

/// Backsplash height (18")
pub const BACKSPLASH_HEIGHT_M: f64 = 0.457;

/// Tiled shower/tub surround area (60 sq ft)
pub const SHOWER_TILE_AREA_M2: f64 = 5.57;

/// Settings for [`MaterialCalculator`](super::MaterialCalculator).
///
/// ## JSON Example
///
/// ```json
/// {
///   "ceiling_height_m": 2.4,
///   "full_bath_min_area_m2": 4.0,
///   "large_bath_min_area_m2": 7.0,
///   "base_cabinet_share": 0.6,
///   "wall_cabinet_share": 0.4,
///   "countertop_depth_m": 0.635,
///   "backsplash_height_m": 0.457,
///   "shower_tile_area_m2": 5.57,
///   "include_insulation": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Ceiling height applied to every room (m)
    pub ceiling_height_m: f64,
    pub full_bath_min_area_m2: f64,
    pub large_bath_min_area_m2: f64,
    pub base_cabinet_share: f64,
    pub wall_cabinet_share: f64,
    pub countertop_depth_m: f64,
    pub backsplash_height_m: f64,
    pub shower_tile_area_m2: f64,
    /// Add batt insulation over the wall area of every room
    pub include_insulation: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            ceiling_height_m: DEFAULT_CEILING_HEIGHT_M,
            full_bath_min_area_m2: FULL_BATH_MIN_AREA_M2,
            large_bath_min_area_m2: LARGE_BATH_MIN_AREA_M2,
            base_cabinet_share: BASE_CABINET_SHARE,
            wall_cabinet_share: WALL_CABINET_SHARE,
            countertop_depth_m: COUNTERTOP_DEPTH_M,
            backsplash_height_m: BACKSPLASH_HEIGHT_M,
            shower_tile_area_m2: SHOWER_TILE_AREA_M2,
            include_insulation: false,
        }
    }
}

impl CalculatorConfig {
    /// Set the ceiling height
    pub fn with_ceiling_height(mut self, height_m: f64) -> Self {
        self.ceiling_height_m = height_m;
        self
    }

    /// Enable or disable wall insulation
    pub fn with_insulation(mut self, include: bool) -> Self {
        self.include_insulation = include;
        self
    }

    /// Validate all values.
    pub fn validate(&self) -> EstimateResult<()> {
        let positive = [
            ("ceiling_height_m", self.ceiling_height_m),
            ("full_bath_min_area_m2", self.full_bath_min_area_m2),
            ("large_bath_min_area_m2", self.large_bath_min_area_m2),
            ("countertop_depth_m", self.countertop_depth_m),
            ("backsplash_height_m", self.backsplash_height_m),
            ("shower_tile_area_m2", self.shower_tile_area_m2),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EstimateError::invalid_config(
                    field,
                    value.to_string(),
                    "Must be a positive, finite number",
                ));
            }
        }

        for (field, value) in [
            ("base_cabinet_share", self.base_cabinet_share),
            ("wall_cabinet_share", self.wall_cabinet_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EstimateError::invalid_config(
                    field,
                    value.to_string(),
                    "Share of perimeter must be between 0 and 1",
                ));
            }
        }

        if self.large_bath_min_area_m2 < self.full_bath_min_area_m2 {
            return Err(EstimateError::invalid_config(
                "large_bath_min_area_m2",
                self.large_bath_min_area_m2.to_string(),
                format!(
                    "Large bath threshold must not be below the full bath threshold ({})",
                    self.full_bath_min_area_m2
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.ceiling_height_m, 2.4);
        assert_eq!(config.full_bath_min_area_m2, 4.0);
        assert_eq!(config.large_bath_min_area_m2, 7.0);
        assert_eq!(config.base_cabinet_share, 0.60);
        assert_eq!(config.wall_cabinet_share, 0.40);
        assert!(!config.include_insulation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_height() {
        let config = CalculatorConfig::default().with_ceiling_height(0.0);
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");

        let config = CalculatorConfig::default().with_ceiling_height(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_bath_thresholds() {
        let config = CalculatorConfig {
            large_bath_min_area_m2: 3.0,
            ..CalculatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_share_out_of_range() {
        let config = CalculatorConfig {
            base_cabinet_share: 1.5,
            ..CalculatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CalculatorConfig = serde_json::from_str(r#"{"ceiling_height_m": 2.7}"#).unwrap();
        assert_eq!(config.ceiling_height_m, 2.7);
        assert_eq!(config.shower_tile_area_m2, SHOWER_TILE_AREA_M2);
    }
}
