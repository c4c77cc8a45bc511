//! # Pricing
//!
//! Quality tiers, regions, labor-market levels, and the per-material price
//! points the cost estimator reads.
//!
//! Prices are US national averages quoted per purchasable unit (box, gallon,
//! sheet, piece, ...), so `units_needed × price_per_unit` is a material cost.
//! Labor rates are quoted per installed sq ft, linear ft, or fixture.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::pricing::{PricingCatalog, QualityTier, Region};
//!
//! let hardwood = PricingCatalog::standard().get("flooring_hardwood").unwrap();
//! let standard = hardwood.price_point(QualityTier::Standard).unwrap();
//! assert_eq!(standard.unit, "box");
//! assert_eq!(Region::UsWest.multiplier(), 1.20);
//! ```

pub mod catalog;

pub use catalog::PricingCatalog;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::{MaterialCategory, QuantityKind};
use crate::units::{FEET_PER_METER, SQFT_PER_SQM};

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Material quality level.
///
/// Ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Budget,
    #[default]
    Standard,
    Premium,
    Luxury,
}

impl QualityTier {
    /// All tiers, cheapest first
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Budget,
        QualityTier::Standard,
        QualityTier::Premium,
        QualityTier::Luxury,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "budget" | "economy" | "basic" => Ok(QualityTier::Budget),
            "standard" | "std" | "mid" | "mid_range" | "midrange" => Ok(QualityTier::Standard),
            "premium" | "high" => Ok(QualityTier::Premium),
            "luxury" | "high_end" | "custom" => Ok(QualityTier::Luxury),
            _ => Err(EstimateError::invalid_config(
                "quality_tier",
                s,
                "Expected budget, standard, premium or luxury",
            )),
        }
    }

    /// Snake-case code (matches the JSON form)
    pub fn code(&self) -> &'static str {
        match self {
            QualityTier::Budget => "budget",
            QualityTier::Standard => "standard",
            QualityTier::Premium => "premium",
            QualityTier::Luxury => "luxury",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityTier::Budget => "Budget",
            QualityTier::Standard => "Standard",
            QualityTier::Premium => "Premium",
            QualityTier::Luxury => "Luxury",
        }
    }
}

impl FromStr for QualityTier {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Geographic pricing region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    UsNational,
    /// NYC, Boston
    UsNortheast,
    UsSoutheast,
    UsMidwest,
    UsSouthwest,
    /// California, Washington
    UsWest,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::UsNational,
        Region::UsNortheast,
        Region::UsSoutheast,
        Region::UsMidwest,
        Region::UsSouthwest,
        Region::UsWest,
    ];

    /// Price multiplier relative to the national average
    pub fn multiplier(&self) -> f64 {
        match self {
            Region::UsNational => 1.00,
            Region::UsNortheast => 1.25,
            Region::UsSoutheast => 0.90,
            Region::UsMidwest => 0.95,
            Region::UsSouthwest => 1.00,
            Region::UsWest => 1.20,
        }
    }

    /// Parse from common string representations
    ///
    /// The `us_` prefix is optional: `"us-west"`, `"West"` and `"us_west"`
    /// all name the same region.
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        let name = normalize(s);
        match name.strip_prefix("us_").unwrap_or(&name) {
            "national" | "us" | "nationwide" => Ok(Region::UsNational),
            "northeast" | "ne" => Ok(Region::UsNortheast),
            "southeast" | "se" => Ok(Region::UsSoutheast),
            "midwest" | "mw" => Ok(Region::UsMidwest),
            "southwest" | "sw" => Ok(Region::UsSouthwest),
            "west" | "w" => Ok(Region::UsWest),
            _ => Err(EstimateError::invalid_config(
                "region",
                s,
                "Expected one of us_national, us_northeast, us_southeast, us_midwest, us_southwest, us_west",
            )),
        }
    }

    /// Snake-case code (matches the JSON form)
    pub fn code(&self) -> &'static str {
        match self {
            Region::UsNational => "us_national",
            Region::UsNortheast => "us_northeast",
            Region::UsSoutheast => "us_southeast",
            Region::UsMidwest => "us_midwest",
            Region::UsSouthwest => "us_southwest",
            Region::UsWest => "us_west",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::UsNational => "US National",
            Region::UsNortheast => "US Northeast",
            Region::UsSoutheast => "US Southeast",
            Region::UsMidwest => "US Midwest",
            Region::UsSouthwest => "US Southwest",
            Region::UsWest => "US West",
        }
    }
}

impl FromStr for Region {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Local labor-market condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LaborAvailability {
    /// Few installers available, rates go up
    Shortage,
    #[default]
    Average,
    /// Many installers available, rates go down
    Surplus,
}

impl LaborAvailability {
    pub const ALL: [LaborAvailability; 3] = [
        LaborAvailability::Shortage,
        LaborAvailability::Average,
        LaborAvailability::Surplus,
    ];

    /// Labor cost multiplier
    pub fn multiplier(&self) -> f64 {
        match self {
            LaborAvailability::Shortage => 1.15,
            LaborAvailability::Average => 1.00,
            LaborAvailability::Surplus => 0.90,
        }
    }

    /// Parse from common string representations ("low" availability is a
    /// shortage, "high" a surplus)
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match normalize(s).as_str() {
            "shortage" | "low" | "scarce" => Ok(LaborAvailability::Shortage),
            "average" | "normal" | "avg" => Ok(LaborAvailability::Average),
            "surplus" | "high" | "abundant" => Ok(LaborAvailability::Surplus),
            _ => Err(EstimateError::invalid_config(
                "labor_availability",
                s,
                "Expected shortage, average or surplus",
            )),
        }
    }

    /// Snake-case code (matches the JSON form)
    pub fn code(&self) -> &'static str {
        match self {
            LaborAvailability::Shortage => "shortage",
            LaborAvailability::Average => "average",
            LaborAvailability::Surplus => "surplus",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LaborAvailability::Shortage => "Labor Shortage",
            LaborAvailability::Average => "Average Availability",
            LaborAvailability::Surplus => "Labor Surplus",
        }
    }
}

impl FromStr for LaborAvailability {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

impl std::fmt::Display for LaborAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Unit a labor rate is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborUnit {
    SquareFoot,
    LinearFoot,
    /// Per installed fixture
    Each,
}

impl LaborUnit {
    /// The labor unit matching a material's quantity kind
    pub fn for_kind(kind: QuantityKind) -> Self {
        match kind {
            QuantityKind::Area => LaborUnit::SquareFoot,
            QuantityKind::Linear => LaborUnit::LinearFoot,
            QuantityKind::Fixture => LaborUnit::Each,
        }
    }

    /// Convert a raw quantity (m², m, or count) into this unit
    pub fn convert(&self, quantity: f64) -> f64 {
        match self {
            LaborUnit::SquareFoot => quantity * SQFT_PER_SQM,
            LaborUnit::LinearFoot => quantity * FEET_PER_METER,
            LaborUnit::Each => quantity,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LaborUnit::SquareFoot => "sq ft",
            LaborUnit::LinearFoot => "linear ft",
            LaborUnit::Each => "unit",
        }
    }
}

/// Price of one purchasable unit at one quality tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// USD per purchasable unit, national average
    pub price_per_unit: f64,
    /// Purchase unit label, same as the material's packaging unit
    pub unit: String,
    pub quality_tier: QualityTier,
    /// Illustrative brands at this tier
    pub brand_example: String,
    pub notes: String,
}

/// Pricing entry for one material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "key": "paint_wall",
///   "display_name": "Interior Wall Paint",
///   "unit": "gallon",
///   "price_points": {
///     "budget": {"price_per_unit": 25.0, "unit": "gallon", "quality_tier": "budget",
///                "brand_example": "Glidden, Valspar", "notes": "Basic latex"}
///   },
///   "labor_rate": 2.0,
///   "labor_unit": "square_foot",
///   "category": "paint"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPricing {
    /// Material key, same as the material catalog
    pub key: String,
    pub display_name: String,
    /// Purchase unit every price point is quoted in
    pub unit: String,
    /// One price point per defined tier; tiers may be missing
    pub price_points: BTreeMap<QualityTier, PricePoint>,
    /// USD per installed labor unit, national average
    pub labor_rate: f64,
    pub labor_unit: LaborUnit,
    pub category: MaterialCategory,
}

impl MaterialPricing {
    /// Entry with no price points yet
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        category: MaterialCategory,
        unit: impl Into<String>,
        labor_rate: f64,
        labor_unit: LaborUnit,
    ) -> Self {
        MaterialPricing {
            key: key.into(),
            display_name: display_name.into(),
            unit: unit.into(),
            price_points: BTreeMap::new(),
            labor_rate,
            labor_unit,
            category,
        }
    }

    /// Add a price point for `tier` (builder style)
    pub fn tier(mut self, tier: QualityTier, price_per_unit: f64, brand_example: &str, notes: &str) -> Self {
        self.price_points.insert(
            tier,
            PricePoint {
                price_per_unit,
                unit: self.unit.clone(),
                quality_tier: tier,
                brand_example: brand_example.to_string(),
                notes: notes.to_string(),
            },
        );
        self
    }

    /// Price point for a tier, if defined
    pub fn price_point(&self, tier: QualityTier) -> Option<&PricePoint> {
        self.price_points.get(&tier)
    }

    /// Tiers this material is priced at, cheapest first
    pub fn tiers(&self) -> impl Iterator<Item = QualityTier> + '_ {
        self.price_points.keys().copied()
    }
}
