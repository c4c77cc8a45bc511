//! # Materials
//!
//! Material specifications and the quantity records computed from them.
//!
//! Every material is one of three quantity kinds, and each kind has exactly
//! one calculation rule:
//!
//! - **Area**: `units = ceil(area × (1 + waste) × coats / coverage)`, at least 1
//! - **Linear**: same rule over a length in meters
//! - **Fixture**: `units = count`, no waste
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::materials::MaterialCatalog;
//!
//! let catalog = MaterialCatalog::standard();
//! let paint = catalog.get("paint_wall").unwrap();
//!
//! // 40 m² of wall, 5% waste, 2 coats, 37.16 m²/gallon -> 3 gallons
//! let qty = paint.quantity(40.0);
//! assert_eq!(qty.units_needed, 3);
//! ```

pub mod catalog;

pub use catalog::MaterialCatalog;

use serde::{Deserialize, Serialize};

use crate::units::{FEET_PER_METER, SQFT_PER_SQM};

/// Relative tolerance under which a unit ratio counts as a whole number.
const WHOLE_UNIT_TOLERANCE: f64 = 1e-9;

/// How a material's raw quantity is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// Square meters
    Area,
    /// Linear meters
    Linear,
    /// Installed item count
    Fixture,
}

/// Grouping category for reports and estimates.
///
/// Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Flooring,
    Paint,
    Drywall,
    Insulation,
    Trim,
    Kitchen,
    Bathroom,
}

impl MaterialCategory {
    /// All categories in report order
    pub const ALL: [MaterialCategory; 7] = [
        MaterialCategory::Flooring,
        MaterialCategory::Paint,
        MaterialCategory::Drywall,
        MaterialCategory::Insulation,
        MaterialCategory::Trim,
        MaterialCategory::Kitchen,
        MaterialCategory::Bathroom,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCategory::Flooring => "Flooring",
            MaterialCategory::Paint => "Paint",
            MaterialCategory::Drywall => "Drywall",
            MaterialCategory::Insulation => "Insulation",
            MaterialCategory::Trim => "Trim",
            MaterialCategory::Kitchen => "Kitchen",
            MaterialCategory::Bathroom => "Bathroom",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Static description of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Stable identifier (e.g., "flooring_tile")
    pub key: String,
    /// Display name
    pub name: String,
    /// Quantity kind, selects the calculation rule
    pub kind: QuantityKind,
    /// m² (area) or m (linear) covered by one purchasable unit; 1 for fixtures
    pub coverage_per_unit: f64,
    /// Packaging/purchase unit label (e.g., "box", "gallon")
    pub unit: String,
    /// Waste allowance as a fraction (0.10 = 10%)
    pub waste_factor: f64,
    /// Number of coats, applied before dividing by coverage (paint)
    pub coats: u32,
    /// Grouping category
    pub category: MaterialCategory,
}

impl MaterialSpec {
    /// Area material covering `coverage_m2` per `unit`.
    pub fn area(
        key: impl Into<String>,
        name: impl Into<String>,
        category: MaterialCategory,
        coverage_m2: f64,
        unit: impl Into<String>,
        waste_factor: f64,
    ) -> Self {
        MaterialSpec {
            key: key.into(),
            name: name.into(),
            kind: QuantityKind::Area,
            coverage_per_unit: coverage_m2,
            unit: unit.into(),
            waste_factor,
            coats: 1,
            category,
        }
    }

    /// Linear material covering `coverage_m` per `unit`.
    pub fn linear(
        key: impl Into<String>,
        name: impl Into<String>,
        category: MaterialCategory,
        coverage_m: f64,
        unit: impl Into<String>,
        waste_factor: f64,
    ) -> Self {
        MaterialSpec {
            kind: QuantityKind::Linear,
            ..MaterialSpec::area(key, name, category, coverage_m, unit, waste_factor)
        }
    }

    /// Fixture bought and installed one at a time.
    pub fn fixture(key: impl Into<String>, name: impl Into<String>, category: MaterialCategory) -> Self {
        MaterialSpec {
            kind: QuantityKind::Fixture,
            ..MaterialSpec::area(key, name, category, 1.0, "unit", 0.0)
        }
    }

    /// Set the number of coats
    pub fn with_coats(mut self, coats: u32) -> Self {
        self.coats = coats;
        self
    }

    /// Compute the quantity record for `amount` (m², m, or item count).
    ///
    /// Non-positive or non-finite amounts yield a zero-unit record.
    pub fn quantity(&self, amount: f64) -> MaterialQuantity {
        let amount = if amount.is_finite() && amount > 0.0 { amount } else { 0.0 };

        let units_needed = match self.kind {
            QuantityKind::Area | QuantityKind::Linear => {
                let effective = amount * (1.0 + self.waste_factor) * f64::from(self.coats);
                purchasable_units(effective, self.coverage_per_unit)
            }
            QuantityKind::Fixture => amount.round() as u32,
        };

        MaterialQuantity {
            key: self.key.clone(),
            name: self.name.clone(),
            kind: self.kind,
            quantity: amount,
            unit: self.unit.clone(),
            coverage_per_unit: self.coverage_per_unit,
            units_needed,
            waste_factor: self.waste_factor,
            category: self.category,
            notes: describe_quantity(self.kind, amount),
        }
    }
}

/// Round up to the next whole purchasable unit.
///
/// Ratios within floating error of an integer are not bumped to the next
/// unit. Any positive amount needs at least one unit; zero needs none.
pub fn purchasable_units(effective: f64, coverage_per_unit: f64) -> u32 {
    if !(effective > 0.0 && coverage_per_unit > 0.0) || !effective.is_finite() {
        return 0;
    }
    let ratio = effective / coverage_per_unit;
    let nearest = ratio.round();
    let units = if (ratio - nearest).abs() <= WHOLE_UNIT_TOLERANCE * nearest.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    units.max(1.0) as u32
}

/// Human-readable quantity in both unit systems.
pub fn describe_quantity(kind: QuantityKind, quantity: f64) -> String {
    match kind {
        QuantityKind::Area => format!("{:.1} m² ({:.0} sq ft)", quantity, quantity * SQFT_PER_SQM),
        QuantityKind::Linear => format!("{:.1} m ({:.0} ft)", quantity, quantity * FEET_PER_METER),
        QuantityKind::Fixture => format!("{:.0} installed", quantity),
    }
}

/// Computed quantity of one material, for one room or a whole project.
///
/// ## JSON Example
///
/// ```json
/// {
///   "key": "flooring_tile",
///   "name": "Ceramic Tile",
///   "kind": "area",
///   "quantity": 15.61,
///   "unit": "box",
///   "coverage_per_unit": 0.93,
///   "units_needed": 20,
///   "waste_factor": 0.15,
///   "category": "flooring",
///   "notes": "15.6 m² (168 sq ft)"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialQuantity {
    /// Material key
    pub key: String,
    /// Display name
    pub name: String,
    /// Quantity kind (meaning of `quantity`)
    pub kind: QuantityKind,
    /// Raw physical quantity: m², linear m, or item count
    pub quantity: f64,
    /// Purchase unit label
    pub unit: String,
    /// Coverage of one purchase unit
    pub coverage_per_unit: f64,
    /// Whole purchasable units after waste and rounding
    pub units_needed: u32,
    /// Waste fraction applied
    pub waste_factor: f64,
    /// Grouping category
    pub category: MaterialCategory,
    /// Free-text notes
    pub notes: String,
}

impl MaterialQuantity {
    /// Add another record's quantity and units into this one.
    ///
    /// Identity fields (name, unit, coverage, waste, category) stay as they are.
    pub fn absorb(&mut self, other: &MaterialQuantity) {
        self.quantity += other.quantity;
        self.units_needed += other.units_needed;
    }

    /// Regenerate `notes` from the current quantity.
    pub fn refresh_notes(&mut self) {
        self.notes = describe_quantity(self.kind, self.quantity);
    }
}
