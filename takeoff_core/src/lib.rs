//! # takeoff_core - Material Quantity & Cost Estimation Engine
//!
//! `takeoff_core` turns room geometry (dimension or area strings, metric or
//! imperial) into itemized material quantities and priced cost estimates
//! across quality tiers, regions and labor-market conditions. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over read-only catalogs, no I/O
//! - **JSON-First**: All records implement Serialize/Deserialize
//! - **Visible gaps**: Unreadable rooms and unpriced materials are listed, never dropped
//! - **Rich Errors**: Structured errors for invalid configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::calculations::MaterialCalculator;
//! use takeoff_core::estimate::CostEstimator;
//! use takeoff_core::rooms::RoomInput;
//!
//! let rooms = vec![
//!     RoomInput::with_dimensions("Living Room", "15'", "20'"),
//!     RoomInput::with_area("Master Bathroom", "80 sq ft"),
//! ];
//!
//! let takeoff = MaterialCalculator::default().quantity_for_project(&rooms);
//! let totals = takeoff.totals();
//! assert_eq!(totals["bathtub"].units_needed, 1);
//!
//! let estimate = CostEstimator::default().estimate_project("Remodel", &totals, None);
//! assert!(estimate.grand_total > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`dimensions`] - Dimension and area parsing, canonical geometry
//! - [`rooms`] - Room input records and room-type classification
//! - [`materials`] - Material specifications and quantity records
//! - [`calculations`] - Per-room and per-project takeoff, totals
//! - [`pricing`] - Quality tiers, regions, labor multipliers, price table
//! - [`estimate`] - Cost estimates and tier comparison
//! - [`project`] - End-to-end analysis of a project
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod dimensions;
pub mod errors;
pub mod estimate;
pub mod materials;
pub mod pricing;
pub mod project;
pub mod rooms;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculatorConfig, MaterialCalculator, ProjectTakeoff, RoomTakeoff};
pub use dimensions::{DimensionParser, Dimensions, UnitSystem};
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{
    compare_quality_tier_estimates, compare_quality_tiers, CostEstimateLine, CostEstimator, EstimatorConfig,
    ProjectEstimate,
};
pub use materials::{MaterialCatalog, MaterialQuantity, MaterialSpec, QuantityKind};
pub use pricing::{LaborAvailability, PricingCatalog, QualityTier, Region};
pub use project::{analyze, ProjectInput, ProjectReport};
pub use rooms::{RoomInput, RoomType};
