//! # Project Analysis
//!
//! `ProjectInput` is the root container a caller hands to the engine: a named
//! list of rooms plus calculator and estimator settings. [`analyze`] runs the
//! whole pipeline and returns a serializable [`ProjectReport`].
//!
//! ## Structure
//!
//! ```text
//! ProjectReport
//! ├── takeoff: ProjectTakeoff (per-room quantities, skipped rooms, warnings)
//! ├── totals: material_key -> MaterialQuantity
//! ├── estimate: ProjectEstimate (priced lines, subtotals, contingency)
//! └── tier_comparison: tier -> grand total
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::project::{analyze, ProjectInput};
//! use takeoff_core::rooms::RoomInput;
//!
//! let input = ProjectInput::new("Maple Street")
//!     .with_room(RoomInput::with_dimensions("Living Room", "15'", "20'"))
//!     .with_room(RoomInput::with_area("Kitchen", "168 sq ft"));
//!
//! let report = analyze(&input).unwrap();
//! assert!(report.is_complete());
//! assert_eq!(report.tier_comparison.len(), 4);
//!
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("\"grand_total\""));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{CalculatorConfig, MaterialCalculator, ProjectTakeoff};
use crate::errors::EstimateResult;
use crate::estimate::{compare_quality_tiers, CostEstimator, EstimatorConfig, ProjectEstimate};
use crate::materials::MaterialQuantity;
use crate::pricing::QualityTier;
use crate::rooms::RoomInput;

/// Current schema version of [`ProjectReport`]
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Everything needed to estimate one project.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Maple Street",
///   "rooms": [
///     {"name": "Kitchen", "area": "168 sq ft", "unit": "imperial"},
///     {"name": "Bedroom 2", "width": "3,5", "length": "4,2", "unit": "metric"}
///   ],
///   "estimator": {"quality_tier": "premium", "region": "us_west"},
///   "tier_overrides": {"countertop": "luxury"}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Project name used on the estimate
    pub name: String,

    /// Rooms in plan order
    #[serde(default)]
    pub rooms: Vec<RoomInput>,

    #[serde(default)]
    pub calculator: CalculatorConfig,

    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Per-material tier choices; other materials use the estimator tier
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tier_overrides: BTreeMap<String, QualityTier>,
}

impl ProjectInput {
    /// Create a project with default settings and no rooms
    pub fn new(name: impl Into<String>) -> Self {
        ProjectInput {
            name: name.into(),
            rooms: Vec::new(),
            calculator: CalculatorConfig::default(),
            estimator: EstimatorConfig::default(),
            tier_overrides: BTreeMap::new(),
        }
    }

    pub fn with_room(mut self, room: RoomInput) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_rooms(mut self, rooms: impl IntoIterator<Item = RoomInput>) -> Self {
        self.rooms.extend(rooms);
        self
    }

    pub fn with_calculator(mut self, config: CalculatorConfig) -> Self {
        self.calculator = config;
        self
    }

    pub fn with_estimator(mut self, config: EstimatorConfig) -> Self {
        self.estimator = config;
        self
    }

    /// Price one material at a specific tier
    pub fn with_tier_override(mut self, key: impl Into<String>, tier: QualityTier) -> Self {
        self.tier_overrides.insert(key.into(), tier);
        self
    }

    /// Parse a project from JSON.
    pub fn from_json(json: &str) -> EstimateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Schema version (for consumers)
    pub version: String,
    pub project_name: String,
    pub generated: DateTime<Utc>,
    pub takeoff: ProjectTakeoff,
    /// Project-wide quantities per material key
    pub totals: BTreeMap<String, MaterialQuantity>,
    /// Estimate at the configured tier
    pub estimate: ProjectEstimate,
    /// Grand total at every tier, same region/labor/contingency settings
    pub tier_comparison: BTreeMap<QualityTier, f64>,
}

impl ProjectReport {
    /// Rooms left out of the takeoff
    pub fn skipped_rooms(&self) -> &[String] {
        &self.takeoff.skipped_rooms
    }

    /// Materials left out of the estimate
    pub fn omitted_materials(&self) -> &[String] {
        &self.estimate.omitted_materials
    }

    /// True when every room was measured and every material priced
    pub fn is_complete(&self) -> bool {
        self.takeoff.is_complete() && self.estimate.is_complete()
    }
}

/// Run takeoff, aggregation, estimation and tier comparison for a project.
///
/// Fails only on invalid configuration. Unreadable rooms and unpriced
/// materials are reported on the returned record.
pub fn analyze(input: &ProjectInput) -> EstimateResult<ProjectReport> {
    let calculator = MaterialCalculator::new(input.calculator.clone())?;
    let estimator = CostEstimator::new(input.estimator.clone())?;

    let takeoff = calculator.quantity_for_project(&input.rooms);
    let totals = takeoff.totals();
    debug!(
        project = %input.name,
        rooms = takeoff.rooms.len(),
        skipped = takeoff.skipped_rooms.len(),
        materials = totals.len(),
        "takeoff complete"
    );

    let overrides = (!input.tier_overrides.is_empty()).then_some(&input.tier_overrides);
    let estimate = estimator.estimate_project(&input.name, &totals, overrides);

    let config = estimator.config();
    let tier_comparison = compare_quality_tiers(
        &totals,
        config.region,
        config.include_labor,
        config.contingency_percent,
        config.labor_availability,
    )?;

    Ok(ProjectReport {
        version: SCHEMA_VERSION.to_string(),
        project_name: input.name.clone(),
        generated: estimate.timestamp,
        takeoff,
        totals,
        estimate,
        tier_comparison,
    })
}
