//! # Cost Estimation
//!
//! Prices aggregated material quantities into line items, subtotals,
//! contingency and a grand total, and compares the four quality tiers.
//!
//! ## Cost Rules
//!
//! ```text
//! material = units_needed × price_per_unit × regional multiplier
//! labor    = quantity in labor units × labor rate × regional × labor-availability multiplier
//! total    = material + labor
//! ```
//!
//! Every money figure is rounded to cents when computed. Subtotals are sums of
//! rounded line values; grand total = subtotal × (1 + contingency).
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::MaterialCalculator;
//! use takeoff_core::estimate::{CostEstimator, EstimatorConfig};
//! use takeoff_core::pricing::{QualityTier, Region};
//! use takeoff_core::rooms::RoomInput;
//!
//! let rooms = vec![RoomInput::with_dimensions("Living Room", "15'", "20'")];
//! let totals = MaterialCalculator::default().quantity_for_project(&rooms).totals();
//!
//! let config = EstimatorConfig::default()
//!     .with_tier(QualityTier::Premium)
//!     .with_region(Region::UsWest);
//! let estimator = CostEstimator::new(config).unwrap();
//! let estimate = estimator.estimate_project("Remodel", &totals, None);
//!
//! let subtotal = estimate.materials_subtotal + estimate.labor_subtotal;
//! assert!((estimate.grand_total - subtotal * 1.10).abs() < 0.01);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::{MaterialCategory, MaterialQuantity};
use crate::pricing::{LaborAvailability, PricingCatalog, QualityTier, Region};
use crate::units::round_cents;

/// Default contingency (10%)
pub const DEFAULT_CONTINGENCY_PERCENT: f64 = 0.10;

/// Estimator settings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "quality_tier": "standard",
///   "region": "us_national",
///   "include_labor": true,
///   "contingency_percent": 0.10,
///   "labor_availability": "average"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Tier used when no per-material override is given
    pub quality_tier: QualityTier,
    pub region: Region,
    pub include_labor: bool,
    /// Contingency as a fraction (0.10 = 10%)
    pub contingency_percent: f64,
    pub labor_availability: LaborAvailability,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            quality_tier: QualityTier::Standard,
            region: Region::UsNational,
            include_labor: true,
            contingency_percent: DEFAULT_CONTINGENCY_PERCENT,
            labor_availability: LaborAvailability::Average,
        }
    }
}

impl EstimatorConfig {
    /// Build from free-text names, failing on any unknown value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use takeoff_core::estimate::EstimatorConfig;
    /// use takeoff_core::pricing::{LaborAvailability, Region};
    ///
    /// let config = EstimatorConfig::from_names("premium", "us-west", true, 0.15, "low").unwrap();
    /// assert_eq!(config.region, Region::UsWest);
    /// assert_eq!(config.labor_availability, LaborAvailability::Shortage);
    ///
    /// assert!(EstimatorConfig::from_names("gold", "us_west", true, 0.1, "average").is_err());
    /// ```
    pub fn from_names(
        quality_tier: &str,
        region: &str,
        include_labor: bool,
        contingency_percent: f64,
        labor_availability: &str,
    ) -> EstimateResult<Self> {
        let config = EstimatorConfig {
            quality_tier: QualityTier::from_str_flexible(quality_tier)?,
            region: Region::from_str_flexible(region)?,
            include_labor,
            contingency_percent,
            labor_availability: LaborAvailability::from_str_flexible(labor_availability)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.quality_tier = tier;
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_labor(mut self, include_labor: bool) -> Self {
        self.include_labor = include_labor;
        self
    }

    pub fn with_contingency(mut self, percent: f64) -> Self {
        self.contingency_percent = percent;
        self
    }

    pub fn with_labor_availability(mut self, availability: LaborAvailability) -> Self {
        self.labor_availability = availability;
        self
    }

    /// Validate all values.
    pub fn validate(&self) -> EstimateResult<()> {
        if !(self.contingency_percent.is_finite() && self.contingency_percent >= 0.0) {
            return Err(EstimateError::invalid_config(
                "contingency_percent",
                self.contingency_percent.to_string(),
                "Contingency must be a finite fraction, zero or positive",
            ));
        }
        Ok(())
    }
}

/// Priced line for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimateLine {
    /// Material key
    pub key: String,
    pub display_name: String,
    /// Tier this line was priced at
    pub quality_tier: QualityTier,
    pub units_needed: u32,
    /// Purchase unit label
    pub unit: String,
    /// Material cost (USD)
    pub material_cost: f64,
    /// Labor cost (USD), 0 when labor is excluded
    pub labor_cost: f64,
    /// Material + labor (USD)
    pub total_cost: f64,
    /// Unadjusted price per purchase unit (USD)
    pub price_per_unit: f64,
    pub brand_example: String,
    pub category: MaterialCategory,
    /// Price point description
    pub notes: String,
}

/// Priced estimate for a whole project.
///
/// A partial estimate is recognizable by a non-empty `omitted_materials`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEstimate {
    pub project_name: String,
    pub timestamp: DateTime<Utc>,
    pub region: Region,
    /// Default tier of the estimator that produced this estimate
    pub quality_tier: QualityTier,
    pub include_labor: bool,
    pub labor_availability: LaborAvailability,
    /// Lines ordered by category, then material key
    pub lines: Vec<CostEstimateLine>,
    pub materials_subtotal: f64,
    pub labor_subtotal: f64,
    pub contingency_percent: f64,
    pub contingency_amount: f64,
    pub grand_total: f64,
    /// Material keys with no price point at their requested tier
    pub omitted_materials: Vec<String>,
    pub notes: Vec<String>,
}

impl ProjectEstimate {
    /// Materials + labor, before contingency
    pub fn subtotal(&self) -> f64 {
        round_cents(self.materials_subtotal + self.labor_subtotal)
    }

    /// True when every material was priced
    pub fn is_complete(&self) -> bool {
        self.omitted_materials.is_empty()
    }

    pub fn line(&self, key: &str) -> Option<&CostEstimateLine> {
        self.lines.iter().find(|line| line.key == key)
    }

    /// Lines grouped by category, in report order
    pub fn lines_by_category(&self) -> BTreeMap<MaterialCategory, Vec<&CostEstimateLine>> {
        let mut groups: BTreeMap<MaterialCategory, Vec<&CostEstimateLine>> = BTreeMap::new();
        for line in &self.lines {
            groups.entry(line.category).or_default().push(line);
        }
        groups
    }
}

/// Prices material quantities against a pricing catalog.
#[derive(Debug, Clone)]
pub struct CostEstimator<'c> {
    config: EstimatorConfig,
    catalog: &'c PricingCatalog,
}

impl Default for CostEstimator<'static> {
    fn default() -> Self {
        CostEstimator {
            config: EstimatorConfig::default(),
            catalog: PricingCatalog::standard(),
        }
    }
}

impl CostEstimator<'static> {
    /// Estimator over the shipped price table.
    pub fn new(config: EstimatorConfig) -> EstimateResult<Self> {
        Self::with_catalog(config, PricingCatalog::standard())
    }
}

impl<'c> CostEstimator<'c> {
    /// Estimator over a caller-supplied price table.
    pub fn with_catalog(config: EstimatorConfig, catalog: &'c PricingCatalog) -> EstimateResult<Self> {
        config.validate()?;
        Ok(CostEstimator { config, catalog })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Price one material at `tier` (or the configured tier).
    ///
    /// `None` when the catalog has no price point for the key/tier pair; no
    /// other tier is substituted.
    pub fn estimate_material(
        &self,
        key: &str,
        quantity: &MaterialQuantity,
        tier: Option<QualityTier>,
    ) -> Option<CostEstimateLine> {
        let tier = tier.unwrap_or(self.config.quality_tier);
        let Some(pricing) = self.catalog.get(key) else {
            debug!(material = key, "no pricing entry");
            return None;
        };
        let Some(point) = pricing.price_point(tier) else {
            debug!(material = key, tier = tier.code(), "no price point for tier");
            return None;
        };

        let regional = self.config.region.multiplier();
        let material_cost = f64::from(quantity.units_needed) * point.price_per_unit * regional;
        let labor_cost = if self.config.include_labor {
            pricing.labor_unit.convert(quantity.quantity)
                * pricing.labor_rate
                * regional
                * self.config.labor_availability.multiplier()
        } else {
            0.0
        };

        Some(CostEstimateLine {
            key: key.to_string(),
            display_name: pricing.display_name.clone(),
            quality_tier: tier,
            units_needed: quantity.units_needed,
            unit: quantity.unit.clone(),
            material_cost: round_cents(material_cost),
            labor_cost: round_cents(labor_cost),
            total_cost: round_cents(material_cost + labor_cost),
            price_per_unit: point.price_per_unit,
            brand_example: point.brand_example.clone(),
            category: pricing.category,
            notes: point.notes.clone(),
        })
    }

    /// Price every material in `totals`.
    ///
    /// `tier_overrides` picks a tier per material key; other keys use the
    /// configured tier. Unpriced materials are listed in `omitted_materials`.
    pub fn estimate_project(
        &self,
        project_name: &str,
        totals: &BTreeMap<String, MaterialQuantity>,
        tier_overrides: Option<&BTreeMap<String, QualityTier>>,
    ) -> ProjectEstimate {
        let mut lines = Vec::with_capacity(totals.len());
        let mut omitted_materials = Vec::new();

        for (key, quantity) in totals {
            let tier = tier_overrides.and_then(|overrides| overrides.get(key)).copied();
            match self.estimate_material(key, quantity, tier) {
                Some(line) => lines.push(line),
                None => omitted_materials.push(key.clone()),
            }
        }
        lines.sort_by(|a, b| (a.category, &a.key).cmp(&(b.category, &b.key)));

        let materials_subtotal = round_cents(lines.iter().map(|l| l.material_cost).sum());
        let labor_subtotal = round_cents(lines.iter().map(|l| l.labor_cost).sum());
        let subtotal = round_cents(materials_subtotal + labor_subtotal);
        let percent = self.config.contingency_percent;

        ProjectEstimate {
            project_name: project_name.to_string(),
            timestamp: Utc::now(),
            region: self.config.region,
            quality_tier: self.config.quality_tier,
            include_labor: self.config.include_labor,
            labor_availability: self.config.labor_availability,
            notes: self.notes(&omitted_materials),
            lines,
            materials_subtotal,
            labor_subtotal,
            contingency_percent: percent,
            contingency_amount: round_cents(subtotal * percent),
            grand_total: round_cents(subtotal + subtotal * percent),
            omitted_materials,
        }
    }

    fn notes(&self, omitted: &[String]) -> Vec<String> {
        let config = &self.config;
        let mut notes = vec![
            format!("Prices based on {} averages", config.region.code()),
            format!("Regional adjustment: {:.0}%", config.region.multiplier() * 100.0),
            format!("Quality tier: {}", config.quality_tier.code()),
        ];
        if config.include_labor {
            notes.push(format!(
                "Labor availability: {} ({:.0}%)",
                config.labor_availability.code(),
                config.labor_availability.multiplier() * 100.0
            ));
        } else {
            notes.push("Labor not included".to_string());
        }
        if !omitted.is_empty() {
            notes.push(format!("No pricing available for: {}", omitted.join(", ")));
        }
        notes.push("Actual costs may vary based on supplier and market conditions".to_string());
        notes
    }
}

/// Full estimates for every quality tier, keyed by tier.
///
/// Each pass uses a fresh estimator configured for that tier; the passes are
/// independent of each other.
pub fn compare_quality_tier_estimates(
    totals: &BTreeMap<String, MaterialQuantity>,
    region: Region,
    include_labor: bool,
    contingency_percent: f64,
    labor_availability: LaborAvailability,
) -> EstimateResult<BTreeMap<QualityTier, ProjectEstimate>> {
    let base = EstimatorConfig {
        quality_tier: QualityTier::Standard,
        region,
        include_labor,
        contingency_percent,
        labor_availability,
    };

    QualityTier::ALL
        .iter()
        .map(|&tier| -> EstimateResult<(QualityTier, ProjectEstimate)> {
            let estimator = CostEstimator::new(base.clone().with_tier(tier))?;
            let estimate = estimator.estimate_project(&format!("Comparison - {}", tier.code()), totals, None);
            debug!(tier = tier.code(), grand_total = estimate.grand_total, "tier pass complete");
            Ok((tier, estimate))
        })
        .collect()
}

/// Grand total for every quality tier, keyed by tier.
///
/// # Example
///
/// ```rust
/// use takeoff_core::calculations::MaterialCalculator;
/// use takeoff_core::estimate::compare_quality_tiers;
/// use takeoff_core::pricing::{LaborAvailability, QualityTier, Region};
/// use takeoff_core::rooms::RoomInput;
///
/// let rooms = vec![RoomInput::with_area("Kitchen", "168 sq ft")];
/// let totals = MaterialCalculator::default().quantity_for_project(&rooms).totals();
///
/// let totals_by_tier =
///     compare_quality_tiers(&totals, Region::UsMidwest, true, 0.10, LaborAvailability::Average).unwrap();
/// assert!(totals_by_tier[&QualityTier::Budget] <= totals_by_tier[&QualityTier::Luxury]);
/// ```
pub fn compare_quality_tiers(
    totals: &BTreeMap<String, MaterialQuantity>,
    region: Region,
    include_labor: bool,
    contingency_percent: f64,
    labor_availability: LaborAvailability,
) -> EstimateResult<BTreeMap<QualityTier, f64>> {
    let estimates =
        compare_quality_tier_estimates(totals, region, include_labor, contingency_percent, labor_availability)?;
    Ok(estimates
        .into_iter()
        .map(|(tier, estimate)| (tier, estimate.grand_total))
        .collect())
}
