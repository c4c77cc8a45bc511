//! Material Specification Catalog
//!
//! The shipped table of coverage rates, packaging units and waste factors.
//! Coverage figures are the metric equivalents of common US package sizes
//! (24 sq ft hardwood box, 4x8 drywall sheet, 8 ft trim piece, ...).
//!
//! The catalog is plain data: adding a material means adding a row here and,
//! if it is not a universal material, choosing where the calculator applies it.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{MaterialCategory, MaterialSpec};
use crate::errors::{EstimateError, EstimateResult};

static STANDARD: Lazy<MaterialCatalog> = Lazy::new(build_standard);

/// Read-only registry of material specifications keyed by material key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialCatalog {
    specs: BTreeMap<String, MaterialSpec>,
}

impl MaterialCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped catalog, shared by all calculations.
    pub fn standard() -> &'static MaterialCatalog {
        &STANDARD
    }

    /// Add or replace a specification (builder style)
    pub fn with(mut self, spec: MaterialSpec) -> Self {
        self.specs.insert(spec.key.clone(), spec);
        self
    }

    /// Look up a specification
    pub fn get(&self, key: &str) -> Option<&MaterialSpec> {
        self.specs.get(key)
    }

    /// Look up a specification, failing on unknown keys
    pub fn spec(&self, key: &str) -> EstimateResult<&MaterialSpec> {
        self.get(key).ok_or_else(|| EstimateError::unknown_material(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.specs.contains_key(key)
    }

    /// All keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn build_standard() -> MaterialCatalog {
    use MaterialCategory::*;

    MaterialCatalog::new()
        // Flooring options (each computed over the full floor area)
        .with(MaterialSpec::area("flooring_hardwood", "Hardwood Flooring", Flooring, 2.23, "box", 0.10))
        .with(MaterialSpec::area("flooring_laminate", "Laminate Flooring", Flooring, 2.32, "box", 0.10))
        .with(MaterialSpec::area("flooring_tile", "Ceramic Tile", Flooring, 0.93, "box", 0.15))
        .with(MaterialSpec::area("flooring_carpet", "Carpet", Flooring, 11.15, "roll", 0.10))
        // Paint: 400 sq ft per gallon
        .with(MaterialSpec::area("paint_wall", "Wall Paint", Paint, 37.16, "gallon", 0.05).with_coats(2))
        .with(MaterialSpec::area("paint_ceiling", "Ceiling Paint", Paint, 37.16, "gallon", 0.05).with_coats(1))
        .with(MaterialSpec::area("drywall", "Drywall Sheets", Drywall, 2.97, "sheet", 0.10))
        .with(MaterialSpec::area("insulation_batt", "Batt Insulation", Insulation, 8.92, "bundle", 0.05))
        // Trim: 8 ft pieces
        .with(MaterialSpec::linear("baseboard", "Baseboard Trim", Trim, 2.44, "piece", 0.10))
        .with(MaterialSpec::linear("crown_molding", "Crown Molding", Trim, 2.44, "piece", 0.15))
        // Kitchen
        .with(MaterialSpec::linear("cabinet_base", "Base Cabinets", Kitchen, 0.3048, "linear ft", 0.0))
        .with(MaterialSpec::linear("cabinet_wall", "Wall Cabinets", Kitchen, 0.3048, "linear ft", 0.0))
        .with(MaterialSpec::area("countertop", "Countertop", Kitchen, 0.0929, "sq ft", 0.10))
        .with(MaterialSpec::area("backsplash_tile", "Backsplash Tile", Kitchen, 0.93, "box", 0.15))
        .with(MaterialSpec::fixture("kitchen_sink", "Kitchen Sink", Kitchen))
        .with(MaterialSpec::fixture("kitchen_faucet", "Kitchen Faucet", Kitchen))
        // Bathroom
        .with(MaterialSpec::area("shower_tile", "Shower/Tub Surround Tile", Bathroom, 0.93, "box", 0.15))
        .with(MaterialSpec::fixture("bathroom_vanity", "Vanity Cabinet", Bathroom))
        .with(MaterialSpec::fixture("bathroom_faucet", "Bathroom Faucet", Bathroom))
        .with(MaterialSpec::fixture("toilet", "Toilet", Bathroom))
        .with(MaterialSpec::fixture("exhaust_fan", "Exhaust Fan", Bathroom))
        .with(MaterialSpec::fixture("shower_door", "Shower Door", Bathroom))
        .with(MaterialSpec::fixture("bathtub", "Bathtub", Bathroom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::QuantityKind;

    #[test]
    fn test_standard_catalog_contents() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.len(), 23);
        assert!(catalog.contains("flooring_tile"));
        assert!(catalog.contains("bathtub"));
        assert!(catalog.get("granite_slab").is_none());
    }

    #[test]
    fn test_spec_unknown_key() {
        let err = MaterialCatalog::standard().spec("granite_slab").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MATERIAL");
    }

    #[test]
    fn test_paint_coats() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.get("paint_wall").unwrap().coats, 2);
        assert_eq!(catalog.get("paint_ceiling").unwrap().coats, 1);
    }

    #[test]
    fn test_catalog_invariants() {
        for spec in MaterialCatalog::standard().iter() {
            assert!(spec.coverage_per_unit > 0.0, "{}", spec.key);
            assert!(spec.waste_factor >= 0.0 && spec.waste_factor < 1.0, "{}", spec.key);
            assert!(spec.coats >= 1, "{}", spec.key);
            if spec.kind == QuantityKind::Fixture {
                assert_eq!(spec.coverage_per_unit, 1.0);
                assert_eq!(spec.waste_factor, 0.0);
            }
        }
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = MaterialCatalog::new()
            .with(MaterialSpec::fixture("mirror", "Mirror", MaterialCategory::Bathroom));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["mirror"]);
    }
}
