//! Shipped price table.
//!
//! Approximate US national averages for 2024-2025. Per-sq-ft market prices
//! are converted to the package sizes in the material catalog:
//! hardwood 24 sq ft/box, laminate 25 sq ft/box, tile 10 sq ft/box,
//! carpet 120 sq ft/roll, insulation 96 sq ft/bundle, trim 8 ft/piece.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{LaborUnit, MaterialPricing, PricePoint, QualityTier};
use crate::errors::{EstimateError, EstimateResult};
use crate::materials::MaterialCategory;

static STANDARD: Lazy<PricingCatalog> = Lazy::new(build_standard);

/// Read-only registry of material pricing keyed by material key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    entries: BTreeMap<String, MaterialPricing>,
}

impl PricingCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped price table.
    pub fn standard() -> &'static PricingCatalog {
        &STANDARD
    }

    /// Add or replace an entry (builder style)
    pub fn with(mut self, pricing: MaterialPricing) -> Self {
        self.entries.insert(pricing.key.clone(), pricing);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MaterialPricing> {
        self.entries.get(key)
    }

    /// Look up an entry, failing on unknown keys
    pub fn pricing(&self, key: &str) -> EstimateResult<&MaterialPricing> {
        self.get(key).ok_or_else(|| EstimateError::unknown_material(key))
    }

    /// Price point for a key/tier pair; `None` if either is missing
    pub fn price_point(&self, key: &str, tier: QualityTier) -> Option<&PricePoint> {
        self.get(key)?.price_point(tier)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialPricing> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build_standard() -> PricingCatalog {
    use LaborUnit::*;
    use MaterialCategory::*;
    use QualityTier::*;

    PricingCatalog::new()
        // Flooring
        .with(
            MaterialPricing::new("flooring_hardwood", "Hardwood Flooring", Flooring, "box", 4.00, SquareFoot)
                .tier(Budget, 60.00, "Builder's Pride", "Thin veneer, limited warranty")
                .tier(Standard, 120.00, "Bruce, Mohawk", "3/4\" solid, 25-year warranty")
                .tier(Premium, 192.00, "Shaw, Armstrong", "Premium species, lifetime warranty")
                .tier(Luxury, 360.00, "Carlisle, Duchateau", "Wide plank, exotic species"),
        )
        .with(
            MaterialPricing::new("flooring_laminate", "Laminate Flooring", Flooring, "box", 2.50, SquareFoot)
                .tier(Budget, 25.00, "TrafficMaster", "6mm, basic warranty")
                .tier(Standard, 62.50, "Pergo, Mohawk", "10mm, 20-year warranty")
                .tier(Premium, 100.00, "Quick-Step", "12mm, waterproof")
                .tier(Luxury, 150.00, "Kaindl, Kronotex", "Premium European"),
        )
        .with(
            MaterialPricing::new("flooring_tile", "Ceramic/Porcelain Tile", Flooring, "box", 6.00, SquareFoot)
                .tier(Budget, 15.00, "MSI, Florida Tile", "Basic ceramic")
                .tier(Standard, 40.00, "Daltile, Marazzi", "Porcelain, varied patterns")
                .tier(Premium, 80.00, "Emser, Crossville", "Large format, premium finish")
                .tier(Luxury, 150.00, "Artistic Tile, Ann Sacks", "Designer, natural stone"),
        )
        .with(
            MaterialPricing::new("flooring_carpet", "Carpet", Flooring, "roll", 1.50, SquareFoot)
                .tier(Budget, 120.00, "LifeProof", "Basic polyester")
                .tier(Standard, 360.00, "Shaw, Mohawk", "Nylon, stain resistant")
                .tier(Premium, 720.00, "Karastan", "Premium nylon, plush")
                .tier(Luxury, 1440.00, "Stanton, Masland", "Wool, custom patterns"),
        )
        // Paint
        .with(
            MaterialPricing::new("paint_wall", "Interior Wall Paint", Paint, "gallon", 2.00, SquareFoot)
                .tier(Budget, 25.00, "Glidden, Valspar", "Basic latex")
                .tier(Standard, 45.00, "Behr, PPG", "Premium latex, washable")
                .tier(Premium, 65.00, "Benjamin Moore, Sherwin-Williams", "Designer colors, low VOC")
                .tier(Luxury, 100.00, "Farrow & Ball, Fine Paints", "Artisan, specialty finishes"),
        )
        .with(
            MaterialPricing::new("paint_ceiling", "Ceiling Paint", Paint, "gallon", 1.50, SquareFoot)
                .tier(Budget, 20.00, "Glidden Ceiling", "Flat white")
                .tier(Standard, 35.00, "Behr Ceiling", "Ultra flat, splatter-resistant")
                .tier(Premium, 55.00, "Benjamin Moore", "Premium ceiling paint")
                .tier(Luxury, 80.00, "Fine Paints of Europe", "Specialty ceiling"),
        )
        // Walls
        .with(
            // Labor includes taping and mudding
            MaterialPricing::new("drywall", "Drywall", Drywall, "sheet", 2.00, SquareFoot)
                .tier(Budget, 12.00, "USG, National Gypsum", "1/2\" standard")
                .tier(Standard, 15.00, "USG Sheetrock", "1/2\" moisture resistant")
                .tier(Premium, 25.00, "USG Mold Tough", "Mold/moisture resistant")
                .tier(Luxury, 40.00, "QuietRock", "Soundproof drywall"),
        )
        .with(
            MaterialPricing::new("insulation_batt", "Batt Insulation", Insulation, "bundle", 1.00, SquareFoot)
                .tier(Budget, 40.00, "Johns Manville", "R-13 fiberglass")
                .tier(Standard, 55.00, "Owens Corning EcoTouch", "R-15 fiberglass")
                .tier(Premium, 85.00, "Rockwool Comfortbatt", "R-15 mineral wool, fire resistant"),
        )
        // Trim
        .with(
            MaterialPricing::new("baseboard", "Baseboard Trim", Trim, "piece", 3.00, LinearFoot)
                .tier(Budget, 8.00, "MDF primed", "3.25\" MDF")
                .tier(Standard, 20.00, "Pine, poplar", "Solid wood, paintable")
                .tier(Premium, 40.00, "Oak, maple", "Hardwood, stainable")
                .tier(Luxury, 80.00, "Custom millwork", "Custom profiles"),
        )
        .with(
            MaterialPricing::new("crown_molding", "Crown Molding", Trim, "piece", 5.00, LinearFoot)
                .tier(Budget, 12.00, "Polystyrene", "Foam, lightweight")
                .tier(Standard, 32.00, "MDF, pine", "3.5\" profile")
                .tier(Premium, 64.00, "Hardwood", "5.25\" ornate")
                .tier(Luxury, 120.00, "Custom millwork", "Multi-piece crown"),
        )
        // Kitchen
        .with(
            MaterialPricing::new("cabinet_base", "Base Cabinets", Kitchen, "linear ft", 45.00, LinearFoot)
                .tier(Budget, 100.00, "Hampton Bay", "Stock, particleboard box")
                .tier(Standard, 200.00, "KraftMaid, American Woodmark", "Semi-custom, plywood box")
                .tier(Premium, 400.00, "Thomasville, Schrock", "Full overlay, soft close")
                .tier(Luxury, 800.00, "Wood-Mode, Plain & Fancy", "Custom inset"),
        )
        .with(
            MaterialPricing::new("cabinet_wall", "Wall Cabinets", Kitchen, "linear ft", 35.00, LinearFoot)
                .tier(Budget, 80.00, "Hampton Bay", "Stock, 30\" height")
                .tier(Standard, 150.00, "KraftMaid, American Woodmark", "Semi-custom, 36\" height")
                .tier(Premium, 300.00, "Thomasville, Schrock", "42\" height, glass fronts")
                .tier(Luxury, 600.00, "Wood-Mode, Plain & Fancy", "Custom, stacked uppers"),
        )
        .with(
            MaterialPricing::new("countertop", "Countertop", Kitchen, "sq ft", 10.00, SquareFoot)
                .tier(Budget, 15.00, "Wilsonart, Formica", "Laminate")
                .tier(Standard, 45.00, "Level 1 granite", "Granite slab")
                .tier(Premium, 75.00, "Silestone, Caesarstone", "Engineered quartz")
                .tier(Luxury, 150.00, "Calacatta marble", "Natural marble, custom edge"),
        )
        .with(
            MaterialPricing::new("backsplash_tile", "Backsplash Tile", Kitchen, "box", 12.00, SquareFoot)
                .tier(Budget, 30.00, "Daltile subway", "3x6 ceramic subway")
                .tier(Standard, 80.00, "MSI, Jeffrey Court", "Glass or porcelain mosaic")
                .tier(Premium, 150.00, "Fireclay Tile", "Handmade ceramic")
                .tier(Luxury, 300.00, "Ann Sacks, Waterworks", "Natural stone, designer"),
        )
        .with(
            MaterialPricing::new("kitchen_sink", "Kitchen Sink", Kitchen, "unit", 200.00, Each)
                .tier(Budget, 150.00, "Glacier Bay", "Stainless, double bowl")
                .tier(Standard, 350.00, "Kohler, Elkay", "Undermount stainless")
                .tier(Premium, 700.00, "Blanco Silgranit", "Granite composite")
                .tier(Luxury, 1500.00, "Rohl, Native Trails", "Fireclay farmhouse"),
        )
        .with(
            MaterialPricing::new("kitchen_faucet", "Kitchen Faucet", Kitchen, "unit", 150.00, Each)
                .tier(Budget, 100.00, "Glacier Bay, Pfister", "Single handle")
                .tier(Standard, 250.00, "Moen, Delta", "Pull-down sprayer")
                .tier(Premium, 450.00, "Kohler, Grohe", "Touchless")
                .tier(Luxury, 900.00, "Waterstone, Rohl", "Commercial style"),
        )
        // Bathroom
        .with(
            MaterialPricing::new("shower_tile", "Shower/Tub Surround Tile", Bathroom, "box", 8.00, SquareFoot)
                .tier(Budget, 20.00, "Daltile, American Olean", "Glazed ceramic")
                .tier(Standard, 50.00, "Marazzi, Emser", "Porcelain, rectified")
                .tier(Premium, 100.00, "Crossville", "Large format porcelain")
                .tier(Luxury, 200.00, "Artistic Tile, Ann Sacks", "Marble, mosaic accents"),
        )
        .with(
            MaterialPricing::new("bathroom_vanity", "Bathroom Vanity", Bathroom, "unit", 250.00, Each)
                .tier(Budget, 200.00, "Glacier Bay", "24\" with cultured marble top")
                .tier(Standard, 500.00, "Home Decorators Collection", "36\" with quartz top")
                .tier(Premium, 1200.00, "James Martin, Ronbow", "48\" solid wood")
                .tier(Luxury, 3000.00, "Robern, Kohler Tailored", "Custom double vanity"),
        )
        .with(
            MaterialPricing::new("bathroom_faucet", "Bathroom Faucet", Bathroom, "unit", 125.00, Each)
                .tier(Budget, 60.00, "Glacier Bay", "Centerset")
                .tier(Standard, 150.00, "Moen, Delta", "Widespread")
                .tier(Premium, 300.00, "Kohler, Hansgrohe", "Designer finish")
                .tier(Luxury, 600.00, "Waterworks, Dornbracht", "Wall mount, luxury finish"),
        )
        .with(
            MaterialPricing::new("toilet", "Toilet", Bathroom, "unit", 250.00, Each)
                .tier(Budget, 150.00, "Glacier Bay", "Two-piece, standard height")
                .tier(Standard, 300.00, "American Standard, Kohler", "Comfort height, elongated")
                .tier(Premium, 600.00, "TOTO Drake", "One-piece, skirted")
                .tier(Luxury, 1500.00, "TOTO Neorest, Kohler Veil", "Smart toilet, bidet seat"),
        )
        .with(
            MaterialPricing::new("exhaust_fan", "Exhaust Fan", Bathroom, "unit", 150.00, Each)
                .tier(Budget, 40.00, "Broan", "50 CFM")
                .tier(Standard, 120.00, "Panasonic WhisperCeiling", "80 CFM, quiet")
                .tier(Premium, 250.00, "Panasonic WhisperGreen", "Humidity sensor, LED light")
                .tier(Luxury, 450.00, "Broan-NuTone SmartSense", "Bluetooth speaker, heater"),
        )
        .with(
            MaterialPricing::new("shower_door", "Shower Door", Bathroom, "unit", 300.00, Each)
                .tier(Budget, 200.00, "Delta, Sterling", "Framed sliding")
                .tier(Standard, 500.00, "DreamLine", "Semi-frameless")
                .tier(Premium, 1000.00, "Basco, Coastal", "Frameless 3/8\" glass")
                .tier(Luxury, 2000.00, "Custom glass", "Frameless 1/2\" low-iron glass"),
        )
        .with(
            MaterialPricing::new("bathtub", "Bathtub", Bathroom, "unit", 500.00, Each)
                .tier(Budget, 300.00, "Bootz, Sterling", "Steel alcove tub")
                .tier(Standard, 700.00, "American Standard, Kohler", "Acrylic alcove tub")
                .tier(Premium, 1500.00, "Kohler Underscore", "Soaking tub")
                .tier(Luxury, 4000.00, "Victoria + Albert, MTI", "Freestanding stone resin"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialCatalog;

    #[test]
    fn test_every_material_is_priced() {
        let pricing = PricingCatalog::standard();
        for key in MaterialCatalog::standard().keys() {
            assert!(pricing.contains(key), "{}", key);
        }
        assert_eq!(pricing.len(), MaterialCatalog::standard().len());
    }

    #[test]
    fn test_price_units_match_packaging() {
        let materials = MaterialCatalog::standard();
        for entry in PricingCatalog::standard().iter() {
            let spec = materials.get(&entry.key).unwrap();
            assert_eq!(entry.unit, spec.unit, "{}", entry.key);
            for point in entry.price_points.values() {
                assert_eq!(point.unit, spec.unit, "{}", entry.key);
            }
            assert_eq!(entry.category, spec.category, "{}", entry.key);
        }
    }

    #[test]
    fn test_labor_units_match_quantity_kind() {
        let materials = MaterialCatalog::standard();
        for entry in PricingCatalog::standard().iter() {
            let spec = materials.get(&entry.key).unwrap();
            assert_eq!(entry.labor_unit, LaborUnit::for_kind(spec.kind), "{}", entry.key);
            assert!(entry.labor_rate > 0.0);
        }
    }

    #[test]
    fn test_prices_non_decreasing_by_tier() {
        for entry in PricingCatalog::standard().iter() {
            let prices: Vec<f64> = entry.price_points.values().map(|p| p.price_per_unit).collect();
            assert!(prices.windows(2).all(|w| w[0] <= w[1]), "{}", entry.key);
            assert!(prices.iter().all(|p| *p > 0.0));
        }
    }

    #[test]
    fn test_tier_coverage() {
        let catalog = PricingCatalog::standard();
        for entry in catalog.iter() {
            let expected = if entry.key == "insulation_batt" { 3 } else { 4 };
            assert_eq!(entry.price_points.len(), expected, "{}", entry.key);
        }
        assert!(catalog.price_point("insulation_batt", QualityTier::Luxury).is_none());
        assert!(catalog.price_point("insulation_batt", QualityTier::Premium).is_some());
    }

    #[test]
    fn test_lookup() {
        let catalog = PricingCatalog::standard();
        let paint = catalog.price_point("paint_wall", QualityTier::Budget).unwrap();
        assert_eq!(paint.price_per_unit, 25.00);
        assert_eq!(paint.brand_example, "Glidden, Valspar");
        assert!(catalog.price_point("granite_slab", QualityTier::Budget).is_none());
        assert_eq!(catalog.pricing("granite_slab").unwrap_err().error_code(), "UNKNOWN_MATERIAL");
    }
}
