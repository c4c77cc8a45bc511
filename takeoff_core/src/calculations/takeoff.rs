//! # Material Takeoff
//!
//! Computes per-room and per-project material quantities from room geometry.
//!
//! ## What Each Room Gets
//!
//! - **Every room**: four flooring options, wall paint (2 coats), ceiling paint,
//!   drywall over the walls, baseboard and crown molding around the perimeter
//! - **Kitchens**: base cabinets (60% of perimeter), wall cabinets (40%),
//!   countertop (base run × 0.635 m), backsplash (base run × 0.457 m),
//!   one sink, one faucet
//! - **Bathrooms**: vanity, faucet, toilet, exhaust fan; above 4.0 m² add
//!   5.57 m² of surround tile; above 7.0 m² a shower door and a separate
//!   bathtub, otherwise a tub/shower combo
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::MaterialCalculator;
//! use takeoff_core::rooms::RoomInput;
//!
//! let calculator = MaterialCalculator::default();
//! let rooms = vec![
//!     RoomInput::with_area("Kitchen", "168 sq ft"),
//!     RoomInput::with_area("Closet", "unknown"),
//! ];
//!
//! let takeoff = calculator.quantity_for_project(&rooms);
//! assert_eq!(takeoff.rooms.len(), 1);
//! assert_eq!(takeoff.skipped_rooms, vec!["Closet".to_string()]);
//! assert!(takeoff.totals().contains_key("countertop"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::aggregate;
use super::config::CalculatorConfig;
use crate::dimensions::{DimensionParser, Dimensions};
use crate::errors::EstimateResult;
use crate::materials::{MaterialCatalog, MaterialQuantity};
use crate::rooms::{RoomInput, RoomType};

/// Room measurement a universal material is computed over.
#[derive(Debug, Clone, Copy)]
enum Measure {
    FloorArea,
    WallArea,
    Perimeter,
}

const UNIVERSAL_MATERIALS: [(&str, Measure); 10] = [
    ("flooring_hardwood", Measure::FloorArea),
    ("flooring_laminate", Measure::FloorArea),
    ("flooring_tile", Measure::FloorArea),
    ("flooring_carpet", Measure::FloorArea),
    ("paint_wall", Measure::WallArea),
    ("paint_ceiling", Measure::FloorArea),
    ("drywall", Measure::WallArea),
    ("baseboard", Measure::Perimeter),
    ("crown_molding", Measure::Perimeter),
    ("insulation_batt", Measure::WallArea),
];

/// Material quantities for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTakeoff {
    /// Room name as given
    pub name: String,
    /// Room type used for conditional materials
    pub room_type: RoomType,
    /// Resolved geometry
    pub dimensions: Dimensions,
    /// Floor area (m²)
    pub floor_area_m2: f64,
    /// Wall area, no openings deducted (m²)
    pub wall_area_m2: f64,
    /// Perimeter (m)
    pub perimeter_m: f64,
    /// Quantities keyed by material key
    pub materials: BTreeMap<String, MaterialQuantity>,
}

/// Material quantities for a whole project.
///
/// `skipped_rooms` and `warnings` make a partial takeoff distinguishable from
/// a complete one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectTakeoff {
    /// Rooms with usable geometry, in input order
    pub rooms: Vec<RoomTakeoff>,
    /// Names of rooms whose geometry could not be resolved
    pub skipped_rooms: Vec<String>,
    /// Human-readable notices (skips, estimated footprints)
    pub warnings: Vec<String>,
}

impl ProjectTakeoff {
    /// Project-wide totals per material key.
    pub fn totals(&self) -> BTreeMap<String, MaterialQuantity> {
        aggregate::totals(self.rooms.iter().map(|room| &room.materials))
    }

    /// Quantities keyed by room name.
    ///
    /// Repeated names get a " (2)", " (3)", ... suffix so no room is lost.
    pub fn by_room(&self) -> BTreeMap<String, BTreeMap<String, MaterialQuantity>> {
        let mut out = BTreeMap::new();
        for room in &self.rooms {
            let mut name = room.name.clone();
            let mut n = 1;
            while out.contains_key(&name) {
                n += 1;
                name = format!("{} ({})", room.name, n);
            }
            out.insert(name, room.materials.clone());
        }
        out
    }

    /// True when every input room produced quantities
    pub fn is_complete(&self) -> bool {
        self.skipped_rooms.is_empty()
    }
}

/// Computes material quantities from room geometry.
///
/// Holds only read-only data; safe to share across threads.
#[derive(Debug, Clone)]
pub struct MaterialCalculator<'c> {
    config: CalculatorConfig,
    catalog: &'c MaterialCatalog,
}

impl Default for MaterialCalculator<'static> {
    fn default() -> Self {
        MaterialCalculator {
            config: CalculatorConfig::default(),
            catalog: MaterialCatalog::standard(),
        }
    }
}

impl MaterialCalculator<'static> {
    /// Calculator over the standard material catalog.
    pub fn new(config: CalculatorConfig) -> EstimateResult<Self> {
        Self::with_catalog(config, MaterialCatalog::standard())
    }
}

impl<'c> MaterialCalculator<'c> {
    /// Calculator over a caller-supplied catalog.
    pub fn with_catalog(config: CalculatorConfig, catalog: &'c MaterialCatalog) -> EstimateResult<Self> {
        config.validate()?;
        Ok(MaterialCalculator { config, catalog })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Resolve a room's geometry at the configured ceiling height.
    pub fn resolve_dimensions(&self, room: &RoomInput) -> Option<Dimensions> {
        DimensionParser::resolve(
            room.width.as_deref(),
            room.length.as_deref(),
            room.area.as_deref(),
            room.unit,
            self.config.ceiling_height_m,
        )
    }

    /// Quantities for one room, keyed by material key.
    ///
    /// Empty when the room's geometry cannot be resolved.
    pub fn quantity_for_room(&self, room: &RoomInput) -> BTreeMap<String, MaterialQuantity> {
        self.room_takeoff(room)
            .map(|takeoff| takeoff.materials)
            .unwrap_or_default()
    }

    /// Full takeoff record for one room, or `None` without usable geometry.
    pub fn room_takeoff(&self, room: &RoomInput) -> Option<RoomTakeoff> {
        let dimensions = self.resolve_dimensions(room)?;
        let room_type = room.room_type();
        debug!(room = %room.name, room_type = room_type.code(), estimated = dimensions.is_estimated(), "room resolved");

        Some(RoomTakeoff {
            name: room.name.clone(),
            room_type,
            floor_area_m2: dimensions.floor_area_m2(),
            wall_area_m2: dimensions.wall_area_m2(),
            perimeter_m: dimensions.perimeter_m(),
            materials: self.quantities_for(&dimensions, room_type),
            dimensions,
        })
    }

    /// Quantities for known geometry and room type.
    pub fn quantities_for(&self, dimensions: &Dimensions, room_type: RoomType) -> BTreeMap<String, MaterialQuantity> {
        let floor_area = dimensions.floor_area_m2();
        let wall_area = dimensions.wall_area_m2();
        let perimeter = dimensions.perimeter_m();
        let mut out = BTreeMap::new();

        for (key, measure) in UNIVERSAL_MATERIALS {
            if key == "insulation_batt" && !self.config.include_insulation {
                continue;
            }
            let amount = match measure {
                Measure::FloorArea => floor_area,
                Measure::WallArea => wall_area,
                Measure::Perimeter => perimeter,
            };
            self.add(&mut out, key, amount);
        }

        match room_type {
            RoomType::Kitchen => self.add_kitchen(&mut out, perimeter),
            RoomType::Bathroom => self.add_bathroom(&mut out, floor_area),
            RoomType::Bedroom | RoomType::LivingRoom | RoomType::DiningRoom | RoomType::Other => {}
        }

        out
    }

    fn add_kitchen(&self, out: &mut BTreeMap<String, MaterialQuantity>, perimeter: f64) {
        let base_run = perimeter * self.config.base_cabinet_share;
        let wall_run = perimeter * self.config.wall_cabinet_share;

        self.add(out, "cabinet_base", base_run);
        self.add(out, "cabinet_wall", wall_run);
        self.add(out, "countertop", base_run * self.config.countertop_depth_m);
        self.add(out, "backsplash_tile", base_run * self.config.backsplash_height_m);
        self.add(out, "kitchen_sink", 1.0);
        self.add(out, "kitchen_faucet", 1.0);
    }

    fn add_bathroom(&self, out: &mut BTreeMap<String, MaterialQuantity>, floor_area: f64) {
        self.add(out, "bathroom_vanity", 1.0);
        self.add(out, "bathroom_faucet", 1.0);
        self.add(out, "toilet", 1.0);
        self.add(out, "exhaust_fan", 1.0);

        if floor_area > self.config.full_bath_min_area_m2 {
            self.add(out, "shower_tile", self.config.shower_tile_area_m2);
            if floor_area > self.config.large_bath_min_area_m2 {
                self.add(out, "shower_door", 1.0);
            }
            self.add(out, "bathtub", 1.0);
        }
    }

    fn add(&self, out: &mut BTreeMap<String, MaterialQuantity>, key: &str, amount: f64) {
        match self.catalog.get(key) {
            Some(spec) => {
                out.insert(key.to_string(), spec.quantity(amount));
            }
            None => debug!(material = key, "material not in catalog, skipped"),
        }
    }

    /// Quantities for every room; rooms without usable geometry are listed
    /// in `skipped_rooms` instead.
    pub fn quantity_for_project(&self, rooms: &[RoomInput]) -> ProjectTakeoff {
        let mut takeoff = ProjectTakeoff::default();

        for room in rooms {
            match self.room_takeoff(room) {
                Some(room_takeoff) => {
                    if room_takeoff.dimensions.is_estimated() {
                        takeoff.warnings.push(format!(
                            "Room '{}': footprint estimated as a square from its area",
                            room.name
                        ));
                    }
                    takeoff.rooms.push(room_takeoff);
                }
                None => {
                    warn!(room = %room.name, "room skipped: no readable dimensions or area");
                    takeoff.warnings.push(format!(
                        "Room '{}' skipped: no readable dimensions or area",
                        room.name
                    ));
                    takeoff.skipped_rooms.push(room.name.clone());
                }
            }
        }

        takeoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::UnitSystem;
    use crate::materials::{MaterialCategory, MaterialSpec};

    const UNIVERSAL_KEYS: [&str; 9] = [
        "flooring_hardwood",
        "flooring_laminate",
        "flooring_tile",
        "flooring_carpet",
        "paint_wall",
        "paint_ceiling",
        "drywall",
        "baseboard",
        "crown_molding",
    ];

    const KITCHEN_KEYS: [&str; 6] = [
        "cabinet_base",
        "cabinet_wall",
        "countertop",
        "backsplash_tile",
        "kitchen_sink",
        "kitchen_faucet",
    ];

    fn calc() -> MaterialCalculator<'static> {
        MaterialCalculator::default()
    }

    #[test]
    fn test_bedroom_gets_universal_only() {
        let materials = calc().quantity_for_room(&RoomInput::with_dimensions("Bedroom 2", "3.5", "4.2"));
        assert_eq!(materials.len(), UNIVERSAL_KEYS.len());
        for key in UNIVERSAL_KEYS {
            assert!(materials.contains_key(key), "{}", key);
        }
        assert!(!materials.contains_key("insulation_batt"));
    }

    #[test]
    fn test_universal_quantities_use_geometry() {
        let materials = calc().quantity_for_room(&RoomInput::with_dimensions("Den", "3 m", "4 m"));
        // floor 12 m², perimeter 14 m, wall 14 * 2.4 = 33.6 m²
        assert!((materials["flooring_tile"].quantity - 12.0).abs() < 1e-9);
        assert!((materials["paint_ceiling"].quantity - 12.0).abs() < 1e-9);
        assert!((materials["paint_wall"].quantity - 33.6).abs() < 1e-9);
        assert!((materials["drywall"].quantity - 33.6).abs() < 1e-9);
        assert!((materials["baseboard"].quantity - 14.0).abs() < 1e-9);
        // 33.6 * 1.1 / 2.97 = 12.44 -> 13 sheets
        assert_eq!(materials["drywall"].units_needed, 13);
    }

    #[test]
    fn test_kitchen_scenario() {
        let materials = calc().quantity_for_room(&RoomInput::with_area("Kitchen", "168 sq ft"));
        for key in UNIVERSAL_KEYS.iter().chain(KITCHEN_KEYS.iter()) {
            assert!(materials.contains_key(*key), "{}", key);
        }

        let perimeter = materials["baseboard"].quantity;
        let base_run = materials["cabinet_base"].quantity;
        assert!((base_run - 0.60 * perimeter).abs() < 1e-9);
        assert!((materials["cabinet_wall"].quantity - 0.40 * perimeter).abs() < 1e-9);
        assert!((materials["countertop"].quantity - base_run * 0.635).abs() < 1e-9);
        assert!((materials["backsplash_tile"].quantity - base_run * 0.457).abs() < 1e-9);
        assert_eq!(materials["kitchen_sink"].units_needed, 1);
        assert_eq!(materials["kitchen_faucet"].units_needed, 1);
        assert_eq!(materials["kitchen_sink"].category, MaterialCategory::Kitchen);
    }

    #[test]
    fn test_kitchen_from_dimensions() {
        let room = RoomInput::with_dimensions("Kitchen", "12'", "14'");
        let takeoff = calc().room_takeoff(&room).unwrap();
        assert!(!takeoff.dimensions.is_estimated());
        assert!((takeoff.floor_area_m2 * 10.7639 - 168.0).abs() < 0.01);
        assert!(takeoff.materials.contains_key("countertop"));
    }

    #[test]
    fn test_powder_room_scenario() {
        let materials = calc().quantity_for_room(&RoomInput::with_area("Powder Room", "30 sq ft"));
        for key in ["bathroom_vanity", "bathroom_faucet", "toilet", "exhaust_fan"] {
            assert_eq!(materials[key].units_needed, 1, "{}", key);
        }
        for key in ["shower_tile", "shower_door", "bathtub"] {
            assert!(!materials.contains_key(key), "{}", key);
        }
    }

    #[test]
    fn test_full_bath_gets_tub_combo() {
        // 60 sq ft = 5.57 m²: full but not large
        let materials = calc().quantity_for_room(&RoomInput::with_area("Bathroom 2", "60 sq ft"));
        assert!(materials.contains_key("shower_tile"));
        assert!(materials.contains_key("bathtub"));
        assert!(!materials.contains_key("shower_door"));
    }

    #[test]
    fn test_master_bathroom_scenario() {
        let materials = calc().quantity_for_room(&RoomInput::with_area("Master Bathroom", "80 sq ft"));
        assert_eq!(materials["shower_door"].units_needed, 1);
        assert_eq!(materials["bathtub"].units_needed, 1);
        assert!((materials["shower_tile"].quantity - 5.57).abs() < 1e-9);
        // 5.57 * 1.15 / 0.93 = 6.89 -> 7 boxes
        assert_eq!(materials["shower_tile"].units_needed, 7);
    }

    #[test]
    fn test_bath_thresholds_configurable() {
        let config = CalculatorConfig {
            full_bath_min_area_m2: 2.0,
            large_bath_min_area_m2: 2.5,
            ..CalculatorConfig::default()
        };
        let calculator = MaterialCalculator::new(config).unwrap();
        let materials = calculator.quantity_for_room(&RoomInput::with_area("Powder Room", "30 sq ft"));
        assert!(materials.contains_key("shower_door"));
    }

    #[test]
    fn test_room_type_override_applies() {
        let room = RoomInput::with_area("Room 7", "12 m²").room_type_override(RoomType::Kitchen);
        assert!(calc().quantity_for_room(&room).contains_key("cabinet_base"));
    }

    #[test]
    fn test_insulation_opt_in() {
        let calculator = MaterialCalculator::new(CalculatorConfig::default().with_insulation(true)).unwrap();
        let materials = calculator.quantity_for_room(&RoomInput::with_dimensions("Office", "3", "3"));
        assert!((materials["insulation_batt"].quantity - 12.0 * 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_unreadable_room_is_empty() {
        assert!(calc().quantity_for_room(&RoomInput::new("Attic")).is_empty());
        assert!(calc().quantity_for_room(&RoomInput::with_area("Attic", "n/a")).is_empty());
    }

    #[test]
    fn test_project_records_skips_and_estimates() {
        let rooms = vec![
            RoomInput::with_dimensions("Living Room", "15'", "20'"),
            RoomInput::new("Mystery Room"),
            RoomInput::with_area("Bedroom", "150").unit(UnitSystem::Imperial),
        ];
        let takeoff = calc().quantity_for_project(&rooms);
        assert_eq!(takeoff.rooms.len(), 2);
        assert_eq!(takeoff.skipped_rooms, vec!["Mystery Room".to_string()]);
        assert!(!takeoff.is_complete());
        assert_eq!(takeoff.warnings.len(), 2);
        assert!(takeoff.warnings.iter().any(|w| w.contains("estimated")));

        let bedroom = &takeoff.rooms[1];
        assert!((bedroom.floor_area_m2 - 150.0 / 10.7639).abs() < 1e-9);
    }

    #[test]
    fn test_by_room_keeps_duplicate_names() {
        let rooms = vec![
            RoomInput::with_area("Bedroom", "12 m²"),
            RoomInput::with_area("Bedroom", "10 m²"),
        ];
        let by_room = calc().quantity_for_project(&rooms).by_room();
        assert_eq!(by_room.len(), 2);
        assert!(by_room.contains_key("Bedroom"));
        assert!(by_room.contains_key("Bedroom (2)"));
    }

    #[test]
    fn test_units_needed_positive_for_positive_quantities() {
        let rooms = vec![
            RoomInput::with_area("Kitchen", "200 sq ft"),
            RoomInput::with_area("Master Bathroom", "100 sq ft"),
            RoomInput::with_area("Half Bath", "30 sq ft"),
            RoomInput::with_dimensions("Closet", "0,9", "1,2"),
        ];
        let takeoff = calc().quantity_for_project(&rooms);
        for room in &takeoff.rooms {
            for qty in room.materials.values() {
                assert!(qty.quantity > 0.0);
                assert!(qty.units_needed >= 1, "{} in {}", qty.key, room.name);
            }
        }
    }

    #[test]
    fn test_custom_catalog_missing_keys_skipped() {
        let catalog = MaterialCatalog::new()
            .with(MaterialSpec::area("flooring_tile", "Tile", MaterialCategory::Flooring, 1.0, "box", 0.0));
        let calculator = MaterialCalculator::with_catalog(CalculatorConfig::default(), &catalog).unwrap();
        let materials = calculator.quantity_for_room(&RoomInput::with_area("Kitchen", "10 m²"));
        assert_eq!(materials.len(), 1);
        assert_eq!(materials["flooring_tile"].units_needed, 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CalculatorConfig::default().with_ceiling_height(-2.4);
        assert!(MaterialCalculator::new(config).is_err());
    }

    #[test]
    fn test_shared_calculator_across_threads() {
        let calculator = MaterialCalculator::default();
        let rooms = vec![
            RoomInput::with_area("Kitchen", "168 sq ft"),
            RoomInput::with_area("Master Bathroom", "80 sq ft"),
            RoomInput::with_dimensions("Bedroom", "14'", "16'"),
        ];
        let expected = calculator.quantity_for_project(&rooms).totals();

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| calculator.quantity_for_project(&rooms).totals()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for totals in results {
            assert_eq!(totals, expected);
        }
    }
}
