//! Project-wide material totals.

use std::collections::BTreeMap;

use crate::materials::MaterialQuantity;

/// Sum per-room quantities into one record per material key.
///
/// Quantities and units add; identity fields come from the first room that
/// used the material. Units are summed room by room, not recomputed from the
/// summed quantity, matching how materials are bought per room.
pub fn totals<'a, I>(rooms: I) -> BTreeMap<String, MaterialQuantity>
where
    I: IntoIterator<Item = &'a BTreeMap<String, MaterialQuantity>>,
{
    let mut out: BTreeMap<String, MaterialQuantity> = BTreeMap::new();

    for room in rooms {
        for (key, qty) in room {
            match out.get_mut(key) {
                Some(total) => total.absorb(qty),
                None => {
                    out.insert(key.clone(), qty.clone());
                }
            }
        }
    }

    for total in out.values_mut() {
        total.refresh_notes();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialCatalog;

    fn room(floor_m2: f64, perimeter_m: f64) -> BTreeMap<String, MaterialQuantity> {
        let catalog = MaterialCatalog::standard();
        let mut out = BTreeMap::new();
        for (key, amount) in [("flooring_tile", floor_m2), ("baseboard", perimeter_m), ("toilet", 1.0)] {
            out.insert(key.to_string(), catalog.get(key).unwrap().quantity(amount));
        }
        out
    }

    #[test]
    fn test_single_room_unchanged() {
        let one = room(12.0, 14.0);
        assert_eq!(totals([&one]), one);
    }

    #[test]
    fn test_same_room_twice_doubles() {
        let one = room(12.0, 14.0);
        let total = totals([&one, &one]);
        for (key, qty) in &one {
            assert_eq!(total[key].quantity, 2.0 * qty.quantity);
            assert_eq!(total[key].units_needed, 2 * qty.units_needed);
        }
    }

    #[test]
    fn test_units_summed_per_room() {
        // 0.5 m² each: one box per room, not one box for 1 m²
        let small = room(0.5, 1.0);
        let total = totals([&small, &small]);
        assert_eq!(total["flooring_tile"].units_needed, 2);
        assert_eq!(total["flooring_tile"].notes, "1.0 m² (11 sq ft)");
    }

    #[test]
    fn test_union_of_keys() {
        let mut a = room(10.0, 12.0);
        a.remove("toilet");
        let b = room(5.0, 9.0);
        let total = totals([&a, &b]);
        assert_eq!(total.len(), 3);
        assert_eq!(total["toilet"].units_needed, 1);
        assert_eq!(total["baseboard"].quantity, 21.0);
    }

    #[test]
    fn test_empty_input() {
        let rooms: Vec<BTreeMap<String, MaterialQuantity>> = Vec::new();
        assert!(totals(&rooms).is_empty());
    }
}
