use strum::{Display, VariantArray};

/// Measurement family a unit belongs to. Conversions never cross
/// families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, VariantArray)]
pub enum UnitFamily {
    Mass,
    Volume,
    Count,
}

/// A catalog unit: canonical key, family and its size expressed in the
/// family base unit (gram, milliliter or piece).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub key: &'static str,
    pub family: UnitFamily,
    pub base_factor: f64,
}

pub const G_PER_KG: f64 = 1000.0;
pub const G_PER_MG: f64 = 0.001;
pub const G_PER_OZ: f64 = 28.3495;
pub const G_PER_LB: f64 = 453.592;

pub const ML_PER_L: f64 = 1000.0;
pub const ML_PER_TSP: f64 = 4.92892;
pub const ML_PER_TBSP: f64 = 14.7868;
pub const ML_PER_CUP: f64 = 236.588;
pub const ML_PER_FLOZ: f64 = 29.5735;

// Packaging sizes are business assumptions, not physical facts. They
// exist so pack-bought stock can participate in costing at all; adjust
// them to supplier reality before trusting derived pack costs.

/// 1 box = 100 pieces.
pub const PIECES_PER_BOX: f64 = 100.0;
/// 1 pack = 12 pieces.
pub const PIECES_PER_PACK: f64 = 12.0;
/// 1 bag = 50 pieces.
pub const PIECES_PER_BAG: f64 = 50.0;
/// 1 bottle = 1 piece.
pub const PIECES_PER_BOTTLE: f64 = 1.0;
/// 1 can = 1 piece.
pub const PIECES_PER_CAN: f64 = 1.0;

/// Canonical unit catalog, in display order.
static UNITS: &[UnitDef] = &[
    UnitDef { key: "g", family: UnitFamily::Mass, base_factor: 1.0 },
    UnitDef { key: "kg", family: UnitFamily::Mass, base_factor: G_PER_KG },
    UnitDef { key: "mg", family: UnitFamily::Mass, base_factor: G_PER_MG },
    UnitDef { key: "oz", family: UnitFamily::Mass, base_factor: G_PER_OZ },
    UnitDef { key: "lb", family: UnitFamily::Mass, base_factor: G_PER_LB },
    UnitDef { key: "ml", family: UnitFamily::Volume, base_factor: 1.0 },
    UnitDef { key: "l", family: UnitFamily::Volume, base_factor: ML_PER_L },
    UnitDef { key: "tsp", family: UnitFamily::Volume, base_factor: ML_PER_TSP },
    UnitDef { key: "tbsp", family: UnitFamily::Volume, base_factor: ML_PER_TBSP },
    UnitDef { key: "cup", family: UnitFamily::Volume, base_factor: ML_PER_CUP },
    UnitDef { key: "floz", family: UnitFamily::Volume, base_factor: ML_PER_FLOZ },
    UnitDef { key: "pc", family: UnitFamily::Count, base_factor: 1.0 },
    UnitDef { key: "box", family: UnitFamily::Count, base_factor: PIECES_PER_BOX },
    UnitDef { key: "pack", family: UnitFamily::Count, base_factor: PIECES_PER_PACK },
    UnitDef { key: "bag", family: UnitFamily::Count, base_factor: PIECES_PER_BAG },
    UnitDef { key: "bottle", family: UnitFamily::Count, base_factor: PIECES_PER_BOTTLE },
    UnitDef { key: "can", family: UnitFamily::Count, base_factor: PIECES_PER_CAN },
];

/// Look up a unit by its canonical key. Callers normalize first.
pub fn find_unit(key: &str) -> Option<&'static UnitDef> {
    UNITS.iter().find(|unit| unit.key == key)
}

/// The full catalog, in display order.
pub fn catalog() -> &'static [UnitDef] {
    UNITS
}

/// Canonical unit keys, in display order.
pub fn all_units() -> Vec<&'static str> {
    UNITS.iter().map(|unit| unit.key).collect()
}

/// Whether the string names a volume unit. Case-insensitive on the
/// canonical keys; alias spellings do not classify.
pub fn is_volume_unit(unit: &str) -> bool {
    in_family(unit, UnitFamily::Volume)
}

/// Whether the string names a weight unit. Case-insensitive on the
/// canonical keys; alias spellings do not classify.
pub fn is_weight_unit(unit: &str) -> bool {
    in_family(unit, UnitFamily::Mass)
}

fn in_family(unit: &str, family: UnitFamily) -> bool {
    find_unit(unit.trim().to_lowercase().as_str()).is_some_and(|def| def.family == family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_canonical_keys() {
        assert_eq!(find_unit("kg").map(|u| u.base_factor), Some(G_PER_KG));
        assert_eq!(find_unit("cup").map(|u| u.family), Some(UnitFamily::Volume));
        assert!(find_unit("zz").is_none());
    }

    #[test]
    fn all_units_keeps_catalog_order() {
        let units = all_units();
        assert!(!units.is_empty());
        for key in ["g", "kg", "ml", "l", "pc"] {
            assert!(units.contains(&key), "missing {key}");
        }
        // Definition order, not alphabetical.
        let g = units.iter().position(|u| *u == "g").unwrap();
        let kg = units.iter().position(|u| *u == "kg").unwrap();
        let ml = units.iter().position(|u| *u == "ml").unwrap();
        assert!(g < kg && kg < ml);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert!(is_volume_unit("ML"));
        assert!(is_volume_unit("ml"));
        assert!(is_weight_unit(" KG "));
        assert!(!is_weight_unit("cup"));
    }

    #[test]
    fn count_and_unknown_units_are_neither() {
        assert!(!is_volume_unit("pc"));
        assert!(!is_weight_unit("box"));
        assert!(!is_volume_unit("zz"));
        assert!(!is_weight_unit(""));
    }

    #[test]
    fn packaging_factors_count_pieces() {
        assert_eq!(find_unit("box").map(|u| u.base_factor), Some(100.0));
        assert_eq!(find_unit("bottle").map(|u| u.base_factor), Some(1.0));
    }
}
