use thiserror::Error;

use crate::catalog::find_unit;
use crate::normalize::normalize_unit;

/// Why a conversion could not be resolved. Carried as data on the
/// [`Conversion`] outcome; nothing in this crate panics over units.
///
/// Messages quote the unit strings exactly as the caller spelled them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Unit not specified")]
    MissingUnit,
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
    #[error("Cannot convert from {from} to {to}")]
    Unsupported { from: String, to: String },
}

/// Outcome of a unit conversion. Invalid outcomes carry a factor of
/// 1.0 so a careless multiply degrades to the original amount instead
/// of corrupting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub factor: f64,
    pub error: Option<ConversionError>,
}

impl Conversion {
    fn valid(factor: f64) -> Self {
        Self { factor, error: None }
    }

    fn invalid(error: ConversionError) -> Self {
        Self { factor: 1.0, error: Some(error) }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Resolve the multiplier taking an amount in `from_unit` to `to_unit`.
///
/// The factor is per-unit: the amount argument never enters the
/// computation and exists for call-site symmetry with
/// [`CostConverter::convert`](crate::cost::CostConverter::convert).
/// Converting a unit to itself succeeds with factor 1.0 even when the
/// unit is not in the catalog.
pub fn convert_unit(_amount: f64, from_unit: &str, to_unit: &str) -> Conversion {
    if from_unit.trim().is_empty() || to_unit.trim().is_empty() {
        return Conversion::invalid(ConversionError::MissingUnit);
    }

    let from = normalize_unit(from_unit);
    let to = normalize_unit(to_unit);
    if from == to {
        return Conversion::valid(1.0);
    }

    let Some(source) = find_unit(&from) else {
        return Conversion::invalid(ConversionError::UnknownUnit(from_unit.to_string()));
    };
    let Some(target) = find_unit(&to) else {
        return Conversion::invalid(ConversionError::Unsupported {
            from: from_unit.to_string(),
            to: to_unit.to_string(),
        });
    };

    if source.family != target.family {
        return Conversion::invalid(ConversionError::Unsupported {
            from: from_unit.to_string(),
            to: to_unit.to_string(),
        });
    }

    Conversion::valid(source.base_factor / target.base_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_succeeds_for_any_unit() {
        let known = convert_unit(5.0, "g", "g");
        assert!(known.is_valid());
        assert_eq!(known.factor, 1.0);

        let unknown = convert_unit(5.0, "zz", "zz");
        assert!(unknown.is_valid());
        assert_eq!(unknown.factor, 1.0);

        let aliased = convert_unit(5.0, "gm", "G");
        assert!(aliased.is_valid());
        assert_eq!(aliased.factor, 1.0);
    }

    #[test]
    fn factor_is_independent_of_amount() {
        let small = convert_unit(1.0, "kg", "g");
        let large = convert_unit(999.0, "kg", "g");
        assert_eq!(small.factor, large.factor);
    }

    #[test]
    fn mass_factors_are_reciprocal() {
        assert_eq!(convert_unit(1.0, "kg", "g").factor, 1000.0);
        assert_eq!(convert_unit(1.0, "g", "kg").factor, 0.001);

        let g_to_oz = convert_unit(1.0, "g", "oz").factor;
        assert!((g_to_oz - 0.035274).abs() < 1e-6);
        let oz_to_g = convert_unit(1.0, "oz", "g").factor;
        assert!((g_to_oz * oz_to_g - 1.0).abs() < 1e-12);
    }

    #[test]
    fn volume_factors_use_milliliter_base() {
        assert_eq!(convert_unit(1.0, "l", "ml").factor, 1000.0);
        let cup_to_tbsp = convert_unit(1.0, "cup", "tbsp").factor;
        assert!((cup_to_tbsp - 16.0).abs() < 1e-3);
    }

    #[test]
    fn packaging_factors_resolve_within_count() {
        assert_eq!(convert_unit(1.0, "box", "pc").factor, 100.0);
        assert_eq!(convert_unit(1.0, "pc", "box").factor, 0.01);
    }

    #[test]
    fn blank_units_are_missing() {
        for (from, to) in [("", "g"), ("g", ""), ("  ", "g")] {
            let conversion = convert_unit(1.0, from, to);
            assert!(!conversion.is_valid());
            assert_eq!(conversion.factor, 1.0);
            assert_eq!(
                conversion.error.unwrap().to_string(),
                "Unit not specified"
            );
        }
    }

    #[test]
    fn unknown_source_names_the_original_spelling() {
        let conversion = convert_unit(1.0, "zz", "g");
        assert!(!conversion.is_valid());
        assert_eq!(conversion.error.unwrap().to_string(), "Unknown unit: zz");
    }

    #[test]
    fn unknown_target_names_both_units() {
        let conversion = convert_unit(1.0, "g", "zz");
        assert!(!conversion.is_valid());
        assert_eq!(
            conversion.error.unwrap().to_string(),
            "Cannot convert from g to zz"
        );
    }

    #[test]
    fn cross_family_conversion_is_unsupported() {
        let conversion = convert_unit(1.0, "g", "ml");
        assert!(!conversion.is_valid());
        assert_eq!(
            conversion.error.unwrap().to_string(),
            "Cannot convert from g to ml"
        );
    }

    #[test]
    fn aliases_resolve_before_lookup() {
        let conversion = convert_unit(1.0, "grams", "kg");
        assert!(conversion.is_valid());
        assert_eq!(conversion.factor, 0.001);
    }
}
