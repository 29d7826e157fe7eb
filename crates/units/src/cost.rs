use std::collections::HashSet;

use crate::convert::convert_unit;

/// Converts per-unit costs between units, degrading gracefully: a pair
/// that cannot be resolved returns the cost unchanged and logs a
/// warning at most once per distinct `(from, to)` pair for the life of
/// the instance.
///
/// Instances are owned by their caller; there is no process-wide
/// warning memory. Long-lived holders can [`reset`](Self::reset)
/// between bulk operations to re-arm the diagnostics.
#[derive(Debug, Default)]
pub struct CostConverter {
    warned: HashSet<(String, String)>,
}

impl CostConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `cost` per `from_unit` into a cost per `to_unit`.
    ///
    /// `ingredient` only labels the diagnostic when the pair cannot be
    /// resolved; the returned value is then `cost` itself, so a batch
    /// with one bad unit still prices the rest.
    pub fn convert(&mut self, cost: f64, from_unit: &str, to_unit: &str, ingredient: &str) -> f64 {
        let conversion = convert_unit(1.0, from_unit, to_unit);
        match conversion.error {
            None => cost * conversion.factor,
            Some(err) => {
                let pair = (from_unit.to_string(), to_unit.to_string());
                if self.warned.insert(pair) {
                    tracing::warn!(
                        ingredient,
                        from_unit,
                        to_unit,
                        err = %err,
                        "cost conversion failed, keeping unconverted cost"
                    );
                }
                cost
            }
        }
    }

    /// Forget which pairs have already been warned about.
    pub fn reset(&mut self) {
        self.warned.clear();
    }

    /// Number of distinct unresolvable pairs seen since construction
    /// or the last [`reset`](Self::reset).
    pub fn warned_pairs(&self) -> usize {
        self.warned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::CostConverter;

    #[test]
    fn converts_cost_with_the_pair_factor() {
        let mut converter = CostConverter::new();
        assert!((converter.convert(10.0, "kg", "g", "Sugar") - 10_000.0).abs() < 1e-9);
        assert!((converter.convert(10.0, "g", "kg", "Sugar") - 0.01).abs() < 1e-9);
        assert_eq!(converter.warned_pairs(), 0);
    }

    #[test]
    fn per_unit_prices_convert_against_the_amount_factor() {
        let mut converter = CostConverter::new();
        // Turning a per-kg price into a per-g price uses the g -> kg
        // amount factor (0.001): one gram is a thousandth of a kg.
        let per_g = converter.convert(0.74, "g", "kg", "Sugar");
        assert!((per_g - 0.00074).abs() < 1e-12);
    }

    #[test]
    fn invalid_pair_returns_original_cost() {
        let mut converter = CostConverter::new();
        let cost = converter.convert(10.0, "g", "zz", "Flour");
        assert_eq!(cost, 10.0);
        assert_eq!(converter.warned_pairs(), 1);
    }

    #[test]
    fn warns_once_per_distinct_pair() {
        let mut converter = CostConverter::new();
        converter.convert(10.0, "g", "zz", "Flour");
        converter.convert(25.0, "g", "zz", "Flour");
        converter.convert(7.5, "g", "zz", "Salt");
        assert_eq!(converter.warned_pairs(), 1);

        converter.convert(4.0, "zz", "g", "Flour");
        assert_eq!(converter.warned_pairs(), 2);
    }

    #[test]
    fn reset_rearms_the_diagnostics() {
        let mut converter = CostConverter::new();
        converter.convert(10.0, "g", "zz", "Flour");
        assert_eq!(converter.warned_pairs(), 1);

        converter.reset();
        assert_eq!(converter.warned_pairs(), 0);
        converter.convert(10.0, "g", "zz", "Flour");
        assert_eq!(converter.warned_pairs(), 1);
    }

    #[test]
    fn identity_on_unknown_units_does_not_warn() {
        let mut converter = CostConverter::new();
        let cost = converter.convert(3.0, "zz", "zz", "Mystery");
        assert_eq!(cost, 3.0);
        assert_eq!(converter.warned_pairs(), 0);
    }
}
