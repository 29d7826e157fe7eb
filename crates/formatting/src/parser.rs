use stockpot_units::{find_unit, normalize_unit};

use crate::RecipeIngredient;

const BULLETS: [char; 4] = ['-', '*', '•', '–'];

/// Parses a scraped line into a structured ingredient.
///
/// Returns `None` for lines that do not read like an ingredient, such as
/// numbered instruction steps or prose without a leading quantity.
pub fn parse_ingredient_line(line: &str) -> Option<RecipeIngredient> {
    let raw = line.trim();
    let stripped = raw.trim_start_matches(BULLETS).trim();
    if stripped.is_empty() {
        return None;
    }

    let mut tokens = stripped.split_whitespace().peekable();
    let first = tokens.peek()?;

    // "1." and "1)" are step numbering, not quantities. The check has to
    // run before parsing since "1.".parse::<f64>() succeeds.
    if first.ends_with('.') || first.ends_with(')') {
        return None;
    }

    let mut quantity = parse_number(first)?;
    tokens.next();

    // Mixed quantities like "1 1/2" fold into a single number.
    if let Some(next) = tokens.peek() {
        if next.contains('/') {
            if let Some(fraction) = parse_number(next) {
                quantity += fraction;
                tokens.next();
            }
        }
    }

    let mut unit = None;
    if let Some(next) = tokens.peek() {
        let candidate = next.trim_end_matches(['.', ',']);
        let canonical = normalize_unit(candidate);
        if find_unit(&canonical).is_some() {
            unit = Some(canonical);
            tokens.next();
        }
    }

    let mut rest: Vec<&str> = tokens.collect();
    if rest.first().is_some_and(|w| w.eq_ignore_ascii_case("of")) {
        rest.remove(0);
    }
    let name = rest.join(" ").trim_end_matches(['.', ',']).to_string();
    if name.is_empty() {
        return None;
    }

    Some(RecipeIngredient {
        quantity: Some(quantity),
        unit,
        name,
        raw: raw.to_string(),
    })
}

/// Strips bullet markers and step numbering from an instruction line.
pub fn strip_marker(line: &str) -> String {
    let stripped = line.trim().trim_start_matches(BULLETS).trim();
    let mut tokens = stripped.splitn(2, char::is_whitespace);
    if let Some(first) = tokens.next() {
        let body = first.trim_end_matches(['.', ')']);
        if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) && body != first {
            if let Some(rest) = tokens.next() {
                return rest.trim().to_string();
            }
            return String::new();
        }
    }
    stripped.to_string()
}

fn parse_number(token: &str) -> Option<f64> {
    if let Some((num, den)) = token.split_once('/') {
        let num: f64 = num.trim().parse().ok()?;
        let den: f64 = den.trim().parse().ok()?;
        if den == 0.0 {
            return None;
        }
        return Some(num / den);
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quantity_unit_and_name() {
        let parsed = parse_ingredient_line("2 cups flour").unwrap();

        assert_eq!(parsed.quantity, Some(2.0));
        assert_eq!(parsed.unit.as_deref(), Some("cup"));
        assert_eq!(parsed.name, "flour");
        assert_eq!(parsed.raw, "2 cups flour");
    }

    #[test]
    fn parses_fractions_and_mixed_quantities() {
        let half = parse_ingredient_line("1/2 tsp salt").unwrap();
        assert_eq!(half.quantity, Some(0.5));
        assert_eq!(half.unit.as_deref(), Some("tsp"));

        let mixed = parse_ingredient_line("1 1/2 cups sugar").unwrap();
        assert_eq!(mixed.quantity, Some(1.5));
        assert_eq!(mixed.name, "sugar");
    }

    #[test]
    fn strips_bullets_and_skips_of() {
        let parsed = parse_ingredient_line("- 250 gm of paneer").unwrap();

        assert_eq!(parsed.quantity, Some(250.0));
        assert_eq!(parsed.unit.as_deref(), Some("g"));
        assert_eq!(parsed.name, "paneer");
    }

    #[test]
    fn unknown_unit_folds_into_the_name() {
        let parsed = parse_ingredient_line("2 large eggs").unwrap();

        assert_eq!(parsed.quantity, Some(2.0));
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.name, "large eggs");
    }

    #[test]
    fn numbered_steps_are_not_ingredients() {
        assert!(parse_ingredient_line("1. Preheat the oven").is_none());
        assert!(parse_ingredient_line("2) Mix well").is_none());
    }

    #[test]
    fn prose_lines_are_not_ingredients() {
        assert!(parse_ingredient_line("Serve warm with bread").is_none());
        assert!(parse_ingredient_line("").is_none());
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert!(parse_ingredient_line("1/0 cup milk").is_none());
    }

    #[test]
    fn strip_marker_removes_numbering_and_bullets() {
        assert_eq!(strip_marker("1. Preheat the oven"), "Preheat the oven");
        assert_eq!(strip_marker("12) Rest the dough"), "Rest the dough");
        assert_eq!(strip_marker("- Fold gently"), "Fold gently");
        assert_eq!(strip_marker("Serve warm"), "Serve warm");
    }
}
