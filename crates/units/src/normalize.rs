/// Canonicalize a raw unit string: trim, lowercase and collapse known
/// alias spellings onto catalog keys. Anything unrecognized passes
/// through trimmed and lowercased; validation happens at conversion
/// time, not here.
pub fn normalize_unit(raw: &str) -> String {
    let unit = raw.trim().to_lowercase();
    let canonical = match unit.as_str() {
        "gm" | "gms" | "gram" | "grams" => "g",
        "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => "kg",
        "milligram" | "milligrams" => "mg",
        "ounce" | "ounces" => "oz",
        "lbs" | "pound" | "pounds" => "lb",
        "milliliter" | "milliliters" | "millilitre" | "millilitres" => "ml",
        "ltr" | "liter" | "liters" | "litre" | "litres" => "l",
        "teaspoon" | "teaspoons" => "tsp",
        "tbs" | "tablespoon" | "tablespoons" => "tbsp",
        "cups" => "cup",
        "fl oz" | "fluid ounce" | "fluid ounces" => "floz",
        "pcs" | "piece" | "pieces" | "each" | "ea" => "pc",
        "boxes" => "box",
        "packs" | "packet" | "packets" => "pack",
        "bags" => "bag",
        "bottles" => "bottle",
        "cans" | "tin" | "tins" => "can",
        _ => return unit,
    };

    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_unit;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_unit("  KG "), "kg");
        assert_eq!(normalize_unit("Ml"), "ml");
    }

    #[test]
    fn collapses_aliases() {
        assert_eq!(normalize_unit("gm"), "g");
        assert_eq!(normalize_unit("Grams"), "g");
        assert_eq!(normalize_unit("litre"), "l");
        assert_eq!(normalize_unit("Tablespoons"), "tbsp");
        assert_eq!(normalize_unit("pcs"), "pc");
    }

    #[test]
    fn passes_unknown_strings_through() {
        assert_eq!(normalize_unit("zz"), "zz");
        assert_eq!(normalize_unit(" Zz "), "zz");
        assert_eq!(normalize_unit(""), "");
    }
}
