use async_trait::async_trait;

use crate::{
    parser::{parse_ingredient_line, strip_marker},
    FormattedRecipe, FormattingError, ScrapedRecipe,
};

#[async_trait]
pub trait RecipeFormatter: Send + Sync {
    async fn format(&self, recipe: &ScrapedRecipe) -> Result<FormattedRecipe, FormattingError>;
}

/// Formats scraped recipe text with line-based heuristics.
#[derive(Debug, Default, Clone)]
pub struct RuleBasedFormatter;

#[async_trait]
impl RecipeFormatter for RuleBasedFormatter {
    async fn format(&self, recipe: &ScrapedRecipe) -> Result<FormattedRecipe, FormattingError> {
        let mut ingredients = Vec::new();
        let mut instructions = Vec::new();

        for line in recipe.body.lines() {
            let line = line.trim();
            if line.is_empty() || is_section_header(line) {
                continue;
            }
            match parse_ingredient_line(line) {
                Some(ingredient) => ingredients.push(ingredient),
                None => {
                    let step = strip_marker(line);
                    if !step.is_empty() {
                        instructions.push(step);
                    }
                }
            }
        }

        if ingredients.is_empty() {
            return Err(FormattingError::EmptyRecipe);
        }

        Ok(FormattedRecipe {
            title: recipe.title.clone(),
            source_url: recipe.source_url.clone(),
            ingredients,
            instructions,
        })
    }
}

fn is_section_header(line: &str) -> bool {
    let lowered = line.trim_end_matches(':').trim().to_lowercase();
    matches!(
        lowered.as_str(),
        "ingredients" | "instructions" | "directions" | "method" | "steps"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(body: &str) -> ScrapedRecipe {
        ScrapedRecipe {
            title: "Paneer Butter Masala".to_string(),
            source_url: "https://example.com/pbm".to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn splits_ingredients_from_instructions() {
        let body = "Ingredients:\n- 250 gm paneer\n- 2 tbsp butter\n\nInstructions:\n1. Melt the butter\n2. Add the paneer";
        let formatted = RuleBasedFormatter.format(&recipe(body)).await.unwrap();

        assert_eq!(formatted.title, "Paneer Butter Masala");
        assert_eq!(formatted.ingredients.len(), 2);
        assert_eq!(formatted.ingredients[0].unit.as_deref(), Some("g"));
        assert_eq!(formatted.ingredients[1].name, "butter");
        assert_eq!(
            formatted.instructions,
            vec!["Melt the butter", "Add the paneer"]
        );
    }

    #[tokio::test]
    async fn recipes_without_ingredient_lines_are_rejected() {
        let body = "1. Boil water\n2. Serve";
        let err = RuleBasedFormatter.format(&recipe(body)).await.unwrap_err();

        assert!(matches!(err, FormattingError::EmptyRecipe));
    }

    #[tokio::test]
    async fn section_headers_are_dropped() {
        let body = "INGREDIENTS\n1 cup rice\nMethod:\nRinse the rice";
        let formatted = RuleBasedFormatter.format(&recipe(body)).await.unwrap();

        assert_eq!(formatted.ingredients.len(), 1);
        assert_eq!(formatted.instructions, vec!["Rinse the rice"]);
    }
}
