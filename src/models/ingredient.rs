// src/models/ingredient.rs - Ingredient catalog entries

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientKind {
    #[serde(alias = "Raw Ingredient")]
    Raw,
    #[serde(alias = "Processed Ingredient")]
    Processed,
}

impl IngredientKind {
    /// Two-letter badge shown next to the ingredient name.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Raw => "RI",
            Self::Processed => "PI",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::Processed => "Processed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "ingredients")]
    pub sub_ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default, alias = "shelfLife")]
    pub shelf_life: Option<String>,
}

impl Ingredient {
    pub fn is_raw(&self) -> bool {
        self.kind == IngredientKind::Raw
    }

    /// Case-insensitive substring match on the name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_aliases() {
        let raw: Ingredient = serde_json::from_value(json!({
            "id": 1, "name": "Flour", "type": "Raw", "unit": "kg"
        }))
        .unwrap();
        let processed: Ingredient = serde_json::from_value(json!({
            "id": 2,
            "name": "Pizza Dough",
            "type": "Processed Ingredient",
            "unit": "kg",
            "ingredients": ["Flour", "Water"],
            "allergens": ["Gluten"],
            "shelfLife": "3 days"
        }))
        .unwrap();

        assert!(raw.is_raw());
        assert_eq!(raw.kind.badge(), "RI");
        assert_eq!(processed.kind, IngredientKind::Processed);
        assert_eq!(processed.kind.badge(), "PI");
        assert_eq!(processed.sub_ingredients.len(), 2);
        assert_eq!(processed.shelf_life.as_deref(), Some("3 days"));
    }

    #[test]
    fn test_matches_ignores_case() {
        let ingredient: Ingredient = serde_json::from_value(json!({
            "id": 1, "name": "Basil Pesto", "type": "Processed"
        }))
        .unwrap();
        assert!(ingredient.matches("PESTO"));
        assert!(ingredient.matches(""));
        assert!(!ingredient.matches("tomato"));
    }
}
