// src/models/recipe.rs - Recipes as stored by the backend and as submitted on save

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeKind {
    #[serde(rename = "Processed")]
    Processed,
    #[serde(rename = "Full Recipe")]
    FullRecipe,
}

impl RecipeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Processed => "Processed",
            Self::FullRecipe => "Full Recipe",
        }
    }

    /// Path segment used by the builder route.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::FullRecipe => "full",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "processed" => Some(Self::Processed),
            "full" => Some(Self::FullRecipe),
            _ => None,
        }
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientLine {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub required_amount: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStepLine {
    pub step_number: u32,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecipeKind,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientLine>,
    #[serde(default)]
    pub steps: Vec<RecipeStepLine>,
}

impl Recipe {
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredientPayload {
    pub id: RecordId,
    pub required_amount: f64,
    pub unit: String,
}

/// Whole-document body for `POST /recipes/` and `PUT /recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecipeKind,
    pub ingredients: Vec<RecipeIngredientPayload>,
    pub steps: Vec<RecipeStepLine>,
}
