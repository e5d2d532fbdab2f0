// src/testing/mod.rs - Manual inventory actions: add stock, run recipes

use chrono::{DateTime, Duration, Utc};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::{
    ExecuteFullRecipe, ExecuteProcessedRecipe, Ingredient, NewStockLot, Recipe, RecipeKind,
    StockLot,
};
use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelMessage {
    pub tone: MessageTone,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddStockForm {
    pub ingredient_id: Option<RecordId>,
    pub amount: String,
    pub cost: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedRecipeForm {
    pub recipe_id: Option<RecordId>,
    pub quantity: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullRecipeForm {
    pub recipe_id: Option<RecordId>,
    pub quantity: String,
    pub sale_price: String,
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[derive(Debug, Clone)]
pub struct TestingPanel {
    raw_ingredients: Vec<Ingredient>,
    processed_recipes: Vec<Recipe>,
    full_recipes: Vec<Recipe>,
    pub add_stock: AddStockForm,
    pub processed: ProcessedRecipeForm,
    pub full: FullRecipeForm,
    expiry_days: i64,
    message: Option<PanelMessage>,
}

impl TestingPanel {
    pub fn new(expiry_days: i64) -> Self {
        Self {
            raw_ingredients: Vec::new(),
            processed_recipes: Vec::new(),
            full_recipes: Vec::new(),
            add_stock: AddStockForm::default(),
            processed: ProcessedRecipeForm::default(),
            full: FullRecipeForm::default(),
            expiry_days,
            message: None,
        }
    }

    /// Keeps only raw ingredients; stock is never added to processed ones here.
    pub fn apply_ingredients(&mut self, result: Result<Vec<Ingredient>>) {
        match result {
            Ok(ingredients) => {
                self.raw_ingredients = ingredients.into_iter().filter(Ingredient::is_raw).collect();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch ingredients");
                self.report(MessageTone::Error, e.user_message("Failed to fetch ingredients"));
            }
        }
    }

    pub fn apply_recipes(&mut self, result: Result<Vec<Recipe>>) {
        match result {
            Ok(recipes) => {
                let (processed, full): (Vec<Recipe>, Vec<Recipe>) = recipes
                    .into_iter()
                    .partition(|r| r.kind == RecipeKind::Processed);
                self.processed_recipes = processed;
                self.full_recipes = full;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch recipes");
                self.report(MessageTone::Error, e.user_message("Failed to fetch recipes"));
            }
        }
    }

    pub fn apply_options(
        &mut self,
        ingredients: Result<Vec<Ingredient>>,
        recipes: Result<Vec<Recipe>>,
    ) {
        self.apply_ingredients(ingredients);
        self.apply_recipes(recipes);
    }

    pub fn raw_ingredients(&self) -> &[Ingredient] {
        &self.raw_ingredients
    }

    pub fn processed_recipes(&self) -> &[Recipe] {
        &self.processed_recipes
    }

    pub fn full_recipes(&self) -> &[Recipe] {
        &self.full_recipes
    }

    pub fn selected_ingredient(&self) -> Option<&Ingredient> {
        let id = self.add_stock.ingredient_id?;
        self.raw_ingredients.iter().find(|i| i.id == id)
    }

    pub fn message(&self) -> Option<&PanelMessage> {
        self.message.as_ref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    fn report(&mut self, tone: MessageTone, text: impl Into<String>) {
        self.message = Some(PanelMessage {
            tone,
            text: text.into(),
        });
    }

    // Add stock

    pub fn build_add_stock(&self, now: DateTime<Utc>) -> Result<NewStockLot> {
        let missing = || {
            Error::validation(
                "add_stock",
                "Please select an ingredient and enter amount and cost.",
            )
        };
        let ingredient = self.selected_ingredient().ok_or_else(missing)?;
        let amount = parse_number(&self.add_stock.amount).ok_or_else(missing)?;
        let cost = parse_number(&self.add_stock.cost).ok_or_else(missing)?;

        Ok(NewStockLot {
            name: format!("{} Stock", ingredient.name),
            expiry_date: now + Duration::days(self.expiry_days),
            cost,
            amount,
            unit: ingredient.unit.clone(),
            ingredient_id: ingredient.id,
        })
    }

    pub fn apply_add_stock(&mut self, result: Result<StockLot>) {
        match result {
            Ok(lot) => {
                tracing::info!(id = lot.id, ingredient = %lot.ingredient_name, "stock added");
                self.add_stock = AddStockForm::default();
                self.report(MessageTone::Success, "Stock added successfully.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to add stock");
                self.report(MessageTone::Error, format!("Error adding stock: {}", e.message));
            }
        }
    }

    // Execute processed recipe

    pub fn build_processed(&self) -> Result<ExecuteProcessedRecipe> {
        let missing =
            || Error::validation("processed", "Please select a recipe and enter a quantity.");
        let recipe_id = self.processed.recipe_id.ok_or_else(missing)?;
        let quantity = parse_number(&self.processed.quantity).ok_or_else(missing)?;
        Ok(ExecuteProcessedRecipe {
            recipe_id,
            quantity,
        })
    }

    pub fn apply_processed(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                tracing::info!("processed recipe executed");
                self.processed = ProcessedRecipeForm::default();
                self.report(MessageTone::Success, "Processed recipe executed successfully.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to execute processed recipe");
                self.report(
                    MessageTone::Error,
                    format!("Error executing processed recipe: {}", e.message),
                );
            }
        }
    }

    // Execute full recipe

    pub fn build_full(&self) -> Result<ExecuteFullRecipe> {
        let missing = || {
            Error::validation(
                "full",
                "Please select a recipe, enter quantity and sale price.",
            )
        };
        let recipe_id = self.full.recipe_id.ok_or_else(missing)?;
        let quantity = parse_number(&self.full.quantity).ok_or_else(missing)?;
        let sale_price = parse_number(&self.full.sale_price).ok_or_else(missing)?;
        Ok(ExecuteFullRecipe {
            recipe_id,
            quantity,
            sale_price,
        })
    }

    pub fn apply_full(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                tracing::info!("full recipe executed");
                self.full = FullRecipeForm::default();
                self.report(
                    MessageTone::Success,
                    "Full recipe executed and sale recorded successfully.",
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to execute full recipe");
                self.report(
                    MessageTone::Error,
                    format!("Error executing full recipe: {}", e.message),
                );
            }
        }
    }

    /// Shows a `build_*` validation failure; nothing is sent.
    pub fn report_error(&mut self, error: &Error) {
        self.report(MessageTone::Error, error.message.clone());
    }
}

/// Fetches the dropdown options for the three forms concurrently.
pub async fn fetch_options(api: &ApiClient) -> (Result<Vec<Ingredient>>, Result<Vec<Recipe>>) {
    futures::join!(api.list_ingredients(), api.list_recipes())
}
