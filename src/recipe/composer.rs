// src/recipe/composer.rs - Recipe Composer
//
// Phases: Loading -> Ready -> Saving -> Saved. A failed save returns to Ready
// with every edit intact. Mutations are ignored outside Ready.

use std::fmt;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::{
    Ingredient, IngredientKind, Recipe, RecipeIngredientPayload, RecipeKind, RecipePayload,
    RecipeStepLine,
};
use crate::types::RecordId;

const DEFAULT_NAME: &str = "New Recipe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerPhase {
    Loading,
    Ready,
    Saving,
    Saved,
}

impl fmt::Display for ComposerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Saving => "saving",
            Self::Saved => "saved",
        };
        f.write_str(name)
    }
}

/// Copy of a catalog ingredient taken when a drag starts. Later catalog
/// changes do not reach an in-flight drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPayload(Ingredient);

impl DragPayload {
    pub fn ingredient(&self) -> &Ingredient {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredientRef {
    pub ingredient: Ingredient,
    pub required_amount: f64,
    pub unit: String,
}

impl RecipeIngredientRef {
    fn from_catalog(ingredient: Ingredient) -> Self {
        let unit = ingredient.unit.clone();
        Self {
            ingredient,
            required_amount: 1.0,
            unit,
        }
    }

    pub fn id(&self) -> RecordId {
        self.ingredient.id
    }
}

#[derive(Debug, Clone)]
pub struct RecipeComposer {
    id: Option<RecordId>,
    name: String,
    kind: RecipeKind,
    ingredients: Vec<RecipeIngredientRef>,
    steps: Vec<String>,
    catalog: Vec<Ingredient>,
    query: String,
    rename_draft: Option<String>,
    phase: ComposerPhase,
    load_failed: bool,
    error: Option<String>,
}

impl RecipeComposer {
    /// Blank composer for a new recipe of `kind`.
    pub fn new_recipe(kind: RecipeKind) -> Self {
        Self {
            id: None,
            name: DEFAULT_NAME.to_string(),
            kind,
            ingredients: Vec::new(),
            steps: vec![String::new()],
            catalog: Vec::new(),
            query: String::new(),
            rename_draft: None,
            phase: ComposerPhase::Loading,
            load_failed: false,
            error: None,
        }
    }

    /// Composer that will hydrate recipe `id` once loaded.
    pub fn edit_recipe(id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..Self::new_recipe(RecipeKind::FullRecipe)
        }
    }

    /// Completes loading. `existing` is present when editing. Any failure
    /// leaves the composer in `Loading` with an error message.
    pub fn apply_loaded(
        &mut self,
        catalog: Result<Vec<Ingredient>>,
        existing: Option<Result<Recipe>>,
    ) {
        if self.phase != ComposerPhase::Loading {
            return;
        }

        let catalog = match catalog {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch ingredients");
                self.error = Some(e.user_message("Failed to fetch ingredients"));
                self.load_failed = true;
                return;
            }
        };

        if let Some(existing) = existing {
            match existing {
                Ok(recipe) => self.hydrate(recipe, &catalog),
                Err(e) => {
                    tracing::warn!(id = ?self.id, error = %e, "failed to fetch recipe");
                    self.error = Some(e.user_message("Failed to load recipe"));
                    self.load_failed = true;
                    return;
                }
            }
        }

        tracing::debug!(catalog = catalog.len(), id = ?self.id, "composer ready");
        self.catalog = catalog;
        self.error = None;
        self.load_failed = false;
        self.phase = ComposerPhase::Ready;
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Clears a failed load so it can be fetched again. Returns false when
    /// there is nothing to retry.
    pub fn retry_load(&mut self) -> bool {
        if self.phase != ComposerPhase::Loading || !self.load_failed {
            return false;
        }
        self.load_failed = false;
        self.error = None;
        true
    }

    fn hydrate(&mut self, recipe: Recipe, catalog: &[Ingredient]) {
        self.id = recipe.id.or(self.id);
        self.name = recipe.name;
        self.kind = recipe.kind;

        self.ingredients = Vec::with_capacity(recipe.ingredients.len());
        for line in recipe.ingredients {
            if self.contains(line.id) {
                continue;
            }
            let ingredient = catalog
                .iter()
                .find(|i| i.id == line.id)
                .cloned()
                .unwrap_or_else(|| Ingredient {
                    id: line.id,
                    name: line
                        .name
                        .clone()
                        .unwrap_or_else(|| format!("Ingredient #{}", line.id)),
                    kind: IngredientKind::Raw,
                    unit: line.unit.clone(),
                    description: None,
                    sub_ingredients: Vec::new(),
                    allergens: Vec::new(),
                    shelf_life: None,
                });
            self.ingredients.push(RecipeIngredientRef {
                ingredient,
                required_amount: line.required_amount,
                unit: line.unit,
            });
        }

        let mut steps = recipe.steps;
        steps.sort_by_key(|s| s.step_number);
        self.steps = steps.into_iter().map(|s| s.instruction).collect();
        if self.steps.is_empty() {
            self.steps.push(String::new());
        }
    }

    fn is_ready(&self) -> bool {
        self.phase == ComposerPhase::Ready
    }

    fn contains(&self, id: RecordId) -> bool {
        self.ingredients.iter().any(|r| r.id() == id)
    }

    // Catalog

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Catalog entries matching the search box. The recipe list is never filtered.
    pub fn filtered_catalog(&self) -> Vec<&Ingredient> {
        self.catalog.iter().filter(|i| i.matches(&self.query)).collect()
    }

    pub fn begin_drag(&self, id: RecordId) -> Option<DragPayload> {
        self.catalog
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .map(DragPayload)
    }

    /// Adds the dragged ingredient with amount 1. Returns false when the
    /// drop was rejected (duplicate id or wrong phase).
    pub fn drop_ingredient(&mut self, payload: DragPayload) -> bool {
        if !self.is_ready() || self.contains(payload.0.id) {
            return false;
        }
        self.ingredients
            .push(RecipeIngredientRef::from_catalog(payload.0));
        true
    }

    pub fn remove_ingredient(&mut self, id: RecordId) {
        if self.is_ready() {
            self.ingredients.retain(|r| r.id() != id);
        }
    }

    pub fn set_required_amount(&mut self, id: RecordId, amount: f64) {
        if !self.is_ready() {
            return;
        }
        if let Some(line) = self.ingredients.iter_mut().find(|r| r.id() == id) {
            line.required_amount = amount;
        }
    }

    // Steps

    pub fn add_step(&mut self) {
        if self.is_ready() {
            self.steps.push(String::new());
        }
    }

    pub fn edit_step(&mut self, index: usize, text: impl Into<String>) {
        if !self.is_ready() {
            return;
        }
        if let Some(step) = self.steps.get_mut(index) {
            *step = text.into();
        }
    }

    pub fn delete_step(&mut self, index: usize) {
        if self.is_ready() && index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    // Dish name

    pub fn begin_rename(&mut self) {
        if self.is_ready() {
            self.rename_draft = Some(self.name.clone());
        }
    }

    pub fn set_rename_draft(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.rename_draft.as_mut() {
            *draft = text.into();
        }
    }

    /// Applies the draft. A blank draft keeps the previous name.
    pub fn commit_rename(&mut self) {
        if let Some(draft) = self.rename_draft.take() {
            let draft = draft.trim();
            if !draft.is_empty() {
                self.name = draft.to_string();
            }
        }
    }

    pub fn cancel_rename(&mut self) {
        self.rename_draft = None;
    }

    pub fn rename_draft(&self) -> Option<&str> {
        self.rename_draft.as_deref()
    }

    // Save

    /// Whole-document payload: ids with amounts and units, steps numbered
    /// from their position.
    pub fn build_payload(&self) -> Result<RecipePayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "Please enter a recipe name."));
        }
        if self.ingredients.is_empty() {
            return Err(Error::validation(
                "ingredients",
                "Please add at least one ingredient.",
            ));
        }
        if let Some(bad) = self
            .ingredients
            .iter()
            .find(|r| !r.required_amount.is_finite() || r.required_amount <= 0.0)
        {
            return Err(Error::validation(
                "required_amount",
                format!("Please enter a positive amount for {}.", bad.ingredient.name),
            ));
        }
        if let Some(blank) = self.steps.iter().position(|s| s.trim().is_empty()) {
            return Err(Error::validation(
                "steps",
                format!("Please fill in or delete empty step {}.", blank + 1),
            ));
        }

        Ok(RecipePayload {
            name: name.to_string(),
            kind: self.kind,
            ingredients: self
                .ingredients
                .iter()
                .map(|r| RecipeIngredientPayload {
                    id: r.id(),
                    required_amount: r.required_amount,
                    unit: r.unit.clone(),
                })
                .collect(),
            steps: self
                .steps
                .iter()
                .enumerate()
                .map(|(i, text)| RecipeStepLine {
                    step_number: i as u32 + 1,
                    instruction: text.clone(),
                })
                .collect(),
        })
    }

    /// Enters `Saving` and returns the payload to submit.
    pub fn begin_save(&mut self) -> Result<RecipePayload> {
        match self.phase {
            ComposerPhase::Ready => {}
            ComposerPhase::Saving => {
                return Err(Error::conflict(
                    self.phase.to_string(),
                    "A save is already in progress.",
                ))
            }
            _ => {
                return Err(Error::conflict(
                    self.phase.to_string(),
                    "The recipe is not ready to be saved.",
                ))
            }
        }

        match self.build_payload() {
            Ok(payload) => {
                self.error = None;
                self.phase = ComposerPhase::Saving;
                Ok(payload)
            }
            Err(e) => {
                self.error = Some(e.user_message("Failed to save recipe"));
                Err(e)
            }
        }
    }

    pub fn finish_save(&mut self, result: Result<Recipe>) -> Result<()> {
        if self.phase != ComposerPhase::Saving {
            return Err(Error::conflict(
                self.phase.to_string(),
                "No save is in progress.",
            ));
        }
        match result {
            Ok(saved) => {
                tracing::info!(id = ?saved.id.or(self.id), name = %saved.name, "recipe saved");
                self.id = saved.id.or(self.id);
                self.phase = ComposerPhase::Saved;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = ?self.id, error = %e, "failed to save recipe");
                self.error = Some(e.user_message("Failed to save recipe"));
                self.phase = ComposerPhase::Ready;
                Err(e)
            }
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RecipeKind {
        self.kind
    }

    pub fn ingredients(&self) -> &[RecipeIngredientRef] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn phase(&self) -> ComposerPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

/// Fetches the catalog and, when `id` is set, the recipe being edited.
pub async fn fetch_sources(
    api: &ApiClient,
    id: Option<RecordId>,
) -> (Result<Vec<Ingredient>>, Option<Result<Recipe>>) {
    futures::join!(api.list_ingredients(), async {
        match id {
            Some(id) => Some(api.get_recipe(id).await),
            None => None,
        }
    })
}

/// Sends `payload` as a create or a full-document update.
pub async fn submit_recipe(
    api: &ApiClient,
    id: Option<RecordId>,
    payload: &RecipePayload,
) -> Result<Recipe> {
    match id {
        Some(id) => api.update_recipe(id, payload).await,
        None => api.create_recipe(payload).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn ingredient(id: RecordId, name: &str, unit: &str) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            kind: IngredientKind::Raw,
            unit: unit.to_string(),
            description: None,
            sub_ingredients: Vec::new(),
            allergens: Vec::new(),
            shelf_life: None,
        }
    }

    async fn load(composer: &mut RecipeComposer, api: &ApiClient) {
        let (catalog, existing) = fetch_sources(api, composer.id()).await;
        composer.apply_loaded(catalog, existing);
    }

    async fn save(composer: &mut RecipeComposer, api: &ApiClient) -> Result<()> {
        let payload = composer.begin_save()?;
        let result = submit_recipe(api, composer.id(), &payload).await;
        composer.finish_save(result)
    }

    fn ready_composer() -> RecipeComposer {
        let mut composer = RecipeComposer::new_recipe(RecipeKind::Processed);
        composer.apply_loaded(
            Ok(vec![
                ingredient(1, "Tomato", "kg"),
                ingredient(2, "Garlic", "kg"),
                ingredient(3, "Olive Oil", "l"),
            ]),
            None,
        );
        composer
    }

    #[test]
    fn test_new_recipe_defaults() {
        let composer = ready_composer();
        assert_eq!(composer.phase(), ComposerPhase::Ready);
        assert_eq!(composer.name(), "New Recipe");
        assert_eq!(composer.steps(), &[String::new()]);
        assert!(composer.id().is_none());
    }

    #[test]
    fn test_duplicate_drop_is_rejected() {
        let mut composer = ready_composer();
        let garlic = composer.begin_drag(2).unwrap();
        let tomato = composer.begin_drag(1).unwrap();

        assert!(composer.drop_ingredient(garlic.clone()));
        assert!(composer.drop_ingredient(tomato));
        let before = composer.ingredients().to_vec();

        assert!(!composer.drop_ingredient(garlic));
        assert_eq!(composer.ingredients(), before.as_slice());
    }

    #[test]
    fn test_drag_carries_snapshot() {
        let mut composer = ready_composer();
        let payload = composer.begin_drag(3).unwrap();
        composer.catalog[2].name = "Extra Virgin Olive Oil".to_string();

        composer.drop_ingredient(payload);
        assert_eq!(composer.ingredients()[0].ingredient.name, "Olive Oil");
        assert_eq!(composer.ingredients()[0].required_amount, 1.0);
        assert_eq!(composer.ingredients()[0].unit, "l");
    }

    #[test]
    fn test_filter_only_touches_catalog() {
        let mut composer = ready_composer();
        let tomato = composer.begin_drag(1).unwrap();
        composer.drop_ingredient(tomato);

        composer.set_query("GAR");
        let names: Vec<&str> = composer.filtered_catalog().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Garlic"]);
        assert_eq!(composer.ingredients().len(), 1);
    }

    #[test]
    fn test_step_renumbering() {
        let mut composer = ready_composer();
        composer.drop_ingredient(composer.begin_drag(1).unwrap());
        composer.edit_step(0, "A");
        composer.add_step();
        composer.edit_step(1, "B");
        composer.add_step();
        composer.edit_step(2, "C");

        composer.delete_step(1);
        assert_eq!(composer.steps(), &["A".to_string(), "C".to_string()]);

        let payload = composer.build_payload().unwrap();
        let numbered: Vec<(u32, &str)> = payload
            .steps
            .iter()
            .map(|s| (s.step_number, s.instruction.as_str()))
            .collect();
        assert_eq!(numbered, vec![(1, "A"), (2, "C")]);
    }

    #[test]
    fn test_save_payload_shape() {
        let mut composer = RecipeComposer::new_recipe(RecipeKind::Processed);
        composer.apply_loaded(Ok(vec![ingredient(2, "Tomato", "kg")]), None);
        composer.begin_rename();
        composer.set_rename_draft("Sauce");
        composer.commit_rename();
        composer.drop_ingredient(composer.begin_drag(2).unwrap());
        composer.set_required_amount(2, 3.0);
        composer.edit_step(0, "Simmer");

        let payload = composer.build_payload().unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Sauce",
                "type": "Processed",
                "ingredients": [{"id": 2, "required_amount": 3.0, "unit": "kg"}],
                "steps": [{"step_number": 1, "instruction": "Simmer"}]
            })
        );
    }

    #[test]
    fn test_blank_rename_reverts() {
        let mut composer = ready_composer();
        composer.begin_rename();
        composer.set_rename_draft("   ");
        composer.commit_rename();
        assert_eq!(composer.name(), "New Recipe");
        assert!(composer.rename_draft().is_none());
    }

    #[test]
    fn test_validation_blocks_save() {
        let mut composer = ready_composer();
        let error = composer.begin_save().unwrap_err();
        assert!(error.is_validation());
        assert_eq!(composer.phase(), ComposerPhase::Ready);
        assert_eq!(composer.error(), Some("Please add at least one ingredient."));

        composer.drop_ingredient(composer.begin_drag(1).unwrap());
        let error = composer.begin_save().unwrap_err();
        assert_eq!(error.message, "Please fill in or delete empty step 1.");

        composer.edit_step(0, "Chop");
        composer.set_required_amount(1, 0.0);
        assert!(composer.begin_save().is_err());
    }

    #[test]
    fn test_reentrant_save_is_blocked() {
        let mut composer = ready_composer();
        composer.drop_ingredient(composer.begin_drag(1).unwrap());
        composer.edit_step(0, "Chop");

        composer.begin_save().unwrap();
        assert_eq!(composer.phase(), ComposerPhase::Saving);

        let error = composer.begin_save().unwrap_err();
        assert!(matches!(error.kind, crate::error::ErrorKind::Conflict { .. }));

        // Edits are frozen while saving.
        composer.add_step();
        assert_eq!(composer.steps().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/ingredients/", 200, json!([
            {"id": 1, "name": "Tomato", "type": "Raw", "unit": "kg"}
        ]));
        mock.fail(Method::Post, "/recipes/");
        let api = ApiClient::new(mock.clone());

        let mut composer = RecipeComposer::new_recipe(RecipeKind::FullRecipe);
        load(&mut composer, &api).await;
        composer.drop_ingredient(composer.begin_drag(1).unwrap());
        composer.edit_step(0, "Slice");

        assert!(save(&mut composer, &api).await.is_err());
        assert_eq!(composer.phase(), ComposerPhase::Ready);
        assert_eq!(composer.ingredients().len(), 1);
        assert_eq!(composer.steps(), &["Slice".to_string()]);
        assert_eq!(
            composer.error(),
            Some("Failed to save recipe. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_edit_hydrates_and_updates() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/ingredients/", 200, json!([
            {"id": 1, "name": "Tomato", "type": "Raw", "unit": "kg"}
        ]));
        mock.reply(Method::Get, "/recipes/7", 200, json!({
            "id": 7,
            "name": "Salsa",
            "type": "Processed",
            "ingredients": [
                {"id": 1, "required_amount": 2, "unit": "kg"},
                {"id": 9, "name": "Lime", "required_amount": "0.5", "unit": "pcs"}
            ],
            "steps": [
                {"step_number": 2, "instruction": "Mix"},
                {"step_number": 1, "instruction": "Chop"}
            ]
        }));
        mock.reply(Method::Put, "/recipes/7", 200, json!({
            "id": 7, "name": "Salsa", "type": "Processed"
        }));
        let api = ApiClient::new(mock.clone());

        let mut composer = RecipeComposer::edit_recipe(7);
        load(&mut composer, &api).await;

        assert_eq!(composer.phase(), ComposerPhase::Ready);
        assert_eq!(composer.kind(), RecipeKind::Processed);
        assert_eq!(composer.steps(), &["Chop".to_string(), "Mix".to_string()]);
        assert_eq!(composer.ingredients()[1].ingredient.name, "Lime");

        save(&mut composer, &api).await.unwrap();
        assert_eq!(composer.phase(), ComposerPhase::Saved);
        assert_eq!(mock.requests_to(Method::Put, "/recipes/7").len(), 1);
        assert!(mock.requests_to(Method::Post, "/recipes/").is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_stays_loading() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Get, "/ingredients/");
        let api = ApiClient::new(mock.clone());

        let mut composer = RecipeComposer::new_recipe(RecipeKind::Processed);
        load(&mut composer, &api).await;

        assert_eq!(composer.phase(), ComposerPhase::Loading);
        assert!(composer.load_failed());
        assert_eq!(
            composer.error(),
            Some("Failed to fetch ingredients. Please try again later.")
        );
        assert!(!composer.drop_ingredient(DragPayload(ingredient(1, "Tomato", "kg"))));
    }

    #[tokio::test]
    async fn test_retry_after_failed_load() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Get, "/ingredients/");
        mock.reply(Method::Get, "/ingredients/", 200, json!([
            {"id": 1, "name": "Tomato", "type": "Raw", "unit": "kg"}
        ]));
        let api = ApiClient::new(mock.clone());

        let mut composer = RecipeComposer::new_recipe(RecipeKind::Processed);
        assert!(!composer.retry_load());
        load(&mut composer, &api).await;
        composer.dismiss_error();
        assert!(composer.load_failed());

        assert!(composer.retry_load());
        assert!(!composer.load_failed());
        load(&mut composer, &api).await;

        assert_eq!(composer.phase(), ComposerPhase::Ready);
        assert!(composer.error().is_none());
        assert!(!composer.retry_load());
        assert_eq!(mock.requests_to(Method::Get, "/ingredients/").len(), 2);
    }
}
