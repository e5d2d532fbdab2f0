// src/recipe/book.rs - Recipe listing split by kind

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Recipe, RecipeKind};
use crate::types::RecordId;

#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    processed_query: String,
    full_query: String,
    pending_delete: Option<RecordId>,
    loading: bool,
    error: Option<String>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn apply_recipes(&mut self, result: Result<Vec<Recipe>>) {
        self.loading = false;
        match result {
            Ok(recipes) => {
                tracing::debug!(count = recipes.len(), "recipes loaded");
                self.recipes = recipes;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch recipes");
                self.error = Some(e.user_message("Failed to fetch recipes"));
            }
        }
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.begin_load();
        let result = api.list_recipes().await;
        self.apply_recipes(result);
    }

    pub fn set_query(&mut self, kind: RecipeKind, query: impl Into<String>) {
        match kind {
            RecipeKind::Processed => self.processed_query = query.into(),
            RecipeKind::FullRecipe => self.full_query = query.into(),
        }
    }

    pub fn query(&self, kind: RecipeKind) -> &str {
        match kind {
            RecipeKind::Processed => &self.processed_query,
            RecipeKind::FullRecipe => &self.full_query,
        }
    }

    /// Recipes of `kind` matching that list's own search box.
    pub fn list(&self, kind: RecipeKind) -> Vec<&Recipe> {
        let query = self.query(kind);
        self.recipes
            .iter()
            .filter(|r| r.kind == kind && r.matches(query))
            .collect()
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Opens the delete confirmation for `id`.
    pub fn request_delete(&mut self, id: RecordId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&Recipe> {
        let id = self.pending_delete?;
        self.recipes.iter().find(|r| r.id == Some(id))
    }

    /// Closes the confirmation and hands back the id to delete.
    pub fn take_pending_delete(&mut self) -> Option<RecordId> {
        self.pending_delete.take()
    }

    pub fn apply_delete(&mut self, id: RecordId, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                tracing::info!(id, "recipe deleted");
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to delete recipe");
                self.error = Some(e.user_message("Failed to delete recipe"));
                false
            }
        }
    }

    /// Deletes the confirmed recipe and re-fetches the list.
    pub async fn confirm_delete(&mut self, api: &ApiClient) {
        let Some(id) = self.take_pending_delete() else {
            return;
        };
        let result = api.delete_recipe(id).await;
        if self.apply_delete(id, result) {
            self.load(api).await;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn recipes_json() -> serde_json::Value {
        json!([
            {"id": 1, "name": "Tomato Sauce", "type": "Processed"},
            {"id": 2, "name": "Pizza Dough", "type": "Processed"},
            {"id": 3, "name": "Margherita", "type": "Full Recipe"},
            {"id": 4, "name": "Tomato Soup", "type": "Full Recipe"}
        ])
    }

    #[tokio::test]
    async fn test_lists_split_by_kind_with_own_search() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/recipes/", 200, recipes_json());
        let api = ApiClient::new(mock.clone());

        let mut book = RecipeBook::new();
        book.load(&api).await;

        assert_eq!(book.list(RecipeKind::Processed).len(), 2);
        assert_eq!(book.list(RecipeKind::FullRecipe).len(), 2);

        book.set_query(RecipeKind::Processed, "tomato");
        let processed: Vec<&str> = book
            .list(RecipeKind::Processed)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(processed, vec!["Tomato Sauce"]);
        assert_eq!(book.list(RecipeKind::FullRecipe).len(), 2);
    }

    #[tokio::test]
    async fn test_delete_refetches() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/recipes/", 200, recipes_json());
        mock.reply(Method::Get, "/recipes/", 200, json!([
            {"id": 1, "name": "Tomato Sauce", "type": "Processed"}
        ]));
        mock.reply(Method::Delete, "/recipes/2", 204, serde_json::Value::Null);
        let api = ApiClient::new(mock.clone());

        let mut book = RecipeBook::new();
        book.load(&api).await;
        book.request_delete(2);
        assert_eq!(book.pending_delete().map(|r| r.name.as_str()), Some("Pizza Dough"));

        book.confirm_delete(&api).await;
        assert!(book.pending_delete().is_none());
        assert_eq!(book.all().len(), 1);
        assert_eq!(mock.requests_to(Method::Get, "/recipes/").len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_delete_sends_nothing() {
        let mock = Arc::new(MockTransport::new());
        let api = ApiClient::new(mock.clone());

        let mut book = RecipeBook::new();
        book.request_delete(3);
        book.cancel_delete();
        book.confirm_delete(&api).await;

        assert!(mock.requests().is_empty());
    }
}
