// src/api/client.rs - Typed endpoint methods over an `HttpTransport`

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, TransportArc};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::{
    CalendarEvent, ExecuteFullRecipe, ExecuteProcessedRecipe, Ingredient, MemberPayload,
    NewCalendarEvent, NewStockLot, Recipe, RecipePayload, Restaurant, StockCounts,
    StockHistoryPoint, StockLogEntry, StockLot, StockLotPatch, TeamMember,
};
use crate::types::RecordId;

/// What a request refers to, used when the backend answers 404.
struct Target<'a> {
    resource: &'a str,
    id: Option<String>,
}

impl<'a> Target<'a> {
    fn all(resource: &'a str) -> Self {
        Self { resource, id: None }
    }

    fn one(resource: &'a str, id: impl ToString) -> Self {
        Self {
            resource,
            id: Some(id.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    transport: TransportArc,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    // Stocks

    pub async fn list_stocks(&self) -> Result<Vec<StockLot>> {
        self.fetch(ApiRequest::get("/stocks/"), Target::all("stocks"))
            .await
    }

    pub async fn create_stock(&self, lot: &NewStockLot) -> Result<StockLot> {
        self.fetch(
            ApiRequest::post("/stocks/", to_body(lot)?),
            Target::all("stocks"),
        )
        .await
    }

    /// Part of the backend surface; no screen edits lots in place yet.
    pub async fn update_stock(&self, id: RecordId, patch: &StockLotPatch) -> Result<StockLot> {
        self.fetch(
            ApiRequest::put(format!("/stocks/{}", id), to_body(patch)?),
            Target::one("stock lot", id),
        )
        .await
    }

    pub async fn stock_log(&self, ingredient_name: &str) -> Result<Vec<StockLogEntry>> {
        let path = format!("/stocks/log/{}", urlencoding::encode(ingredient_name));
        self.fetch(
            ApiRequest::get(path),
            Target::one("stock log", ingredient_name),
        )
        .await
    }

    // Catalog and recipes

    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.fetch(ApiRequest::get("/ingredients/"), Target::all("ingredients"))
            .await
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.fetch(ApiRequest::get("/recipes/"), Target::all("recipes"))
            .await
    }

    pub async fn get_recipe(&self, id: RecordId) -> Result<Recipe> {
        self.fetch(
            ApiRequest::get(format!("/recipes/{}", id)),
            Target::one("recipe", id),
        )
        .await
    }

    pub async fn create_recipe(&self, payload: &RecipePayload) -> Result<Recipe> {
        self.fetch(
            ApiRequest::post("/recipes/", to_body(payload)?),
            Target::all("recipes"),
        )
        .await
    }

    pub async fn update_recipe(&self, id: RecordId, payload: &RecipePayload) -> Result<Recipe> {
        self.fetch(
            ApiRequest::put(format!("/recipes/{}", id), to_body(payload)?),
            Target::one("recipe", id),
        )
        .await
    }

    pub async fn delete_recipe(&self, id: RecordId) -> Result<()> {
        self.execute(
            ApiRequest::delete(format!("/recipes/{}", id)),
            Target::one("recipe", id),
        )
        .await
    }

    pub async fn execute_processed_recipe(&self, command: &ExecuteProcessedRecipe) -> Result<()> {
        self.execute(
            ApiRequest::post("/execute_processed_recipe", to_body(command)?),
            Target::one("recipe", command.recipe_id),
        )
        .await
    }

    pub async fn execute_full_recipe(&self, command: &ExecuteFullRecipe) -> Result<()> {
        self.execute(
            ApiRequest::post("/execute_full_recipe", to_body(command)?),
            Target::one("recipe", command.recipe_id),
        )
        .await
    }

    // Stats

    pub async fn stock_counts(&self) -> Result<StockCounts> {
        self.fetch(
            ApiRequest::get("/stats/stock_counts"),
            Target::all("stock counts"),
        )
        .await
    }

    pub async fn stock_history(&self) -> Result<Vec<StockHistoryPoint>> {
        self.fetch(
            ApiRequest::get("/stats/stock_history"),
            Target::all("stock history"),
        )
        .await
    }

    // Team

    pub async fn list_users(&self) -> Result<Vec<TeamMember>> {
        self.fetch(ApiRequest::get("/users/"), Target::all("users"))
            .await
    }

    pub async fn create_user(&self, member: &MemberPayload) -> Result<TeamMember> {
        self.fetch(
            ApiRequest::post("/users/", to_body(member)?),
            Target::all("users"),
        )
        .await
    }

    pub async fn update_user(&self, id: RecordId, member: &MemberPayload) -> Result<TeamMember> {
        self.fetch(
            ApiRequest::put(format!("/users/{}", id), to_body(member)?),
            Target::one("team member", id),
        )
        .await
    }

    pub async fn delete_user(&self, id: RecordId) -> Result<()> {
        self.execute(
            ApiRequest::delete(format!("/users/{}", id)),
            Target::one("team member", id),
        )
        .await
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.fetch(ApiRequest::get("/restaurants/"), Target::all("restaurants"))
            .await
    }

    // Calendar

    pub async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        self.fetch(ApiRequest::get("/events/"), Target::all("events"))
            .await
    }

    pub async fn create_event(&self, event: &NewCalendarEvent) -> Result<CalendarEvent> {
        self.fetch(
            ApiRequest::post("/events/", to_body(event)?),
            Target::all("events"),
        )
        .await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest, target: Target<'_>) -> Result<T> {
        let path = request.path.clone();
        let response = self.round_trip(request, target).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            Error::serialization(format!("Unexpected response from {}: {}", path, e))
                .source("api")
        })
    }

    async fn execute(&self, request: ApiRequest, target: Target<'_>) -> Result<()> {
        self.round_trip(request, target).await.map(|_| ())
    }

    async fn round_trip(&self, request: ApiRequest, target: Target<'_>) -> Result<ApiResponse> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "request failed");
            e
        })?;

        if response.is_success() {
            tracing::debug!(%method, %path, status = response.status, "request ok");
            return Ok(response);
        }

        tracing::warn!(%method, %path, status = response.status, "backend rejected request");
        if response.status == 404 {
            return Err(Error::not_found(target.resource, target.id));
        }

        let message = backend_message(&response.body)
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        Err(Error::network(path, Some(response.status), message))
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(Error::from)
}

/// Extracts `message` or `detail` from an error body.
fn backend_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn client(mock: &Arc<MockTransport>) -> ApiClient {
        ApiClient::new(mock.clone())
    }

    #[tokio::test]
    async fn test_list_stocks() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(
            Method::Get,
            "/stocks/",
            200,
            json!([{"id": 1, "ingredient_name": "Salt", "amount": "1.5", "unit": "kg"}]),
        );

        let stocks = client(&mock).list_stocks().await.unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].amount, 1.5);
    }

    #[tokio::test]
    async fn test_stock_log_encodes_name() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/stocks/log/Olive%20Oil%20%26%20Herbs", 200, json!([]));

        let log = client(&mock).stock_log("Olive Oil & Herbs").await.unwrap();
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_update_stock_sends_only_set_fields() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(
            Method::Put,
            "/stocks/5",
            200,
            json!({"id": 5, "ingredient_name": "Salt", "amount": "3", "unit": "kg"}),
        );
        mock.reply(Method::Put, "/stocks/6", 404, json!({"detail": "Not Found"}));

        let patch = StockLotPatch {
            amount: Some(3.0),
            ..StockLotPatch::default()
        };
        let lot = client(&mock).update_stock(5, &patch).await.unwrap();
        assert_eq!(lot.amount, 3.0);
        assert_eq!(
            mock.requests_to(Method::Put, "/stocks/5")[0].body,
            Some(json!({"amount": 3.0}))
        );

        let error = client(&mock).update_stock(6, &patch).await.unwrap_err();
        assert_eq!(
            error.kind,
            ErrorKind::NotFound {
                resource: "stock lot".to_string(),
                id: Some("6".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_not_found_mapping() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/recipes/42", 404, json!({"detail": "Not Found"}));

        let error = client(&mock).get_recipe(42).await.unwrap_err();
        assert_eq!(
            error.kind,
            ErrorKind::NotFound {
                resource: "recipe".to_string(),
                id: Some("42".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_keeps_backend_message() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(
            Method::Post,
            "/execute_full_recipe",
            400,
            json!({"message": "Insufficient stock for Dough"}),
        );

        let command = ExecuteFullRecipe {
            recipe_id: 3,
            quantity: 2.0,
            sale_price: 18.0,
        };
        let error = client(&mock).execute_full_recipe(&command).await.unwrap_err();
        assert!(error.is_network());
        assert_eq!(error.message, "Insufficient stock for Dough");

        let sent = mock.requests_to(Method::Post, "/execute_full_recipe");
        assert_eq!(
            sent[0].body,
            Some(json!({"recipe_id": 3, "quantity": 2.0, "sale_price": 18.0}))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/ingredients/", 200, json!({"unexpected": true}));

        let error = client(&mock).list_ingredients().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_delete_with_empty_body() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Delete, "/recipes/5", 204, Value::Null);

        client(&mock).delete_recipe(5).await.unwrap();
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_backend_message_keys() {
        assert_eq!(backend_message(br#"{"error": "boom"}"#), Some("boom".to_string()));
        assert_eq!(backend_message(b"<html>"), None);
    }
}
