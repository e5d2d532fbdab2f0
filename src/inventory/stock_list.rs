// src/inventory/stock_list.rs - Aggregated stock table with the audit-log modal

use crate::api::ApiClient;
use crate::config::UiConfig;
use crate::error::Result;
use crate::models::{StockLogEntry, StockLot};

use super::{aggregate, AggregatedStock, Pager};

const STOCKS_FAILED: &str = "Failed to fetch stocks";
const LOG_FAILED: &str = "Failed to fetch stock log";

/// The open log modal. Dropped on close, so reopening always re-fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct LogModal {
    pub ingredient_name: String,
    pub entries: Vec<StockLogEntry>,
}

#[derive(Debug, Clone)]
pub struct StockListView {
    rows: Vec<AggregatedStock>,
    pager: Pager,
    page_sizes: Vec<usize>,
    loading: bool,
    error: Option<String>,
    log: Option<LogModal>,
}

impl StockListView {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            rows: Vec::new(),
            pager: Pager::new(ui.default_page_size),
            page_sizes: ui.page_sizes.clone(),
            loading: false,
            error: None,
            log: None,
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replaces the table on success. On failure the previous rows stay and
    /// a single error message is shown.
    pub fn apply_stocks(&mut self, result: Result<Vec<StockLot>>) {
        self.loading = false;
        match result {
            Ok(lots) => {
                self.rows = aggregate(&lots);
                self.pager.set_total(self.rows.len());
                self.error = None;
                tracing::debug!(lots = lots.len(), ingredients = self.rows.len(), "stocks loaded");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch stocks");
                self.error = Some(e.user_message(STOCKS_FAILED));
            }
        }
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.begin_load();
        let result = api.list_stocks().await;
        self.apply_stocks(result);
    }

    /// Opens the modal on success; on failure it stays closed.
    pub fn apply_log(&mut self, ingredient_name: &str, result: Result<Vec<StockLogEntry>>) {
        match result {
            Ok(entries) => {
                tracing::debug!(ingredient = ingredient_name, entries = entries.len(), "stock log loaded");
                self.log = Some(LogModal {
                    ingredient_name: ingredient_name.to_string(),
                    entries,
                });
            }
            Err(e) => {
                tracing::warn!(ingredient = ingredient_name, error = %e, "failed to fetch stock log");
                self.log = None;
                self.error = Some(e.user_message(LOG_FAILED));
            }
        }
    }

    pub async fn view_log(&mut self, api: &ApiClient, ingredient_name: &str) {
        let result = api.stock_log(ingredient_name).await;
        self.apply_log(ingredient_name, result);
    }

    pub fn close_log(&mut self) {
        self.log = None;
    }

    pub fn log(&self) -> Option<&LogModal> {
        self.log.as_ref()
    }

    pub fn rows(&self) -> &[AggregatedStock] {
        &self.rows
    }

    pub fn visible_rows(&self) -> &[AggregatedStock] {
        self.pager.slice(&self.rows)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn next_page(&mut self) {
        self.pager.next();
    }

    pub fn previous_page(&mut self) {
        self.pager.previous();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.set_page_size(page_size);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::error::Error;
    use serde_json::json;
    use std::sync::Arc;

    fn lots_json() -> serde_json::Value {
        json!([
            {"id": 1, "ingredient_name": "Flour", "amount": "10", "unit": "kg"},
            {"id": 2, "ingredient_name": "Salt", "amount": "2", "unit": "kg"},
            {"id": 3, "ingredient_name": "Flour", "amount": "5.5", "unit": "kg"}
        ])
    }

    fn view() -> StockListView {
        StockListView::new(&UiConfig::default())
    }

    #[tokio::test]
    async fn test_load_aggregates() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/stocks/", 200, lots_json());
        let api = ApiClient::new(mock.clone());

        let mut view = view();
        view.load(&api).await;

        assert!(!view.is_loading());
        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.rows()[0].total_label(), "15.50");
        assert_eq!(view.pager().page_count(), 1);
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_table() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/stocks/", 200, lots_json());
        mock.fail(Method::Get, "/stocks/");
        let api = ApiClient::new(mock.clone());

        let mut view = view();
        view.load(&api).await;
        let before = view.rows().to_vec();

        view.load(&api).await;
        assert_eq!(view.rows(), before.as_slice());
        assert_eq!(
            view.error(),
            Some("Failed to fetch stocks. Please try again later.")
        );
    }

    #[test]
    fn test_log_modal_lifecycle() {
        let mut view = view();
        let entries: Vec<StockLogEntry> = serde_json::from_value(json!([
            {"date": "2024-01-01", "type": "Stock Added", "amount": 5, "unit": "kg"}
        ]))
        .unwrap();

        view.apply_log("Flour", Ok(entries));
        assert_eq!(view.log().map(|l| l.ingredient_name.as_str()), Some("Flour"));

        view.close_log();
        assert!(view.log().is_none());

        view.apply_log("Flour", Err(Error::network("/stocks/log/Flour", Some(500), "boom")));
        assert!(view.log().is_none());
        assert_eq!(
            view.error(),
            Some("Failed to fetch stock log. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_reopening_log_refetches() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/stocks/log/Salt", 200, json!([]));
        let api = ApiClient::new(mock.clone());

        let mut view = view();
        view.view_log(&api, "Salt").await;
        view.close_log();
        view.view_log(&api, "Salt").await;

        assert_eq!(mock.requests_to(Method::Get, "/stocks/log/Salt").len(), 2);
    }

    #[test]
    fn test_paging_through_rows() {
        let lots: Vec<StockLot> = (0..23)
            .map(|i| StockLot {
                id: i,
                ingredient_name: format!("Item {}", i),
                amount: 1.0,
                unit: "kg".to_string(),
                cost: None,
                expiry_date: None,
                ingredient_id: None,
            })
            .collect();

        let mut view = view();
        view.apply_stocks(Ok(lots));
        assert_eq!(view.visible_rows().len(), 10);

        view.set_page_size(15);
        view.next_page();
        assert_eq!(view.pager().page(), 2);
        assert_eq!(view.visible_rows().len(), 8);
        assert_eq!(view.visible_rows()[0].ingredient_name, "Item 15");

        view.set_page_size(20);
        assert_eq!(view.pager().page(), 1);
    }
}
