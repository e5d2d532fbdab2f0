// src/dashboard/mod.rs - Stock counters and history from `/stats/*`

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{StockCounts, StockHistoryPoint};

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    counts: Option<StockCounts>,
    history: Vec<StockHistoryPoint>,
    loading: bool,
    error: Option<String>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Each half is applied independently; the first failure is shown.
    pub fn apply(
        &mut self,
        counts: Result<StockCounts>,
        history: Result<Vec<StockHistoryPoint>>,
    ) {
        self.loading = false;
        self.error = None;

        match counts {
            Ok(counts) => self.counts = Some(counts),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch stock counts");
                self.error = Some(e.user_message("Failed to fetch stock counts"));
            }
        }
        match history {
            Ok(history) => {
                tracing::debug!(points = history.len(), "stock history loaded");
                self.history = history;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch stock history");
                self.error
                    .get_or_insert_with(|| e.user_message("Failed to fetch stock history"));
            }
        }
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.loading = true;
        let (counts, history) = futures::join!(api.stock_counts(), api.stock_history());
        self.apply(counts, history);
    }

    pub fn counts(&self) -> Option<StockCounts> {
        self.counts
    }

    pub fn history(&self) -> &[StockHistoryPoint] {
        &self.history
    }

    /// Series names in first-seen order across all points.
    pub fn series_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for point in &self.history {
            for (name, _) in point.series() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }

    /// Largest value in any series, for scaling bars.
    pub fn peak(&self) -> f64 {
        self.history
            .iter()
            .flat_map(|p| p.series().map(|(_, v)| v))
            .fold(0.0, f64::max)
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

    #[test]
    fn test_load_counts_and_history() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/stats/stock_counts", 200, json!({"raw": 4, "processed": 6}));
        mock.reply(Method::Get, "/stats/stock_history", 200, json!([
            {"date": "2024-01", "added": 10, "consumed": 4},
            {"date": "2024-02", "added": 7, "wasted": 1}
        ]));
        let api = ApiClient::new(mock.clone());

        let mut view = DashboardView::new();
        tokio_test::block_on(view.load(&api));

        assert!(!view.is_loading());
        assert_eq!(view.counts().map(|c| c.total()), Some(10.0));
        assert_eq!(view.history().len(), 2);
        assert_eq!(view.series_names(), vec!["added", "consumed", "wasted"]);
        assert_eq!(view.peak(), 10.0);
    }

    #[test]
    fn test_history_failure_keeps_counts() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/stats/stock_counts", 200, json!({"raw": 1, "processed": 1}));
        mock.fail(Method::Get, "/stats/stock_history");
        let api = ApiClient::new(mock.clone());

        let mut view = DashboardView::new();
        tokio_test::block_on(view.load(&api));

        assert!(view.counts().is_some());
        assert_eq!(
            view.error(),
            Some("Failed to fetch stock history. Please try again later.")
        );
    }
}
