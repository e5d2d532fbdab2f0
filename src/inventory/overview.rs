// src/inventory/overview.rs - Stock counters and low-stock alerts

use crate::api::ApiClient;
use crate::config::LowStockConfig;
use crate::error::Result;
use crate::models::{StockCounts, StockLot};

use super::{aggregate, AggregatedStock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Critical,
    Low,
}

impl AlertSeverity {
    pub fn message(self) -> &'static str {
        match self {
            Self::Critical => "Significantly low!",
            Self::Low => "Low!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LowStockAlert {
    pub ingredient_name: String,
    pub total_amount: f64,
    pub unit: String,
    pub severity: AlertSeverity,
}

/// Rows at or under the thresholds, critical ones first.
pub fn low_stock_alerts(rows: &[AggregatedStock], thresholds: &LowStockConfig) -> Vec<LowStockAlert> {
    let mut alerts: Vec<LowStockAlert> = rows
        .iter()
        .filter_map(|row| {
            let severity = if row.total_amount <= thresholds.critical_threshold {
                AlertSeverity::Critical
            } else if row.total_amount <= thresholds.low_threshold {
                AlertSeverity::Low
            } else {
                return None;
            };
            Some(LowStockAlert {
                ingredient_name: row.ingredient_name.clone(),
                total_amount: row.total_amount,
                unit: row.unit.clone(),
                severity,
            })
        })
        .collect();
    alerts.sort_by_key(|a| a.severity);
    alerts
}

#[derive(Debug, Clone, Default)]
pub struct InventoryOverview {
    pub counts: Option<StockCounts>,
    pub alerts: Vec<LowStockAlert>,
    pub error: Option<String>,
}

impl InventoryOverview {
    pub fn apply(
        &mut self,
        counts: Result<StockCounts>,
        lots: Result<Vec<StockLot>>,
        thresholds: &LowStockConfig,
    ) {
        self.error = None;
        match counts {
            Ok(counts) => self.counts = Some(counts),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch stock counts");
                self.error = Some(e.user_message("Failed to fetch stock counts"));
            }
        }
        match lots {
            Ok(lots) => self.alerts = low_stock_alerts(&aggregate(&lots), thresholds),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch stocks for alerts");
                self.error
                    .get_or_insert_with(|| e.user_message("Failed to fetch stocks"));
            }
        }
    }

    pub async fn load(&mut self, api: &ApiClient, thresholds: &LowStockConfig) {
        let (counts, lots) = futures::join!(api.stock_counts(), api.list_stocks());
        self.apply(counts, lots, thresholds);
    }
}
