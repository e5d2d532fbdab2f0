// src/models/stock.rs - Stock lots, audit log entries and inventory commands

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use crate::types::RecordId;

/// One received batch of an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLot {
    pub id: RecordId,
    pub ingredient_name: String,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ingredient_id: Option<RecordId>,
}

/// Body of `POST /stocks/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStockLot {
    pub name: String,
    pub expiry_date: DateTime<Utc>,
    pub cost: f64,
    pub amount: f64,
    pub unit: String,
    pub ingredient_id: RecordId,
}

/// Body of `PUT /stocks/{id}`; only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockLotPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Body of `POST /execute_processed_recipe`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecuteProcessedRecipe {
    pub recipe_id: RecordId,
    pub quantity: f64,
}

/// Body of `POST /execute_full_recipe`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecuteFullRecipe {
    pub recipe_id: RecordId,
    pub quantity: f64,
    pub sale_price: f64,
}

/// What happened to an ingredient's stock, as labelled by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockAction {
    StockAdded,
    ConsumedProcessed,
    ConsumedFull,
    ExpiredWasted,
    Other(String),
}

/// Badge colour for a log action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTone {
    Success,
    Warning,
    Danger,
    Info,
}

impl StockAction {
    pub fn label(&self) -> &str {
        match self {
            Self::StockAdded => "Stock Added",
            Self::ConsumedProcessed => "Consumed (Processed Recipe)",
            Self::ConsumedFull => "Consumed (Full Recipe)",
            Self::ExpiredWasted => "Expired/Wasted",
            Self::Other(label) => label,
        }
    }

    pub fn tone(&self) -> ActionTone {
        match self {
            Self::StockAdded => ActionTone::Success,
            Self::ConsumedProcessed | Self::ConsumedFull => ActionTone::Warning,
            Self::ExpiredWasted => ActionTone::Danger,
            Self::Other(_) => ActionTone::Info,
        }
    }
}

impl From<String> for StockAction {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Stock Added" => Self::StockAdded,
            "Consumed (Processed Recipe)" => Self::ConsumedProcessed,
            "Consumed (Full Recipe)" => Self::ConsumedFull,
            "Expired/Wasted" => Self::ExpiredWasted,
            _ => Self::Other(label),
        }
    }
}

impl From<StockAction> for String {
    fn from(action: StockAction) -> Self {
        action.label().to_string()
    }
}

impl fmt::Display for StockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One audit record from `GET /stocks/log/{ingredient}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLogEntry {
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub action: StockAction,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl StockLogEntry {
    /// "`amount` `unit`", or "N/A" for actions that carry no quantity.
    pub fn amount_label(&self) -> String {
        match self.amount {
            Some(amount) => match self.unit.as_deref() {
                Some(unit) if !unit.is_empty() => format!("{} {}", amount, unit),
                _ => amount.to_string(),
            },
            None => "N/A".to_string(),
        }
    }

    /// Free-text detail, falling back to the reason.
    pub fn detail_label(&self) -> &str {
        self.details
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.reason.as_deref().filter(|r| !r.is_empty()))
            .unwrap_or("N/A")
    }

    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}
