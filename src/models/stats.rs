// src/models/stats.rs - Aggregate counters and series from `/stats/*`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StockCounts {
    #[serde(default, deserialize_with = "de::number")]
    pub raw: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub processed: f64,
}

impl StockCounts {
    pub fn total(&self) -> f64 {
        self.raw + self.processed
    }
}

/// One point of the stock history. Every numeric field other than the label
/// is treated as a named series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHistoryPoint {
    #[serde(alias = "date", alias = "period")]
    pub label: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl StockHistoryPoint {
    pub fn series(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.fields.iter().filter_map(|(name, value)| {
            let number = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            };
            number.map(|n| (name.as_str(), n))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_total() {
        let counts: StockCounts = serde_json::from_value(json!({"raw": 12, "processed": "3"})).unwrap();
        assert_eq!(counts.total(), 15.0);
    }

    #[test]
    fn test_history_series() {
        let point: StockHistoryPoint = serde_json::from_value(json!({
            "date": "2024-05",
            "added": 40,
            "consumed": "12.5",
            "note": null
        }))
        .unwrap();

        assert_eq!(point.label, "2024-05");
        let series: Vec<(&str, f64)> = point.series().collect();
        assert_eq!(series, vec![("added", 40.0), ("consumed", 12.5)]);
    }
}
