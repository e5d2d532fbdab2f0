// src/inventory/aggregate.rs

use std::collections::HashMap;

use crate::models::StockLot;

/// Summed view of every lot sharing an ingredient name.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedStock {
    pub ingredient_name: String,
    pub total_amount: f64,
    /// Unit of the first lot seen for this name.
    pub unit: String,
    pub lot_count: usize,
    /// Set when later lots disagreed with `unit`.
    pub mixed_units: bool,
}

impl AggregatedStock {
    pub fn total_label(&self) -> String {
        format!("{:.2}", self.total_amount)
    }
}

/// Groups lots by ingredient name in first-encounter order.
///
/// Amounts are summed in encounter order. Units are not reconciled: the
/// first lot's unit wins and a mismatch only sets `mixed_units`.
pub fn aggregate(lots: &[StockLot]) -> Vec<AggregatedStock> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<AggregatedStock> = Vec::new();

    for lot in lots {
        match index.get(lot.ingredient_name.as_str()) {
            Some(&i) => {
                let row = &mut rows[i];
                row.total_amount += lot.amount;
                row.lot_count += 1;
                if row.unit != lot.unit && !row.mixed_units {
                    row.mixed_units = true;
                    tracing::warn!(
                        ingredient = %row.ingredient_name,
                        first_unit = %row.unit,
                        other_unit = %lot.unit,
                        "stock lots use different units"
                    );
                }
            }
            None => {
                index.insert(&lot.ingredient_name, rows.len());
                rows.push(AggregatedStock {
                    ingredient_name: lot.ingredient_name.clone(),
                    total_amount: lot.amount,
                    unit: lot.unit.clone(),
                    lot_count: 1,
                    mixed_units: false,
                });
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn lot(id: i64, name: &str, amount: f64, unit: &str) -> StockLot {
        StockLot {
            id,
            ingredient_name: name.to_string(),
            amount,
            unit: unit.to_string(),
            cost: None,
            expiry_date: None,
            ingredient_id: None,
        }
    }

    #[test]
    fn test_totals_are_preserved() {
        let names = ["Flour", "Salt", "Tomato", "Basil"];
        let lots: Vec<StockLot> = (0..97)
            .map(|i| lot(i, names[(i as usize * 7) % names.len()], 0.1 * (i as f64 + 1.0), "kg"))
            .collect();

        let rows = aggregate(&lots);

        let lot_sum: f64 = lots.iter().map(|l| l.amount).sum();
        let row_sum: f64 = rows.iter().map(|r| r.total_amount).sum();
        assert!((lot_sum - row_sum).abs() < 1e-9);

        let distinct: HashSet<&str> = lots.iter().map(|l| l.ingredient_name.as_str()).collect();
        assert_eq!(rows.len(), distinct.len());
        assert_eq!(rows.iter().map(|r| r.lot_count).sum::<usize>(), lots.len());
    }

    #[test]
    fn test_encounter_order_and_first_unit() {
        let lots = vec![
            lot(1, "Milk", 1.0, "l"),
            lot(2, "Eggs", 12.0, "pcs"),
            lot(3, "Milk", 500.0, "ml"),
        ];

        let rows = aggregate(&lots);
        assert_eq!(rows[0].ingredient_name, "Milk");
        assert_eq!(rows[1].ingredient_name, "Eggs");
        assert_eq!(rows[0].unit, "l");
        assert_eq!(rows[0].total_amount, 501.0);
        assert!(rows[0].mixed_units);
        assert!(!rows[1].mixed_units);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_total_label_two_decimals() {
        let rows = aggregate(&[lot(1, "Sugar", 1.0 / 3.0, "kg")]);
        assert_eq!(rows[0].total_label(), "0.33");
    }
}
