// src/inventory/mod.rs - Stock aggregation, paging and the per-ingredient log

mod aggregate;
mod overview;
mod pagination;
mod stock_list;

pub use aggregate::{aggregate, AggregatedStock};
pub use overview::{low_stock_alerts, AlertSeverity, InventoryOverview, LowStockAlert};
pub use pagination::{page_count, paginate, Pager};
pub use stock_list::{LogModal, StockListView};
