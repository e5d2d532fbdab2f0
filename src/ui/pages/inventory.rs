// src/ui/pages/inventory.rs - Stock overview, aggregated table and log modal

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::config::LowStockConfig;
use crate::inventory::{AlertSeverity, InventoryOverview, StockListView};
use crate::ui::components::{tone_badge_class, AlertBanner, Badge, Modal, Pagination, INPUT, SECONDARY_BUTTON};
use crate::ui::pages::{format_count, Card, EmptyState, PageWrapper, StatCard};
use crate::ui::state::use_services;

async fn load(
    api: ApiClient,
    thresholds: LowStockConfig,
    mut stocks: Signal<StockListView>,
    mut overview: Signal<InventoryOverview>,
) {
    stocks.write().begin_load();
    let (lots, counts) = futures::join!(api.list_stocks(), api.stock_counts());
    overview.write().apply(counts, lots.clone(), &thresholds);
    stocks.write().apply_stocks(lots);
}

#[component]
pub fn Inventory() -> Element {
    let services = use_services();
    let ui = services.ui.clone();
    let stocks = use_signal(|| StockListView::new(&ui));
    let overview = use_signal(InventoryOverview::default);

    let api = services.api.clone();
    let thresholds = services.ui.low_stock.clone();
    use_future(move || load(api.clone(), thresholds.clone(), stocks, overview));

    let refresh = {
        let api = services.api.clone();
        let thresholds = services.ui.low_stock.clone();
        move |_| {
            spawn(load(api.clone(), thresholds.clone(), stocks, overview));
        }
    };

    let page_actions = rsx! {
        button {
            r#type: "button",
            class: SECONDARY_BUTTON,
            onclick: refresh,
            "Refresh"
        }
    };

    rsx! {
        PageWrapper {
            title: "Inventory".to_string(),
            subtitle: Some("Current stock, aggregated per ingredient".to_string()),
            actions: Some(page_actions),

            StockOverview { overview }
            StockTable { stocks }
            StockLogModal { stocks }
        }
    }
}

#[component]
fn StockOverview(overview: Signal<InventoryOverview>) -> Element {
    let overview = overview.read();
    let counts = overview.counts;

    rsx! {
        if let Some(message) = overview.error.as_ref() {
            AlertBanner { message: message.clone() }
        }
        div {
            class: "grid grid-cols-1 gap-5 lg:grid-cols-3",
            StatCard {
                title: "Raw".to_string(),
                value: counts.map(|c| format_count(c.raw)).unwrap_or_else(|| "-".to_string()),
                icon: Some("🥕".to_string())
            }
            StatCard {
                title: "Processed".to_string(),
                value: counts.map(|c| format_count(c.processed)).unwrap_or_else(|| "-".to_string()),
                icon: Some("🥫".to_string())
            }
            StatCard {
                title: "Total".to_string(),
                value: counts.map(|c| format_count(c.total())).unwrap_or_else(|| "-".to_string()),
                icon: Some("📦".to_string())
            }
        }

        if !overview.alerts.is_empty() {
            Card {
                title: "Stock alerts".to_string(),
                ul {
                    class: "divide-y divide-gray-100",
                    for alert in overview.alerts.iter() {
                        li {
                            key: "{alert.ingredient_name}",
                            class: "flex items-center justify-between py-2 text-sm",
                            span { class: "font-medium", "{alert.ingredient_name}" }
                            span { class: "text-gray-500", "{alert.total_amount:.2} {alert.unit}" }
                            Badge {
                                text: alert.severity.message().to_string(),
                                class: match alert.severity {
                                    AlertSeverity::Critical => "bg-red-100 text-red-800".to_string(),
                                    AlertSeverity::Low => "bg-yellow-100 text-yellow-800".to_string(),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StockTable(stocks: Signal<StockListView>) -> Element {
    let services = use_services();
    let mut stocks = stocks;
    let view = stocks.read();
    let pager = *view.pager();
    let page_size = pager.page_size();

    let open_log = move |name: String| {
        let api = services.api.clone();
        spawn(async move {
            let result = api.stock_log(&name).await;
            stocks.write().apply_log(&name, result);
        });
    };

    rsx! {
        Card {
            title: "Stock".to_string(),
            actions: Some(rsx! {
                label {
                    class: "flex items-center text-sm text-gray-600 space-x-2",
                    span { "Rows per page" }
                    select {
                        class: INPUT,
                        onchange: move |evt: FormEvent| {
                            if let Ok(size) = evt.value().parse::<usize>() {
                                stocks.write().set_page_size(size);
                            }
                        },
                        for size in view.page_sizes().iter().copied() {
                            option {
                                key: "{size}",
                                value: "{size}",
                                selected: size == page_size,
                                "{size}"
                            }
                        }
                    }
                }
            }),

            if let Some(message) = view.error() {
                AlertBanner {
                    message: message.to_string(),
                    on_dismiss: move |_| stocks.write().dismiss_error(),
                }
            }

            if view.is_loading() && view.rows().is_empty() {
                p { class: "text-sm text-gray-500", "Loading..." }
            } else if view.rows().is_empty() {
                EmptyState {
                    icon: "📦".to_string(),
                    title: "No stock recorded".to_string(),
                    description: "Add stock from the testing panel to see it here.".to_string()
                }
            } else {
                table {
                    class: "min-w-full text-sm",
                    thead {
                        tr {
                            class: "text-left text-gray-500",
                            th { class: "py-2 pr-4", "Ingredient" }
                            th { class: "py-2 pr-4", "Total" }
                            th { class: "py-2 pr-4", "Unit" }
                            th { class: "py-2 pr-4", "Lots" }
                            th { class: "py-2", "" }
                        }
                    }
                    tbody {
                        for row in view.visible_rows().iter() {
                            tr {
                                key: "{row.ingredient_name}",
                                class: "border-t border-gray-100",
                                td { class: "py-2 pr-4 font-medium", "{row.ingredient_name}" }
                                td { class: "py-2 pr-4", "{row.total_label()}" }
                                td {
                                    class: "py-2 pr-4",
                                    "{row.unit}"
                                    if row.mixed_units {
                                        span { class: "ml-1 text-yellow-600", title: "Lots use different units", "⚠" }
                                    }
                                }
                                td { class: "py-2 pr-4", "{row.lot_count}" }
                                td {
                                    class: "py-2 text-right",
                                    button {
                                        r#type: "button",
                                        class: "text-blue-600 hover:underline",
                                        onclick: {
                                            let name = row.ingredient_name.clone();
                                            let open_log = open_log.clone();
                                            move |_| open_log(name.clone())
                                        },
                                        "View log"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            Pagination {
                pager,
                on_previous: move |_| stocks.write().previous_page(),
                on_next: move |_| stocks.write().next_page(),
                on_page: move |page| stocks.write().go_to_page(page),
            }
        }
    }
}

#[component]
fn StockLogModal(stocks: Signal<StockListView>) -> Element {
    let mut stocks = stocks;
    let view = stocks.read();
    let Some(log) = view.log() else {
        return rsx! {};
    };

    rsx! {
        Modal {
            title: format!("Stock log: {}", log.ingredient_name),
            width: "max-w-3xl".to_string(),
            on_close: move |_| stocks.write().close_log(),

            if log.entries.is_empty() {
                EmptyState {
                    icon: "🗒️".to_string(),
                    title: "No log entries".to_string(),
                    description: "Nothing has happened to this ingredient yet.".to_string()
                }
            } else {
                table {
                    class: "min-w-full text-sm",
                    thead {
                        tr {
                            class: "text-left text-gray-500",
                            th { class: "py-2 pr-4", "Date" }
                            th { class: "py-2 pr-4", "Action" }
                            th { class: "py-2 pr-4", "Amount" }
                            th { class: "py-2", "Details" }
                        }
                    }
                    tbody {
                        for (index, entry) in log.entries.iter().enumerate() {
                            tr {
                                key: "{index}",
                                class: "border-t border-gray-100",
                                td { class: "py-2 pr-4 whitespace-nowrap", "{entry.date_label()}" }
                                td {
                                    class: "py-2 pr-4",
                                    Badge {
                                        text: entry.action.label().to_string(),
                                        class: tone_badge_class(entry.action.tone()).to_string()
                                    }
                                }
                                td { class: "py-2 pr-4", "{entry.amount_label()}" }
                                td { class: "py-2", "{entry.detail_label()}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
