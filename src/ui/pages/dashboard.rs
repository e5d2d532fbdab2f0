// src/ui/pages/dashboard.rs - Stock counters and history

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::dashboard::DashboardView;
use crate::ui::components::{AlertBanner, SECONDARY_BUTTON};
use crate::ui::pages::{format_count, Card, EmptyState, PageWrapper, StatCard};
use crate::ui::state::use_services;

#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let view = use_signal(DashboardView::new);

    let api = services.api.clone();
    use_future(move || load(api.clone(), view));

    let current = view.read();
    let counts = current.counts();
    let series = current.series_names();
    let peak = current.peak();

    let page_actions = rsx! {
        button {
            r#type: "button",
            class: SECONDARY_BUTTON,
            onclick: move |_| {
                spawn(load(services.api.clone(), view));
            },
            "Refresh"
        }
    };

    rsx! {
        PageWrapper {
            title: "Dashboard".to_string(),
            subtitle: Some("Stock levels across the kitchen".to_string()),
            actions: Some(page_actions),

            if let Some(message) = current.error() {
                AlertBanner { message: message.to_string() }
            }

            div {
                class: "grid grid-cols-1 gap-5 sm:grid-cols-3",
                StatCard {
                    title: "Raw ingredients".to_string(),
                    value: counts.map(|c| format_count(c.raw)).unwrap_or_else(|| "-".to_string()),
                    icon: Some("🥕".to_string())
                }
                StatCard {
                    title: "Processed ingredients".to_string(),
                    value: counts.map(|c| format_count(c.processed)).unwrap_or_else(|| "-".to_string()),
                    icon: Some("🥫".to_string())
                }
                StatCard {
                    title: "Total in stock".to_string(),
                    value: counts.map(|c| format_count(c.total())).unwrap_or_else(|| "-".to_string()),
                    icon: Some("📦".to_string())
                }
            }

            Card {
                title: "Stock history".to_string(),
                if current.is_loading() {
                    p { class: "text-sm text-gray-500", "Loading..." }
                } else if current.history().is_empty() {
                    EmptyState {
                        icon: "📈".to_string(),
                        title: "No history yet".to_string(),
                        description: "Stock movements will appear here once recorded.".to_string()
                    }
                } else {
                    table {
                        class: "min-w-full text-sm",
                        thead {
                            tr {
                                th { class: "text-left py-2 pr-4 text-gray-500", "Period" }
                                for name in series.iter() {
                                    th { key: "{name}", class: "text-left py-2 pr-4 text-gray-500 capitalize", "{name}" }
                                }
                            }
                        }
                        tbody {
                            for point in current.history().iter() {
                                tr {
                                    key: "{point.label}",
                                    class: "border-t border-gray-100",
                                    td { class: "py-2 pr-4 font-medium", "{point.label}" }
                                    for name in series.iter() {
                                        HistoryCell {
                                            key: "{name}",
                                            value: point.series().find(|(n, _)| *n == name.as_str()).map(|(_, v)| v),
                                            peak: peak
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn load(api: ApiClient, mut view: Signal<DashboardView>) {
    let (counts, history) = futures::join!(api.stock_counts(), api.stock_history());
    view.write().apply(counts, history);
}

/// Value with a proportional bar
#[component]
fn HistoryCell(value: Option<f64>, peak: f64) -> Element {
    let Some(value) = value else {
        return rsx! { td { class: "py-2 pr-4 text-gray-400", "-" } };
    };
    let width = if peak > 0.0 { (value / peak * 100.0).round() } else { 0.0 };
    let label = format_count(value);

    rsx! {
        td {
            class: "py-2 pr-4",
            div {
                class: "flex items-center space-x-2",
                div {
                    class: "h-2 rounded bg-blue-500",
                    style: "width: {width}px",
                }
                span { "{label}" }
            }
        }
    }
}
