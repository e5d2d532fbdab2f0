// src/ui/pages/mod.rs - Page components module

use dioxus::prelude::*;

mod calendar;
mod dashboard;
mod inventory;
mod not_found;
mod recipe_builder;
mod recipes;
mod team;
mod testing;

pub use calendar::Calendar;
pub use dashboard::Dashboard;
pub use inventory::Inventory;
pub use not_found::NotFound;
pub use recipe_builder::RecipeBuilder;
pub use recipes::Recipes;
pub use team::Team;
pub use testing::Testing;

/// Common page wrapper component
#[component]
pub fn PageWrapper(
    #[props(default = "".to_string())] title: String,
    #[props(default = None)] subtitle: Option<String>,
    #[props(default = None)] actions: Option<Element>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "space-y-6",

            if !title.is_empty() {
                div {
                    class: "md:flex md:items-center md:justify-between",
                    div {
                        class: "flex-1 min-w-0",
                        h1 {
                            class: "text-2xl font-bold leading-7 text-gray-900 sm:text-3xl sm:truncate",
                            "{title}"
                        }
                        if let Some(subtitle) = subtitle {
                            p {
                                class: "mt-1 text-sm text-gray-500",
                                "{subtitle}"
                            }
                        }
                    }
                    if let Some(actions) = actions {
                        div {
                            class: "mt-4 flex md:mt-0 md:ml-4",
                            {actions}
                        }
                    }
                }
            }

            {children}
        }
    }
}

/// White panel with a header line
#[component]
pub fn Card(title: String, #[props(default = None)] actions: Option<Element>, children: Element) -> Element {
    rsx! {
        div {
            class: "bg-white shadow rounded-lg",
            div {
                class: "flex items-center justify-between px-5 py-3 border-b border-gray-200",
                h2 { class: "text-base font-semibold text-gray-900", "{title}" }
                if let Some(actions) = actions {
                    div { {actions} }
                }
            }
            div { class: "p-5", {children} }
        }
    }
}

/// Empty state component for pages
#[component]
pub fn EmptyState(
    #[props(default = "📭".to_string())] icon: String,
    #[props(default = "No data available".to_string())] title: String,
    #[props(default = "There's nothing to show here yet.".to_string())] description: String,
) -> Element {
    rsx! {
        div {
            class: "text-center py-10",
            div { class: "text-5xl mb-3", "{icon}" }
            h3 { class: "text-lg font-medium text-gray-900 mb-1", "{title}" }
            p { class: "text-gray-500", "{description}" }
        }
    }
}

/// Stat card component for dashboards
#[component]
pub fn StatCard(
    title: String,
    value: String,
    #[props(default = None)] icon: Option<String>,
) -> Element {
    rsx! {
        div {
            class: "bg-white overflow-hidden shadow rounded-lg",
            div {
                class: "p-5 flex items-center",
                if let Some(icon) = icon {
                    span { class: "text-2xl mr-4", "{icon}" }
                }
                dl {
                    dt {
                        class: "text-sm font-medium text-gray-500 truncate",
                        "{title}"
                    }
                    dd {
                        class: "text-2xl font-semibold text-gray-900",
                        "{value}"
                    }
                }
            }
        }
    }
}

/// Formats a counter without a trailing `.0`.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
