// src/ui/components/mod.rs - Reusable widgets shared by the pages

use dioxus::prelude::*;

use crate::inventory::Pager;
use crate::models::ActionTone;

/// Inline alert colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTone {
    Success,
    Warning,
    Danger,
    Info,
}

impl AlertTone {
    fn classes(self) -> &'static str {
        match self {
            Self::Success => "bg-green-50 border-green-400 text-green-800",
            Self::Warning => "bg-yellow-50 border-yellow-400 text-yellow-800",
            Self::Danger => "bg-red-50 border-red-400 text-red-800",
            Self::Info => "bg-blue-50 border-blue-400 text-blue-800",
        }
    }
}

/// Banner for fetch/save failures and confirmations
#[component]
pub fn AlertBanner(
    message: String,
    #[props(default = AlertTone::Danger)] tone: AlertTone,
    #[props(default = None)] on_dismiss: Option<Callback<()>>,
) -> Element {
    rsx! {
        div {
            class: format!("flex items-start justify-between border-l-4 p-4 mb-4 rounded {}", tone.classes()),
            role: "alert",
            p { class: "text-sm", "{message}" }
            if let Some(dismiss) = on_dismiss {
                button {
                    r#type: "button",
                    class: "ml-4 text-sm font-medium opacity-70 hover:opacity-100",
                    onclick: move |_| dismiss.call(()),
                    "✕"
                }
            }
        }
    }
}

/// Small coloured label
#[component]
pub fn Badge(text: String, #[props(default = "bg-gray-100 text-gray-800".to_string())] class: String) -> Element {
    rsx! {
        span {
            class: format!("inline-flex items-center px-2 py-0.5 rounded text-xs font-medium {}", class),
            "{text}"
        }
    }
}

pub fn tone_badge_class(tone: ActionTone) -> &'static str {
    match tone {
        ActionTone::Success => "bg-green-100 text-green-800",
        ActionTone::Warning => "bg-yellow-100 text-yellow-800",
        ActionTone::Danger => "bg-red-100 text-red-800",
        ActionTone::Info => "bg-blue-100 text-blue-800",
    }
}

/// Centered dialog over a dimmed backdrop
#[component]
pub fn Modal(
    title: String,
    on_close: Callback<()>,
    #[props(default = None)] footer: Option<Element>,
    #[props(default = "max-w-lg".to_string())] width: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center bg-black bg-opacity-40",
            div {
                class: format!("bg-white rounded-lg shadow-xl w-full {} max-h-screen overflow-y-auto", width),
                div {
                    class: "flex items-center justify-between px-6 py-4 border-b border-gray-200",
                    h3 { class: "text-lg font-medium text-gray-900", "{title}" }
                    button {
                        r#type: "button",
                        class: "text-gray-400 hover:text-gray-600",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                div { class: "px-6 py-4", {children} }
                if let Some(footer) = footer {
                    div {
                        class: "flex justify-end space-x-3 px-6 py-4 border-t border-gray-200",
                        {footer}
                    }
                }
            }
        }
    }
}

/// Previous / numbered pages / next. Boundary buttons are disabled.
#[component]
pub fn Pagination(
    pager: Pager,
    on_previous: Callback<()>,
    on_next: Callback<()>,
    on_page: Callback<usize>,
) -> Element {
    if pager.page_count() <= 1 && !pager.has_previous() {
        return rsx! {};
    }

    rsx! {
        nav {
            class: "flex items-center justify-center space-x-1 mt-4",
            button {
                r#type: "button",
                class: PAGE_BUTTON,
                disabled: !pager.has_previous(),
                onclick: move |_| on_previous.call(()),
                "Previous"
            }
            for number in pager.page_numbers() {
                button {
                    key: "{number}",
                    r#type: "button",
                    class: page_number_class(number == pager.page()),
                    onclick: move |_| on_page.call(number),
                    "{number}"
                }
            }
            button {
                r#type: "button",
                class: PAGE_BUTTON,
                disabled: !pager.has_next(),
                onclick: move |_| on_next.call(()),
                "Next"
            }
        }
    }
}

const PAGE_BUTTON: &str = "px-3 py-1 border border-gray-300 text-sm rounded-md disabled:opacity-50 disabled:cursor-not-allowed";

fn page_number_class(current: bool) -> String {
    if current {
        format!("{} bg-blue-600 text-white", PAGE_BUTTON)
    } else {
        format!("{} bg-white text-gray-700 hover:bg-gray-50", PAGE_BUTTON)
    }
}

pub const PRIMARY_BUTTON: &str = "inline-flex items-center px-4 py-2 border border-transparent text-sm font-medium rounded-md shadow-sm text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50";
pub const SECONDARY_BUTTON: &str = "inline-flex items-center px-4 py-2 border border-gray-300 text-sm font-medium rounded-md text-gray-700 bg-white hover:bg-gray-50";
pub const DANGER_BUTTON: &str = "inline-flex items-center px-3 py-1 border border-transparent text-sm font-medium rounded-md text-white bg-red-600 hover:bg-red-700";
pub const INPUT: &str = "block w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:border-blue-500 focus:outline-none";
