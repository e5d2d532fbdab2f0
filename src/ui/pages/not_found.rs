// src/ui/pages/not_found.rs - 404 Not Found page

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::ui::components::PRIMARY_BUTTON;
use crate::ui::router::Route;

#[component]
pub fn NotFound(#[props(default = "".to_string())] path: String) -> Element {
    rsx! {
        div {
            class: "min-h-screen bg-white px-4 py-16 md:grid md:place-items-center",
            main {
                class: "sm:flex",
                p {
                    class: "text-4xl font-extrabold text-blue-600 sm:text-5xl",
                    "404"
                }
                div {
                    class: "sm:ml-6 sm:border-l sm:border-gray-200 sm:pl-6",
                    h1 {
                        class: "text-4xl font-extrabold text-gray-900 tracking-tight",
                        "Page not found"
                    }
                    if !path.is_empty() {
                        p {
                            class: "mt-2 text-sm text-gray-400 font-mono bg-gray-100 px-2 py-1 rounded",
                            "Path: /{path}"
                        }
                    }
                    div {
                        class: "mt-8",
                        Link {
                            to: Route::Dashboard {},
                            class: PRIMARY_BUTTON,
                            "Back to the dashboard"
                        }
                    }
                }
            }
        }
    }
}
