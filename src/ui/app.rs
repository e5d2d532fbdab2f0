// src/ui/app.rs - Root component

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::ui::router::Route;

/// Every page lives under the router; services come from the launch context.
#[component]
pub fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}
