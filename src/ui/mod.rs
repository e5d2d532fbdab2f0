// src/ui/mod.rs - Desktop UI: routing, shell, pages and shared widgets

use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;

pub mod app;
pub mod components;
pub mod layout;
pub mod pages;
pub mod router;
pub mod state;
pub mod style;

pub use app::App;
pub use router::Route;
pub use state::{use_services, Services};

/// Opens the main window and blocks until it is closed.
pub fn launch(title: &str, services: Services) {
    tracing::info!(%title, "starting desktop UI");

    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title(title)
                .with_resizable(true)
                .with_inner_size(LogicalSize::new(1280.0, 860.0)),
        )
        .with_custom_head(style::custom_head());

    LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(services)
        .launch(App);
}
