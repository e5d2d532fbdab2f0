// src/ui/state.rs - Services shared with every page through the Dioxus context

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::config::UiConfig;

/// Injected once at launch; pages read it with [`use_services`].
#[derive(Clone, Debug)]
pub struct Services {
    pub api: ApiClient,
    pub ui: UiConfig,
}

impl Services {
    pub fn new(api: ApiClient, ui: UiConfig) -> Self {
        Self { api, ui }
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}
