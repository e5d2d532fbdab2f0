// src/lib.rs

//! Kitchen Ops - restaurant operations dashboard over a REST backend
//!
//! Stock levels, recipe building, team roster, calendar and a manual testing
//! panel. View state lives in plain structs (`inventory`, `recipe`, `team`,
//! `calendar`, `testing`, `dashboard`) that the Dioxus pages in `ui` drive.

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::result_large_err)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod recipe;
pub mod team;
pub mod testing;
pub mod types;
pub mod ui;

pub use api::ApiClient;
pub use config::{AppConfig, ConfigManager};
pub use error::{Error, ErrorKind, Result, ResultExt};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
