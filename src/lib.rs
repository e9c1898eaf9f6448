use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::AppConfig;
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::services::{BrowserTimeProvider, ConsoleLogger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod time_utils;

/// Install logging and mount the chart page
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    #[cfg(debug_assertions)]
    let console_logger = ConsoleLogger::new_development();
    #[cfg(not(debug_assertions))]
    let console_logger = ConsoleLogger::new_production();
    domain::logging::init_logger(Box::new(console_logger));
    domain::logging::init_time_provider(Box::new(BrowserTimeProvider::new()));

    let config = AppConfig::from_location();
    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!(
            "🚀 Starting chart for {} {}",
            config.default_symbol.label(),
            config.default_interval.label()
        ),
    );

    mount_to_body(move || view! { <App config=config /> });
}
