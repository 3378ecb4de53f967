//! Dioxus client application.
//!
//! Renders the dashboard shell (controls, main content, one canvas per
//! chart) and hands the mounted document to the theme coordinator.

use dioxus::prelude::*;

pub mod components;
pub mod pages;

use crate::config::DashboardConfig;
use pages::Dashboard;

/// Configuration embedded in the page (defaults outside the browser).
pub fn dashboard_config() -> DashboardConfig {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            return crate::platform::web::page_config(&document);
        }
    }
    DashboardConfig::default()
}

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Listeners attach to the rendered controls, so wire up after mount
    use_effect(|| {
        #[cfg(target_arch = "wasm32")]
        crate::platform::web::launch();
    });

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Dashboard {},
}
