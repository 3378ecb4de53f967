//! Layout component wrapping the dashboard with DaisyUI and Chart.js.

use dioxus::prelude::*;

use super::nav::Nav;
use super::theme::theme_script;
use crate::app::dashboard_config;
use crate::layout::CONSTRAINED_CLASSES;

const DAISYUI_CSS: &str = "https://cdn.jsdelivr.net/npm/daisyui@3.9.4/dist/full.css";
const TAILWIND_JS: &str = "https://cdn.tailwindcss.com";
const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("CARGO_PKG_VERSION");
    let full_title = format!("{} - Themed Dashboard", props.title);
    // Starts constrained; the layout toggle restores the stored mode on mount
    let main_class = format!("p-4 {}", CONSTRAINED_CLASSES.join(" "));
    let script = use_hook(|| theme_script(&dashboard_config().theme_key));

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }
        document::Link { rel: "stylesheet", href: DAISYUI_CSS }
        document::Script { src: TAILWIND_JS }
        document::Script { src: CHART_JS }
        document::Script { {script} }

        Nav { title: "Themed Dashboard" }
        main { id: "mainContent", class: "{main_class}",
            {props.children}
        }
        footer { class: "footer footer-center p-4 text-base-content/60",
            small { "Themed Dashboard v{version}" }
        }
    }
}
