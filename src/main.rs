//! Themed Dashboard client entry point.
//!
//! Built for the browser with `dx serve --features web`; the Dioxus launcher
//! also installs the tracing logger.

fn main() {
    dioxus::launch(themed_dashboard::app::App);
}
