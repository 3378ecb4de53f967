//! Themed Dashboard
//!
//! A chart dashboard that follows the page theme.
//!
//! This library provides:
//! - Theme resolution from the stored preference and the OS colour scheme
//! - Chart palettes from a static table or live DaisyUI CSS variables
//! - A chart registry that destroys and rebuilds every chart on theme change
//! - Coordination of every theme change source with a debounced rebuild
//! - A persisted full-width / constrained layout toggle
//! - Web UI (Dioxus + DaisyUI + Chart.js)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app
pub mod app;

pub mod charts;
pub mod config;
pub mod coordinator;
pub mod layout;
pub mod platform;
pub mod theme;

pub use config::DashboardConfig;
pub use coordinator::{ThemeCoordinator, ThemeEvent};
pub use theme_palettes::{Palette, Theme, ThemeChoice};
