//! Theme identifiers and chart colour palettes.
//!
//! This crate defines the types shared between the dashboard's theme
//! resolver, its chart builders, and anything that needs to reason about
//! the persisted theme preference without a browser:
//! - [`theme`] - Theme names and the `system` preference sentinel
//! - [`palette`] - Colour roles and the static per-theme palette table

pub mod palette;
pub mod theme;

// Re-export commonly used types at crate root
pub use palette::{Palette, Rgb};
pub use theme::{Theme, ThemeChoice};
