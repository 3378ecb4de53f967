//! Page and storage abstractions.
//!
//! Everything the dashboard needs from the browser goes through [`Page`] and
//! [`PreferenceStore`], so the theme and chart logic can run against the
//! in-memory implementations in tests and against `web-sys` in the client.

use thiserror::Error;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryPage, MemoryStore};

/// Attribute on the root element that carries the active theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Custom event dispatched on the window after every theme application.
pub const THEME_APPLIED_EVENT: &str = "theme:applied";

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{0} is not available in this environment")]
    Unavailable(&'static str),

    #[error("element `{0}` not found")]
    ElementMissing(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Durable per-origin key-value storage (`localStorage` in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError>;
}

/// The document the dashboard renders into.
///
/// Element lookups are by id. Every element is optional: setters on a
/// missing element are no-ops unless they return an error.
pub trait Page {
    /// Whether an element with this id exists right now.
    fn has_element(&self, id: &str) -> bool;

    /// Current `data-theme` on the root element.
    fn root_theme(&self) -> Option<String>;

    fn set_root_theme(&self, theme: &str) -> Result<(), PlatformError>;

    /// `(prefers-color-scheme: dark)` media query result.
    fn prefers_dark(&self) -> bool;

    /// Computed value of a CSS custom property on the root element.
    /// Empty values are reported as `None`.
    fn css_variable(&self, name: &str) -> Option<String>;

    /// Computed `font-family` of the body.
    fn body_font_family(&self) -> Option<String>;

    /// Sync a checkbox, if present.
    fn set_checked(&self, id: &str, checked: bool);

    /// Sync a select's value, if present.
    fn set_value(&self, id: &str, value: &str);

    /// Add (`present = true`) or remove every class in `classes`.
    fn set_classes(&self, id: &str, classes: &[&str], present: bool)
        -> Result<(), PlatformError>;

    /// Dispatch [`THEME_APPLIED_EVENT`] on the window.
    fn dispatch_theme_applied(&self) -> Result<(), PlatformError>;
}

/// Read a preference, treating storage failures as an absent value.
pub fn read_preference(store: &dyn PreferenceStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to read preference {}: {}", key, e);
            None
        }
    }
}

/// Report an optional capability that could not be set up and carry on.
/// Returns whether it was set up.
pub fn best_effort(what: &str, result: Result<(), PlatformError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{} unavailable, continuing without it: {}", what, e);
            false
        }
    }
}

/// Persist a preference; failures are logged and otherwise ignored.
pub fn write_preference(store: &dyn PreferenceStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!("Failed to persist preference {}={}: {}", key, value, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_effort_reports_without_failing() {
        assert!(best_effort("theme dropdown", Ok(())));
        assert!(!best_effort(
            "theme attribute observer",
            Err(PlatformError::Unavailable("MutationObserver"))
        ));
    }

    #[test]
    fn test_failing_store_reads_as_absent() {
        let store = MemoryStore::with_items([("layoutMode", "full")]);
        store.set_failing(true);
        assert_eq!(read_preference(&store, "layoutMode"), None);
        write_preference(&store, "layoutMode", "constrained");
        store.set_failing(false);
        assert_eq!(read_preference(&store, "layoutMode").as_deref(), Some("full"));
    }
}
