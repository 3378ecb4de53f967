//! Full-width / constrained layout toggle.

use std::fmt;

use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::platform::{read_preference, write_preference, Page, PreferenceStore};

/// Classes that constrain the main content to a centred container.
pub const CONSTRAINED_CLASSES: [&str; 2] = ["container", "mx-auto"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    Full,
    #[default]
    Constrained,
}

impl LayoutMode {
    /// Anything other than `full` is constrained.
    pub fn parse(value: &str) -> Self {
        if value == "full" {
            Self::Full
        } else {
            Self::Constrained
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Constrained => "constrained",
        }
    }

    /// The layout switch is checked when the layout is full width.
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Self::Full
        } else {
            Self::Constrained
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies the layout mode to the main content element and keeps the
/// switch and storage in step.
pub struct LayoutToggle<P: Page, S: PreferenceStore> {
    page: P,
    store: S,
    storage_key: String,
    main_content: String,
    toggle: String,
    mode: LayoutMode,
}

impl<P: Page, S: PreferenceStore> LayoutToggle<P, S> {
    pub fn new(page: P, store: S, config: &DashboardConfig) -> Self {
        Self {
            page,
            store,
            storage_key: config.layout_key.clone(),
            main_content: config.elements.main_content.clone(),
            toggle: config.elements.layout_toggle.clone(),
            mode: LayoutMode::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Restore the stored mode without writing it back.
    pub fn init(&mut self) -> LayoutMode {
        let mode = read_preference(&self.store, &self.storage_key)
            .map(|value| LayoutMode::parse(&value))
            .unwrap_or_default();
        self.apply(mode);
        mode
    }

    /// Apply and persist a user-chosen mode.
    pub fn set(&mut self, mode: LayoutMode) {
        self.apply(mode);
        write_preference(&self.store, &self.storage_key, mode.as_str());
    }

    pub fn toggle_changed(&mut self, checked: bool) {
        self.set(LayoutMode::from_checked(checked));
    }

    fn apply(&mut self, mode: LayoutMode) {
        self.mode = mode;
        let constrained = mode == LayoutMode::Constrained;
        if let Err(e) = self
            .page
            .set_classes(&self.main_content, &CONSTRAINED_CLASSES, constrained)
        {
            warn!("Cannot apply {} layout: {}", mode, e);
        }
        self.page.set_checked(&self.toggle, !constrained);
        debug!("Layout mode: {}", mode);
    }
}
