//! Theme change coordination.
//!
//! Every way the theme can change (dropdown, quick toggle, `data-theme`
//! mutation, `theme:applied` notification, another tab writing storage, OS
//! colour-scheme change) is reduced to a [`ThemeEvent`] and handled by
//! [`ThemeCoordinator::handle`]. Handling applies the theme where needed and
//! returns a [`RebuildTicket`]; the host waits out the ticket's settle time
//! and then calls [`ThemeCoordinator::run_rebuild`].
//!
//! Scheduling a rebuild supersedes any rebuild still pending, so a burst of
//! changes produces a single rebuild with the final theme.

use std::time::Duration;

use theme_palettes::{Palette, Theme, ThemeChoice};
use tracing::{debug, info, warn};

use crate::charts::{ChartBackend, ChartRebuilder, RebuildSummary};
use crate::config::{DashboardConfig, Settle};
use crate::platform::{write_preference, Page, PreferenceStore, THEME_ATTRIBUTE};
use crate::theme::{choice_from_stored, resolve_active_theme, stored_choice, PaletteSource};

/// Something that may have changed the active theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    /// Picked from the theme dropdown
    Selected(String),
    /// Quick toggle switched: checked means dark
    QuickToggle(bool),
    /// `data-theme` on the root element was mutated
    RootAttributeChanged,
    /// A `theme:applied` notification was received
    ThemeApplied,
    /// Another tab or window wrote to storage
    StorageChanged { key: String, value: Option<String> },
    /// The OS dark-mode preference flipped
    ColorSchemeChanged,
}

/// A scheduled rebuild. Only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildTicket {
    generation: u64,
    /// Wait one animation frame before the delay
    pub wait_frame: bool,
    pub delay: Duration,
}

/// Debounce for rebuilds: scheduling cancels whatever was pending.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
    pending: Option<u64>,
}

impl Debouncer {
    pub fn schedule(&mut self, settle: Settle) -> RebuildTicket {
        self.generation += 1;
        if self.pending.is_some() {
            debug!("Superseding pending rebuild");
        }
        self.pending = Some(self.generation);
        RebuildTicket {
            generation: self.generation,
            wait_frame: settle.wait_frame,
            delay: settle.delay,
        }
    }

    /// Claim `ticket` for execution. False if it was superseded or already run.
    pub fn claim(&mut self, ticket: RebuildTicket) -> bool {
        if self.pending == Some(ticket.generation) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Owns the page context, the preference store and the chart rebuilder.
pub struct ThemeCoordinator<P: Page, S: PreferenceStore, B: ChartBackend> {
    page: P,
    store: S,
    source: Box<dyn PaletteSource>,
    rebuilder: ChartRebuilder<B>,
    debouncer: Debouncer,
    config: DashboardConfig,
}

impl<P: Page, S: PreferenceStore, B: ChartBackend> ThemeCoordinator<P, S, B> {
    pub fn new(page: P, store: S, backend: B, config: DashboardConfig) -> Self {
        Self::with_rebuilder(page, store, ChartRebuilder::new(backend), config)
    }

    pub fn with_rebuilder(
        page: P,
        store: S,
        rebuilder: ChartRebuilder<B>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            page,
            store,
            source: config.palette.source(),
            rebuilder,
            debouncer: Debouncer::default(),
            config,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rebuilder(&self) -> &ChartRebuilder<B> {
        &self.rebuilder
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn has_pending_rebuild(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The concrete theme in effect according to storage and the OS.
    pub fn active_theme(&self) -> Theme {
        resolve_active_theme(&self.store, &self.page, &self.config.theme_key)
    }

    /// Apply the stored preference without re-persisting it, sync the
    /// controls and schedule the first rebuild.
    pub fn init(&mut self) -> RebuildTicket {
        let stored = stored_choice(&self.store, &self.config.theme_key);
        let ticket = self.apply(&stored, false);
        self.page
            .set_value(&self.config.elements.theme_select, stored.as_str());
        ticket
    }

    /// Handle one theme event; returns the rebuild to schedule, if any.
    pub fn handle(&mut self, event: ThemeEvent) -> Option<RebuildTicket> {
        debug!(?event, "Theme event");
        match event {
            ThemeEvent::Selected(value) => Some(self.apply(&ThemeChoice::parse(&value), true)),

            ThemeEvent::QuickToggle(checked) => {
                let next = if checked { Theme::Dark } else { Theme::Light };
                self.page
                    .set_value(&self.config.elements.theme_select, next.as_str());
                Some(self.apply(&ThemeChoice::Theme(next), true))
            }

            ThemeEvent::RootAttributeChanged | ThemeEvent::ThemeApplied => {
                Some(self.schedule_rebuild())
            }

            ThemeEvent::StorageChanged { key, value } => {
                if key != self.config.theme_key {
                    return None;
                }
                let choice = choice_from_stored(value.as_deref());
                self.page
                    .set_value(&self.config.elements.theme_select, choice.as_str());
                Some(self.apply(&choice, false))
            }

            ThemeEvent::ColorSchemeChanged => {
                let stored = stored_choice(&self.store, &self.config.theme_key);
                if stored.is_system() {
                    Some(self.apply(&stored, false))
                } else {
                    None
                }
            }
        }
    }

    /// Write `data-theme`, persist if user-initiated, sync the quick toggle,
    /// announce the change and schedule a rebuild.
    pub fn apply(&mut self, choice: &ThemeChoice, persist: bool) -> RebuildTicket {
        let theme = choice.resolve(self.page.prefers_dark());
        if let Err(e) = self.page.set_root_theme(theme.as_str()) {
            warn!("Failed to set {}: {}", THEME_ATTRIBUTE, e);
        }
        if persist {
            write_preference(&self.store, &self.config.theme_key, choice.as_str());
        }

        self.page
            .set_checked(&self.config.elements.quick_toggle, theme == Theme::Dark);

        if let Err(e) = self.page.dispatch_theme_applied() {
            debug!("theme:applied not dispatched: {}", e);
        }

        info!("Applied theme {} (selection: {})", theme, choice);
        self.schedule_rebuild()
    }

    pub fn schedule_rebuild(&mut self) -> RebuildTicket {
        self.debouncer.schedule(self.config.settle())
    }

    /// Run a scheduled rebuild if it is still the latest one.
    pub fn run_rebuild(&mut self, ticket: RebuildTicket) -> Option<RebuildSummary> {
        if !self.debouncer.claim(ticket) {
            debug!("Skipping superseded rebuild");
            return None;
        }
        Some(self.rebuild_now())
    }

    /// Resolve the palette from the current page state and rebuild every chart.
    pub fn rebuild_now(&mut self) -> RebuildSummary {
        let palette = self.current_palette();
        self.rebuilder.rebuild_all(&palette, &self.page)
    }

    pub fn current_palette(&self) -> Palette {
        let theme = self.active_theme();
        self.source.resolve_palette(&theme, &self.page)
    }
}
