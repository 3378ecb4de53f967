//! Chart registry and the destroy-then-rebuild pass.

use rand::rngs::StdRng;
use rand::SeedableRng;
use theme_palettes::Palette;
use tracing::{debug, warn};

use super::backend::{ChartBackend, ChartDefaults, ChartHandle};
use super::{build_chart, ChartKind};
use crate::platform::Page;

/// The charts currently on screen, in construction order.
#[derive(Debug)]
pub struct ChartRegistry<H> {
    entries: Vec<(ChartKind, H)>,
}

impl<H> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ChartRegistry<H> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, kind: ChartKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    fn kinds(&self) -> impl Iterator<Item = ChartKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    pub fn canvas_ids(&self) -> Vec<&'static str> {
        self.kinds().map(ChartKind::canvas_id).collect()
    }

    fn push(&mut self, kind: ChartKind, handle: H) {
        self.entries.push((kind, handle));
    }

    fn drain(&mut self) -> std::vec::Drain<'_, (ChartKind, H)> {
        self.entries.drain(..)
    }
}

/// Outcome of one rebuild pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub destroyed: usize,
    pub destroy_failures: usize,
    pub built: usize,
    /// Canvases not present on the page
    pub skipped: usize,
    pub build_failures: usize,
}

/// Owns the chart registry and rebuilds it against a palette.
pub struct ChartRebuilder<B: ChartBackend> {
    backend: B,
    registry: ChartRegistry<B::Handle>,
    rng: StdRng,
}

impl<B: ChartBackend> ChartRebuilder<B> {
    pub fn new(backend: B) -> Self {
        Self::with_rng(backend, StdRng::from_entropy())
    }

    /// Rebuilder with a fixed random source for sample data.
    pub fn with_rng(backend: B, rng: StdRng) -> Self {
        Self {
            backend,
            registry: ChartRegistry::default(),
            rng,
        }
    }

    pub fn registry(&self) -> &ChartRegistry<B::Handle> {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Destroy every chart and empty the registry. A failure to release
    /// one instance never stops the others from being released.
    pub fn destroy_all(&mut self) -> (usize, usize) {
        let mut destroyed = 0;
        let mut failures = 0;
        for (kind, mut handle) in self.registry.drain() {
            destroyed += 1;
            if let Err(e) = handle.destroy() {
                failures += 1;
                warn!("Failed to destroy {}: {}", kind.canvas_id(), e);
            }
        }
        (destroyed, failures)
    }

    /// Destroy every chart, apply `palette` as library defaults and build a
    /// fresh instance for each canvas present on `page`.
    ///
    /// Never fails: a chart that cannot be built is logged and left out of
    /// the registry.
    pub fn rebuild_all(&mut self, palette: &Palette, page: &dyn Page) -> RebuildSummary {
        let (destroyed, destroy_failures) = self.destroy_all();
        let mut summary = RebuildSummary {
            destroyed,
            destroy_failures,
            ..RebuildSummary::default()
        };

        if !self.backend.is_available() {
            summary.skipped = ChartKind::ALL.len();
            debug!("Chart library not loaded, no charts built");
            return summary;
        }

        let defaults = ChartDefaults {
            color: palette.fg.clone(),
            border_color: palette.grid.clone(),
            font_family: page.body_font_family(),
        };
        if let Err(e) = self.backend.apply_defaults(&defaults) {
            warn!("Failed to apply chart defaults: {}", e);
        }

        for kind in ChartKind::ALL {
            let canvas_id = kind.canvas_id();
            if !page.has_element(canvas_id) {
                summary.skipped += 1;
                continue;
            }

            let config = build_chart(kind, palette, &mut self.rng);
            match self.backend.create(canvas_id, &config) {
                Ok(handle) => {
                    self.registry.push(kind, handle);
                    summary.built += 1;
                }
                Err(e) => {
                    summary.build_failures += 1;
                    warn!("Failed to build {}: {}", canvas_id, e);
                }
            }
        }

        debug!(
            "Rebuilt charts: {} built, {} skipped, {} destroyed",
            summary.built, summary.skipped, summary.destroyed
        );
        summary
    }
}

impl<B: ChartBackend> Drop for ChartRebuilder<B> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::RecordingBackend;
    use crate::platform::MemoryPage;
    use theme_palettes::Theme;

    fn rebuilder() -> (ChartRebuilder<RecordingBackend>, RecordingBackend) {
        let backend = RecordingBackend::new();
        let rebuilder = ChartRebuilder::with_rng(backend.clone(), StdRng::seed_from_u64(42));
        (rebuilder, backend)
    }

    #[test]
    fn test_one_instance_per_present_canvas() {
        let (mut rebuilder, backend) = rebuilder();
        let page = MemoryPage::with_elements(["lineChart", "pieChart", "bubbleChart"]);

        let summary = rebuilder.rebuild_all(&Palette::default(), &page);

        assert_eq!(summary.built, 3);
        assert_eq!(summary.skipped, ChartKind::ALL.len() - 3);
        assert_eq!(
            rebuilder.registry().canvas_ids(),
            vec!["lineChart", "pieChart", "bubbleChart"]
        );
        assert_eq!(backend.live_count(), 3);
    }

    #[test]
    fn test_repeated_rebuild_does_not_leak() {
        let (mut rebuilder, backend) = rebuilder();
        let page = MemoryPage::with_elements(ChartKind::ALL.map(ChartKind::canvas_id));
        let palette = Palette::for_theme(&Theme::Forest);

        rebuilder.rebuild_all(&palette, &page);
        let first = rebuilder.registry().canvas_ids();
        let summary = rebuilder.rebuild_all(&palette, &page);

        assert_eq!(rebuilder.registry().canvas_ids(), first);
        assert_eq!(summary.destroyed, ChartKind::ALL.len());
        assert_eq!(backend.live_count(), ChartKind::ALL.len());
        assert_eq!(backend.created(), 2 * ChartKind::ALL.len());
    }

    #[test]
    fn test_empty_page_leaves_empty_registry() {
        let (mut rebuilder, backend) = rebuilder();
        let summary = rebuilder.rebuild_all(&Palette::default(), &MemoryPage::new());
        assert!(rebuilder.registry().is_empty());
        assert_eq!(summary.built, 0);
        assert_eq!(backend.live_count(), 0);
    }

    #[test]
    fn test_removed_canvas_is_dropped_on_next_rebuild() {
        let (mut rebuilder, backend) = rebuilder();
        let page = MemoryPage::with_elements(["barChart", "radarChart"]);
        rebuilder.rebuild_all(&Palette::default(), &page);

        page.remove_element("radarChart");
        rebuilder.rebuild_all(&Palette::default(), &page);

        assert!(rebuilder.registry().contains(ChartKind::Bar));
        assert!(!rebuilder.registry().contains(ChartKind::Radar));
        assert_eq!(backend.live_canvases(), vec!["barChart".to_string()]);
    }

    #[test]
    fn test_destroy_failure_does_not_block_rebuild() {
        let (mut rebuilder, backend) = rebuilder();
        let page = MemoryPage::with_elements(["lineChart", "barChart"]);
        rebuilder.rebuild_all(&Palette::default(), &page);

        backend.fail_destroy_on("lineChart");
        let summary = rebuilder.rebuild_all(&Palette::default(), &page);

        assert_eq!(summary.destroy_failures, 1);
        assert_eq!(summary.built, 2);
        assert_eq!(backend.live_count(), 2);
    }

    #[test]
    fn test_build_failure_skips_only_that_chart() {
        let (mut rebuilder, backend) = rebuilder();
        backend.fail_create_on("scatterChart");
        let page = MemoryPage::with_elements(["scatterChart", "doughnutChart"]);

        let summary = rebuilder.rebuild_all(&Palette::default(), &page);

        assert_eq!(summary.build_failures, 1);
        assert_eq!(rebuilder.registry().canvas_ids(), vec!["doughnutChart"]);
    }

    #[test]
    fn test_defaults_follow_palette_and_body_font() {
        let (mut rebuilder, backend) = rebuilder();
        let page = MemoryPage::new();
        page.set_body_font("Inter, sans-serif");
        let palette = Palette::for_theme(&Theme::Synthwave);

        rebuilder.rebuild_all(&palette, &page);

        let defaults = backend.defaults().unwrap();
        assert_eq!(defaults.color, palette.fg);
        assert_eq!(defaults.border_color, palette.grid);
        assert_eq!(defaults.font_family.as_deref(), Some("Inter, sans-serif"));
    }

    #[test]
    fn test_missing_library_builds_nothing() {
        let (mut rebuilder, backend) = rebuilder();
        let page = MemoryPage::with_elements(["lineChart", "barChart"]);
        rebuilder.rebuild_all(&Palette::default(), &page);

        backend.set_available(false);
        let summary = rebuilder.rebuild_all(&Palette::default(), &page);

        assert_eq!(summary.destroyed, 2);
        assert_eq!(summary.built, 0);
        assert_eq!(summary.build_failures, 0);
        assert!(rebuilder.registry().is_empty());
        assert_eq!(backend.live_count(), 0);

        // picked up again once the library appears
        backend.set_available(true);
        let summary = rebuilder.rebuild_all(&Palette::default(), &page);
        assert_eq!(summary.built, 2);
    }

    #[test]
    fn test_drop_releases_charts() {
        let (mut rebuilder, backend) = rebuilder();
        let page = MemoryPage::with_elements(["pieChart"]);
        rebuilder.rebuild_all(&Palette::default(), &page);
        drop(rebuilder);
        assert_eq!(backend.live_count(), 0);
    }
}
