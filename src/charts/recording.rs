//! Backend that records what would have been drawn.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use super::backend::{ChartBackend, ChartDefaults, ChartError, ChartHandle};
use super::ChartConfig;

#[derive(Debug)]
struct Recording {
    available: bool,
    live: BTreeMap<u64, String>,
    configs: BTreeMap<String, ChartConfig>,
    defaults: Option<ChartDefaults>,
    next_id: u64,
    created: usize,
    destroyed: usize,
    fail_create: HashSet<String>,
    fail_destroy: HashSet<String>,
}

impl Default for Recording {
    fn default() -> Self {
        Self {
            available: true,
            live: BTreeMap::new(),
            configs: BTreeMap::new(),
            defaults: None,
            next_id: 0,
            created: 0,
            destroyed: 0,
            fail_create: HashSet::new(),
            fail_destroy: HashSet::new(),
        }
    }
}

/// Clones share state, so a test can keep one handle while the rebuilder
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas ids of instances that have not been destroyed.
    pub fn live_canvases(&self) -> Vec<String> {
        self.inner.borrow().live.values().cloned().collect()
    }

    pub fn live_count(&self) -> usize {
        self.inner.borrow().live.len()
    }

    pub fn created(&self) -> usize {
        self.inner.borrow().created
    }

    pub fn destroyed(&self) -> usize {
        self.inner.borrow().destroyed
    }

    /// Most recent configuration built for a canvas.
    pub fn config_for(&self, canvas_id: &str) -> Option<ChartConfig> {
        self.inner.borrow().configs.get(canvas_id).cloned()
    }

    pub fn defaults(&self) -> Option<ChartDefaults> {
        self.inner.borrow().defaults.clone()
    }

    /// Behave as if the library script never loaded (or loaded later).
    pub fn set_available(&self, available: bool) {
        self.inner.borrow_mut().available = available;
    }

    pub fn fail_create_on(&self, canvas_id: &str) {
        self.inner
            .borrow_mut()
            .fail_create
            .insert(canvas_id.to_string());
    }

    /// Make the next destroy of this canvas's instance fail. The instance
    /// is still released, like a library that throws after tearing down.
    pub fn fail_destroy_on(&self, canvas_id: &str) {
        self.inner
            .borrow_mut()
            .fail_destroy
            .insert(canvas_id.to_string());
    }
}

impl ChartBackend for RecordingBackend {
    type Handle = RecordedChart;

    fn is_available(&mut self) -> bool {
        self.inner.borrow().available
    }

    fn apply_defaults(&mut self, defaults: &ChartDefaults) -> Result<(), ChartError> {
        self.inner.borrow_mut().defaults = Some(defaults.clone());
        Ok(())
    }

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<RecordedChart, ChartError> {
        let mut rec = self.inner.borrow_mut();
        if !rec.available {
            return Err(ChartError::LibraryMissing);
        }
        if rec.fail_create.contains(canvas_id) {
            return Err(ChartError::Construct {
                canvas: canvas_id.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        let id = rec.next_id;
        rec.next_id += 1;
        rec.created += 1;
        rec.live.insert(id, canvas_id.to_string());
        rec.configs.insert(canvas_id.to_string(), config.clone());
        Ok(RecordedChart {
            id,
            canvas_id: canvas_id.to_string(),
            inner: self.inner.clone(),
            released: false,
        })
    }
}

#[derive(Debug)]
pub struct RecordedChart {
    id: u64,
    canvas_id: String,
    inner: Rc<RefCell<Recording>>,
    released: bool,
}

impl ChartHandle for RecordedChart {
    fn destroy(&mut self) -> Result<(), ChartError> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let mut rec = self.inner.borrow_mut();
        rec.live.remove(&self.id);
        rec.destroyed += 1;
        if rec.fail_destroy.remove(&self.canvas_id) {
            return Err(ChartError::Destroy(format!(
                "injected failure on {}",
                self.canvas_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{build_chart, ChartKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use theme_palettes::Palette;

    fn config() -> ChartConfig {
        build_chart(ChartKind::Bar, &Palette::default(), &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn test_destroy_twice_is_harmless() {
        let mut backend = RecordingBackend::new();
        let mut chart = backend.create("barChart", &config()).unwrap();
        assert_eq!(backend.live_count(), 1);

        chart.destroy().unwrap();
        chart.destroy().unwrap();
        assert_eq!(backend.live_count(), 0);
        assert_eq!(backend.destroyed(), 1);
    }

    #[test]
    fn test_injected_create_failure() {
        let mut backend = RecordingBackend::new();
        backend.fail_create_on("barChart");
        let err = backend.create("barChart", &config()).unwrap_err();
        assert!(matches!(err, ChartError::Construct { .. }));
        assert_eq!(backend.live_count(), 0);
    }
}
