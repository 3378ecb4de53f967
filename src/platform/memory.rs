//! In-memory page and storage.
//!
//! Handles are cheap clones sharing one state, the way every script on a
//! real page sees the same document and the same `localStorage`.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use super::{Page, PlatformError, PreferenceStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    fail: Rc<RefCell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `(key, value)` pairs.
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::default();
        for (key, value) in items {
            store
                .items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Make every subsequent read and write fail (private browsing, quota).
    pub fn set_failing(&self, failing: bool) {
        *self.fail.borrow_mut() = failing;
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.borrow().clone()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        if *self.fail.borrow() {
            return Err(PlatformError::Storage("storage disabled".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        if *self.fail.borrow() {
            return Err(PlatformError::Storage("storage disabled".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PageState {
    elements: BTreeSet<String>,
    classes: HashMap<String, BTreeSet<String>>,
    checked: HashMap<String, bool>,
    values: HashMap<String, String>,
    root_theme: Option<String>,
    prefers_dark: bool,
    css_variables: HashMap<String, String>,
    body_font: Option<String>,
    supports_custom_events: bool,
    dispatched_events: usize,
}

/// A fake document: a set of element ids plus the state the dashboard reads
/// and writes.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    state: Rc<RefCell<PageState>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(PageState {
                supports_custom_events: true,
                ..PageState::default()
            })),
        }
    }

    /// Page containing elements with the given ids.
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let page = Self::new();
        for id in ids {
            page.add_element(id);
        }
        page
    }

    pub fn add_element(&self, id: &str) {
        self.state.borrow_mut().elements.insert(id.to_string());
    }

    pub fn remove_element(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        state.elements.remove(id);
        state.classes.remove(id);
        state.checked.remove(id);
        state.values.remove(id);
    }

    pub fn set_prefers_dark(&self, dark: bool) {
        self.state.borrow_mut().prefers_dark = dark;
    }

    pub fn set_css_variable(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .css_variables
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_body_font(&self, family: &str) {
        self.state.borrow_mut().body_font = Some(family.to_string());
    }

    /// Simulate a browser without `CustomEvent` support.
    pub fn disable_custom_events(&self) {
        self.state.borrow_mut().supports_custom_events = false;
    }

    pub fn is_checked(&self, id: &str) -> Option<bool> {
        self.state.borrow().checked.get(id).copied()
    }

    pub fn value(&self, id: &str) -> Option<String> {
        self.state.borrow().values.get(id).cloned()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.state
            .borrow()
            .classes
            .get(id)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn dispatched_events(&self) -> usize {
        self.state.borrow().dispatched_events
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.state.borrow().elements.contains(id)
    }

    fn root_theme(&self) -> Option<String> {
        self.state.borrow().root_theme.clone()
    }

    fn set_root_theme(&self, theme: &str) -> Result<(), PlatformError> {
        self.state.borrow_mut().root_theme = Some(theme.to_string());
        Ok(())
    }

    fn prefers_dark(&self) -> bool {
        self.state.borrow().prefers_dark
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        self.state
            .borrow()
            .css_variables
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn body_font_family(&self) -> Option<String> {
        self.state.borrow().body_font.clone()
    }

    fn set_checked(&self, id: &str, checked: bool) {
        let mut state = self.state.borrow_mut();
        if state.elements.contains(id) {
            state.checked.insert(id.to_string(), checked);
        }
    }

    fn set_value(&self, id: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        if state.elements.contains(id) {
            state.values.insert(id.to_string(), value.to_string());
        }
    }

    fn set_classes(
        &self,
        id: &str,
        classes: &[&str],
        present: bool,
    ) -> Result<(), PlatformError> {
        let mut state = self.state.borrow_mut();
        if !state.elements.contains(id) {
            return Err(PlatformError::ElementMissing(id.to_string()));
        }
        let list = state.classes.entry(id.to_string()).or_default();
        for class in classes {
            if present {
                list.insert((*class).to_string());
            } else {
                list.remove(*class);
            }
        }
        Ok(())
    }

    fn dispatch_theme_applied(&self) -> Result<(), PlatformError> {
        let mut state = self.state.borrow_mut();
        if !state.supports_custom_events {
            return Err(PlatformError::Unavailable("CustomEvent"));
        }
        state.dispatched_events += 1;
        Ok(())
    }
}
