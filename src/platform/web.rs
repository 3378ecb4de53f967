//! Browser implementations and listener wiring (wasm32 only).
//!
//! DOM callbacks never touch the coordinator directly: they push a
//! [`ThemeEvent`] onto a channel drained by a single task, so a callback
//! fired synchronously from inside a theme application (the
//! `theme:applied` dispatch) cannot re-enter it.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use js_sys::{Array, Function, Promise, Reflect};
use serde::Serialize;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, EventTarget, HtmlInputElement,
    HtmlSelectElement, MutationObserver, MutationObserverInit, Storage, StorageEvent, Window,
};

use super::{
    best_effort, Page, PlatformError, PreferenceStore, THEME_APPLIED_EVENT, THEME_ATTRIBUTE,
};
use crate::charts::{ChartBackend, ChartConfig, ChartDefaults, ChartError, ChartHandle};
use crate::config::{DashboardConfig, CONFIG_ELEMENT_ID};
use crate::coordinator::{RebuildTicket, ThemeCoordinator, ThemeEvent};
use crate::layout::LayoutToggle;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn browser_window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::Unavailable("window"))
}

/// The live document.
#[derive(Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new() -> Result<Self, PlatformError> {
        let window = browser_window()?;
        let document = window
            .document()
            .ok_or(PlatformError::Unavailable("document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn computed_property(&self, element: &Element, name: &str) -> Option<String> {
        let style = self.window.get_computed_style(element).ok().flatten()?;
        let value = style.get_property_value(name).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

impl Page for DomPage {
    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn root_theme(&self) -> Option<String> {
        self.document
            .document_element()?
            .get_attribute(THEME_ATTRIBUTE)
    }

    fn set_root_theme(&self, theme: &str) -> Result<(), PlatformError> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| PlatformError::Dom("document has no root element".to_string()))?;
        root.set_attribute(THEME_ATTRIBUTE, theme)
            .map_err(|e| PlatformError::Dom(js_error(e)))
    }

    fn prefers_dark(&self) -> bool {
        matches!(self.window.match_media(DARK_QUERY), Ok(Some(query)) if query.matches())
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        let root = self.document.document_element()?;
        self.computed_property(&root, name)
    }

    fn body_font_family(&self) -> Option<String> {
        let body = self.document.body()?;
        self.computed_property(&body, "font-family")
    }

    fn set_checked(&self, id: &str, checked: bool) {
        if let Some(input) = self
            .element(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_checked(checked);
        }
    }

    fn set_value(&self, id: &str, value: &str) {
        if let Some(select) = self
            .element(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(value);
        }
    }

    fn set_classes(&self, id: &str, classes: &[&str], present: bool) -> Result<(), PlatformError> {
        let element = self
            .element(id)
            .ok_or_else(|| PlatformError::ElementMissing(id.to_string()))?;
        let list = element.class_list();
        for class in classes {
            let result = if present {
                list.add_1(class)
            } else {
                list.remove_1(class)
            };
            result.map_err(|e| PlatformError::Dom(js_error(e)))?;
        }
        Ok(())
    }

    fn dispatch_theme_applied(&self) -> Result<(), PlatformError> {
        let init = CustomEventInit::new();
        let detail = self.root_theme().map(JsValue::from).unwrap_or(JsValue::NULL);
        init.set_detail(&detail);
        let event = CustomEvent::new_with_event_init_dict(THEME_APPLIED_EVENT, &init)
            .map_err(|_| PlatformError::Unavailable("CustomEvent"))?;
        self.window
            .dispatch_event(&event)
            .map(|_| ())
            .map_err(|e| PlatformError::Dom(js_error(e)))
    }
}

/// `window.localStorage`. When storage is blocked, reads come back empty and
/// writes fail (and are logged by the caller), so preferences last for the
/// page only.
#[derive(Clone)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                warn!("localStorage unavailable, preferences will not persist");
                None
            }
            Err(e) => {
                warn!("localStorage blocked, preferences will not persist: {}", js_error(e));
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, PlatformError> {
        self.storage
            .as_ref()
            .ok_or(PlatformError::Unavailable("localStorage"))
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage
            .get_item(key)
            .map_err(|e| PlatformError::Storage(js_error(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| PlatformError::Storage(js_error(e)))
    }
}

/// Chart.js, looked up as the global `Chart`. The lookup is retried until
/// it succeeds, so a script that loads late is still picked up.
pub struct ChartJs {
    constructor: Option<Function>,
    document: Document,
}

impl ChartJs {
    pub fn new(document: Document) -> Self {
        let mut backend = Self {
            constructor: None,
            document,
        };
        if backend.library().is_err() {
            warn!("Chart.js not loaded, charts will not be drawn until it is");
        }
        backend
    }

    fn library(&mut self) -> Result<Function, ChartError> {
        if let Some(constructor) = &self.constructor {
            return Ok(constructor.clone());
        }
        let constructor = Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .map_err(|_| ChartError::LibraryMissing)?
            .dyn_into::<Function>()
            .map_err(|_| ChartError::LibraryMissing)?;
        self.constructor = Some(constructor.clone());
        Ok(constructor)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn set_property(target: &JsValue, key: &str, value: &JsValue) -> Result<(), ChartError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| ChartError::Defaults(js_error(e)))
}

impl ChartBackend for ChartJs {
    type Handle = ChartJsHandle;

    fn is_available(&mut self) -> bool {
        self.library().is_ok()
    }

    fn apply_defaults(&mut self, defaults: &ChartDefaults) -> Result<(), ChartError> {
        let target = Reflect::get(&self.library()?, &JsValue::from_str("defaults"))
            .map_err(|e| ChartError::Defaults(js_error(e)))?;
        set_property(&target, "color", &JsValue::from_str(&defaults.color))?;
        set_property(&target, "borderColor", &JsValue::from_str(&defaults.border_color))?;
        if let Some(family) = &defaults.font_family {
            let font = Reflect::get(&target, &JsValue::from_str("font"))
                .map_err(|e| ChartError::Defaults(js_error(e)))?;
            if font.is_object() {
                set_property(&font, "family", &JsValue::from_str(family))?;
            }
        }
        Ok(())
    }

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<ChartJsHandle, ChartError> {
        let canvas = self
            .document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| ChartError::CanvasMissing(canvas_id.to_string()))?;
        let construct_error = |reason: String| ChartError::Construct {
            canvas: canvas_id.to_string(),
            reason,
        };
        let config = to_js(config).map_err(|e| construct_error(e.to_string()))?;
        let constructor = self.library()?;
        let instance = Reflect::construct(&constructor, &Array::of2(&canvas, &config))
            .map_err(|e| construct_error(js_error(e)))?;
        Ok(ChartJsHandle {
            instance: Some(instance),
        })
    }
}

pub struct ChartJsHandle {
    instance: Option<JsValue>,
}

impl ChartHandle for ChartJsHandle {
    fn destroy(&mut self) -> Result<(), ChartError> {
        let Some(instance) = self.instance.take() else {
            return Ok(());
        };
        let destroy = Reflect::get(&instance, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| ChartError::Destroy("instance has no destroy()".to_string()))?;
        destroy
            .call0(&instance)
            .map(|_| ())
            .map_err(|e| ChartError::Destroy(js_error(e)))
    }
}

/// Resolve after `delay` (a `setTimeout`).
pub async fn sleep(delay: Duration) {
    let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Resolve on the next animation frame.
pub async fn next_frame() {
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| window.request_animation_frame(&resolve));
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Configuration embedded in the page, or the defaults.
pub fn page_config(document: &Document) -> DashboardConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return DashboardConfig::default();
    };
    DashboardConfig::from_json(&json).unwrap_or_else(|e| {
        warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
        DashboardConfig::default()
    })
}

type DomCoordinator = ThemeCoordinator<DomPage, LocalStorage, ChartJs>;

/// Wire the dashboard into the current document: restore layout and theme,
/// attach every listener and draw the charts.
///
/// Only a missing document is fatal. Storage, the chart library and each
/// listener are optional; whatever is unavailable is logged and skipped.
pub fn start() -> Result<(), PlatformError> {
    let page = DomPage::new()?;
    let store = LocalStorage::new(page.window());
    let config = page_config(page.document());

    wire_layout(&page, &store, &config);

    let (tx, rx) = mpsc::unbounded();
    wire_theme_sources(&page, &config, &tx);

    let backend = ChartJs::new(page.document().clone());
    let mut coordinator = ThemeCoordinator::new(page, store, backend, config);
    let first = coordinator.init();
    let coordinator = Rc::new(RefCell::new(coordinator));
    spawn_local(settle_and_rebuild(coordinator.clone(), first));
    if !chart_library_loaded() {
        spawn_local(rebuild_when_library_loads(coordinator.clone()));
    }
    spawn_local(drive(coordinator, rx));

    info!("Dashboard started");
    Ok(())
}

fn wire_layout(page: &DomPage, store: &LocalStorage, config: &DashboardConfig) {
    let mut layout = LayoutToggle::new(page.clone(), store.clone(), config);
    layout.init();
    let Some(toggle) = page.element(&config.elements.layout_toggle) else {
        return;
    };
    let layout = Rc::new(RefCell::new(layout));
    best_effort(
        "layout toggle",
        listen(&toggle, "change", move |event| {
            if let Some(input) = event_target::<HtmlInputElement>(&event) {
                layout.borrow_mut().toggle_changed(input.checked());
            }
        }),
    );
}

fn wire_theme_sources(page: &DomPage, config: &DashboardConfig, tx: &UnboundedSender<ThemeEvent>) {
    if let Some(select) = page.element(&config.elements.theme_select) {
        let tx = tx.clone();
        best_effort(
            "theme dropdown",
            listen(&select, "change", move |event| {
                if let Some(select) = event_target::<HtmlSelectElement>(&event) {
                    send(&tx, ThemeEvent::Selected(select.value()));
                }
            }),
        );
    }

    if let Some(toggle) = page.element(&config.elements.quick_toggle) {
        let tx = tx.clone();
        best_effort(
            "quick toggle",
            listen(&toggle, "change", move |event| {
                if let Some(input) = event_target::<HtmlInputElement>(&event) {
                    send(&tx, ThemeEvent::QuickToggle(input.checked()));
                }
            }),
        );
    }

    if let Some(root) = page.document().document_element() {
        best_effort(
            "theme attribute observer",
            observe_theme_attribute(&root, tx.clone()),
        );
    }

    let applied = tx.clone();
    best_effort(
        "theme:applied listener",
        listen(page.window(), THEME_APPLIED_EVENT, move |_| {
            send(&applied, ThemeEvent::ThemeApplied);
        }),
    );

    let storage = tx.clone();
    best_effort(
        "storage listener",
        listen(page.window(), "storage", move |event| {
            let Some(event) = event.dyn_ref::<StorageEvent>() else {
                return;
            };
            if let Some(key) = event.key() {
                send(
                    &storage,
                    ThemeEvent::StorageChanged {
                        key,
                        value: event.new_value(),
                    },
                );
            }
        }),
    );

    match page.window().match_media(DARK_QUERY) {
        Ok(Some(query)) => {
            let tx = tx.clone();
            best_effort(
                "colour scheme listener",
                listen(&query, "change", move |_| {
                    send(&tx, ThemeEvent::ColorSchemeChanged);
                }),
            );
        }
        _ => debug!("matchMedia unavailable, OS theme changes will not be followed"),
    }
}

fn observe_theme_attribute(
    root: &Element,
    tx: UnboundedSender<ThemeEvent>,
) -> Result<(), PlatformError> {
    let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
        move |_records: Array, _observer: MutationObserver| {
            send(&tx, ThemeEvent::RootAttributeChanged);
        },
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| PlatformError::Dom(js_error(e)))?;
    let init = MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&Array::of1(&JsValue::from_str(THEME_ATTRIBUTE)));
    observer
        .observe_with_options(root, &init)
        .map_err(|e| PlatformError::Dom(js_error(e)))?;
    callback.forget();
    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), PlatformError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| PlatformError::Dom(js_error(e)))?;
    closure.forget();
    Ok(())
}

fn event_target<T: JsCast>(event: &Event) -> Option<T> {
    event.target()?.dyn_into::<T>().ok()
}

fn send(tx: &UnboundedSender<ThemeEvent>, event: ThemeEvent) {
    if tx.unbounded_send(event).is_err() {
        debug!("Theme event dropped, coordinator stopped");
    }
}

async fn drive(coordinator: Rc<RefCell<DomCoordinator>>, mut events: UnboundedReceiver<ThemeEvent>) {
    while let Some(event) = events.next().await {
        let ticket = coordinator.borrow_mut().handle(event);
        if let Some(ticket) = ticket {
            spawn_local(settle_and_rebuild(coordinator.clone(), ticket));
        }
    }
}

async fn settle_and_rebuild(coordinator: Rc<RefCell<DomCoordinator>>, ticket: RebuildTicket) {
    if ticket.wait_frame {
        next_frame().await;
    }
    sleep(ticket.delay).await;
    if let Some(summary) = coordinator.borrow_mut().run_rebuild(ticket) {
        debug!(?summary, "Charts rebuilt");
    }
}

/// Whether the global `Chart` constructor exists yet.
fn chart_library_loaded() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("Chart")).unwrap_or(false)
}

/// Start the dashboard. Failures are logged; the page stays usable without it.
pub fn launch() {
    if let Err(e) = start() {
        warn!("Dashboard not started: {}", e);
    }
}

/// Script tags hoisted into `<head>` load asynchronously, so the library may
/// arrive after the first rebuild. Rebuild once more when it does.
async fn rebuild_when_library_loads(coordinator: Rc<RefCell<DomCoordinator>>) {
    for _ in 0..LIBRARY_POLL_ATTEMPTS {
        sleep(LIBRARY_POLL_INTERVAL).await;
        if chart_library_loaded() {
            let ticket = coordinator.borrow_mut().schedule_rebuild();
            settle_and_rebuild(coordinator, ticket).await;
            return;
        }
    }
    warn!("Chart.js never loaded, dashboard runs without charts");
}

const LIBRARY_POLL_ATTEMPTS: u32 = 100;
const LIBRARY_POLL_INTERVAL: Duration = Duration::from_millis(50);
