//! Browser substrate backed by `web-sys`'s `IntersectionObserver`.
//!
//! Compiled only under the `web` feature, the client half of a
//! fullstack build. The server half never links this module, which is the
//! compile-time side of the SSR no-op; [`BrowserDom::is_client`] is the
//! runtime side.

use std::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::directive::{DomAdapter, EntryHandler, SentinelPair, VisibilityDirective};
use crate::options::ObserverOptions;
use crate::tracker::{EdgeRect, IntersectionEntry, ObservedNode};

/// Marker classes identifying which sentinel an entry reports on.
const TOP_SENTINEL_CLASS: &str = "top-sentinel";
const BOTTOM_SENTINEL_CLASS: &str = "bottom-sentinel";

/// Attribute carrying an element's side-table key.
const KEY_ATTR: &str = "data-observe-visibility-key";

thread_local! {
    static NEXT_KEY: Cell<u64> = const { Cell::new(1) };

    static DIRECTIVE: WebVisibilityDirective = VisibilityDirective::new(BrowserDom::new());
}

/// Directive wired to the browser substrate.
pub type WebVisibilityDirective = VisibilityDirective<BrowserDom>;

/// Run `f` against the runtime-wide directive instance. The UI framework's
/// mount/unmount hooks call through here so every element shares one side
/// table for the lifetime of the app.
pub fn with_directive<R>(f: impl FnOnce(&WebVisibilityDirective) -> R) -> R {
    DIRECTIVE.with(f)
}

/// One intersection report plus the observer that delivered it.
pub struct WebEntry {
    entry: IntersectionObserverEntry,
    observer: IntersectionObserver,
}

impl WebEntry {
    /// The raw browser entry.
    pub fn raw(&self) -> &IntersectionObserverEntry {
        &self.entry
    }

    /// The observer that delivered this entry.
    pub fn observer(&self) -> &IntersectionObserver {
        &self.observer
    }
}

impl IntersectionEntry for WebEntry {
    fn is_intersecting(&self) -> bool {
        self.entry.is_intersecting()
    }

    fn bounding_rect(&self) -> EdgeRect {
        let rect = self.entry.bounding_client_rect();
        EdgeRect::new(rect.top(), rect.bottom())
    }

    fn intersection_rect(&self) -> EdgeRect {
        let rect = self.entry.intersection_rect();
        EdgeRect::new(rect.top(), rect.bottom())
    }

    fn node(&self) -> ObservedNode {
        let class_list = self.entry.target().class_list();
        if class_list.contains(TOP_SENTINEL_CLASS) {
            ObservedNode::TopSentinel
        } else if class_list.contains(BOTTOM_SENTINEL_CLASS) {
            ObservedNode::BottomSentinel
        } else {
            ObservedNode::Element
        }
    }
}

/// Keeps the observer and its callback closure alive together; the browser
/// keeps calling the callback for as long as the observer is connected.
pub struct BrowserObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

/// [`DomAdapter`] over the real DOM.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDom;

impl BrowserDom {
    pub fn new() -> Self {
        BrowserDom
    }
}

fn make_sentinel(document: &Document, class: &str, edge: &str) -> Option<HtmlElement> {
    let sentinel: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    sentinel.class_list().add_1(class).ok()?;

    let style = sentinel.style();
    for (property, value) in [
        ("height", "1px"),
        ("width", "1px"),
        ("position", "absolute"),
        (edge, "0"),
    ] {
        style.set_property(property, value).ok()?;
    }

    Some(sentinel)
}

impl DomAdapter for BrowserDom {
    type Element = Element;
    type Key = u64;
    type Entry = WebEntry;
    type Observer = BrowserObserver;

    fn is_client(&self) -> bool {
        web_sys::window().is_some()
    }

    fn key_of(&self, el: &Element) -> u64 {
        if let Some(existing) = el.get_attribute(KEY_ATTR).and_then(|v| v.parse().ok()) {
            return existing;
        }

        let key = NEXT_KEY.with(|next| {
            let key = next.get();
            next.set(key + 1);
            key
        });
        if el.set_attribute(KEY_ATTR, &key.to_string()).is_err() {
            tracing::warn!(key, "failed to tag element with its visibility key");
        }
        key
    }

    fn create_observer(
        &self,
        options: &ObserverOptions<Element>,
        mut on_entries: EntryHandler<WebEntry>,
    ) -> Option<BrowserObserver> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let batch: Vec<WebEntry> = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| WebEntry {
                        entry,
                        observer: observer.clone(),
                    })
                    .collect();
                on_entries(&batch);
            },
        );

        let init = IntersectionObserverInit::new();
        if let Some(root) = &options.root {
            init.set_root(Some(root));
        }
        if let Some(margin) = &options.root_margin {
            init.set_root_margin(margin);
        }
        if !options.thresholds.is_empty() {
            let thresholds = js_sys::Array::new();
            for threshold in &options.thresholds {
                thresholds.push(&JsValue::from_f64(*threshold));
            }
            init.set_threshold(&JsValue::from(thresholds));
        }

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => Some(BrowserObserver {
                observer,
                _callback: callback,
            }),
            Err(err) => {
                tracing::warn!(?err, "IntersectionObserver construction failed");
                None
            }
        }
    }

    fn observe(&self, observer: &BrowserObserver, target: &Element) {
        observer.observer.observe(target);
    }

    fn disconnect(&self, observer: &BrowserObserver) {
        observer.observer.disconnect();
    }

    fn inject_sentinels(&self, el: &Element) -> Option<SentinelPair<Element>> {
        let document = web_sys::window()?.document()?;

        let top = make_sentinel(&document, TOP_SENTINEL_CLASS, "top")?;
        let bottom = make_sentinel(&document, BOTTOM_SENTINEL_CLASS, "bottom")?;

        // One sentinel before the element's content, one after.
        if el.insert_before(&top, el.first_child().as_ref()).is_err() {
            return None;
        }
        if el.append_child(&bottom).is_err() {
            top.remove();
            return None;
        }

        Some(SentinelPair {
            top: top.into(),
            bottom: bottom.into(),
        })
    }

    fn remove_node(&self, node: &Element) {
        node.remove();
    }
}
