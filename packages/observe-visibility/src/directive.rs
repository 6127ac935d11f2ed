use std::cell::RefCell;
use std::hash::Hash;

use crate::options::{Binding, ObserverOptions, VisibilityContext};
use crate::registry::ObserverRegistry;
use crate::tracker::{edge_visibility, FullElementTracker, IntersectionEntry};

/// Entry batches as delivered by the platform observer.
pub type EntryHandler<E> = Box<dyn FnMut(&[E])>;

/// The two sentinel nodes of full-element mode, in document order.
pub struct SentinelPair<El> {
    pub top: El,
    pub bottom: El,
}

/// Everything the directive needs from the host platform: execution-context
/// detection, observer construction, and the DOM mutations of full-element
/// mode.
pub trait DomAdapter {
    type Element: Clone;
    type Key: Eq + Hash + Clone;
    type Entry: IntersectionEntry + 'static;
    type Observer;

    /// False under server-side rendering; the directive then does nothing.
    fn is_client(&self) -> bool;

    /// Stable handle keying the observer side table.
    fn key_of(&self, el: &Self::Element) -> Self::Key;

    /// Build an observer delivering entry batches to `on_entries`, or `None`
    /// when the platform lacks the capability.
    fn create_observer(
        &self,
        options: &ObserverOptions<Self::Element>,
        on_entries: EntryHandler<Self::Entry>,
    ) -> Option<Self::Observer>;

    fn observe(&self, observer: &Self::Observer, target: &Self::Element);

    fn disconnect(&self, observer: &Self::Observer);

    /// Insert the top/bottom sentinel nodes into `el`, or `None` when the
    /// DOM refuses.
    fn inject_sentinels(&self, el: &Self::Element) -> Option<SentinelPair<Self::Element>>;

    fn remove_node(&self, node: &Self::Element);
}

/// Live resources held for one mounted element.
struct Attachment<D: DomAdapter> {
    observer: D::Observer,
    sentinels: Vec<D::Element>,
}

/// Visibility observation directive: binds an observer to an element for
/// the duration it is mounted.
///
/// [`before_mount`](Self::before_mount) and [`unmounted`](Self::unmounted)
/// are the lifecycle registration points; the host UI framework calls them
/// serially. Under a non-client execution context both are deliberate
/// no-ops, so server-side rendering stays inert.
///
/// Per element the lifecycle is `unattached → observing → detached`;
/// detaching is terminal for the attachment, and remounting the same
/// element creates a fresh, independent one.
pub struct VisibilityDirective<D: DomAdapter> {
    dom: D,
    observers: RefCell<ObserverRegistry<D::Key, Attachment<D>>>,
}

impl<D: DomAdapter> VisibilityDirective<D> {
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            observers: RefCell::new(ObserverRegistry::new()),
        }
    }

    /// Number of elements currently under observation.
    pub fn observed_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Attach an observer to `el` according to `binding`.
    ///
    /// In full-element mode the element itself is not observed: two 1×1 px
    /// sentinels pinned to its top and bottom edges are, and the callback
    /// fires only on entries that complete a full pass over both.
    pub fn before_mount(&self, el: &D::Element, binding: Binding<D::Element, D::Entry>) {
        if !self.dom.is_client() {
            return;
        }

        let (callback, options) = binding.resolve();
        let full = options.observe_full_element;

        let mut tracker = FullElementTracker::default();
        let handler = Box::new(move |entries: &[D::Entry]| {
            for entry in entries {
                let is_visible = entry.is_intersecting();
                let (is_top_visible, is_bottom_visible) =
                    edge_visibility(is_visible, entry.bounding_rect(), entry.intersection_rect());

                if full {
                    if tracker.record(entry.node(), is_visible) {
                        callback(
                            is_visible,
                            VisibilityContext {
                                is_top_visible,
                                is_bottom_visible,
                                entry_was_observed: true,
                                entry,
                            },
                        );
                    }
                } else {
                    callback(
                        is_visible,
                        VisibilityContext {
                            is_top_visible,
                            is_bottom_visible,
                            entry_was_observed: false,
                            entry,
                        },
                    );
                }
            }
        });

        let sentinels = if full {
            match self.dom.inject_sentinels(el) {
                Some(pair) => vec![pair.top, pair.bottom],
                None => {
                    tracing::warn!("sentinel injection failed, element not observed");
                    return;
                }
            }
        } else {
            Vec::new()
        };

        let Some(observer) = self.dom.create_observer(&options, handler) else {
            tracing::warn!("intersection observer unavailable, element not observed");
            for sentinel in &sentinels {
                self.dom.remove_node(sentinel);
            }
            return;
        };

        if full {
            for sentinel in &sentinels {
                self.dom.observe(&observer, sentinel);
            }
        } else {
            self.dom.observe(&observer, el);
        }

        let key = self.dom.key_of(el);
        let replaced = self
            .observers
            .borrow_mut()
            .insert(key, Attachment { observer, sentinels });
        if let Some(stale) = replaced {
            // Mounted over a live attachment: release the stale one.
            self.release(stale);
        }

        tracing::debug!(full_element = full, "visibility observer attached");
    }

    /// Detach and release whatever [`before_mount`](Self::before_mount)
    /// installed for `el`. No-op when nothing is recorded.
    pub fn unmounted(&self, el: &D::Element) {
        if !self.dom.is_client() {
            return;
        }

        let key = self.dom.key_of(el);
        let attachment = self.observers.borrow_mut().remove(&key);
        if let Some(attachment) = attachment {
            self.release(attachment);
            tracing::debug!("visibility observer detached");
        }
    }

    fn release(&self, attachment: Attachment<D>) {
        self.dom.disconnect(&attachment.observer);
        for sentinel in attachment.sentinels {
            self.dom.remove_node(&sentinel);
        }
    }
}
