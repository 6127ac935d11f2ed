//! Element visibility observation.
//!
//! Binds an intersection observer to an element for the time it is mounted,
//! invoking a user callback on visibility transitions. Two modes:
//!
//! - default: the element itself is observed and the callback fires on
//!   every delivered entry, reporting per-edge visibility;
//! - full-element: two 1×1 px sentinels pinned to the element's top and
//!   bottom edges are observed instead, and the callback fires only once
//!   both sentinels have been seen intersecting since the last report.
//!
//! The directive core is platform-neutral and generic over a
//! [`DomAdapter`]; the `web` feature provides the browser substrate
//! backed by `web-sys`'s `IntersectionObserver`. Under server-side
//! rendering the directive is inert: the `web` module is not compiled into
//! the server half, and a non-client adapter turns both lifecycle hooks
//! into no-ops.
//!
//! # Example
//!
//! ```rust,ignore
//! use observe_visibility::{Binding, ObserverOptions, web};
//!
//! // Mount hook of the host framework:
//! web::with_directive(|directive| {
//!     directive.before_mount(
//!         &element,
//!         Binding::callback(|visible, ctx| {
//!             tracing::debug!(visible, top = ctx.is_top_visible, "visibility change");
//!         }),
//!     );
//! });
//!
//! // Unmount hook:
//! web::with_directive(|directive| directive.unmounted(&element));
//! ```

pub mod directive;
pub mod options;
pub mod registry;
pub mod tracker;
#[cfg(feature = "web")]
pub mod web;

pub use directive::{DomAdapter, EntryHandler, SentinelPair, VisibilityDirective};
pub use options::{Binding, ObserverOptions, VisibilityCallback, VisibilityContext};
pub use registry::ObserverRegistry;
pub use tracker::{
    edge_visibility, EdgeRect, FullElementTracker, IntersectionEntry, ObservedNode,
};
