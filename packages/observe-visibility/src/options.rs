use std::rc::Rc;

/// Observer configuration, mirroring the browser observer's `root`,
/// `rootMargin` and `threshold` knobs plus the full-element extension.
#[derive(Debug, Clone)]
pub struct ObserverOptions<El> {
    /// Containing element used as the intersection root; the viewport when
    /// absent.
    pub root: Option<El>,
    /// Margin applied to the root's bounding box, e.g. `"0px 0px -40px 0px"`.
    pub root_margin: Option<String>,
    /// Intersection ratios at which entries are delivered.
    pub thresholds: Vec<f64>,
    /// Observe two edge sentinels instead of the element and only report
    /// once both have been seen intersecting.
    pub observe_full_element: bool,
}

impl<El> Default for ObserverOptions<El> {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: None,
            thresholds: Vec::new(),
            observe_full_element: false,
        }
    }
}

/// Data handed to the visibility callback alongside the visibility flag.
///
/// `entry_was_observed` is only ever true in full-element mode, on the entry
/// that completed a full pass.
pub struct VisibilityContext<'a, E> {
    pub is_top_visible: bool,
    pub is_bottom_visible: bool,
    pub entry_was_observed: bool,
    pub entry: &'a E,
}

/// User callback invoked on qualifying visibility transitions.
pub type VisibilityCallback<E> = Rc<dyn Fn(bool, VisibilityContext<'_, E>)>;

/// Directive binding value: either a bare callback or a callback paired
/// with observer configuration. Resolved once at attach time.
pub enum Binding<El, E> {
    Callback(VisibilityCallback<E>),
    Configured {
        callback: VisibilityCallback<E>,
        options: ObserverOptions<El>,
    },
}

impl<El, E> Binding<El, E> {
    /// Wrap a bare closure; default options apply.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(bool, VisibilityContext<'_, E>) + 'static,
    {
        Binding::Callback(Rc::new(f))
    }

    /// Pair a closure with observer options.
    pub fn configured<F>(f: F, options: ObserverOptions<El>) -> Self
    where
        F: Fn(bool, VisibilityContext<'_, E>) + 'static,
    {
        Binding::Configured {
            callback: Rc::new(f),
            options,
        }
    }

    pub(crate) fn resolve(self) -> (VisibilityCallback<E>, ObserverOptions<El>) {
        match self {
            Binding::Callback(callback) => (callback, ObserverOptions::default()),
            Binding::Configured { callback, options } => (callback, options),
        }
    }
}
