//! Discovery of functions marked with `#[provide]`.
//!
//! The attribute leaves the function alone and submits a [`Marked`]
//! record to an [`inventory`] collection. Records carry the module path
//! the function was defined in, so [`Container::scan`] can pick the
//! ones living under a given namespace.
//!
//! [`Container::scan`]: crate::container::Container::scan

use std::fmt;

use crate::inspect::Thing;

/// A function recorded for later discovery.
pub struct Marked {
    module: &'static str,
    name: &'static str,
    build: fn() -> Thing,
}

impl Marked {
    /// Records a provider defined in `module`.
    ///
    /// `build` produces the [`Thing`] to register; it is only called
    /// when a scan picks the record up.
    pub const fn new(module: &'static str, name: &'static str, build: fn() -> Thing) -> Self {
        Self { module, name, build }
    }

    /// Module path the function was defined in.
    pub fn module(&self) -> &'static str {
        self.module
    }

    /// Name the provider registers under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn thing(&self) -> Thing {
        (self.build)()
    }
}

impl fmt::Debug for Marked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marked")
            .field("module", &self.module)
            .field("name", &self.name)
            .finish()
    }
}

inventory::collect!(Marked);

/// True if `module` is `namespace` or nested inside it.
///
/// An empty namespace contains every module.
///
/// ```
/// use wakil_container::discovery::in_namespace;
///
/// assert!(in_namespace("app::services", "app"));
/// assert!(in_namespace("app", "app"));
/// assert!(!in_namespace("application", "app"));
/// ```
pub fn in_namespace(module: &str, namespace: &str) -> bool {
    if namespace.is_empty() {
        return true;
    }

    match module.strip_prefix(namespace) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

/// Every marked function under `namespace`.
pub fn marked_in(namespace: &str) -> impl Iterator<Item = &'static Marked> + '_ {
    inventory::iter::<Marked>
        .into_iter()
        .filter(move |marked| in_namespace(marked.module, namespace))
}
