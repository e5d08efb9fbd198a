//! # The Container — heart of Wakil
//!
//! Providers are registered by name, their declared parameters name
//! other providers, and [`Container::get`] resolves the whole chain on
//! first use, memoizing every value it builds.
//!
//! # Architecture
//! ```text
//! Thing ──inspect()──> Item ──register()──> Registry ──get()──> cache
//!                                              ▲
//!          #[provide] ──scan()──> batch ───────┘
//! ```
//!
//! # Examples
//! ```rust
//! use wakil_container::prelude::*;
//!
//! let container = Container::new();
//!
//! container.register(Thing::function("one", &[], |_| Ok(1i32))).unwrap();
//! container
//!     .register(Thing::function("also_one", &["one"], |args| args.cloned::<i32>("one")))
//!     .unwrap();
//! container
//!     .register(Thing::function("two", &["one", "also_one"], |args| {
//!         Ok(args.cloned::<i32>("one")? + args.cloned::<i32>("also_one")?)
//!     }))
//!     .unwrap();
//!
//! assert_eq!(*container.get_as::<i32>("two").unwrap(), 2);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, info, instrument, trace};
use wakil_support::rendering::suggest_similar;

use crate::args::{CallArgs, Value, downcast};
use crate::discovery;
use crate::error::{Result, UnknownProviderError, WakilError};
use crate::graph;
use crate::inspect::{Thing, classify, inspect};
use crate::invoke::{self, Resolver};
use crate::item::Item;
use crate::registry::Registry;

const DEFAULT_SUGGESTIONS: usize = 3;

// ============================================================
// ContainerBuilder
// ============================================================

/// Configures a [`Container`].
///
/// # Examples
/// ```rust
/// use wakil_container::prelude::*;
///
/// let container = Container::builder()
///     .allow_override(false)
///     .suggestions(5)
///     .build();
/// assert!(container.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    allow_override: bool,
    max_suggestions: usize,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            allow_override: true,
            max_suggestions: DEFAULT_SUGGESTIONS,
        }
    }

    /// Allow re-registering a name (default: allowed).
    ///
    /// A replaced provider's memoized value is discarded. Values already
    /// built from it by other providers stay cached.
    pub fn allow_override(mut self, allow: bool) -> Self {
        self.allow_override = allow;
        self
    }

    /// Maximum number of "did you mean" names in error messages.
    pub fn suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    pub fn build(self) -> Container {
        Container {
            registry: RwLock::new(Registry::new()),
            cache: DashMap::new(),
            allow_override: self.allow_override,
            max_suggestions: self.max_suggestions,
        }
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Name-based dependency injection container.
///
/// The registry lock is only held to look items up or to validate and
/// install registrations, never while a provider runs, so providers may
/// freely resolve other providers.
pub struct Container {
    registry: RwLock<Registry>,
    cache: DashMap<String, Value>,
    allow_override: bool,
    max_suggestions: usize,
}

impl Container {
    /// An empty container with default settings.
    pub fn new() -> Self {
        ContainerBuilder::new().build()
    }

    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    // ── Registration ──

    /// Registers `thing` under its inferred name.
    ///
    /// Re-registering a name replaces the provider and discards its
    /// memoized value; see [`Container::register_item`].
    ///
    /// # Errors
    /// - [`WakilError::InvalidProvider`] — not invocable or unnamed
    /// - [`WakilError::UnknownDependency`] — a parameter names no registered provider
    /// - [`WakilError::CircularDependency`] — the replacement closes a cycle
    /// - [`WakilError::AlreadyRegistered`] — name taken, overrides disabled
    pub fn register(&self, thing: impl Into<Thing>) -> Result<()> {
        let item = inspect(&thing.into(), None)?;
        self.register_item(item)
    }

    /// Registers `thing` under `name`, whatever its inferred name.
    pub fn register_as(&self, thing: impl Into<Thing>, name: &str) -> Result<()> {
        let item = inspect(&thing.into(), Some(name))?;
        self.register_item(item)
    }

    /// Registers an already inspected item.
    ///
    /// Replacing a provider drops only its own memoized value. Dependents
    /// resolved earlier keep the value they were built with.
    pub fn register_item(&self, item: Item) -> Result<()> {
        let mut registry = self.registry.write();

        registry.check_vacant(item.name(), self.allow_override)?;
        graph::validate_single(&registry.dependency_view(), &item, self.max_suggestions)?;

        let name = item.name().to_string();
        if registry.insert(item) {
            debug!(name = %name, "Replaced provider");
        }
        self.cache.remove(&name);
        Ok(())
    }

    /// Registers a set of items at once.
    ///
    /// Items may depend on each other in any order. Nothing is installed
    /// unless the whole batch validates. Returns the number of items
    /// installed.
    #[instrument(skip_all, name = "register_batch", fields(batch = items.len()))]
    pub fn register_batch(&self, items: Vec<Item>) -> Result<usize> {
        let mut registry = self.registry.write();

        for item in &items {
            registry.check_vacant(item.name(), self.allow_override)?;
        }
        graph::validate_batch(&registry.dependency_view(), &items, self.max_suggestions)?;

        let count = items.len();
        for item in items {
            let name = item.name().to_string();
            registry.insert(item);
            self.cache.remove(&name);
        }

        debug!(installed = count, total = registry.len(), "Installed batch");
        Ok(count)
    }

    /// Inspects every thing and registers them as one batch.
    pub fn register_all(&self, things: impl IntoIterator<Item = Thing>) -> Result<usize> {
        let items = things
            .into_iter()
            .map(|thing| inspect(&thing, None))
            .collect::<Result<Vec<_>>>()?;
        self.register_batch(items)
    }

    /// Registers every `#[provide]` function defined in `namespace` or
    /// below it.
    ///
    /// Pass `module_path!()` to scan the calling module.
    #[instrument(skip(self), name = "scan")]
    pub fn scan(&self, namespace: &str) -> Result<usize> {
        let things: Vec<Thing> = discovery::marked_in(namespace)
            .inspect(|marked| trace!(name = marked.name(), module = marked.module(), "Discovered provider"))
            .map(|marked| marked.thing())
            .collect();

        let count = self.register_all(things)?;
        info!(namespace, discovered = count, "Scan complete");
        Ok(count)
    }

    // ── Lookup ──

    /// True if a provider named `name` is registered.
    pub fn has(&self, name: &str) -> bool {
        self.registry.read().contains(name)
    }

    /// Resolves the provider named `name`.
    ///
    /// The provider runs at most once; later calls return the memoized
    /// value.
    ///
    /// # Errors
    /// [`WakilError::UnknownProvider`] if nothing is registered under
    /// `name`, or any error raised while resolving its dependencies.
    pub fn get(&self, name: &str) -> Result<Value> {
        let found = self.registry.read().get(name);
        let Some(item) = found else {
            return Err(self.unknown_provider(name));
        };

        if let Some(cached) = self.cache.get(name) {
            trace!(name, "Cache hit");
            return Ok(cached.value().clone());
        }

        let value = invoke::call(self, item.target(), item.name(), CallArgs::new())?;
        debug!(name, "Resolved provider");

        // Registration clears the cache under the write lock, so only
        // cache while the item we ran is still the registered one.
        let registry = self.registry.read();
        let current = registry.get(name);
        if !current.is_some_and(|current| Arc::ptr_eq(&current, &item)) {
            trace!(name, "Provider replaced while resolving, not cached");
            return Ok(value);
        }

        let stored = self.cache.entry(name.to_string()).or_insert(value).value().clone();
        Ok(stored)
    }

    /// Resolves `name` as a shared `T`.
    ///
    /// ```rust
    /// use wakil_container::prelude::*;
    ///
    /// let container = Container::new();
    /// container.register(Thing::function("url", &[], |_| Ok(String::from("postgres://")))).unwrap();
    ///
    /// let url = container.get_as::<String>("url").unwrap();
    /// assert_eq!(url.as_str(), "postgres://");
    /// ```
    pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        downcast(name, self.get(name)?)
    }

    // ── Invocation ──

    /// Calls `thing`, injecting every parameter the caller does not
    /// supply.
    ///
    /// Positional arguments bind first, left to right. Named arguments
    /// always take precedence over injected providers.
    ///
    /// ```rust
    /// use wakil_container::prelude::*;
    ///
    /// let container = Container::new();
    /// container.register(Thing::function("abc", &[], |_| Ok(123i32))).unwrap();
    ///
    /// let echo = Thing::function("echo", &["abc"], |args| args.cloned::<i32>("abc"));
    /// assert_eq!(container.invoke_as::<i32>(&echo, CallArgs::new()).unwrap(), 123);
    /// assert_eq!(
    ///     container.invoke_as::<i32>(&echo, CallArgs::new().named("abc", 999i32)).unwrap(),
    ///     999,
    /// );
    /// ```
    pub fn invoke(&self, thing: &Thing, args: CallArgs) -> Result<Value> {
        let (routine, _) = classify(thing)?;
        let label = routine.name().unwrap_or("<anonymous>").to_string();
        invoke::call(self, &routine, &label, args)
    }

    /// Calls `thing` and downcasts the result, cloning it out.
    pub fn invoke_as<T: Any + Send + Sync + Clone>(&self, thing: &Thing, args: CallArgs) -> Result<T> {
        let label = thing.name().unwrap_or("<anonymous>").to_string();
        let value = self.invoke(thing, args)?;
        downcast::<T>(&label, value).map(|v| T::clone(&v))
    }

    // ── Introspection ──

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.registry.read().names()
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    fn unknown_provider(&self, name: &str) -> WakilError {
        let names = self.names();
        WakilError::UnknownProvider(UnknownProviderError {
            requested: name.to_string(),
            suggestions: suggest_similar(name, &names, self.max_suggestions),
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for Container {
    fn has_provider(&self, name: &str) -> bool {
        self.has(name)
    }

    fn resolve(&self, name: &str) -> Result<Value> {
        self.get(name)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registered", &self.len())
            .field("cached", &self.cache.len())
            .field("allow_override", &self.allow_override)
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder};
    pub use crate::args::{Arguments, CallArgs, Value};
    pub use crate::error::{Result, WakilError};
    pub use crate::inspect::{Callable, Thing};
    pub use crate::item::Item;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arguments;
    use crate::discovery::Marked;
    use crate::inspect::Callable;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;

    fn constant(name: &str, value: i32) -> Thing {
        Thing::function(name, &[], move |_| Ok(value))
    }

    fn item(name: &str, deps: &[&str]) -> Item {
        inspect(&Thing::function(name, deps, |_| Ok(())), None).unwrap()
    }

    #[test]
    fn register_callable_with_name() {
        let container = Container::new();
        container.register_as(constant("abc", 1), "fixture").unwrap();

        assert!(container.has("fixture"));
        assert!(!container.has("abc"));
    }

    #[test]
    fn register_callable_implied_name() {
        let container = Container::new();
        container.register(constant("abc", 1)).unwrap();
        assert!(container.has("abc"));
    }

    #[test]
    fn register_uncallable() {
        let container = Container::new();
        for thing in [Thing::value(()), Thing::value(123), Thing::value("abc")] {
            assert!(matches!(
                container.register(thing),
                Err(WakilError::InvalidProvider { .. })
            ));
        }
        assert!(container.is_empty());
    }

    #[test]
    fn register_callable_instance() {
        struct Test;

        impl Callable for Test {
            type Output = i32;

            fn parameters(&self) -> &[&str] {
                &[]
            }

            fn call(&self, _: &Arguments) -> Result<i32> {
                Ok(1)
            }
        }

        let container = Container::new();
        container.register(Test).unwrap();

        assert!(container.has("Test"));
        assert_eq!(*container.get_as::<i32>("Test").unwrap(), 1);
    }

    #[test]
    fn get_memoizes() {
        let counter = Arc::new(AtomicU32::new(0));
        let container = Container::new();
        container
            .register(Thing::function("abc", &[], {
                let counter = counter.clone();
                move |_| Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
            }))
            .unwrap();

        for _ in 0..2 {
            assert_eq!(*container.get_as::<u32>("abc").unwrap(), 1);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn get_nonexistent() {
        let container = Container::new();
        container.register(constant("abd", 1)).unwrap();

        match container.get("abc").unwrap_err() {
            WakilError::UnknownProvider(e) => {
                assert_eq!(e.requested, "abc");
                assert_eq!(e.suggestions, vec!["abd"]);
            }
            other => panic!("Expected UnknownProvider, got: {other:?}"),
        }
    }

    #[test]
    fn get_wrong_type() {
        let container = Container::new();
        container.register(constant("abc", 1)).unwrap();
        assert!(matches!(
            container.get_as::<String>("abc"),
            Err(WakilError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn dependency_chain() {
        let container = Container::new();
        container.register(constant("one", 1)).unwrap();
        container
            .register(Thing::function("also_one", &["one"], |args| args.cloned::<i32>("one")))
            .unwrap();
        container
            .register(Thing::function("two", &["one", "also_one"], |args| {
                Ok(args.cloned::<i32>("one")? + args.cloned::<i32>("also_one")?)
            }))
            .unwrap();

        assert_eq!(*container.get_as::<i32>("also_one").unwrap(), 1);
        assert_eq!(*container.get_as::<i32>("two").unwrap(), 2);
    }

    #[test]
    fn register_unsatisfied_dependency() {
        let container = Container::new();
        let test = Thing::function("test", &["abc"], |_| Ok(()));

        match container.register(test).unwrap_err() {
            WakilError::UnknownDependency(e) => {
                assert_eq!(e.dependency, "abc");
                assert_eq!(e.required_by, "test");
            }
            other => panic!("Expected UnknownDependency, got: {other:?}"),
        }
        assert!(!container.has("test"));
    }

    #[test]
    fn reregister_invalidates_cache() {
        let container = Container::new();
        container.register(constant("abc", 1)).unwrap();
        assert_eq!(*container.get_as::<i32>("abc").unwrap(), 1);

        container.register(constant("abc", 2)).unwrap();
        assert_eq!(*container.get_as::<i32>("abc").unwrap(), 2);
    }

    #[test]
    fn reregister_rejected_without_override() {
        let container = Container::builder().allow_override(false).build();
        container.register(constant("abc", 1)).unwrap();

        assert!(matches!(
            container.register(constant("abc", 2)),
            Err(WakilError::AlreadyRegistered(_))
        ));
        assert_eq!(*container.get_as::<i32>("abc").unwrap(), 1);
    }

    #[test]
    fn reregister_closing_cycle_rejected() {
        let container = Container::new();
        container.register(constant("a", 1)).unwrap();
        container
            .register(Thing::function("b", &["a"], |args| args.cloned::<i32>("a")))
            .unwrap();

        let replacement = Thing::function("a", &["b"], |args| args.cloned::<i32>("b"));
        assert!(matches!(
            container.register(replacement),
            Err(WakilError::CircularDependency(_))
        ));
        assert_eq!(*container.get_as::<i32>("b").unwrap(), 1);
    }

    #[test]
    fn batch_installs_regardless_of_order() {
        let container = Container::new();
        let installed = container
            .register_batch(vec![
                item("two", &["one", "also_one"]),
                item("also_one", &["one"]),
                item("one", &[]),
            ])
            .unwrap();

        assert_eq!(installed, 3);
        assert_eq!(container.names(), vec!["also_one", "one", "two"]);
    }

    #[test]
    fn batch_with_unknown_dependency_changes_nothing() {
        let container = Container::new();
        let result = container.register_batch(vec![item("one", &[]), item("two", &["three"])]);

        assert!(matches!(result, Err(WakilError::UnknownDependency(_))));
        assert!(!container.has("one"));
        assert!(!container.has("two"));
    }

    #[test]
    fn batch_with_cycle_changes_nothing() {
        let container = Container::new();
        let result = container.register_batch(vec![item("a", &["b"]), item("b", &["a"])]);

        assert!(matches!(result, Err(WakilError::CircularDependency(_))));
        assert!(container.is_empty());
    }

    #[test]
    fn batch_may_use_registered_providers() {
        let container = Container::new();
        container.register(constant("config", 7)).unwrap();
        assert_eq!(container.register_batch(vec![item("database", &["config"])]).unwrap(), 1);
    }

    #[test]
    fn register_all_inspects_first() {
        let container = Container::new();
        let result = container.register_all(vec![constant("one", 1), Thing::value(5)]);

        assert!(matches!(result, Err(WakilError::InvalidProvider { .. })));
        assert!(!container.has("one"));
    }

    #[test]
    fn invoke_with_overrides() {
        let container = Container::new();
        container.register(constant("abc", 123)).unwrap();
        container.register(constant("efg", 456)).unwrap();

        let with_args = Thing::function("with_args", &["something", "abc", "efg", "another"], |args| {
            Ok((
                args.cloned::<&str>("something")?,
                args.cloned::<i32>("abc")?,
                args.cloned::<i32>("efg")?,
                args.cloned::<&str>("another")?,
            ))
        });

        let expected = ("something", 123, 456, "another");

        let out = container
            .invoke_as::<(&str, i32, i32, &str)>(
                &with_args,
                CallArgs::new().arg("something").named("another", "another"),
            )
            .unwrap();
        assert_eq!(out, expected);

        let out = container
            .invoke_as::<(&str, i32, i32, &str)>(
                &with_args,
                CallArgs::new().arg("something").arg(123).arg(456).named("another", "another"),
            )
            .unwrap();
        assert_eq!(out, expected);

        let out = container
            .invoke_as::<(&str, i32, i32, &str)>(
                &with_args,
                CallArgs::new().arg("something").arg(123).arg(456).arg("another"),
            )
            .unwrap();
        assert_eq!(out, expected);

        // missing positional argument
        assert!(matches!(
            container.invoke(&with_args, CallArgs::new().named("another", "another")),
            Err(WakilError::UnsatisfiedArgument { parameter, .. }) if parameter == "something"
        ));

        // missing named argument
        assert!(matches!(
            container.invoke(&with_args, CallArgs::new().arg("something")),
            Err(WakilError::UnsatisfiedArgument { parameter, .. }) if parameter == "another"
        ));
    }

    #[test]
    fn invoke_named_beats_injected() {
        let container = Container::new();
        container.register(constant("abc", 123)).unwrap();

        let g = Thing::function("g", &["abc"], |args| args.cloned::<i32>("abc"));
        let out = container.invoke_as::<i32>(&g, CallArgs::new().named("abc", 999)).unwrap();
        assert_eq!(out, 999);
    }

    #[test]
    fn invoke_positional_then_injected() {
        let container = Container::new();
        container.register(constant("a", 1)).unwrap();
        container.register(constant("b", 2)).unwrap();

        let g = Thing::function("g", &["a", "b"], |args| {
            Ok(format!("{}{}", args.cloned::<&str>("a")?, args.cloned::<i32>("b")?))
        });
        let out = container.invoke_as::<String>(&g, CallArgs::new().arg("X")).unwrap();
        assert_eq!(out, "X2");
    }

    #[test]
    fn invoke_class_like() {
        struct Something;

        impl Something {
            fn test(&self, abc: i32) -> i32 {
                abc
            }
        }

        impl Callable for Something {
            type Output = i32;

            fn parameters(&self) -> &[&str] {
                &["abc"]
            }

            fn call(&self, args: &Arguments) -> Result<i32> {
                Ok(self.test(args.cloned("abc")?))
            }
        }

        let container = Container::new();
        container.register(constant("abc", 123)).unwrap();

        assert_eq!(
            container.invoke_as::<i32>(&Thing::instance(Something), CallArgs::new()).unwrap(),
            123
        );

        let bound = Thing::method(Arc::new(Something), "test", &["self", "abc"], |s: &Something, args| {
            Ok(s.test(args.cloned("abc")?))
        });
        assert_eq!(container.invoke_as::<i32>(&bound, CallArgs::new()).unwrap(), 123);
    }

    #[test]
    fn invoke_value_is_invalid() {
        let container = Container::new();
        assert!(matches!(
            container.invoke(&Thing::value(1), CallArgs::new()),
            Err(WakilError::InvalidProvider { .. })
        ));
    }

    #[test]
    fn failing_dependency_leaves_cache_untouched() {
        let container = Container::new();
        container.register(constant("one", 1)).unwrap();
        container
            .register(Thing::function("broken", &["one"], |_| -> Result<i32> {
                Err(WakilError::construction("broken", "boom"))
            }))
            .unwrap();
        container
            .register(Thing::function("user", &["broken"], |args| args.cloned::<i32>("broken")))
            .unwrap();

        assert!(matches!(
            container.get("user"),
            Err(WakilError::ConstructionFailed { .. })
        ));
        assert!(container.cache.contains_key("one"));
        assert!(!container.cache.contains_key("broken"));
        assert!(!container.cache.contains_key("user"));
    }

    fn scanned_one() -> Thing {
        constant("scanned_one", 1)
    }

    fn scanned_two() -> Thing {
        Thing::function("scanned_two", &["scanned_one"], |args| {
            Ok(args.cloned::<i32>("scanned_one")? * 2)
        })
    }

    mod scanned {
        inventory::submit! {
            super::Marked::new(module_path!(), "scanned_two", super::scanned_two)
        }
        inventory::submit! {
            super::Marked::new(module_path!(), "scanned_one", super::scanned_one)
        }
    }

    #[test]
    fn scan_registers_marked_functions() {
        let container = Container::new();
        let namespace = format!("{}::scanned", module_path!());

        assert_eq!(container.scan(&namespace).unwrap(), 2);
        assert_eq!(*container.get_as::<i32>("scanned_two").unwrap(), 2);
    }

    #[test]
    fn scan_empty_namespace_part() {
        let container = Container::new();
        assert_eq!(container.scan("wakil_container::no_such_module").unwrap(), 0);
        assert!(container.is_empty());
    }

    #[test]
    fn reregister_keeps_dependent_values() {
        let container = Container::new();
        container.register(constant("one", 1)).unwrap();
        container
            .register(Thing::function("two", &["one"], |args| Ok(args.cloned::<i32>("one")? + 1)))
            .unwrap();
        assert_eq!(*container.get_as::<i32>("two").unwrap(), 2);

        container.register(constant("one", 10)).unwrap();
        assert_eq!(*container.get_as::<i32>("one").unwrap(), 10);
        assert_eq!(*container.get_as::<i32>("two").unwrap(), 2);
    }

    // ── Concurrency ──

    #[test]
    fn container_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Container>();
    }

    #[test]
    fn concurrent_first_get_shares_one_value() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let container = Container::new();
        container
            .register(Thing::function("shared", &[], move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(String::from("shared"))
            }))
            .unwrap();

        let start = Barrier::new(4);
        let values: Vec<Value> = thread::scope(|s| {
            let mut handles = Vec::new();
            for _ in 0..4 {
                handles.push(s.spawn(|| {
                    start.wait();
                    container.get("shared").unwrap()
                }));
            }
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = container.get("shared").unwrap();
        for value in &values {
            assert!(Arc::ptr_eq(value, &stored));
        }
        assert!((1..=4).contains(&calls.load(Ordering::SeqCst)));
    }

    #[test]
    fn reregister_during_resolution_is_not_cached() {
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let (inside, hold) = (entered.clone(), release.clone());

        let container = Container::new();
        container
            .register(Thing::function("a", &[], move |_| {
                inside.wait();
                hold.wait();
                Ok(1i32)
            }))
            .unwrap();

        let in_flight = thread::scope(|s| {
            let handle = s.spawn(|| *container.get_as::<i32>("a").unwrap());
            entered.wait();
            container.register(constant("a", 2)).unwrap();
            release.wait();
            handle.join().unwrap()
        });

        assert_eq!(in_flight, 1);
        assert_eq!(*container.get_as::<i32>("a").unwrap(), 2);
    }

    #[test]
    fn debug_display() {
        let container = Container::new();
        container.register(constant("a", 1)).unwrap();
        container.register(constant("b", 2)).unwrap();

        let debug = format!("{container:?}");
        assert!(debug.contains("Container"));
        assert!(debug.contains("registered: 2"));
    }
}
