//! Values and argument lists.
//!
//! Everything the container stores or passes around is a [`Value`]:
//! a type-erased, shareable `Arc`. [`CallArgs`] is what a caller hands
//! to [`Container::invoke`](crate::container::Container::invoke);
//! [`Arguments`] is what a callable receives once every parameter has
//! been bound.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, WakilError};

/// A type-erased value produced by a provider or supplied by a caller.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Wraps a value for storage in the container.
///
/// ```
/// use wakil_container::args::{value, downcast};
///
/// let v = value(7u32);
/// assert_eq!(*downcast::<u32>("seven", v).unwrap(), 7);
/// ```
pub fn value<T: Any + Send + Sync>(inner: T) -> Value {
    Arc::new(inner)
}

/// Downcasts a [`Value`] to `T`, naming `name` on failure.
pub fn downcast<T: Any + Send + Sync>(name: &str, value: Value) -> Result<Arc<T>> {
    value.downcast::<T>().map_err(|_| WakilError::TypeMismatch {
        name: name.to_string(),
        expected: type_name::<T>(),
    })
}

/// Arguments supplied by the caller of [`invoke`](crate::container::Container::invoke).
///
/// Positional arguments bind to the callable's parameters left to right;
/// named arguments bind by parameter name and always win over injected
/// values.
///
/// ```
/// use wakil_container::args::CallArgs;
///
/// let args = CallArgs::new().arg("something").named("another", "another");
/// assert_eq!(args.positional_len(), 1);
/// assert!(args.has_named("another"));
/// ```
#[derive(Clone, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    named: HashMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg<T: Any + Send + Sync>(self, inner: T) -> Self {
        self.arg_value(value(inner))
    }

    /// Appends an already wrapped positional argument.
    pub fn arg_value(mut self, value: Value) -> Self {
        self.positional.push(value);
        self
    }

    /// Sets a named argument.
    pub fn named<T: Any + Send + Sync>(self, name: impl Into<String>, inner: T) -> Self {
        self.named_value(name, value(inner))
    }

    /// Sets an already wrapped named argument.
    pub fn named_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn has_named(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, HashMap<String, Value>) {
        (self.positional, self.named)
    }
}

impl fmt::Debug for CallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut named: Vec<&String> = self.named.keys().collect();
        named.sort();
        f.debug_struct("CallArgs")
            .field("positional", &self.positional.len())
            .field("named", &named)
            .finish()
    }
}

/// Fully bound arguments handed to a callable.
///
/// Every declared parameter has a value by the time the callable runs;
/// lookups of undeclared names fail with
/// [`WakilError::UnsatisfiedArgument`].
pub struct Arguments {
    callable: String,
    values: HashMap<String, Value>,
}

impl Arguments {
    pub(crate) fn new(callable: impl Into<String>, values: HashMap<String, Value>) -> Self {
        Self {
            callable: callable.into(),
            values,
        }
    }

    /// Name of the callable these arguments were bound for.
    pub fn callable(&self) -> &str {
        &self.callable
    }

    /// Returns the raw value bound to `name`.
    pub fn value(&self, name: &str) -> Result<Value> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| WakilError::UnsatisfiedArgument {
                callable: self.callable.clone(),
                parameter: name.to_string(),
            })
    }

    /// Returns the value bound to `name` as a shared `T`.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        downcast(name, self.value(name)?)
    }

    /// Returns a clone of the `T` bound to `name`.
    pub fn cloned<T: Any + Send + Sync + Clone>(&self, name: &str) -> Result<T> {
        self.get::<T>(name).map(|v| T::clone(&v))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();
        f.debug_struct("Arguments")
            .field("callable", &self.callable)
            .field("bound", &names)
            .finish()
    }
}
