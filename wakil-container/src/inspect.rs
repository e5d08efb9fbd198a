//! Signature inspection.
//!
//! Rust has no runtime reflection over parameter names, so every
//! callable handed to the container declares them up front. A [`Thing`]
//! is anything that can be offered for registration or invocation:
//!
//! - [`Thing::function`]: a plain function, named after itself
//! - [`Thing::method`]: a method bound to a receiver, named after the method
//! - [`Thing::instance`]: an object implementing [`Callable`], named after its type
//! - [`Thing::value`]: a plain value, which cannot be invoked
//!
//! [`inspect`] turns a `Thing` into an [`Item`].

use std::any::{Any, type_name};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use wakil_support::rendering::shorten_type_name;

use crate::args::{Arguments, Value};
use crate::error::{Result, WakilError};
use crate::item::Item;

/// Name of the implicit receiver parameter of class-like callables.
pub const RECEIVER: &str = "self";

/// Type-erased call operation of a [`Routine`].
pub type CallFn = Arc<dyn Fn(&Arguments) -> Result<Value> + Send + Sync>;

/// An object that can be called like a function.
///
/// Implementors are registered with [`Thing::instance`] and are named
/// after their type.
///
/// ```
/// use wakil_container::args::Arguments;
/// use wakil_container::inspect::Callable;
///
/// struct Greeting;
///
/// impl Callable for Greeting {
///     type Output = String;
///
///     fn parameters(&self) -> &[&str] {
///         &["user"]
///     }
///
///     fn call(&self, args: &Arguments) -> wakil_container::Result<String> {
///         Ok(format!("hello {}", args.get::<String>("user")?))
///     }
/// }
/// ```
pub trait Callable: Send + Sync + 'static {
    type Output: Any + Send + Sync;

    /// Declared parameter names, without the receiver.
    fn parameters(&self) -> &[&str];

    fn call(&self, args: &Arguments) -> Result<Self::Output>;
}

/// A callable with its declared parameter list.
#[derive(Clone)]
pub struct Routine {
    name: Option<String>,
    parameters: Vec<String>,
    call: CallFn,
}

impl Routine {
    fn new(name: Option<String>, parameters: Vec<String>, call: CallFn) -> Self {
        Self { name, parameters, call }
    }

    /// The callable's own name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared parameters in declaration order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub(crate) fn call(&self, args: &Arguments) -> Result<Value> {
        (self.call)(args)
    }

    /// Same routine with a leading receiver parameter removed.
    fn without_receiver(mut self) -> Self {
        if self.parameters.first().map(String::as_str) == Some(RECEIVER) {
            self.parameters.remove(0);
        }
        self
    }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routine")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Anything that can be offered to the container.
#[derive(Clone)]
pub enum Thing {
    /// A free function or closure.
    Function(Routine),
    /// A method bound to its receiver.
    Method(Routine),
    /// An instance whose call operation is the target.
    Instance(Routine),
    /// A value with no call capability.
    Value(Value),
}

impl Thing {
    /// A named function taking the given parameters.
    ///
    /// ```
    /// use wakil_container::inspect::Thing;
    ///
    /// let two = Thing::function("two", &["one", "also_one"], |args| {
    ///     Ok(*args.get::<i32>("one")? + *args.get::<i32>("also_one")?)
    /// });
    /// assert_eq!(two.name(), Some("two"));
    /// ```
    pub fn function<R, F>(name: impl Into<String>, parameters: &[&str], f: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn(&Arguments) -> Result<R> + Send + Sync + 'static,
    {
        Thing::Function(Routine::new(Some(name.into()), owned(parameters), erase(f)))
    }

    /// An anonymous function. It can be invoked directly, but registering
    /// it requires an explicit name.
    pub fn closure<R, F>(parameters: &[&str], f: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn(&Arguments) -> Result<R> + Send + Sync + 'static,
    {
        Thing::Function(Routine::new(None, owned(parameters), erase(f)))
    }

    /// A method `name` bound to `receiver`.
    ///
    /// A leading `self` in `parameters` is treated as the receiver and
    /// never becomes a dependency.
    pub fn method<T, R, F>(receiver: Arc<T>, name: impl Into<String>, parameters: &[&str], f: F) -> Self
    where
        T: Send + Sync + 'static,
        R: Any + Send + Sync,
        F: Fn(&T, &Arguments) -> Result<R> + Send + Sync + 'static,
    {
        let call: CallFn = Arc::new(move |args: &Arguments| {
            f(receiver.as_ref(), args).map(|out| Arc::new(out) as Value)
        });
        Thing::Method(Routine::new(Some(name.into()), owned(parameters), call))
    }

    /// A callable instance, named after its type.
    pub fn instance<C: Callable>(instance: C) -> Self {
        let name = shorten_type_name(type_name::<C>());
        let parameters = owned(instance.parameters());
        let instance = Arc::new(instance);
        let call: CallFn = Arc::new(move |args: &Arguments| {
            instance.call(args).map(|out| Arc::new(out) as Value)
        });
        Thing::Instance(Routine::new(Some(name), parameters, call))
    }

    /// A plain value. Registering or invoking it fails.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Thing::Value(Arc::new(value))
    }

    /// The name this thing would be registered under by default.
    pub fn name(&self) -> Option<&str> {
        match self {
            Thing::Function(r) | Thing::Method(r) | Thing::Instance(r) => r.name(),
            Thing::Value(_) => None,
        }
    }

    /// True for bound methods and callable instances.
    pub fn is_class_like(&self) -> bool {
        matches!(self, Thing::Method(_) | Thing::Instance(_))
    }
}

impl fmt::Debug for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thing::Function(r) => f.debug_tuple("Function").field(r).finish(),
            Thing::Method(r) => f.debug_tuple("Method").field(r).finish(),
            Thing::Instance(r) => f.debug_tuple("Instance").field(r).finish(),
            Thing::Value(_) => f.write_str("Value(..)"),
        }
    }
}

impl<C: Callable> From<C> for Thing {
    fn from(instance: C) -> Self {
        Thing::instance(instance)
    }
}

fn owned(parameters: &[&str]) -> Vec<String> {
    parameters.iter().map(|p| p.to_string()).collect()
}

fn erase<R, F>(f: F) -> CallFn
where
    R: Any + Send + Sync,
    F: Fn(&Arguments) -> Result<R> + Send + Sync + 'static,
{
    Arc::new(move |args: &Arguments| f(args).map(|out| Arc::new(out) as Value))
}

/// Splits a thing into its invocation target and class-like flag.
///
/// The receiver of class-like targets is already removed from the
/// returned routine's parameters.
pub(crate) fn classify(thing: &Thing) -> Result<(Routine, bool)> {
    let (routine, class_like) = match thing {
        Thing::Method(r) | Thing::Instance(r) => (r.clone().without_receiver(), true),
        Thing::Function(r) => (r.clone(), false),
        Thing::Value(_) => return Err(WakilError::invalid("not a callable")),
    };

    check_parameters(&routine)?;
    Ok((routine, class_like))
}

fn check_parameters(routine: &Routine) -> Result<()> {
    let label = routine.name().unwrap_or("<anonymous>");
    let mut seen = HashSet::new();

    for parameter in routine.parameters() {
        if parameter.is_empty() {
            return Err(WakilError::invalid(format!(
                "'{label}' declares an empty parameter name"
            )));
        }
        if !seen.insert(parameter.as_str()) {
            return Err(WakilError::invalid(format!(
                "'{label}' declares parameter '{parameter}' more than once"
            )));
        }
    }

    Ok(())
}

/// Builds the [`Item`] describing `thing`.
///
/// `name` overrides the inferred name; it is required for anonymous
/// closures.
///
/// # Errors
/// [`WakilError::InvalidProvider`] when `thing` is not invocable, its
/// parameter list is malformed, or no name can be determined.
pub fn inspect(thing: &Thing, name: Option<&str>) -> Result<Item> {
    let (target, class_like) = classify(thing)?;

    let name = match name.or(target.name()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(WakilError::invalid("an anonymous callable needs an explicit name")),
    };

    Ok(Item::new(target, name, class_like))
}
