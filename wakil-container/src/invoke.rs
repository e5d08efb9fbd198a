//! Argument overlay — binding caller arguments and injected providers.
//!
//! Given a callable and a [`CallArgs`], every declared parameter gets a
//! value from exactly one place:
//!
//! 1. the caller's positional arguments, left to right;
//! 2. the caller's named arguments;
//! 3. the registered provider of the same name.
//!
//! Registered providers are still resolved for parameters the caller
//! names explicitly, but the caller's value is the one bound.

use std::collections::HashMap;

use tracing::trace;

use crate::args::{Arguments, CallArgs, Value};
use crate::error::{Result, WakilError};
use crate::inspect::Routine;

/// What the overlay needs from a container.
///
/// Separated from the container so the algorithm can be exercised on
/// its own.
pub trait Resolver {
    /// True if a provider named `name` is registered.
    fn has_provider(&self, name: &str) -> bool;

    /// Resolves (and memoizes) the provider named `name`.
    fn resolve(&self, name: &str) -> Result<Value>;
}

/// Binds `args` onto `routine`'s parameters, injecting the rest from
/// `resolver`, and calls it.
///
/// `label` names the callable in error messages.
pub(crate) fn call(
    resolver: &dyn Resolver,
    routine: &Routine,
    label: &str,
    args: CallArgs,
) -> Result<Value> {
    let (positional, named) = args.into_parts();
    let parameters = routine.parameters();

    check_binding(parameters, &positional, &named, label)?;

    let mut staged: HashMap<String, Value> = HashMap::new();
    for (i, parameter) in parameters.iter().enumerate() {
        if i < positional.len() {
            continue;
        }

        if resolver.has_provider(parameter) {
            trace!(callable = %label, parameter = %parameter, "Injecting provider");
            staged.insert(parameter.clone(), resolver.resolve(parameter)?);
        } else if !named.contains_key(parameter) {
            return Err(WakilError::UnsatisfiedArgument {
                callable: label.to_string(),
                parameter: parameter.clone(),
            });
        }
    }

    // The caller's named arguments override injected ones.
    staged.extend(named);
    for (parameter, value) in parameters.iter().zip(positional) {
        staged.insert(parameter.clone(), value);
    }

    routine.call(&Arguments::new(label, staged))
}

/// Rejects argument lists no call could bind.
fn check_binding(
    parameters: &[String],
    positional: &[Value],
    named: &HashMap<String, Value>,
    label: &str,
) -> Result<()> {
    if positional.len() > parameters.len() {
        return Err(WakilError::UnexpectedArgument {
            callable: label.to_string(),
            detail: format!(
                "takes {} positional argument(s) but {} were given",
                parameters.len(),
                positional.len()
            ),
        });
    }

    let mut names: Vec<&String> = named.keys().collect();
    names.sort();
    for name in names {
        match parameters.iter().position(|p| p == name) {
            None => {
                return Err(WakilError::UnexpectedArgument {
                    callable: label.to_string(),
                    detail: format!("no parameter named '{name}'"),
                });
            }
            Some(i) if i < positional.len() => {
                return Err(WakilError::DuplicateArgument {
                    callable: label.to_string(),
                    parameter: name.clone(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}
