//! Error types for Wakil container operations.
//!
//! Every failure names the provider or parameter involved, and the
//! structured variants carry a hint about the usual fix.

use std::fmt;

use wakil_support::rendering::{render_chain, render_names};

/// Main error type for all Wakil operations.
#[derive(Debug, thiserror::Error)]
pub enum WakilError {
    /// The thing handed to the container cannot be invoked, or its
    /// declared signature is malformed.
    #[error("Invalid provider: {reason}")]
    InvalidProvider { reason: String },

    /// `get` was asked for a name that was never registered.
    #[error("{}", .0)]
    UnknownProvider(UnknownProviderError),

    /// A provider depends on a name that cannot be resolved.
    #[error("{}", .0)]
    UnknownDependency(UnknownDependencyError),

    /// Providers depend on each other in a loop.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// A parameter was neither registered nor supplied by the caller.
    #[error("Unsatisfied argument '{parameter}' of '{callable}'")]
    UnsatisfiedArgument { callable: String, parameter: String },

    /// The caller supplied an argument the callable does not declare.
    #[error("Unexpected argument for '{callable}': {detail}")]
    UnexpectedArgument { callable: String, detail: String },

    /// The caller supplied the same parameter positionally and by name.
    #[error("Argument '{parameter}' of '{callable}' was given both positionally and by name")]
    DuplicateArgument { callable: String, parameter: String },

    /// Two providers in one batch share a name.
    #[error("Provider '{name}' appears more than once in the same batch")]
    DuplicateProvider { name: String },

    /// The name is taken and the container does not allow overrides.
    #[error("{}", .0)]
    AlreadyRegistered(AlreadyRegisteredError),

    /// A value was retrieved as a type it does not have.
    #[error("Type mismatch for '{name}': expected {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// The provider body itself returned an error.
    #[error("Failed to construct '{name}': {source}")]
    ConstructionFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl WakilError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        WakilError::InvalidProvider { reason: reason.into() }
    }

    /// Wraps an error returned by a provider body.
    ///
    /// ```
    /// use wakil_container::WakilError;
    ///
    /// let err = WakilError::construction("config", "file missing");
    /// assert!(err.to_string().contains("config"));
    /// ```
    pub fn construction(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        WakilError::ConstructionFailed {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Error when a provider name was never registered.
#[derive(Debug)]
pub struct UnknownProviderError {
    /// The name that was requested
    pub requested: String,
    /// Registered names that look similar
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnknownProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registry does not have a provider named '{}'", self.requested)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of: {}", render_names(&self.suggestions))?;
        }

        Ok(())
    }
}

/// Error when a provider depends on a name that is not registered.
#[derive(Debug)]
pub struct UnknownDependencyError {
    /// The missing dependency
    pub dependency: String,
    /// The provider that declared it
    pub required_by: String,
    /// Registered names that look similar
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnknownDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Provider '{}' depends on unknown provider '{}'",
            self.required_by, self.dependency
        )?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of: {}", render_names(&self.suggestions))?;
        }

        write!(
            f,
            "\n  Hint: register '{}' first, or register both in the same batch",
            self.dependency
        )
    }
}

/// Error when a circular dependency is detected.
#[derive(Debug)]
pub struct CircularDependencyError {
    /// The names forming the cycle, first name repeated at the end.
    /// Example: ["a", "b", "a"]
    pub chain: Vec<String>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circular dependency detected:\n  {}", render_chain(&self.chain))?;
        write!(
            f,
            "\n  Hint: one of these providers should take the value as a caller-supplied argument instead"
        )
    }
}

/// Error when re-registering a name with overrides disabled.
#[derive(Debug)]
pub struct AlreadyRegisteredError {
    pub name: String,
}

impl fmt::Display for AlreadyRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider already registered: '{}'", self.name)?;
        write!(
            f,
            "\n  Hint: enable allow_override on the ContainerBuilder to replace providers"
        )
    }
}

/// Convenient Result type for Wakil operations.
pub type Result<T> = std::result::Result<T, WakilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_display() {
        let err = WakilError::UnknownProvider(UnknownProviderError {
            requested: "abc".into(),
            suggestions: vec!["abd".into()],
        });

        let msg = format!("{err}");
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("'abd'"));
    }

    #[test]
    fn unknown_dependency_display() {
        let err = WakilError::UnknownDependency(UnknownDependencyError {
            dependency: "database".into(),
            required_by: "repository".into(),
            suggestions: vec![],
        });

        let msg = format!("{err}");
        assert!(msg.contains("'repository' depends on unknown provider 'database'"));
        assert!(!msg.contains("Did you mean"));
    }

    #[test]
    fn circular_dependency_display() {
        let err = WakilError::CircularDependency(CircularDependencyError {
            chain: vec!["a".into(), "b".into(), "a".into()],
        });

        let msg = format!("{err}");
        assert!(msg.contains("Circular"));
        assert!(msg.contains("a → b → a"));
    }

    #[test]
    fn construction_keeps_source() {
        use std::error::Error;

        let err = WakilError::construction("config", "file missing");
        assert_eq!(err.source().map(|s| s.to_string()), Some("file missing".into()));
    }
}
