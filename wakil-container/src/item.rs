//! Registered provider descriptors.

use std::collections::BTreeSet;
use std::fmt;

use crate::inspect::Routine;

/// An immutable description of one provider.
///
/// Produced by [`inspect`](crate::inspect::inspect). The dependency set
/// is derived from the target's declared parameters with the receiver
/// of class-like targets already removed.
#[derive(Clone)]
pub struct Item {
    target: Routine,
    name: String,
    class_like: bool,
    dependencies: BTreeSet<String>,
}

impl Item {
    pub(crate) fn new(target: Routine, name: String, class_like: bool) -> Self {
        let dependencies = target.parameters().iter().cloned().collect();
        Self {
            target,
            name,
            class_like,
            dependencies,
        }
    }

    /// The name this provider is addressable under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The callable invoked to produce the value.
    pub fn target(&self) -> &Routine {
        &self.target
    }

    /// True for bound methods and callable instances.
    pub fn is_class_like(&self) -> bool {
        self.class_like
    }

    /// Names that must be registered for this provider to resolve.
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[String] {
        self.target.parameters()
    }

    /// Same item under another name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("class_like", &self.class_like)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
