//! Dependency graph validation.
//!
//! Runs before anything is installed into the registry:
//! - Checks that every dependency is registered or arrives in the same batch
//! - Detects circular dependencies, self-dependencies included
//!
//! Batches are validated as a whole. Items are visited in name order,
//! so a batch is accepted or rejected, with the same error, whatever
//! order it was collected in.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, instrument, warn};
use wakil_support::rendering::suggest_similar;

use crate::error::{CircularDependencyError, UnknownDependencyError, WakilError};
use crate::item::Item;

/// Dependency sets keyed by provider name.
pub(crate) type DependencyView<'a> = HashMap<&'a str, &'a BTreeSet<String>>;

/// Validates a single registration against the registered providers.
///
/// Dependencies must already be registered; an item cannot satisfy its
/// own dependency. The cycle check only matters when the item replaces
/// an existing provider that others depend on.
pub(crate) fn validate_single(
    existing: &DependencyView<'_>,
    item: &Item,
    max_suggestions: usize,
) -> Result<(), WakilError> {
    let known = |name: &str| existing.contains_key(name);
    check_dependencies(item, &known, existing.keys().copied(), max_suggestions)?;

    let mut graph = existing.clone();
    graph.insert(item.name(), item.dependencies());
    CycleDetector::new(&graph).visit(item.name())
}

/// Validates a batch of items against the registered providers.
///
/// # Errors
/// - [`WakilError::DuplicateProvider`] — two items share a name
/// - [`WakilError::UnknownDependency`] — a dependency is neither
///   registered nor in the batch
/// - [`WakilError::CircularDependency`] — the batch closes a cycle
#[instrument(skip_all, name = "batch_validation", fields(batch = items.len()))]
pub(crate) fn validate_batch(
    existing: &DependencyView<'_>,
    items: &[Item],
    max_suggestions: usize,
) -> Result<(), WakilError> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by(|a, b| a.name().cmp(b.name()));

    let mut batch_names: HashSet<&str> = HashSet::with_capacity(ordered.len());
    for item in &ordered {
        if !batch_names.insert(item.name()) {
            return Err(WakilError::DuplicateProvider {
                name: item.name().to_string(),
            });
        }
    }

    let known = |name: &str| existing.contains_key(name) || batch_names.contains(name);
    let candidates: BTreeSet<&str> = existing
        .keys()
        .copied()
        .chain(batch_names.iter().copied())
        .collect();
    for item in &ordered {
        check_dependencies(item, &known, candidates.iter().copied(), max_suggestions)?;
    }

    let mut graph = existing.clone();
    for item in &ordered {
        graph.insert(item.name(), item.dependencies());
    }

    let mut detector = CycleDetector::new(&graph);
    for item in &ordered {
        detector.visit(item.name())?;
    }

    debug!("Batch validation passed");
    Ok(())
}

/// Fails on the first dependency, in declaration order, that `known`
/// rejects.
fn check_dependencies<'a>(
    item: &Item,
    known: &dyn Fn(&str) -> bool,
    candidates: impl Iterator<Item = &'a str>,
    max_suggestions: usize,
) -> Result<(), WakilError> {
    let Some(missing) = item.parameters().iter().find(|dep| !known(dep.as_str())) else {
        return Ok(());
    };

    let candidates: Vec<&str> = candidates.collect();
    warn!(
        provider = %item.name(),
        dependency = %missing,
        "Provider depends on an unknown provider"
    );

    Err(WakilError::UnknownDependency(UnknownDependencyError {
        dependency: missing.clone(),
        required_by: item.name().to_string(),
        suggestions: suggest_similar(missing, &candidates, max_suggestions),
    }))
}

/// Depth-first search over the dependency graph, keeping the current
/// path so a cycle can be reported in full.
struct CycleDetector<'g, 'a> {
    graph: &'g DependencyView<'a>,
    visiting: HashSet<&'g str>,
    validated: HashSet<&'g str>,
    path: Vec<&'g str>,
}

impl<'g, 'a> CycleDetector<'g, 'a> {
    fn new(graph: &'g DependencyView<'a>) -> Self {
        Self {
            graph,
            visiting: HashSet::new(),
            validated: HashSet::new(),
            path: Vec::new(),
        }
    }

    fn visit(&mut self, name: &'g str) -> Result<(), WakilError> {
        if self.validated.contains(name) {
            return Ok(());
        }

        if self.visiting.contains(name) {
            let start = self.path.iter().position(|n| *n == name).unwrap_or(0);
            let mut chain: Vec<String> = self.path[start..].iter().map(|n| n.to_string()).collect();
            chain.push(name.to_string());

            warn!(cycle = ?chain, "Circular dependency detected");
            return Err(WakilError::CircularDependency(CircularDependencyError { chain }));
        }

        // Unknown names were rejected before cycle detection ran.
        let graph = self.graph;
        let Some(dependencies) = graph.get(name) else {
            self.validated.insert(name);
            return Ok(());
        };

        self.visiting.insert(name);
        self.path.push(name);

        for dependency in dependencies.iter() {
            self.visit(dependency.as_str())?;
        }

        self.path.pop();
        self.visiting.remove(name);
        self.validated.insert(name);

        Ok(())
    }
}
