//! Deterministic build ordering and cycle detection
//!
//! Both passes walk link-carrying edges only: include-only access grants
//! headers without constraining build order, so those edges are invisible
//! here. Ready-set ties break by ascending module name, which keeps the
//! emitted order identical run to run for the same graph.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;

use super::ResolveError;
use super::graph::DependencyGraph;

/// DFS visit state for cycle detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Compute the build order of the graph
///
/// Every module appears after all of its link dependencies. Fails with
/// [`ResolveError::CyclicDependency`] when link edges form a cycle; the
/// reported path is stable for a given graph.
pub fn build_order(graph: &DependencyGraph) -> Result<Vec<String>, ResolveError> {
    if let Some(cycle) = find_cycle(graph) {
        return Err(ResolveError::CyclicDependency { cycle });
    }

    let mut remaining: HashMap<&str, usize> = graph
        .modules()
        .map(|name| {
            let links = graph
                .dependencies_of(name)
                .iter()
                .filter(|(_, visibility)| visibility.links())
                .count();
            (name, links)
        })
        .collect();

    let mut ready: BinaryHeap<Reverse<&str>> = remaining
        .iter()
        .filter(|(_, links)| **links == 0)
        .map(|(name, _)| Reverse(*name))
        .collect();

    let mut order = Vec::with_capacity(graph.module_count());
    while let Some(Reverse(name)) = ready.pop() {
        order.push(name.to_string());

        for (dependent, visibility) in graph.dependents_of(name) {
            if !visibility.links() {
                continue;
            }
            if let Some(links) = remaining.get_mut(dependent) {
                *links -= 1;
                if *links == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    // The cycle check above guarantees every module drains
    debug_assert_eq!(order.len(), graph.module_count());

    debug!("Build order computed for {} modules", order.len());
    Ok(order)
}

/// Find one cycle over link edges, if any exists
///
/// Start modules and neighbors are visited in ascending name order so the
/// same graph always reports the same cycle path.
fn find_cycle(graph: &DependencyGraph) -> Option<Vec<String>> {
    let mut marks: HashMap<&str, Mark> = graph
        .modules()
        .map(|name| (name, Mark::Unvisited))
        .collect();

    let mut names: Vec<&str> = graph.modules().collect();
    names.sort_unstable();

    let mut stack = Vec::new();
    for name in names {
        if marks[name] == Mark::Unvisited {
            if let Some(cycle) = visit(graph, name, &mut marks, &mut stack) {
                return Some(cycle);
            }
        }
    }

    None
}

/// DFS step: returns the cycle closed by revisiting an in-progress module
fn visit<'a>(
    graph: &'a DependencyGraph,
    name: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    marks.insert(name, Mark::InProgress);
    stack.push(name);

    let mut neighbors: Vec<&str> = graph
        .dependencies_of(name)
        .iter()
        .filter(|(_, visibility)| visibility.links())
        .map(|(dependency, _)| *dependency)
        .collect();
    neighbors.sort_unstable();

    for neighbor in neighbors {
        match marks[neighbor] {
            Mark::Unvisited => {
                if let Some(cycle) = visit(graph, neighbor, marks, stack) {
                    return Some(cycle);
                }
            }
            Mark::InProgress => {
                // The stack tail from the first occurrence closes the cycle
                let start = stack.iter().position(|&entry| entry == neighbor).unwrap();
                return Some(
                    stack[start..]
                        .iter()
                        .map(|entry| entry.to_string())
                        .collect(),
                );
            }
            Mark::Done => {}
        }
    }

    stack.pop();
    marks.insert(name, Mark::Done);
    None
}

#[cfg(test)]
mod tests {
    include!("order.test.rs");
}
