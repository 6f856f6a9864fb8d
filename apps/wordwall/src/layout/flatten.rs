//! Topological flattening of the word graph into one reading order.
//!
//! Pass-based Kahn traversal: each pass emits every node whose remaining indegree is
//! zero, then decrements the indegree of their forward targets. A node is therefore
//! always emitted after all of its predecessors, and each sentence's chain of nodes
//! appears in sentence order.

use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;
use crate::layout::graph::{NodeId, WordGraph};

/// Order in which nodes that become ready in the same pass are emitted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PassOrder {
    /// Node creation order.
    #[default]
    Insertion,
    /// Longest surface first, ties by creation order.
    LongestFirst,
}

/// Flattens every node reachable from the graph's roots.
///
/// Returns `LayoutError::CycleDetected` if some nodes never reach zero indegree; the
/// builder guarantees acyclicity, so that error signals a broken invariant.
pub fn flatten(graph: &WordGraph, order: PassOrder) -> Result<Vec<NodeId>, LayoutError> {
    // remaining[i] is Some(indegree) while node i is reachable and not yet emitted.
    let mut remaining: Vec<Option<usize>> = vec![None; graph.len()];
    let mut pending = 0usize;

    let mut stack: Vec<NodeId> = graph.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let slot = &mut remaining[id.index()];
        if slot.is_some() {
            continue;
        }
        let node = graph.node(id);
        *slot = Some(node.back_edges().len());
        pending += 1;
        stack.extend(node.forward_edges().iter().rev().copied());
    }

    let mut output = Vec::with_capacity(pending);

    while pending > 0 {
        let mut ready: Vec<NodeId> = graph
            .ids()
            .filter(|id| remaining[id.index()] == Some(0))
            .collect();

        if ready.is_empty() {
            let stalled = graph
                .ids()
                .filter(|id| remaining[id.index()].is_some())
                .map(|id| graph.node(id).key.clone())
                .collect();
            return Err(LayoutError::CycleDetected { stalled });
        }

        if order == PassOrder::LongestFirst {
            // stable sort keeps creation order among equal lengths
            ready.sort_by_key(|&id| std::cmp::Reverse(graph.node(id).char_len()));
        }

        for id in ready {
            remaining[id.index()] = None;
            pending -= 1;
            for &next in graph.node(id).forward_edges() {
                if let Some(degree) = remaining[next.index()].as_mut() {
                    *degree = degree.saturating_sub(1);
                }
            }
            output.push(id);
        }
    }

    Ok(output)
}
