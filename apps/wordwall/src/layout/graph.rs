//! Word graph: a multi-root DAG of deduplicated words built from tokenized sentences.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Originals are deduplicated through a
//! `key → NodeId` map and duplicates through a separate `(key, suffix) → NodeId` map, so a
//! duplicate of `x` never resolves to a corpus word spelled `x2`. Every sentence becomes a chain of edges through the graph; a word
//! that is already used upstream of the current predecessor cannot be reused without
//! closing a cycle, so the builder links a disambiguated duplicate (`loves2`, `loves3`, ...)
//! instead.
//!
//! Invariants kept by [`GraphBuilder`]:
//! - the graph is acyclic
//! - `back` is exactly the transpose of `forward`
//! - every adjacent token pair of every sentence has an edge between nodes with those surfaces

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ────────────────────────────────────────────────────────────────────────────
// Node types
// ────────────────────────────────────────────────────────────────────────────

/// Index of a node in the [`WordGraph`] arena. Ids are assigned in creation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One occurrence-class of a word.
///
/// Identity is the `key`; two nodes may share a `surface` when one is a disambiguated
/// duplicate of the other.
#[derive(Debug, Clone, Serialize)]
pub struct WordNode {
    /// Normalized lookup key (lowercased unless the build is case-sensitive). Duplicates
    /// carry the base key followed by their suffix; this label is not used for lookup.
    pub key: String,
    /// Text the node renders as.
    pub surface: String,
    /// Disambiguation suffix (2, 3, ...) for duplicates; `None` for the original node.
    pub suffix: Option<u32>,
    forward: Vec<NodeId>,
    back: Vec<NodeId>,
}

impl WordNode {
    pub fn forward_edges(&self) -> &[NodeId] {
        &self.forward
    }

    pub fn back_edges(&self) -> &[NodeId] {
        &self.back
    }

    pub fn is_duplicate(&self) -> bool {
        self.suffix.is_some()
    }

    /// Rendered length in characters.
    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Graph
// ────────────────────────────────────────────────────────────────────────────

/// Arena-backed multi-root word DAG.
#[derive(Debug, Clone)]
pub struct WordGraph {
    nodes: Vec<WordNode>,
    index: HashMap<String, NodeId>,
    duplicates: HashMap<(String, u32), NodeId>,
    roots: Vec<NodeId>,
    case_sensitive: bool,
}

impl WordGraph {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            duplicates: HashMap::new(),
            roots: Vec::new(),
            case_sensitive,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn node(&self, id: NodeId) -> &WordNode {
        &self.nodes[id.0]
    }

    pub fn surface(&self, id: NodeId) -> &str {
        &self.nodes[id.0].surface
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &WordNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// All node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Root nodes in registration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn duplicate_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_duplicate()).count()
    }

    /// Looks up the original (non-duplicate) node for a token.
    pub fn lookup(&self, token: &str) -> Option<NodeId> {
        self.index.get(&self.normalize(token)).copied()
    }

    /// Registers an externally supplied root. Already-registered roots are ignored.
    pub fn add_root(&mut self, id: NodeId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// True if no node can reach itself through forward edges.
    pub fn is_acyclic(&self) -> bool {
        // 0 = unvisited, 1 = on the current path, 2 = finished
        let mut state = vec![0u8; self.nodes.len()];
        for start in 0..self.nodes.len() {
            if state[start] != 0 {
                continue;
            }
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            state[start] = 1;
            while let Some((node, next_edge)) = stack.pop() {
                match self.nodes[node].forward.get(next_edge) {
                    Some(&NodeId(child)) => {
                        stack.push((node, next_edge + 1));
                        match state[child] {
                            0 => {
                                state[child] = 1;
                                stack.push((child, 0));
                            }
                            1 => return false,
                            _ => {}
                        }
                    }
                    None => state[node] = 2,
                }
            }
        }
        true
    }

    fn normalize(&self, token: &str) -> String {
        if self.case_sensitive {
            token.to_string()
        } else {
            token.to_lowercase()
        }
    }

    fn resolve_or_create(&mut self, base: String, surface: &str, suffix: Option<u32>) -> NodeId {
        let existing = match suffix {
            None => self.index.get(&base),
            Some(n) => self.duplicates.get(&(base.clone(), n)),
        };
        if let Some(&id) = existing {
            return id;
        }

        let id = NodeId(self.nodes.len());
        let key = match suffix {
            None => base.clone(),
            Some(n) => format!("{base}{n}"),
        };
        self.nodes.push(WordNode {
            key,
            surface: surface.to_string(),
            suffix,
            forward: Vec::new(),
            back: Vec::new(),
        });
        match suffix {
            None => self.index.insert(base, id),
            Some(n) => self.duplicates.insert((base, n), id),
        };
        id
    }

    /// Inserts `from -> to` into both edge lists; existing edges are left alone.
    fn link(&mut self, from: NodeId, to: NodeId) {
        if !self.nodes[from.0].forward.contains(&to) {
            self.nodes[from.0].forward.push(to);
            self.nodes[to.0].back.push(from);
        }
    }

    #[cfg(test)]
    pub(crate) fn force_link(&mut self, from: NodeId, to: NodeId) {
        self.link(from, to);
    }

    /// True if `target` is `node` itself or one of its ancestors (via back edges).
    ///
    /// Linking `node -> target` closes a cycle exactly when this holds.
    fn is_in_path(&self, node: NodeId, target: NodeId) -> bool {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if std::mem::replace(&mut seen[current.0], true) {
                continue;
            }
            stack.extend(self.nodes[current.0].back.iter().copied());
        }
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

const PROGRESS_EVERY: usize = 100;

/// Incrementally adds tokenized sentences to a [`WordGraph`].
///
/// The builder owns the graph while it is being mutated; call [`GraphBuilder::finish`]
/// to get the immutable result. Output depends on sentence order.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: WordGraph,
    sentences: usize,
}

impl GraphBuilder {
    pub fn new(case_sensitive: bool) -> Self {
        Self::extend(WordGraph::new(case_sensitive))
    }

    /// Continues building on an existing graph, merging new words by key.
    pub fn extend(graph: WordGraph) -> Self {
        Self {
            graph,
            sentences: 0,
        }
    }

    /// Adds one sentence and returns the node chosen for each token, in order.
    ///
    /// An empty token list is ignored and returns an empty path.
    pub fn add_sentence<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<NodeId> {
        let Some((first, rest)) = tokens.split_first() else {
            return Vec::new();
        };

        self.sentences += 1;
        if self.sentences % PROGRESS_EVERY == 0 {
            debug!(
                sentences = self.sentences,
                nodes = self.graph.len(),
                "Building word graph"
            );
        }

        let first = first.as_ref();
        let key = self.graph.normalize(first);
        let mut predecessor = self.graph.resolve_or_create(key, first, None);
        self.graph.add_root(predecessor);

        let mut path = Vec::with_capacity(tokens.len());
        path.push(predecessor);

        for token in rest {
            let successor = self.choose_successor(predecessor, token.as_ref());
            self.graph.link(predecessor, successor);
            path.push(successor);
            predecessor = successor;
        }

        path
    }

    /// Resolves the node to link after `predecessor`, duplicating on would-be cycles.
    fn choose_successor(&mut self, predecessor: NodeId, token: &str) -> NodeId {
        let base = self.graph.normalize(token);
        let mut candidate = self.graph.resolve_or_create(base.clone(), token, None);
        let mut suffix = 2u32;

        while self.graph.is_in_path(predecessor, candidate) {
            candidate = self.graph.resolve_or_create(base.clone(), token, Some(suffix));
            suffix += 1;
        }

        candidate
    }

    pub fn finish(self) -> WordGraph {
        self.graph
    }
}

/// Builds a graph from tokenized sentences in the given order.
pub fn build_graph<I, T, S>(sentences: I, case_sensitive: bool) -> WordGraph
where
    I: IntoIterator<Item = T>,
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = GraphBuilder::new(case_sensitive);
    for sentence in sentences {
        builder.add_sentence(sentence.as_ref());
    }
    builder.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
