use crate::edge::Edge;
use crate::node::Node;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::debug;

/// A directed graph of crawled nodes, keyed by node identifier.
///
/// Backed by a petgraph `DiGraph` plus an identity index. A given
/// identifier is stored at most once; edges between the same ordered pair
/// accumulate independently, each carrying its own attributes.
pub struct Graph<P> {
    inner: DiGraph<Node<P>, Edge>,
    index: HashMap<String, NodeIndex>,
}

impl<P> Graph<P> {
    pub fn new() -> Self {
        Self {
            inner: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Stores a node. Re-adding an identifier that is already present is a
    /// no-op; the stored node is kept as-is.
    pub fn add_node(&mut self, node: Node<P>) {
        if self.index.contains_key(node.id()) {
            return;
        }
        let id = node.id().to_string();
        let ix = self.inner.add_node(node);
        self.index.insert(id, ix);
    }

    /// Records a directed edge between two stored nodes. Self-loops are
    /// silently dropped. Both endpoints must already be stored; an edge
    /// naming an unknown identifier is discarded.
    pub fn add_edge(&mut self, u: &str, v: &str, edge: Edge) {
        if u == v {
            return;
        }
        match (self.index.get(u), self.index.get(v)) {
            (Some(&u_ix), Some(&v_ix)) => {
                self.inner.add_edge(u_ix, v_ix, edge);
            }
            _ => {
                debug!("Discarding edge with unknown endpoint: {} -> {}", u, v);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get_node(&self, id: &str) -> Option<&Node<P>> {
        self.index.get(id).map(|&ix| &self.inner[ix])
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node<P>> {
        match self.index.get(id) {
            Some(&ix) => Some(&mut self.inner[ix]),
            None => None,
        }
    }

    /// All stored nodes, in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node<P>> {
        self.inner.node_weights()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node<P>> {
        self.inner.node_weights_mut()
    }

    /// All recorded edges as `(source_id, target_id, attributes)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &Edge)> {
        self.inner.edge_references().map(|e| {
            (
                self.inner[e.source()].id(),
                self.inner[e.target()].id(),
                e.weight(),
            )
        })
    }

    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        match (self.index.get(u), self.index.get(v)) {
            (Some(&u_ix), Some(&v_ix)) => self.inner.edges_connecting(u_ix, v_ix).next().is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Graphviz DOT rendering of the graph, node labels being identifiers
    /// and edge labels their discovery depth.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.inner))
    }
}

impl<P> Default for Graph<P> {
    fn default() -> Self {
        Self::new()
    }
}
