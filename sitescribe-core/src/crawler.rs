use crate::edge::Edge;
use crate::error::{CrawlError, Result};
use crate::graph::Graph;
use crate::node::Node;
use std::collections::VecDeque;
use tracing::info;

/// Breadth-first crawl engine, abstract over what is being crawled.
///
/// A concrete crawler supplies three operations: materializing a node for
/// an identifier, opening a session (a fresh graph seeded with the start
/// node), and discovering a node's neighborhood. The traversal itself is
/// the provided [`crawl`](Crawler::crawl) and is written once against this
/// trait.
pub trait Crawler {
    type Payload;

    /// Materializes the node for an identifier. Called anew for every
    /// identifier; any caching of expensive per-node state belongs to the
    /// payload. Failing to resolve an identifier is a fatal error.
    fn get_node(&self, node_id: &str) -> Result<Node<Self::Payload>>;

    /// Resets per-session state and returns a fresh graph containing the
    /// start node.
    fn start_session(&mut self, start_id: &str) -> Result<Graph<Self::Payload>>;

    /// The neighbors of a node that the crawl is allowed to traverse into.
    /// Discovery failures are handled here, not surfaced: a node whose
    /// content cannot be obtained has an empty neighborhood.
    fn visit_neighborhood(&mut self, node: &mut Node<Self::Payload>) -> Vec<Node<Self::Payload>>;

    /// Breadth-first traversal from `start_id`, bounded by `max_depth`
    /// hops. A `max_depth` of 0 yields only the seed node; 1 adds the
    /// seed's direct neighbors, and so on.
    ///
    /// Every newly seen neighbor is stored and queued; an edge from the
    /// current node to the neighbor is recorded unconditionally, so a node
    /// reached along several paths accumulates one incoming edge per path.
    fn crawl(&mut self, start_id: &str, max_depth: usize) -> Result<Graph<Self::Payload>> {
        info!("Starting crawl of {} (max depth {})", start_id, max_depth);

        let start_node = self.get_node(start_id)?;
        let mut graph = self.start_session(start_id)?;

        let mut visiting: VecDeque<(String, usize)> = VecDeque::new();
        visiting.push_back((start_node.id().to_string(), 0));

        while let Some((node_id, current_depth)) = visiting.pop_front() {
            let new_depth = current_depth + 1;
            if new_depth > max_depth {
                continue;
            }

            let neighbors = {
                let node = graph
                    .get_node_mut(&node_id)
                    .ok_or_else(|| CrawlError::NodeNotFound(node_id.clone()))?;
                self.visit_neighborhood(node)
            };

            for mut neighbor in neighbors {
                let neighbor_id = neighbor.id().to_string();
                if !graph.contains(&neighbor_id) {
                    neighbor.set_depth(new_depth);
                    neighbor.set_parent(Some(node_id.clone()));
                    graph.add_node(neighbor);
                    visiting.push_back((neighbor_id.clone(), new_depth));
                }
                graph.add_edge(&node_id, &neighbor_id, Edge::at_depth(new_depth));
            }
        }

        info!(
            "Crawl complete: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
