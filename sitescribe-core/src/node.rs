use std::fmt;
use std::hash::{Hash, Hasher};

/// A vertex in a crawl graph: a stable identifier plus a domain-specific
/// payload (for the web crawler, a lazily fetched page).
///
/// `depth` and `parent` are bookkeeping stamped by the crawl engine when a
/// node is first discovered; the graph container never touches them. The
/// parent is stored as an identifier rather than a handle, so nodes never
/// own each other.
#[derive(Debug, Clone)]
pub struct Node<P> {
    id: String,
    depth: usize,
    parent: Option<String>,
    payload: P,
}

impl<P> Node<P> {
    pub fn new(id: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            depth: 0,
            parent: None,
            payload,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn set_parent(&mut self, parent: Option<String>) {
        self.parent = parent;
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }
}

// Equality and hashing consider only the identifier. Depth, parent and
// payload may all change after a node is stored without affecting graph
// membership.
impl<P> PartialEq for Node<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for Node<P> {}

impl<P> Hash for Node<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<P> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
