use crate::page::Page;
use reqwest::blocking::Client;
use sitescribe_core::{CrawlError, Crawler, Graph, Node, Result};
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Callback invoked with a node identifier each time its neighborhood is
/// about to be visited.
pub type ProgressCallback = Box<dyn Fn(&str)>;

/// Crawls web pages within an allow-list of domains.
///
/// The allow-list is the union of a base list supplied at construction and
/// a session list derived from the seed when a crawl starts. One crawl is
/// in flight per crawler instance at a time.
pub struct WebCrawler {
    client: Client,
    base_allowed_domains: Vec<String>,
    session_allowed_domains: Vec<String>,
    restrict_to_seed_domain: bool,
    progress_callback: Option<ProgressCallback>,
}

impl WebCrawler {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("sitescribe/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_allowed_domains: Vec::new(),
            session_allowed_domains: Vec::new(),
            restrict_to_seed_domain: true,
            progress_callback: None,
        }
    }

    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.base_allowed_domains = domains;
        self
    }

    /// When set (the default), each session restricts the crawl to the
    /// seed's own domain on top of the base allow-list.
    pub fn with_domain_restriction(mut self, restrict: bool) -> Self {
        self.restrict_to_seed_domain = restrict;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Whether a URL falls within the allowed domains of the current
    /// session. An empty allow-list admits everything.
    ///
    /// Matching is substring containment, not host equality: an entry also
    /// matches subdomains and domains embedded in a path or query string.
    pub fn in_allowed_domain(&self, url: &str) -> bool {
        if self.base_allowed_domains.is_empty() && self.session_allowed_domains.is_empty() {
            return true;
        }
        self.base_allowed_domains
            .iter()
            .chain(&self.session_allowed_domains)
            .any(|domain| url.contains(domain.as_str()))
    }

    /// Markdown for every node of a crawled graph, in insertion order.
    /// Pages that were never expanded during the crawl are fetched here,
    /// through the same memoized accessor.
    pub fn render_markdown(&self, graph: &mut Graph<Page>) -> Vec<(String, String)> {
        graph
            .nodes_mut()
            .map(|node| {
                let markdown = node.payload_mut().to_markdown(&self.client);
                (node.id().to_string(), markdown)
            })
            .collect()
    }
}

impl Crawler for WebCrawler {
    type Payload = Page;

    fn get_node(&self, node_id: &str) -> Result<Node<Page>> {
        let url = Url::parse(node_id)
            .map_err(|e| CrawlError::InvalidNodeId(format!("{node_id}: {e}")))?;
        Ok(Node::new(node_id, Page::new(url)))
    }

    fn start_session(&mut self, start_id: &str) -> Result<Graph<Page>> {
        let start = self.get_node(start_id)?;
        self.session_allowed_domains = if self.restrict_to_seed_domain {
            vec![start.payload().domain().to_string()]
        } else {
            Vec::new()
        };

        let mut graph = Graph::new();
        graph.add_node(start);
        Ok(graph)
    }

    fn visit_neighborhood(&mut self, node: &mut Node<Page>) -> Vec<Node<Page>> {
        if let Some(callback) = &self.progress_callback {
            callback(node.id());
        }

        let links = node.payload_mut().links(&self.client);
        links
            .into_iter()
            .filter(|link| self.in_allowed_domain(link))
            .filter_map(|link| {
                let url = Url::parse(&link).ok()?;
                Some(Node::new(link, Page::new(url)))
            })
            .collect()
    }
}

impl Default for WebCrawler {
    fn default() -> Self {
        Self::new()
    }
}
