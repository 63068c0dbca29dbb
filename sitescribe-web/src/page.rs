use crate::error::FetchError;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::{debug, warn};
use url::Url;

/// A web page: the payload behind every node in a web crawl graph.
///
/// Content is fetched lazily. The state machine has exactly two states and
/// transitions once: the first accessor call performs the HTTP request and
/// memoizes the body (an empty body when the fetch fails), every later
/// call returns the cached value.
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    state: PageState,
}

#[derive(Debug, Clone)]
enum PageState {
    NotFetched,
    Fetched(String),
}

impl Page {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            state: PageState::NotFetched,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host component of the page URL, empty when the URL has none.
    pub fn domain(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    /// The page's HTML body, fetching it on first access.
    ///
    /// A network error or non-200 status is logged and memoized as an
    /// empty body; it is never raised to the caller.
    pub fn html(&mut self, client: &Client) -> &str {
        if matches!(self.state, PageState::NotFetched) {
            let body = match fetch(client, &self.url) {
                Ok(body) => body,
                Err(err) => {
                    warn!("Failed to access {}: {}", self.url, err);
                    String::new()
                }
            };
            self.state = PageState::Fetched(body);
        }
        match &self.state {
            PageState::Fetched(body) => body,
            PageState::NotFetched => unreachable!("content fetched above"),
        }
    }

    /// All outbound hyperlinks of the page as absolute URLs, deduplicated
    /// and lexicographically ordered. Empty when the page has no content.
    pub fn links(&mut self, client: &Client) -> Vec<String> {
        let base = self.url.clone();
        let html = self.html(client);
        if html.is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(html);
        let selector = Selector::parse("a[href]").unwrap();

        let mut urls = BTreeSet::new();
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href")
                && let Some(resolved) = resolve_href(&base, href)
            {
                urls.insert(resolved);
            }
        }
        urls.into_iter().collect()
    }

    /// Markdown rendering of the page content, empty when the content is
    /// unavailable.
    pub fn to_markdown(&mut self, client: &Client) -> String {
        let html = self.html(client);
        if html.is_empty() {
            return String::new();
        }
        html2md::parse_html(html)
    }
}

fn fetch(client: &Client, url: &Url) -> Result<String, FetchError> {
    debug!("Fetching {}", url);
    let response = client.get(url.clone()).send()?;
    if response.status() != StatusCode::OK {
        return Err(FetchError::Status(response.status()));
    }
    Ok(response.text()?)
}

/// Resolves an href against the page URL. Links that can never lead to a
/// crawlable page (fragments, javascript:, mailto:, tel:) are dropped, and
/// fragments are stripped from the result.
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The page client is blocking, so tests stand up a tokio runtime by
    // hand and keep it alive while the mock server runs on its workers.
    fn start_server() -> (Runtime, MockServer) {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        (rt, server)
    }

    fn mount_html(rt: &Runtime, server: &MockServer, route: &str, body: &str) {
        let mock = Mock::given(method("GET")).and(path(route)).respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        );
        rt.block_on(mock.mount(server));
    }

    fn page_for(server: &MockServer, route: &str) -> Page {
        Page::new(Url::parse(&format!("{}{}", server.uri(), route)).unwrap())
    }

    #[test]
    fn test_html_fetched_exactly_once() {
        let (rt, server) = start_server();
        mount_html(&rt, &server, "/", "<html><body>hello</body></html>");

        let client = Client::new();
        let mut page = page_for(&server, "/");
        assert!(page.html(&client).contains("hello"));
        assert!(page.html(&client).contains("hello"));

        let requests = rt.block_on(server.received_requests()).unwrap();
        assert_eq!(requests.len(), 1, "second access must hit the cache");
    }

    #[test]
    fn test_fetch_failure_memoized_as_empty() {
        let (rt, server) = start_server();
        let mock = Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404));
        rt.block_on(mock.mount(&server));

        let client = Client::new();
        let mut page = page_for(&server, "/missing");
        assert_eq!(page.html(&client), "");
        assert!(page.links(&client).is_empty());
        assert_eq!(page.to_markdown(&client), "");

        let requests = rt.block_on(server.received_requests()).unwrap();
        assert_eq!(requests.len(), 1, "the failure must be memoized too");
    }

    #[test]
    fn test_links_sorted_and_deduplicated() {
        let (rt, server) = start_server();
        mount_html(
            &rt,
            &server,
            "/",
            r#"<html><body>
                <a href="/c">C</a>
                <a href="/a">A</a>
                <a href="/b">B</a>
                <a href="/a">A again</a>
            </body></html>"#,
        );

        let client = Client::new();
        let mut page = page_for(&server, "/");
        let links = page.links(&client);

        let expected: Vec<String> = ["/a", "/b", "/c"]
            .iter()
            .map(|p| format!("{}{}", server.uri(), p))
            .collect();
        assert_eq!(links, expected);
    }

    #[test]
    fn test_links_skip_unfollowable_schemes_and_fragments() {
        let (rt, server) = start_server();
        mount_html(
            &rt,
            &server,
            "/",
            r##"<html><body>
                <a href="#section">anchor</a>
                <a href="javascript:void(0)">js</a>
                <a href="mailto:someone@example.com">mail</a>
                <a href="tel:+15551234">phone</a>
                <a href="/real#fragment">real</a>
            </body></html>"##,
        );

        let client = Client::new();
        let mut page = page_for(&server, "/");
        let links = page.links(&client);

        assert_eq!(links, vec![format!("{}/real", server.uri())]);
    }

    #[test]
    fn test_to_markdown_renders_headings() {
        let (rt, server) = start_server();
        mount_html(
            &rt,
            &server,
            "/",
            "<html><body><h1>Example Page</h1><p>Some text.</p></body></html>",
        );

        let client = Client::new();
        let mut page = page_for(&server, "/");
        let markdown = page.to_markdown(&client);

        assert!(markdown.contains("Example Page"));
        assert!(markdown.contains("Some text."));
    }

    #[test]
    fn test_domain_extraction() {
        let page = Page::new(Url::parse("https://docs.example.com/guide?x=1").unwrap());
        assert_eq!(page.domain(), "docs.example.com");
    }

    #[test]
    fn test_resolve_href_relative_and_absolute() {
        let base = Url::parse("https://example.com/dir/page").unwrap();

        assert_eq!(
            resolve_href(&base, "other").as_deref(),
            Some("https://example.com/dir/other")
        );
        assert_eq!(
            resolve_href(&base, "https://other.com/x").as_deref(),
            Some("https://other.com/x")
        );
        assert_eq!(resolve_href(&base, ""), None);
        assert_eq!(resolve_href(&base, "#top"), None);
    }
}
