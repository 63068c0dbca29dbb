use reqwest::StatusCode;
use thiserror::Error;

/// Why a page could not be fetched. Fetch failures are recovered where they
/// occur, never propagated out of a crawl.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(StatusCode),
}
