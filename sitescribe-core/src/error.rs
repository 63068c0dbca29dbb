use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid node identifier: {0}")]
    InvalidNodeId(String),

    #[error("Node not found in graph: {0}")]
    NodeNotFound(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
