pub mod export;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{generate_crawl_report, handle_crawl};
