//! User directory implementations

mod http_client;
mod in_memory;

pub use http_client::HttpUserDirectory;
pub use in_memory::InMemoryUserDirectory;
