//! Cache Module
//!
//! Thread-safe LRU cache that loads missing keys from a slow backing source.

mod loader;
mod lru;
mod server;
mod stats;
mod store;


// Re-export public types
pub use loader::{Loader, MockDb};
pub use lru::{Handle, RecencyList};
pub use server::{run_mock_server, ServerReport};
pub use stats::CacheStats;
pub use store::KeyStoreCache;

// == Public Constants ==
/// Default number of entries the cache holds
pub const DEFAULT_CAPACITY: usize = 100;
