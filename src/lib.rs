//! Concurrency exercises
//!
//! Six self-contained programs, each showing one concurrency pattern:
//! a throttled crawler, a producer/consumer pipeline, an LRU cache safe for
//! concurrent access, per-user time budgets, two-stage SIGINT handling and a
//! background session sweeper. The binaries under `src/bin/` drive each one
//! against a mock collaborator.

pub mod budget;
pub mod cache;
pub mod config;
pub mod crawler;
pub mod error;
pub mod pipeline;
pub mod session;
pub mod shutdown;
pub mod tasks;
pub mod telemetry;

pub use config::{
    BudgetConfig, CacheConfig, CrawlerConfig, PipelineConfig, SessionConfig, ShutdownConfig,
};
