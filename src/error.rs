//! Error types for the exercises
//!
//! Each exercise gets its own small error enum built with thiserror. There is
//! no shared taxonomy beyond "not found" and "source failed".

use thiserror::Error;

// == Fetch Error ==
/// Failure reported by a [`crate::crawler::Fetcher`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The fetcher has no page for this URL
    #[error("not found: {0}")]
    NotFound(String),
}

// == Stream Error ==
/// Outcome of reading from a [`crate::pipeline::TweetStream`] that did not
/// yield an item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// End of stream. A sentinel, not a fault.
    #[error("end of stream")]
    Eof,
}

// == Load Error ==
/// Failure reported by a cache [`crate::cache::Loader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The backing store does not know the key
    #[error("key not found in backing store: {0}")]
    NotFound(String),

    /// The backing store could not be reached
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
}

// == Cache Error ==
/// Error returned by [`crate::cache::KeyStoreCache::get`].
#[derive(Error, Debug)]
pub enum CacheError {
    /// Loading a missing key from the backing source failed
    #[error("failed to load {key}")]
    Load {
        key: String,
        #[source]
        source: LoadError,
    },

    /// The blocking load task panicked or was cancelled
    #[error("loader task for {0} did not complete")]
    LoaderAborted(String),
}

// == Session Error ==
/// Error returned by [`crate::session::SessionManager`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session with this ID is stored
    #[error("session does not exist: {0}")]
    NotFound(String),
}

/// Convenience Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for session operations.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_cache_error_keeps_source() {
        let err = CacheError::Load {
            key: "user:1".to_string(),
            source: LoadError::NotFound("user:1".to_string()),
        };

        assert_eq!(err.to_string(), "failed to load user:1");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("key not found in backing store: user:1")
        );
    }

    #[test]
    fn test_session_error_message() {
        let err = SessionError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "session does not exist: abc");
    }
}
