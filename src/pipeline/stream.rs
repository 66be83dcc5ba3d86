//! Tweet source for the producer.

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use crate::error::StreamError;

// == Tweet ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub username: String,
    pub text: String,
}

impl Tweet {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
        }
    }

    pub fn is_talking_about_go(&self) -> bool {
        let text = self.text.to_lowercase();
        text.contains("golang") || text.contains("gopher")
    }
}

// == Stream Trait ==
pub trait TweetStream: Send + 'static {
    /// Returns the next tweet, or [`StreamError::Eof`] once exhausted.
    fn next(&mut self) -> impl Future<Output = Result<Tweet, StreamError>> + Send;
}

// == Mock Stream ==
/// Fixed list of tweets served with a simulated network delay.
#[derive(Debug, Clone)]
pub struct MockStream {
    tweets: VecDeque<Tweet>,
    latency: Duration,
}

impl MockStream {
    pub fn new(tweets: impl IntoIterator<Item = Tweet>, latency: Duration) -> Self {
        Self {
            tweets: tweets.into_iter().collect(),
            latency,
        }
    }

    /// The stream the exercise binary runs against.
    pub fn sample(latency: Duration) -> Self {
        Self::new(
            [
                Tweet::new(
                    "davecheney",
                    "#golang top tip: if your unit tests import any other package you wrote, \
                     including themselves, they're not unit tests.",
                ),
                Tweet::new(
                    "beertocode",
                    "Backend developer, doing frontend featuring the eternal struggle of \
                     centering something. #coding",
                ),
                Tweet::new(
                    "ironzeb",
                    "Re: Popularity of Golang in China: My thinking nowadays is that it had \
                     a lot to do with this book and author",
                ),
                Tweet::new(
                    "beertocode",
                    "Looking forward to the #gopher meetup in Hsinchu tonight with @ironzeb!",
                ),
                Tweet::new(
                    "vampirewalk666",
                    "I just wrote a golang slack bot! It reports the state of github \
                     repository. #Slack #golang",
                ),
            ],
            latency,
        )
    }

    pub fn remaining(&self) -> usize {
        self.tweets.len()
    }
}

impl TweetStream for MockStream {
    async fn next(&mut self) -> Result<Tweet, StreamError> {
        tokio::time::sleep(self.latency).await;
        self.tweets.pop_front().ok_or(StreamError::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn test_is_talking_about_go() {
        assert!(Tweet::new("a", "I love #golang").is_talking_about_go());
        assert!(Tweet::new("a", "Gopher meetup tonight").is_talking_about_go());
        assert!(!Tweet::new("a", "centering a div").is_talking_about_go());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_stream_ends_with_eof() {
        let mut stream = MockStream::new([Tweet::new("a", "hi")], Duration::from_millis(10));

        assert_ok!(stream.next().await);
        assert_eq!(stream.next().await, Err(StreamError::Eof));
        assert_eq!(stream.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sample_stream_counts_down() {
        let mut stream = MockStream::sample(Duration::from_millis(320));
        assert_eq!(stream.remaining(), 5);

        assert_ok!(stream.next().await);
        assert_eq!(stream.remaining(), 4);
    }
}
