//! Pipeline Module
//!
//! One producer reads a [`TweetStream`] and hands items to one consumer over
//! a single-slot channel. The producer reports completion on a separate
//! oneshot; the consumer drains until the channel is closed, so nothing is
//! dropped.

mod stream;

pub use stream::{MockStream, Tweet, TweetStream};

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::StreamError;

/// The consumer's classification of one tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub username: String,
    pub talks_about_go: bool,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub produced: usize,
    pub verdicts: Vec<Verdict>,
    pub elapsed: Duration,
}

// == Producer ==
/// Forwards every tweet from `stream` into `tweets`, then signals `done`.
///
/// Returns the number of tweets handed over. The sender is dropped on return,
/// which closes the channel for the consumer.
pub async fn producer<S: TweetStream>(
    mut stream: S,
    tweets: mpsc::Sender<Tweet>,
    done: oneshot::Sender<()>,
) -> usize {
    let mut produced = 0;
    loop {
        match stream.next().await {
            Ok(tweet) => {
                if tweets.send(tweet).await.is_err() {
                    warn!("consumer hung up before the stream ended");
                    break;
                }
                produced += 1;
            }
            Err(StreamError::Eof) => {
                debug!(produced, "stream exhausted");
                break;
            }
        }
    }
    let _ = done.send(());
    produced
}

// == Consumer ==
/// Classifies tweets until the channel is closed.
pub async fn consumer(mut tweets: mpsc::Receiver<Tweet>, process_delay: Duration) -> Vec<Verdict> {
    let mut verdicts = Vec::new();
    while let Some(tweet) = tweets.recv().await {
        tokio::time::sleep(process_delay).await;

        let talks_about_go = tweet.is_talking_about_go();
        if talks_about_go {
            info!(user = %tweet.username, "tweets about golang");
        } else {
            info!(user = %tweet.username, "does not tweet about golang");
        }
        verdicts.push(Verdict {
            username: tweet.username,
            talks_about_go,
        });
    }
    verdicts
}

// == Run Pipeline ==
/// Runs one producer and one consumer concurrently and waits for both.
pub async fn run_pipeline<S: TweetStream>(
    stream: S,
    process_delay: Duration,
) -> Result<PipelineReport, JoinError> {
    let start = Instant::now();

    let (tweet_tx, tweet_rx) = mpsc::channel(1);
    let (done_tx, done_rx) = oneshot::channel();

    let producer = tokio::spawn(producer(stream, tweet_tx, done_tx));
    let consumer = tokio::spawn(consumer(tweet_rx, process_delay));

    // The producer always finishes first; the consumer may still be draining.
    let _ = done_rx.await;
    let produced = producer.await?;
    let verdicts = consumer.await?;

    let elapsed = start.elapsed();
    info!(produced, ?elapsed, "pipeline finished");

    Ok(PipelineReport {
        produced,
        verdicts,
        elapsed,
    })
}
