//! Producer/consumer
//!
//! Reads tweets from a mock stream and classifies them while the next one is
//! still being fetched.

use anyhow::Context;
use tracing::info;

use concurrency_exercises::pipeline::{run_pipeline, MockStream};
use concurrency_exercises::{telemetry, PipelineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = PipelineConfig::from_env();
    let stream = MockStream::sample(config.stream_latency);
    info!(tweets = stream.remaining(), "starting pipeline");

    let report = run_pipeline(stream, config.process_delay)
        .await
        .context("pipeline task failed")?;

    let about_go = report.verdicts.iter().filter(|v| v.talks_about_go).count();
    info!(
        "Processed {} tweets ({} about golang), process took {:?}",
        report.verdicts.len(),
        about_go,
        report.elapsed
    );
    Ok(())
}
