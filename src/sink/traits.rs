// Result sink trait — swap-ready abstraction for persisting scores.
//
// A sink has a single operation, `store(key, value)`. Keys are object names
// such as `20261019T120000.000000Z/result.txt`; values are plain text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::similarity::{format_score, TimedScore};

/// Trait for persisting a text value under a key. Implementations are async
/// because the real one talks to an object store over HTTP.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// Sink that accepts and drops everything. Used when no bucket is configured.
pub struct NoopSink;

#[async_trait]
impl ResultSink for NoopSink {
    async fn store(&self, key: &str, _value: &str) -> Result<()> {
        debug!(key = key, "No result sink configured, discarding");
        Ok(())
    }
}

/// Store the two blobs the timed check produces:
/// `{prefix}/time.txt` (elapsed seconds) and `{prefix}/result.txt` (score).
pub async fn report_timed_score(
    sink: &dyn ResultSink,
    prefix: &str,
    timed: &TimedScore,
) -> Result<()> {
    let time_key = format!("{prefix}/time.txt");
    let result_key = format!("{prefix}/result.txt");

    sink.store(&time_key, &format_score(timed.elapsed.as_secs_f64()))
        .await
        .with_context(|| format!("Failed to store {time_key}"))?;
    sink.store(&result_key, &format_score(timed.similarity))
        .await
        .with_context(|| format!("Failed to store {result_key}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::sink::MemorySink;

    #[tokio::test]
    async fn test_report_writes_time_and_result() {
        let sink = MemorySink::new();
        let timed = TimedScore {
            similarity: 0.875,
            elapsed: Duration::from_millis(1500),
        };

        report_timed_score(&sink, "run-1", &timed).await.unwrap();

        let entries = sink.entries();
        assert_eq!(
            entries,
            vec![
                ("run-1/time.txt".to_string(), "1.5".to_string()),
                ("run-1/result.txt".to_string(), "0.875".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_report_keeps_decimal_point_on_whole_numbers() {
        let sink = MemorySink::new();
        let timed = TimedScore {
            similarity: 1.0,
            elapsed: Duration::from_secs(2),
        };

        report_timed_score(&sink, "run-2", &timed).await.unwrap();

        let values: Vec<String> = sink.entries().into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["2.0", "1.0"]);
    }

    #[tokio::test]
    async fn test_noop_sink_accepts_everything() {
        assert!(NoopSink.store("k", "v").await.is_ok());
    }
}
