// In-memory result sink — records every store call, in order.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::traits::ResultSink;

#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far as `(key, value)` pairs.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("MemorySink mutex poisoned"))?;
        entries.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
