// crates/adapters/src/snapshot.rs
use crate::{dexscreener, MetricSource, PairDataSource};
use async_trait::async_trait;
use common::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Captured upstream state: a metric batch plus raw pair payloads keyed
/// by symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<MetricRecord>,
    #[serde(default)]
    pub pairs: HashMap<String, serde_json::Value>,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn candidate_for(&self, symbol: &str) -> Result<AdmissionCandidate> {
        self.pairs
            .get(symbol)
            .map(dexscreener::candidate_from_pair)
            .ok_or_else(|| Error::NotFound(format!("pair data for {}", symbol)))
    }
}

#[async_trait]
impl MetricSource for Snapshot {
    async fn metric_batch(&self) -> Result<Vec<MetricRecord>> {
        Ok(self.records.clone())
    }
}

#[async_trait]
impl PairDataSource for Snapshot {
    async fn candidate(&self, symbol: &str) -> Result<AdmissionCandidate> {
        self.candidate_for(symbol)
    }
}

/// Snapshot stored as a JSON file, re-read on every request so each cycle
/// sees the latest capture.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn load(&self) -> Result<Snapshot> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = Snapshot::from_json(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            records = snapshot.records.len(),
            pairs = snapshot.pairs.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl MetricSource for SnapshotFile {
    async fn metric_batch(&self) -> Result<Vec<MetricRecord>> {
        Ok(self.load().await?.records)
    }
}

#[async_trait]
impl PairDataSource for SnapshotFile {
    async fn candidate(&self, symbol: &str) -> Result<AdmissionCandidate> {
        self.load().await?.candidate_for(symbol)
    }
}
