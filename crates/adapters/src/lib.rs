// crates/adapters/src/lib.rs
use async_trait::async_trait;
use common::*;

pub mod dexscreener;
pub mod sink;
pub mod snapshot;

pub use sink::LoggingSink;
pub use snapshot::{Snapshot, SnapshotFile};

/// Upstream supplier of per-token metric batches
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Fresh batch for one evaluation cycle
    async fn metric_batch(&self) -> Result<Vec<MetricRecord>>;
}

/// Upstream supplier of live pair data
#[async_trait]
pub trait PairDataSource: Send + Sync {
    /// Resolve the admission inputs for a symbol. Missing fields come back
    /// as `None`; an unknown symbol is an error.
    async fn candidate(&self, symbol: &str) -> Result<AdmissionCandidate>;
}

/// Downstream consumer of admission decisions.
///
/// Implementations that execute trades own transaction building and key
/// material; decisions carry neither.
#[async_trait]
pub trait ExecutionSink: Send + Sync {
    async fn submit(&self, symbol: &str, decision: &Decision) -> Result<()>;
}
