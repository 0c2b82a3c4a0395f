// crates/adapters/src/sink.rs
use crate::ExecutionSink;
use async_trait::async_trait;
use common::*;
use parking_lot::Mutex;

/// Records decisions in the log and keeps them for inspection.
///
/// Stands in for the execution side: approved decisions are reported,
/// nothing is signed or sent.
#[derive(Debug, Default)]
pub struct LoggingSink {
    history: Mutex<Vec<(String, Decision)>>,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<(String, Decision)> {
        self.history.lock().clone()
    }

    pub fn last(&self) -> Option<(String, Decision)> {
        self.history.lock().last().cloned()
    }
}

#[async_trait]
impl ExecutionSink for LoggingSink {
    async fn submit(&self, symbol: &str, decision: &Decision) -> Result<()> {
        if decision.is_approved() {
            tracing::info!(symbol, reason = %decision.reason, "trade approved, handing off to execution");
        } else {
            tracing::info!(symbol, reason = %decision.reason, "trade blocked");
        }

        self.history.lock().push((symbol.to_string(), *decision));
        Ok(())
    }
}
