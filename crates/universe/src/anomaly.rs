// crates/universe/src/anomaly.rs
use common::{round_to, Error, MetricRecord, Result, DEFAULT_ANOMALY_THRESHOLD};
use std::collections::{BTreeMap, BTreeSet};

/// Flags symbols whose share of upstream-flagged transactions is too high
#[derive(Debug, Clone, Copy)]
pub struct AnomalyFlagger {
    threshold: f64,
}

impl Default for AnomalyFlagger {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ANOMALY_THRESHOLD,
        }
    }
}

impl AnomalyFlagger {
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn is_suspicious(&self, record: &MetricRecord) -> bool {
        record.anomaly_ratio() > self.threshold
    }

    /// Symbols with at least one record over the threshold. Duplicate
    /// symbols are checked one by one, never merged.
    pub fn flag(&self, records: &[MetricRecord]) -> BTreeSet<String> {
        let mut suspicious = BTreeSet::new();

        for record in records {
            if record.flagged as f64 > record.tx_count {
                tracing::warn!(
                    symbol = %record.symbol,
                    flagged = record.flagged,
                    tx_count = record.tx_count,
                    "flagged count exceeds transaction count"
                );
            }

            if self.is_suspicious(record) {
                suspicious.insert(record.symbol.clone());
            }
        }

        tracing::debug!(
            records = records.len(),
            suspicious = suspicious.len(),
            threshold = self.threshold,
            "anomaly flagging complete"
        );

        suspicious
    }
}

/// Anomaly ratio per symbol, rounded to 4 places. A later duplicate
/// replaces an earlier one.
pub fn summarize(records: &[MetricRecord]) -> BTreeMap<String, f64> {
    records
        .iter()
        .map(|r| (r.symbol.clone(), round_to(r.anomaly_ratio(), 4)))
        .collect()
}
