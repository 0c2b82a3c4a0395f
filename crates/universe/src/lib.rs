// crates/universe/src/lib.rs
use common::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub mod anomaly;
pub mod ranking;
pub mod scoring;

pub use anomaly::AnomalyFlagger;
pub use ranking::rank_descending;
pub use scoring::CompositeScorer;

/// Result of screening one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub suspicious: BTreeSet<String>,
    pub anomaly_summary: BTreeMap<String, f64>,
    pub ranked: Vec<ScoredRecord>,
}

impl ScreeningOutcome {
    pub fn is_suspicious(&self, symbol: &str) -> bool {
        self.suspicious.contains(symbol)
    }

    /// Highest-ranked record, optionally skipping suspicious symbols
    pub fn top(&self, exclude_suspicious: bool) -> Option<&ScoredRecord> {
        self.ranked
            .iter()
            .find(|r| !exclude_suspicious || !self.is_suspicious(r.symbol()))
    }
}

/// Flag, score and rank a metric batch
#[derive(Debug, Clone, Copy, Default)]
pub struct Screener {
    flagger: AnomalyFlagger,
    scorer: CompositeScorer,
}

impl Screener {
    pub fn new(flagger: AnomalyFlagger, scorer: CompositeScorer) -> Self {
        Self { flagger, scorer }
    }

    pub fn from_config(config: &ScreenerConfig) -> Result<Self> {
        Ok(Self {
            flagger: AnomalyFlagger::new(config.scoring.anomaly_threshold)?,
            scorer: CompositeScorer::new(config.scoring.weights)?,
        })
    }

    pub fn screen(&self, records: &[MetricRecord]) -> Result<ScreeningOutcome> {
        let start = std::time::Instant::now();

        let suspicious = self.flagger.flag(records);
        let anomaly_summary = anomaly::summarize(records);
        let ranked = self.scorer.rank(records)?;

        let elapsed = start.elapsed();
        tracing::debug!(
            records = records.len(),
            suspicious = suspicious.len(),
            "screened batch in {:?}",
            elapsed
        );

        metrics::counter!("screener_suspicious_total").increment(suspicious.len() as u64);
        metrics::histogram!("screener_screen_duration_ms").record(elapsed.as_secs_f64() * 1000.0);

        Ok(ScreeningOutcome {
            suspicious,
            anomaly_summary,
            ranked,
        })
    }
}
