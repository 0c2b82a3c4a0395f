// crates/engine/src/lib.rs
pub mod gate;

use adapters::{ExecutionSink, MetricSource, PairDataSource};
use common::*;
use gate::AdmissionGate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use universe::{ScreeningOutcome, Screener};

/// Gate outcome for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admission {
    pub symbol: String,
    pub candidate: AdmissionCandidate,
    pub decision: Decision,
}

/// Everything one evaluation cycle produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub outcome: ScreeningOutcome,
    /// `None` when the batch had no eligible record
    pub admission: Option<Admission>,
}

/// Runs source -> screen -> gate -> sink, once per call
pub struct CycleRunner {
    screener: Screener,
    gate: AdmissionGate,
    exclude_suspicious: bool,

    metric_source: Arc<dyn MetricSource>,
    pair_source: Arc<dyn PairDataSource>,
    sink: Arc<dyn ExecutionSink>,
}

impl CycleRunner {
    /// Fails on invalid weights or threshold before any data is pulled.
    pub fn new(
        config: &ScreenerConfig,
        metric_source: Arc<dyn MetricSource>,
        pair_source: Arc<dyn PairDataSource>,
        sink: Arc<dyn ExecutionSink>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            screener: Screener::from_config(config)?,
            gate: AdmissionGate::new(config.gate),
            exclude_suspicious: config.exclude_suspicious,
            metric_source,
            pair_source,
            sink,
        })
    }

    /// One full cycle; the top eligible record goes through the gate.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let records = self.metric_source.metric_batch().await?;
        tracing::info!("Evaluating batch of {} records", records.len());

        let outcome = self.screener.screen(&records)?;

        if !outcome.suspicious.is_empty() {
            tracing::warn!(suspicious = ?outcome.suspicious, "suspicious symbols in batch");
        }

        let target = outcome
            .top(self.exclude_suspicious)
            .map(|r| r.symbol().to_string());

        let admission = match target {
            Some(symbol) => Some(self.evaluate(&symbol).await?),
            None => {
                tracing::info!("No eligible candidate for admission");
                None
            }
        };

        Ok(CycleReport { outcome, admission })
    }

    /// Gate any symbol on demand, independent of its rank.
    pub async fn evaluate(&self, symbol: &str) -> Result<Admission> {
        let candidate = self.pair_source.candidate(symbol).await?;
        let decision = self.gate.decide(&candidate);

        tracing::debug!(symbol, ?candidate, ?decision, "gate evaluated");

        self.sink.submit(symbol, &decision).await?;

        Ok(Admission {
            symbol: symbol.to_string(),
            candidate,
            decision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters::{LoggingSink, Snapshot};
    use async_trait::async_trait;
    use serde_json::json;

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot {
            records: vec![
                MetricRecord::new("A", 1000.0, 5.0, 100.0, 2000.0, 20),
                MetricRecord::new("B", 100.0, -1.0, 50.0, 500.0, 1),
            ],
            ..Default::default()
        };
        snapshot.pairs.insert(
            "A".to_string(),
            json!({"pair": {"priceUsd": "0.5", "liquidity": {"usd": 90000}}}),
        );
        snapshot.pairs.insert(
            "B".to_string(),
            json!({"pair": {"priceUsd": "0.02", "liquidity": {"usd": 15000}}}),
        );
        snapshot
    }

    fn runner(config: &ScreenerConfig, snapshot: Snapshot, sink: Arc<LoggingSink>) -> CycleRunner {
        let source = Arc::new(snapshot);
        CycleRunner::new(config, source.clone(), source, sink).unwrap()
    }

    #[tokio::test]
    async fn test_cycle_skips_suspicious_top() {
        let sink = Arc::new(LoggingSink::new());
        let report = runner(&ScreenerConfig::default(), snapshot(), sink.clone())
            .run_cycle()
            .await
            .unwrap();

        assert_eq!(report.outcome.ranked[0].symbol(), "A");
        let admission = report.admission.unwrap();
        assert_eq!(admission.symbol, "B");
        assert!(admission.decision.is_approved());
        assert_eq!(sink.history().len(), 1);
    }

    #[tokio::test]
    async fn test_cycle_without_exclusion_takes_top() {
        let config = ScreenerConfig {
            exclude_suspicious: false,
            ..Default::default()
        };
        let sink = Arc::new(LoggingSink::new());
        let report = runner(&config, snapshot(), sink).run_cycle().await.unwrap();

        assert_eq!(report.admission.unwrap().symbol, "A");
    }

    #[tokio::test]
    async fn test_empty_batch_has_no_admission() {
        let sink = Arc::new(LoggingSink::new());
        let report = runner(&ScreenerConfig::default(), Snapshot::default(), sink.clone())
            .run_cycle()
            .await
            .unwrap();

        assert!(report.admission.is_none());
        assert!(sink.history().is_empty());
    }

    #[tokio::test]
    async fn test_all_suspicious_has_no_admission() {
        let mut snapshot = snapshot();
        snapshot.records.truncate(1);
        let sink = Arc::new(LoggingSink::new());
        let report = runner(&ScreenerConfig::default(), snapshot, sink)
            .run_cycle()
            .await
            .unwrap();

        assert!(report.admission.is_none());
        assert!(report.outcome.is_suspicious("A"));
    }

    #[tokio::test]
    async fn test_missing_pair_fields_deny_incomplete() {
        let mut snapshot = snapshot();
        snapshot.pairs.insert("B".to_string(), json!({"pair": {"priceUsd": "0.02"}}));
        let sink = Arc::new(LoggingSink::new());
        let report = runner(&ScreenerConfig::default(), snapshot, sink)
            .run_cycle()
            .await
            .unwrap();

        let admission = report.admission.unwrap();
        assert_eq!(admission.decision, Decision::deny(Reason::IncompleteData));
    }

    #[tokio::test]
    async fn test_unknown_pair_is_an_error_not_a_denial() {
        let mut snapshot = snapshot();
        snapshot.pairs.clear();
        let sink = Arc::new(LoggingSink::new());
        let err = runner(&ScreenerConfig::default(), snapshot, sink.clone())
            .run_cycle()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert!(sink.history().is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_on_demand() {
        let sink = Arc::new(LoggingSink::new());
        let runner = runner(&ScreenerConfig::default(), snapshot(), sink);

        // suspicious symbols can still be gated explicitly
        let admission = runner.evaluate("A").await.unwrap();
        assert!(admission.decision.is_approved());
        assert_eq!(admission.candidate, AdmissionCandidate::new(Some(0.5), Some(90_000.0)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ScreenerConfig::default();
        config.scoring.weights = ScoreWeights::new(0.1, 0.1, 0.1, 0.1);
        let source = Arc::new(snapshot());
        let result = CycleRunner::new(&config, source.clone(), source, Arc::new(LoggingSink::new()));
        assert!(matches!(result, Err(Error::InvalidWeights { .. })));
    }

    struct FailingSource;

    #[async_trait]
    impl MetricSource for FailingSource {
        async fn metric_batch(&self) -> Result<Vec<MetricRecord>> {
            Err(Error::Source("upstream unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let pairs = Arc::new(snapshot());
        let runner = CycleRunner::new(
            &ScreenerConfig::default(),
            Arc::new(FailingSource),
            pairs,
            Arc::new(LoggingSink::new()),
        )
        .unwrap();

        let err = runner.run_cycle().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
