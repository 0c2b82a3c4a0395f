// crates/universe/src/scoring.rs
use crate::ranking;
use common::{round_to, Error, MetricRecord, Result, ScoreWeights, ScoredRecord, Trend};
use rayon::prelude::*;

/// Batches at least this large are scored on the rayon pool
pub const PARALLEL_BATCH_MIN: usize = 256;

/// Weighted composite scorer
///
/// Volume and transaction count are dampened (`ln(1 + x)` and `sqrt`) so a
/// single heavy-tailed metric cannot dominate; price change and liquidity
/// enter linearly since upstream already normalizes them.
#[derive(Debug, Clone, Copy)]
pub struct CompositeScorer {
    weights: ScoreWeights,
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
        }
    }
}

impl CompositeScorer {
    /// Fails with `InvalidWeights` unless the weights sum to 1.0.
    pub fn new(weights: ScoreWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Composite score rounded to two decimal places
    pub fn score(&self, record: &MetricRecord) -> Result<f64> {
        record.validate()?;

        let volume_score = self.normalize_volume(record.volume_24h);
        let activity_score = self.normalize_activity(record.tx_count);

        let score = volume_score * self.weights.volume_24h
            + record.price_change * self.weights.price_change
            + activity_score * self.weights.tx_count
            + record.liquidity * self.weights.liquidity;

        if !score.is_finite() {
            return Err(Error::invalid_record(
                &record.symbol,
                format!("score overflows: {}", score),
            ));
        }

        Ok(round_to(score, 2))
    }

    /// Score every record with the same weights, keeping input order.
    pub fn score_batch(&self, records: &[MetricRecord]) -> Result<Vec<ScoredRecord>> {
        let scored = if records.len() >= PARALLEL_BATCH_MIN {
            records
                .par_iter()
                .map(|r| self.annotate(r))
                .collect::<Result<Vec<_>>>()?
        } else {
            records
                .iter()
                .map(|r| self.annotate(r))
                .collect::<Result<Vec<_>>>()?
        };

        metrics::counter!("screener_records_scored_total").increment(scored.len() as u64);

        Ok(scored)
    }

    /// Score the batch and order it best-first.
    pub fn rank(&self, records: &[MetricRecord]) -> Result<Vec<ScoredRecord>> {
        let scored = self.score_batch(records)?;
        Ok(ranking::rank_descending(scored))
    }

    fn annotate(&self, record: &MetricRecord) -> Result<ScoredRecord> {
        let score = self.score(record)?;

        Ok(ScoredRecord {
            record: record.clone(),
            score,
            anomaly_ratio: record.anomaly_ratio(),
            trend: Trend::from_price_change(record.price_change),
        })
    }

    fn normalize_volume(&self, volume: f64) -> f64 {
        volume.ln_1p()
    }

    fn normalize_activity(&self, tx_count: f64) -> f64 {
        tx_count.sqrt()
    }
}

/// One-off scoring with explicit weights
pub fn score(record: &MetricRecord, weights: &ScoreWeights) -> Result<f64> {
    CompositeScorer::new(*weights)?.score(record)
}
