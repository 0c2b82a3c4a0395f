// crates/universe/src/ranking.rs
use common::ScoredRecord;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Best score first. `sort_by_key` is stable, so equal scores keep
/// their input order.
pub fn rank_descending(mut scored: Vec<ScoredRecord>) -> Vec<ScoredRecord> {
    scored.sort_by_key(|r| Reverse(OrderedFloat(r.score)));
    scored
}

/// Assign 1-based ranks to an already ordered slice.
pub fn with_ranks(ranked: &[ScoredRecord]) -> Vec<(usize, &ScoredRecord)> {
    ranked.iter().enumerate().map(|(i, r)| (i + 1, r)).collect()
}
