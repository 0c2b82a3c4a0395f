// crates/adapters/src/dexscreener.rs
//! Pair payload parsing for DexScreener-style responses.
//!
//! Prices arrive as strings (`"priceUsd": "0.0213"`), liquidity usually as a
//! number. Either form is accepted; anything absent, null or unparsable is
//! reported as missing rather than zero.

use common::AdmissionCandidate;
use serde_json::Value;

/// Build a candidate from a `{"pair": {...}}` or `{"pairs": [{...}]}`
/// document, or from a bare pair object.
pub fn candidate_from_pair(payload: &Value) -> AdmissionCandidate {
    let pair = payload
        .get("pair")
        .or_else(|| payload.get("pairs").and_then(|p| p.get(0)))
        .unwrap_or(payload);

    AdmissionCandidate {
        price: pair.get("priceUsd").and_then(numeric),
        liquidity_usd: pair
            .get("liquidity")
            .and_then(|l| l.get("usd"))
            .and_then(numeric),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_price_numeric_liquidity() {
        let payload = json!({
            "pair": { "priceUsd": "0.0213", "liquidity": { "usd": 15000.5 } }
        });
        let candidate = candidate_from_pair(&payload);
        assert_eq!(candidate.price, Some(0.0213));
        assert_eq!(candidate.liquidity_usd, Some(15000.5));
    }

    #[test]
    fn test_pairs_array_uses_first() {
        let payload = json!({
            "pairs": [
                { "priceUsd": "1.5", "liquidity": { "usd": "20000" } },
                { "priceUsd": "9.9", "liquidity": { "usd": 1 } }
            ]
        });
        let candidate = candidate_from_pair(&payload);
        assert_eq!(candidate, AdmissionCandidate::new(Some(1.5), Some(20000.0)));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let candidate = candidate_from_pair(&json!({ "pair": { "priceUsd": null } }));
        assert_eq!(candidate, AdmissionCandidate::default());

        let candidate = candidate_from_pair(&json!({ "pair": { "liquidity": {} } }));
        assert!(!candidate.is_complete());
    }

    #[test]
    fn test_zero_is_not_missing() {
        let candidate = candidate_from_pair(&json!({ "priceUsd": "0", "liquidity": { "usd": 0 } }));
        assert_eq!(candidate, AdmissionCandidate::new(Some(0.0), Some(0.0)));
    }

    #[test]
    fn test_garbage_values_are_missing() {
        let candidate = candidate_from_pair(&json!({
            "pair": { "priceUsd": "n/a", "liquidity": { "usd": "NaN" } }
        }));
        assert_eq!(candidate, AdmissionCandidate::default());
    }
}
