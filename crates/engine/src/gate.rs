// crates/engine/src/gate.rs
use common::*;

/// Admission gate - decides if a candidate pair is healthy enough to trade
///
/// Thresholds are fixed for the lifetime of a gate. Different policy means
/// a different gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmissionGate {
    policy: GatePolicy,
}

impl AdmissionGate {
    pub fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    /// Rules in order: incomplete data, healthy metrics, everything else.
    pub fn decide(&self, candidate: &AdmissionCandidate) -> Decision {
        let decision = match (candidate.price, candidate.liquidity_usd) {
            (Some(price), Some(liquidity_usd)) => {
                if liquidity_usd > self.policy.min_liquidity_usd && price > self.policy.min_price {
                    Decision::approve(Reason::HealthyMetrics)
                } else {
                    Decision::deny(Reason::LowLiquidityOrPrice)
                }
            }
            _ => Decision::deny(Reason::IncompleteData),
        };

        let action = match decision.action {
            Action::Approve => "approve",
            Action::Deny => "deny",
        };
        metrics::counter!("gate_decisions_total", "action" => action).increment(1);

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(price: Option<f64>, liquidity_usd: Option<f64>) -> AdmissionCandidate {
        AdmissionCandidate::new(price, liquidity_usd)
    }

    #[test]
    fn test_incomplete_data() {
        let gate = AdmissionGate::default();

        let decision = gate.decide(&candidate(None, Some(50_000.0)));
        assert_eq!(decision, Decision::deny(Reason::IncompleteData));
        assert_eq!(decision.reason.as_str(), "Incomplete data");

        assert_eq!(
            gate.decide(&candidate(Some(1.0), None)).reason,
            Reason::IncompleteData
        );
        assert_eq!(gate.decide(&candidate(None, None)).reason, Reason::IncompleteData);
    }

    #[test]
    fn test_gate_pass() {
        let gate = AdmissionGate::default();
        let decision = gate.decide(&candidate(Some(0.02), Some(15_000.0)));
        assert!(decision.is_approved());
        assert_eq!(decision.reason.as_str(), "Healthy metrics");
    }

    #[test]
    fn test_low_price() {
        let decision = AdmissionGate::default().decide(&candidate(Some(0.005), Some(15_000.0)));
        assert_eq!(decision, Decision::deny(Reason::LowLiquidityOrPrice));
        assert_eq!(decision.reason.as_str(), "Low liquidity or price");
    }

    #[test]
    fn test_low_liquidity() {
        let decision = AdmissionGate::default().decide(&candidate(Some(0.02), Some(9_000.0)));
        assert_eq!(decision, Decision::deny(Reason::LowLiquidityOrPrice));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let gate = AdmissionGate::default();
        assert!(!gate.decide(&candidate(Some(0.02), Some(10_000.0))).is_approved());
        assert!(!gate.decide(&candidate(Some(0.01), Some(15_000.0))).is_approved());
    }

    #[test]
    fn test_zero_values_are_evaluated_not_incomplete() {
        let decision = AdmissionGate::default().decide(&candidate(Some(0.0), Some(0.0)));
        assert_eq!(decision.reason, Reason::LowLiquidityOrPrice);
    }

    #[test]
    fn test_custom_policy() {
        let gate = AdmissionGate::new(GatePolicy {
            min_liquidity_usd: 100_000.0,
            min_price: 1.0,
        });

        assert!(!gate.decide(&candidate(Some(0.02), Some(15_000.0))).is_approved());
        assert!(gate.decide(&candidate(Some(2.0), Some(150_000.0))).is_approved());
    }

    #[test]
    fn test_deterministic() {
        let gate = AdmissionGate::default();
        let c = candidate(Some(0.5), Some(20_000.0));
        assert_eq!(gate.decide(&c), gate.decide(&c));
    }
}
