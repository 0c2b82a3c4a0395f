// crates/common/src/config.rs
use crate::{Error, GatePolicy, Result, ScoreWeights, DEFAULT_ANOMALY_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Environment variables with this prefix override file values,
/// e.g. `SCREENER__SCORING__ANOMALY_THRESHOLD=0.2`.
pub const ENV_PREFIX: &str = "SCREENER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    pub scoring: ScoringConfig,
    pub gate: GatePolicy,
    /// Skip suspicious symbols when picking the admission target
    pub exclude_suspicious: bool,
    pub snapshot_path: Option<String>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            gate: GatePolicy::default(),
            exclude_suspicious: true,
            snapshot_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub anomaly_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
        }
    }
}

impl ScreenerConfig {
    /// Load from an optional config file plus environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: ScreenerConfig = settings.try_deserialize()?;
        cfg.validate()?;
        tracing::debug!(?cfg, "configuration loaded");
        Ok(cfg)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let cfg: ScreenerConfig = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.weights.validate()?;

        let threshold = self.scoring.anomaly_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidThreshold(threshold));
        }

        if !self.gate.min_liquidity_usd.is_finite() || !self.gate.min_price.is_finite() {
            return Err(Error::Config(format!(
                "Gate thresholds must be finite: {:?}",
                self.gate
            )));
        }

        Ok(())
    }
}
