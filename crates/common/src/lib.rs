// crates/common/src/lib.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod error;

pub use self::config::ScreenerConfig;
pub use error::{Error, Result};

/// Tolerance used when checking that score weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Anomaly ratio a record must strictly exceed to be flagged.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 0.12;

/// Liquidity (USD) a pair must strictly exceed to be admitted.
pub const DEFAULT_MIN_LIQUIDITY_USD: f64 = 10_000.0;

/// Price (USD) a pair must strictly exceed to be admitted.
pub const DEFAULT_MIN_PRICE_USD: f64 = 0.01;

/// One token's observation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub symbol: String,
    pub volume_24h: f64,
    pub price_change: f64,
    pub tx_count: f64,
    pub liquidity: f64,
    pub flagged: u64,
}

impl MetricRecord {
    pub fn new(
        symbol: impl Into<String>,
        volume_24h: f64,
        price_change: f64,
        tx_count: f64,
        liquidity: f64,
        flagged: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            volume_24h,
            price_change,
            tx_count,
            liquidity,
            flagged,
        }
    }

    /// Fraction of transactions flagged upstream. Zero transactions means
    /// zero ratio. Not capped at 1.0 when `flagged > tx_count`.
    pub fn anomaly_ratio(&self) -> f64 {
        if self.tx_count > 0.0 {
            self.flagged as f64 / self.tx_count
        } else {
            0.0
        }
    }

    /// Reject records the scorer cannot evaluate.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::invalid_record(&self.symbol, "symbol is empty"));
        }

        let fields = [
            ("volume_24h", self.volume_24h, true),
            ("price_change", self.price_change, false),
            ("tx_count", self.tx_count, true),
            ("liquidity", self.liquidity, true),
        ];

        for (name, value, non_negative) in fields {
            if !value.is_finite() {
                return Err(Error::invalid_record(
                    &self.symbol,
                    format!("{} is not finite: {}", name, value),
                ));
            }
            if non_negative && value < 0.0 {
                return Err(Error::invalid_record(
                    &self.symbol,
                    format!("{} is negative: {}", name, value),
                ));
            }
        }

        Ok(())
    }
}

/// Weights applied to the four composite-score terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub volume_24h: f64,
    pub price_change: f64,
    pub tx_count: f64,
    pub liquidity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            volume_24h: 0.4,
            price_change: 0.3,
            tx_count: 0.2,
            liquidity: 0.1,
        }
    }
}

impl ScoreWeights {
    pub fn new(volume_24h: f64, price_change: f64, tx_count: f64, liquidity: f64) -> Self {
        Self {
            volume_24h,
            price_change,
            tx_count,
            liquidity,
        }
    }

    pub fn sum(&self) -> f64 {
        self.volume_24h + self.price_change + self.tx_count + self.liquidity
    }

    pub fn validate(&self) -> Result<()> {
        let sum = self.sum();
        // NaN fails this comparison as well
        if (sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE {
            Ok(())
        } else {
            Err(Error::InvalidWeights { sum })
        }
    }
}

/// Direction of the 24h price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub fn from_price_change(price_change: f64) -> Self {
        if price_change > 0.0 {
            Trend::Rising
        } else if price_change < 0.0 {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

/// Metric record with its derived score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: MetricRecord,
    pub score: f64,
    pub anomaly_ratio: f64,
    pub trend: Trend,
}

impl ScoredRecord {
    pub fn symbol(&self) -> &str {
        &self.record.symbol
    }
}

/// Live pair data the admission gate needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdmissionCandidate {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub liquidity_usd: Option<f64>,
}

impl AdmissionCandidate {
    pub fn new(price: Option<f64>, liquidity_usd: Option<f64>) -> Self {
        Self {
            price,
            liquidity_usd,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.liquidity_usd.is_some()
    }
}

/// Admission thresholds, both strict lower bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GatePolicy {
    pub min_liquidity_usd: f64,
    pub min_price: f64,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            min_liquidity_usd: DEFAULT_MIN_LIQUIDITY_USD,
            min_price: DEFAULT_MIN_PRICE_USD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Approve,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    #[serde(rename = "Incomplete data")]
    IncompleteData,
    #[serde(rename = "Healthy metrics")]
    HealthyMetrics,
    #[serde(rename = "Low liquidity or price")]
    LowLiquidityOrPrice,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::IncompleteData => "Incomplete data",
            Reason::HealthyMetrics => "Healthy metrics",
            Reason::LowLiquidityOrPrice => "Low liquidity or price",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admission outcome handed to the execution side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub reason: Reason,
}

impl Decision {
    pub fn approve(reason: Reason) -> Self {
        Self {
            action: Action::Approve,
            reason,
        }
    }

    pub fn deny(reason: Reason) -> Self {
        Self {
            action: Action::Deny,
            reason,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.action == Action::Approve
    }
}

/// Round the exact binary value to `places` decimal places, ties to even.
/// Fixed-precision formatting does this without the extra rounding step a
/// multiply-round-divide introduces.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
