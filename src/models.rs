//! Data models for the technical analysis panel

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

// ============================================================================
// Sentinels & Defaults
// ============================================================================

/// Placeholder for a missing text field
pub const NO_DATA: &str = "no data";

/// Placeholder for a missing trading action
pub const NO_ADVICE: &str = "no advice";

/// Risk level assumed when the backend does not provide one
pub const RISK_LEVEL_MEDIUM: &str = "medium";

/// Risk score assumed when the backend does not provide one
pub const DEFAULT_RISK_SCORE: f64 = 50.0;

/// Summary shown when the response could not be used at all
pub const LOAD_FAILED_SUMMARY: &str = "Data load failed, please refresh and retry";

/// Advice reason shown when the response could not be used at all
pub const LOAD_FAILED_REASON: &str = "Data load failed";

/// Risk detail shown when the response could not be used at all
pub const LOAD_FAILED_RISK_DETAIL: &str = "Data load failed, unable to assess risk";

/// Per-indicator annotation in the degraded record
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// Per-indicator trend annotation in the degraded record
pub const TREND_NEUTRAL: &str = "neutral";

// ============================================================================
// Panel Record
// ============================================================================

/// Up/sideways/down trend probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendProbabilities {
    pub up: f64,
    pub sideways: f64,
    pub down: f64,
}

/// Trend section of the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub probabilities: TrendProbabilities,
    pub summary: String,
}

/// Trading advice section of the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingAdvice {
    pub action: String,
    pub reason: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// Risk assessment section of the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: String,
    pub score: f64,
    pub details: Vec<String>,
}

/// The one record the panel renders.
///
/// Every field is always populated: the formatter substitutes defaults for
/// anything missing or wrong-typed, so the UI never null-checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedAnalysis {
    pub current_price: f64,
    pub snapshot_price: f64,
    pub trend_analysis: TrendAnalysis,
    /// Indicator name -> indicator result, passed through opaquely
    pub indicators_analysis: Map<String, Value>,
    pub trading_advice: TradingAdvice,
    pub risk_assessment: RiskAssessment,
    /// RFC 3339 timestamp
    pub last_update_time: String,
}

impl FormattedAnalysis {
    /// Degraded record substituted when the response cannot be used.
    ///
    /// Prices zeroed, probabilities near-uniform, and all eleven panel
    /// indicators present with zero payloads so every widget still renders.
    pub fn load_failed() -> Self {
        Self {
            current_price: 0.0,
            snapshot_price: 0.0,
            trend_analysis: TrendAnalysis {
                probabilities: TrendProbabilities {
                    up: 0.33,
                    sideways: 0.34,
                    down: 0.33,
                },
                summary: LOAD_FAILED_SUMMARY.to_string(),
            },
            indicators_analysis: fallback_indicators(),
            trading_advice: TradingAdvice {
                action: NO_ADVICE.to_string(),
                reason: LOAD_FAILED_REASON.to_string(),
                entry_price: 0.0,
                stop_loss: 0.0,
                take_profit: 0.0,
            },
            risk_assessment: RiskAssessment {
                level: RISK_LEVEL_MEDIUM.to_string(),
                score: DEFAULT_RISK_SCORE,
                details: vec![LOAD_FAILED_RISK_DETAIL.to_string()],
            },
            last_update_time: Utc::now().to_rfc3339(),
        }
    }
}

/// Indicators with a scalar value payload
const SCALAR_INDICATORS: [&str; 8] = [
    "RSI",
    "BIAS",
    "PSY",
    "VWAP",
    "FundingRate",
    "ExchangeNetflow",
    "NUPL",
    "MayerMultiple",
];

/// The full indicator set with zeroed payloads and "failed" annotations
pub fn fallback_indicators() -> Map<String, Value> {
    let failed = |value: Value| {
        json!({
            "value": value,
            "analysis": ANALYSIS_FAILED,
            "support_trend": TREND_NEUTRAL,
        })
    };

    let mut out = Map::new();
    for name in SCALAR_INDICATORS {
        out.insert(name.to_string(), failed(json!(0)));
    }
    out.insert(
        "MACD".to_string(),
        failed(json!({ "line": 0, "signal": 0, "histogram": 0 })),
    );
    out.insert(
        "BollingerBands".to_string(),
        failed(json!({ "upper": 0, "middle": 0, "lower": 0 })),
    );
    out.insert(
        "DMI".to_string(),
        failed(json!({ "plus_di": 0, "minus_di": 0, "adx": 0 })),
    );
    out
}
