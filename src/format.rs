//! Response normalization for the technical analysis panel
//!
//! Turns whatever the analysis endpoints answered into the single
//! display-ready [`FormattedAnalysis`] record. The contract is totality:
//! these functions never fail and never return a partial record. Malformed
//! fields fall back field-by-field; a response that cannot be classified at
//! all is replaced wholesale by [`FormattedAnalysis::load_failed`].

use chrono::Utc;
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::classify::{classify, Payload};
use crate::models::{
    FormattedAnalysis, RiskAssessment, TradingAdvice, TrendAnalysis, TrendProbabilities,
    DEFAULT_RISK_SCORE, NO_ADVICE, NO_DATA, RISK_LEVEL_MEDIUM,
};

/// Normalize a decoded analysis response.
///
/// Accepts any JSON value: an API envelope, a flat force-refresh payload,
/// a nested full-analysis payload, or garbage. Always returns a fully
/// populated record.
pub fn format_technical_analysis(response: Value) -> FormattedAnalysis {
    match classify(response) {
        Ok(Payload::ForceRefresh(obj)) => {
            debug!("formatting force-refresh analysis payload");
            map_force_refresh(&obj)
        }
        Ok(Payload::FullAnalysis(obj)) => {
            debug!("formatting full analysis payload");
            map_full_analysis(&obj)
        }
        Err(reason) => {
            warn!("analysis response rejected ({}), substituting fallback", reason);
            FormattedAnalysis::load_failed()
        }
    }
}

/// Normalize a raw response body straight off the HTTP client.
///
/// Some gateways wrap the JSON in extra text, so the first `{...}` span is
/// extracted before parsing. Bodies that still fail to parse get the
/// fallback record.
pub fn format_response_body(body: &str) -> FormattedAnalysis {
    match serde_json::from_str(extract_json(body)) {
        Ok(value) => format_technical_analysis(value),
        Err(e) => {
            warn!("analysis response is not valid JSON ({}), substituting fallback", e);
            FormattedAnalysis::load_failed()
        }
    }
}

/// Extract the JSON object span from a body with surrounding text
fn extract_json(body: &str) -> &str {
    if let (Some(start), Some(end)) = (body.find('{'), body.rfind('}')) {
        if start < end {
            return &body[start..=end];
        }
    }
    body
}

// ============================================================================
// Per-field defaulting
// ============================================================================

fn num_or(obj: &Map<String, Value>, key: &str, default: f64) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn str_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

fn object_or_empty(obj: &Map<String, Value>, key: &str) -> Map<String, Value> {
    match obj.get(key) {
        Some(Value::Object(m)) => m.clone(),
        _ => Map::new(),
    }
}

/// String elements of an array field; anything else becomes empty
fn string_seq_or_empty(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn last_update_or_now(obj: &Map<String, Value>) -> String {
    match obj.get("last_update_time") {
        Some(Value::String(s)) => s.clone(),
        _ => Utc::now().to_rfc3339(),
    }
}

// ============================================================================
// Shape mapping
// ============================================================================

/// Map the flat force-refresh payload onto the panel record
fn map_force_refresh(obj: &Map<String, Value>) -> FormattedAnalysis {
    let current_price = num_or(obj, "current_price", 0.0);

    FormattedAnalysis {
        current_price,
        // Snapshot falls back to the live price before falling back to zero
        snapshot_price: num_or(obj, "snapshot_price", current_price),
        trend_analysis: TrendAnalysis {
            probabilities: TrendProbabilities {
                up: num_or(obj, "trend_up_probability", 0.0),
                sideways: num_or(obj, "trend_sideways_probability", 0.0),
                down: num_or(obj, "trend_down_probability", 0.0),
            },
            summary: str_or(obj, "trend_summary", NO_DATA),
        },
        indicators_analysis: object_or_empty(obj, "indicators_analysis"),
        trading_advice: TradingAdvice {
            action: str_or(obj, "trading_action", NO_ADVICE),
            reason: str_or(obj, "trading_reason", NO_DATA),
            entry_price: num_or(obj, "entry_price", 0.0),
            stop_loss: num_or(obj, "stop_loss", 0.0),
            take_profit: num_or(obj, "take_profit", 0.0),
        },
        risk_assessment: RiskAssessment {
            level: str_or(obj, "risk_level", RISK_LEVEL_MEDIUM),
            score: num_or(obj, "risk_score", DEFAULT_RISK_SCORE),
            details: string_seq_or_empty(obj, "risk_details"),
        },
        last_update_time: last_update_or_now(obj),
    }
}

/// Map the nested full-analysis payload onto the panel record.
///
/// Each sub-object degrades to empty when missing or wrong-typed, so a bare
/// `"trend_analysis": {}` and an absent `trend_analysis` default the same
/// way.
fn map_full_analysis(obj: &Map<String, Value>) -> FormattedAnalysis {
    let trend = object_or_empty(obj, "trend_analysis");
    let probabilities = object_or_empty(&trend, "probabilities");
    let advice = object_or_empty(obj, "trading_advice");
    let risk = object_or_empty(obj, "risk_assessment");
    let current_price = num_or(obj, "current_price", 0.0);

    FormattedAnalysis {
        current_price,
        snapshot_price: num_or(obj, "snapshot_price", current_price),
        trend_analysis: TrendAnalysis {
            probabilities: TrendProbabilities {
                up: num_or(&probabilities, "up", 0.0),
                sideways: num_or(&probabilities, "sideways", 0.0),
                down: num_or(&probabilities, "down", 0.0),
            },
            summary: str_or(&trend, "summary", NO_DATA),
        },
        indicators_analysis: object_or_empty(obj, "indicators_analysis"),
        trading_advice: TradingAdvice {
            action: str_or(&advice, "action", NO_ADVICE),
            reason: str_or(&advice, "reason", NO_DATA),
            entry_price: num_or(&advice, "entry_price", 0.0),
            stop_loss: num_or(&advice, "stop_loss", 0.0),
            take_profit: num_or(&advice, "take_profit", 0.0),
        },
        risk_assessment: RiskAssessment {
            level: str_or(&risk, "level", RISK_LEVEL_MEDIUM),
            score: num_or(&risk, "score", DEFAULT_RISK_SCORE),
            details: string_seq_or_empty(&risk, "details"),
        },
        last_update_time: last_update_or_now(obj),
    }
}
