//! Response shape detection for the technical analysis endpoints
//!
//! The backend answers in several shapes depending on the route and cache
//! state: a `{status, data}` API envelope, the flat force-refresh record,
//! or the nested full-analysis record. Classification is by key presence,
//! so partially populated payloads still land in the right bucket and get
//! per-field defaulting downstream.

use serde_json::{Map, Value};
use thiserror::Error;

/// Why a response was rejected before mapping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("response is empty")]
    EmptyResponse,
    #[error("api returned status '{0}'")]
    ErrorStatus(String),
    #[error("api envelope carries no data")]
    MissingData,
    #[error("unrecognized response shape")]
    UnrecognizedShape,
}

/// A recognized analysis payload
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Flat record returned by the force-refresh endpoint
    ForceRefresh(Map<String, Value>),
    /// Nested record returned by the standard analysis endpoint
    FullAnalysis(Map<String, Value>),
}

/// JSON rendering of a falsy value: null, false, 0, ""
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn is_force_refresh(obj: &Map<String, Value>) -> bool {
    [
        "trend_up_probability",
        "trend_sideways_probability",
        "trend_down_probability",
    ]
    .iter()
    .all(|key| obj.contains_key(*key))
}

fn is_full_analysis(obj: &Map<String, Value>) -> bool {
    [
        "trend_analysis",
        "indicators_analysis",
        "trading_advice",
        "risk_assessment",
    ]
    .iter()
    .all(|key| obj.contains_key(*key))
}

/// Unwrap one level of `{status, data}` envelope.
///
/// Objects without a string `status` pass through untouched. A wrapped
/// value is unwrapped exactly once: if `data` is itself an envelope it is
/// left as-is and will fail the shape checks.
fn unwrap_envelope(value: Value) -> Result<Value, ClassifyError> {
    match value {
        Value::Object(mut obj) => {
            let status = match obj.get("status") {
                Some(Value::String(s)) => s.clone(),
                _ => return Ok(Value::Object(obj)),
            };

            if status != "success" {
                return Err(ClassifyError::ErrorStatus(status));
            }

            match obj.remove("data") {
                Some(data) if !is_empty_value(&data) => Ok(data),
                _ => Err(ClassifyError::MissingData),
            }
        }
        other => Ok(other),
    }
}

/// Classify a decoded response body into one of the known payload shapes.
pub fn classify(value: Value) -> Result<Payload, ClassifyError> {
    if is_empty_value(&value) {
        return Err(ClassifyError::EmptyResponse);
    }

    match unwrap_envelope(value)? {
        Value::Object(obj) if is_force_refresh(&obj) => Ok(Payload::ForceRefresh(obj)),
        Value::Object(obj) if is_full_analysis(&obj) => Ok(Payload::FullAnalysis(obj)),
        _ => Err(ClassifyError::UnrecognizedShape),
    }
}
