//! Technical Analysis Panel - Data Layer
//!
//! Normalizes the heterogeneous responses of the technical-analysis
//! endpoints into the single display-ready record the panel renders:
//! - Unwraps the `{status, data}` API envelope (one level)
//! - Detects the flat force-refresh and nested full-analysis shapes
//! - Defaults every missing or wrong-typed field
//! - Substitutes a complete canned record when nothing is usable
//!
//! The formatter is total: the UI always receives a fully populated record
//! and never has to null-check or handle errors from this layer.
//!
//! # Example
//!
//! ```
//! use ta_panel::format_technical_analysis;
//! use serde_json::json;
//!
//! let record = format_technical_analysis(json!({
//!     "status": "success",
//!     "data": {
//!         "trend_up_probability": 0.6,
//!         "trend_sideways_probability": 0.3,
//!         "trend_down_probability": 0.1,
//!         "current_price": 64000.0
//!     }
//! }));
//!
//! assert_eq!(record.trend_analysis.probabilities.up, 0.6);
//! assert_eq!(record.snapshot_price, 64000.0);
//! ```

pub mod classify;
pub mod format;
pub mod models;

// Re-exports for convenience
pub use classify::{classify, ClassifyError, Payload};
pub use format::{format_response_body, format_technical_analysis};
pub use models::{
    FormattedAnalysis, RiskAssessment, TradingAdvice, TrendAnalysis, TrendProbabilities,
};
