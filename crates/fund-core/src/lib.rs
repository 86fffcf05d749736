//! Core data model for the hedge fund analysis client
//!
//! This crate defines the request and result types shared by the HTTP
//! client, the persistence layer, and the CLI:
//!
//! - [`AnalysisRequest`]: a validated analysis job description (tickers,
//!   date range, starting portfolio, analyst set, model choice)
//! - [`Portfolio`] / [`Position`]: the starting state an analysis runs from
//! - [`AnalysisResult`]: the canonical shape every API response variant is
//!   normalized into (per-ticker decisions, per-ticker analyst signals,
//!   portfolio value)
//!
//! # Example
//!
//! ```
//! use fund_core::AnalysisRequest;
//!
//! let request = AnalysisRequest::builder()
//!     .ticker("aapl")
//!     .ticker("MSFT")
//!     .analyst("warren_buffett")
//!     .model("gpt-4o", "OpenAI")
//!     .build()
//!     .expect("request is valid");
//!
//! assert_eq!(request.tickers, vec!["AAPL", "MSFT"]);
//! ```

pub mod error;
pub mod portfolio;
pub mod request;
pub mod result;

// Re-export main types for convenience
pub use error::ValidationError;
pub use portfolio::{DEFAULT_INITIAL_CASH, Portfolio, Position};
pub use request::{AnalysisRequest, AnalysisRequestBuilder};
pub use result::{ActionKind, AnalysisResult, AnalystSignal, Decision, SignalKind};
