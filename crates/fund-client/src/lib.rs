//! Client for the hedge fund analysis API
//!
//! This crate owns the request/response contract with the external
//! analysis service:
//!
//! - [`HedgeFundClient`]: validates and submits one analysis request per
//!   call (`POST /hedge-fund`), and wraps the analyst/model catalog
//!   endpoints (`GET /analysts`, `GET /models`)
//! - [`normalize`]: folds the several JSON shapes the endpoint produces
//!   into the canonical [`fund_core::AnalysisResult`]
//! - [`Submission`]: the `Idle -> Submitting -> {Succeeded, Failed}`
//!   lifecycle of one run, as a caller observes it
//! - [`ClientError`]: the failure taxonomy, kept distinguishable so callers
//!   can choose between "fix your input", "check your connection", and
//!   "the analysis failed: ..."
//!
//! Transport is pluggable through the [`Transport`] trait; the default is
//! a reqwest-backed [`HttpTransport`]. The client performs exactly one
//! attempt per submission and sets no timeout of its own.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod submission;
pub mod transport;

// Re-export main types for convenience
pub use catalog::{Analyst, FEATURED_ANALYSTS, ModelInfo, display_name};
pub use client::HedgeFundClient;
pub use config::{ClientConfig, DEFAULT_API_BASE};
pub use error::{ClientError, Result};
pub use normalize::{ResponseShape, detect, normalize};
pub use submission::{Submission, SubmissionState, TransitionError};
pub use transport::{HttpTransport, RawResponse, Transport};
