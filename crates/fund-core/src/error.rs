//! Request validation errors

use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised before a request is allowed anywhere near the wire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No tickers in the request
    #[error("at least one ticker is required")]
    EmptyTickers,

    /// No analysts selected
    #[error("at least one analyst must be selected")]
    EmptyAnalysts,

    /// Model name missing
    #[error("a model name is required")]
    MissingModelName,

    /// Model provider missing
    #[error("a model provider is required")]
    MissingModelProvider,

    /// Start date after end date
    #[error("start date {start} is after end date {end}")]
    DateRange { start: NaiveDate, end: NaiveDate },
}
