//! Analysis request construction and validation

use crate::error::ValidationError;
use crate::portfolio::{DEFAULT_INITIAL_CASH, Portfolio};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One hedge fund analysis job, serialized verbatim as the body of
/// `POST /hedge-fund`
///
/// A request is built once, validated, submitted once, and discarded.
/// Construction goes through [`AnalysisRequest::builder`], which keeps the
/// ticker list upper-cased and free of duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub tickers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub portfolio: Portfolio,
    pub show_reasoning: bool,
    pub selected_analysts: Vec<String>,
    pub model_name: String,
    pub model_provider: String,
}

impl AnalysisRequest {
    /// Create a new request builder
    pub fn builder() -> AnalysisRequestBuilder {
        AnalysisRequestBuilder::default()
    }

    /// Check the request against the submission rules
    ///
    /// Rejects: an empty ticker list, an empty analyst set, a missing model
    /// name or provider, and a start date after the end date (only checked
    /// when both are present).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tickers.is_empty() {
            return Err(ValidationError::EmptyTickers);
        }

        if self.selected_analysts.is_empty() {
            return Err(ValidationError::EmptyAnalysts);
        }

        if self.model_name.trim().is_empty() {
            return Err(ValidationError::MissingModelName);
        }

        if self.model_provider.trim().is_empty() {
            return Err(ValidationError::MissingModelProvider);
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ValidationError::DateRange { start, end });
            }
        }

        Ok(())
    }
}

/// Normalize user ticker input: trim and upper-case
fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Builder for [`AnalysisRequest`]
///
/// Tickers are deduplicated on insertion. When no portfolio is supplied,
/// [`build`](AnalysisRequestBuilder::build) creates a flat one covering the
/// tickers with the default cash balance.
#[derive(Debug, Default)]
pub struct AnalysisRequestBuilder {
    tickers: Vec<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    portfolio: Option<Portfolio>,
    cash: Option<f64>,
    show_reasoning: bool,
    selected_analysts: Vec<String>,
    model_name: Option<String>,
    model_provider: Option<String>,
}

impl AnalysisRequestBuilder {
    /// Add a single ticker; empty and duplicate symbols are ignored
    pub fn ticker(mut self, raw: impl AsRef<str>) -> Self {
        let ticker = normalize_ticker(raw.as_ref());
        if !ticker.is_empty() && !self.tickers.contains(&ticker) {
            self.tickers.push(ticker);
        }
        self
    }

    /// Add several tickers at once
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ticker in tickers {
            self = self.ticker(ticker);
        }
        self
    }

    /// Set the start of the analysis window
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the end of the analysis window
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Supply a starting portfolio instead of the generated flat one
    pub fn portfolio(mut self, portfolio: Portfolio) -> Self {
        self.portfolio = Some(portfolio);
        self
    }

    /// Cash balance for the generated portfolio (ignored when a full
    /// portfolio is supplied)
    pub fn initial_cash(mut self, cash: f64) -> Self {
        self.cash = Some(cash);
        self
    }

    /// Include analyst reasoning in the response
    pub fn show_reasoning(mut self, show: bool) -> Self {
        self.show_reasoning = show;
        self
    }

    /// Add a single analyst identifier
    pub fn analyst(mut self, analyst: impl Into<String>) -> Self {
        let analyst = analyst.into();
        if !self.selected_analysts.contains(&analyst) {
            self.selected_analysts.push(analyst);
        }
        self
    }

    /// Add several analyst identifiers at once
    pub fn analysts<I, S>(mut self, analysts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for analyst in analysts {
            self = self.analyst(analyst);
        }
        self
    }

    /// Set the model name and provider
    pub fn model(mut self, name: impl Into<String>, provider: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self.model_provider = Some(provider.into());
        self
    }

    /// Build and validate the request
    pub fn build(self) -> Result<AnalysisRequest, ValidationError> {
        let portfolio = self.portfolio.unwrap_or_else(|| {
            Portfolio::with_initial_cash(
                self.tickers.iter().cloned(),
                self.cash.unwrap_or(DEFAULT_INITIAL_CASH),
            )
        });

        let request = AnalysisRequest {
            tickers: self.tickers,
            start_date: self.start_date,
            end_date: self.end_date,
            portfolio,
            show_reasoning: self.show_reasoning,
            selected_analysts: self.selected_analysts,
            model_name: self.model_name.unwrap_or_default(),
            model_provider: self.model_provider.unwrap_or_default(),
        };

        request.validate()?;
        Ok(request)
    }
}
