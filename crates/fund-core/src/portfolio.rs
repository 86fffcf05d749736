//! Starting portfolio state for an analysis run

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cash balance used when the caller does not specify one
pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;

/// Long/short holding for a single ticker
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub long: f64,
    pub short: f64,
    pub long_cost_basis: f64,
    pub short_cost_basis: f64,
}

impl Position {
    /// True when no shares are held either direction
    pub fn is_flat(&self) -> bool {
        self.long == 0.0 && self.short == 0.0
    }
}

/// Cash plus per-ticker positions, serialized as the `portfolio` field of
/// the analysis request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub cash: f64,
    pub margin_requirement: f64,
    pub positions: HashMap<String, Position>,
}

impl Portfolio {
    /// Build a fresh portfolio: the given cash balance and a flat position
    /// for every ticker
    pub fn with_initial_cash<I, S>(tickers: I, cash: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cash,
            margin_requirement: 0.0,
            positions: tickers
                .into_iter()
                .map(|ticker| (ticker.into(), Position::default()))
                .collect(),
        }
    }

    /// Look up the position for a ticker, if the portfolio tracks it
    pub fn position(&self, ticker: &str) -> Option<&Position> {
        self.positions.get(ticker)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            cash: DEFAULT_INITIAL_CASH,
            margin_requirement: 0.0,
            positions: HashMap::new(),
        }
    }
}
