//! Normalized analysis result types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display classification for a trading action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Buy,
    Sell,
    Hold,
    Unknown,
}

impl ActionKind {
    /// Classify an action string; case-insensitive
    pub fn classify(action: &str) -> Self {
        match action.to_uppercase().as_str() {
            "BUY" => Self::Buy,
            "SELL" => Self::Sell,
            "HOLD" => Self::Hold,
            _ => Self::Unknown,
        }
    }
}

/// Display classification for an analyst signal
///
/// BUY/BULLISH and SELL/BEARISH collapse to the same direction, matching
/// the mixed vocabularies different analyst kinds emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    Bullish,
    Bearish,
    Neutral,
    Unknown,
}

impl SignalKind {
    /// Classify a signal string; case-insensitive
    pub fn classify(signal: &str) -> Self {
        match signal.to_uppercase().as_str() {
            "BULLISH" | "BUY" | "STRONG BUY" => Self::Bullish,
            "BEARISH" | "SELL" | "STRONG SELL" => Self::Bearish,
            "NEUTRAL" | "HOLD" => Self::Neutral,
            _ => Self::Unknown,
        }
    }
}

/// Resolved trading decision for one ticker
///
/// `action` keeps whatever string the backend produced, upper-cased.
/// Unrecognized actions are NOT coerced to HOLD so the caller can see the
/// raw value; `kind()` reports them as [`ActionKind::Unknown`]. Confidence
/// is on a 0-100 scale but is passed through unclamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Decision {
    pub fn kind(&self) -> ActionKind {
        ActionKind::classify(&self.action)
    }
}

/// One analyst's take on one ticker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalystSignal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Free text for most analysts; some emit a structured object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_position_size: Option<f64>,
}

impl AnalystSignal {
    pub fn kind(&self) -> SignalKind {
        self.signal
            .as_deref()
            .map_or(SignalKind::Unknown, SignalKind::classify)
    }

    /// Render the reasoning for display, whatever shape it arrived in
    pub fn reasoning_text(&self) -> Option<String> {
        match &self.reasoning {
            Some(serde_json::Value::String(text)) => Some(text.clone()),
            Some(value) => serde_json::to_string_pretty(value).ok(),
            None => None,
        }
    }
}

/// Canonical result of one analysis run
///
/// Every response variant the API produces is folded into this shape:
/// decisions keyed by ticker, analyst signals keyed ticker-first, the
/// overall portfolio value when reported, a ticker echo for parameter-only
/// payloads, and a raw `extra` record for anything unrecognized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub decisions: HashMap<String, Decision>,
    #[serde(default)]
    pub analyst_signals: HashMap<String, HashMap<String, AnalystSignal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tickers: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AnalysisResult {
    /// True when the run produced at least one decision or signal
    ///
    /// A result without either is not an error; whether it surfaces as an
    /// empty state or a failure is the caller's call.
    pub fn has_content(&self) -> bool {
        !self.decisions.is_empty() || !self.analyst_signals.is_empty()
    }

    /// All tickers mentioned anywhere in the result, sorted
    pub fn mentioned_tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self
            .decisions
            .keys()
            .chain(self.analyst_signals.keys())
            .chain(self.tickers.iter())
            .cloned()
            .collect();
        tickers.sort();
        tickers.dedup();
        tickers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_classification() {
        assert_eq!(ActionKind::classify("BUY"), ActionKind::Buy);
        assert_eq!(ActionKind::classify("sell"), ActionKind::Sell);
        assert_eq!(ActionKind::classify("Hold"), ActionKind::Hold);
        assert_eq!(ActionKind::classify("SHORT"), ActionKind::Unknown);
    }

    #[test]
    fn test_signal_classification_collapses_vocabularies() {
        assert_eq!(SignalKind::classify("bullish"), SignalKind::Bullish);
        assert_eq!(SignalKind::classify("BUY"), SignalKind::Bullish);
        assert_eq!(SignalKind::classify("STRONG SELL"), SignalKind::Bearish);
        assert_eq!(SignalKind::classify("neutral"), SignalKind::Neutral);
        assert_eq!(SignalKind::classify("hold"), SignalKind::Neutral);
        assert_eq!(SignalKind::classify("sideways"), SignalKind::Unknown);
    }

    #[test]
    fn test_unrecognized_action_not_coerced() {
        let decision = Decision {
            action: "SHORT_SQUEEZE".to_string(),
            quantity: 10,
            confidence: Some(55.0),
            reasoning: None,
        };

        assert_eq!(decision.action, "SHORT_SQUEEZE");
        assert_eq!(decision.kind(), ActionKind::Unknown);
    }

    #[test]
    fn test_reasoning_text_handles_both_shapes() {
        let text_signal = AnalystSignal {
            signal: Some("bullish".to_string()),
            confidence: Some(70.0),
            reasoning: Some(json!("strong fundamentals")),
            max_position_size: None,
        };
        assert_eq!(
            text_signal.reasoning_text().as_deref(),
            Some("strong fundamentals")
        );

        let structured_signal = AnalystSignal {
            reasoning: Some(json!({"pe_ratio": 12.5})),
            ..AnalystSignal::default()
        };
        let rendered = structured_signal.reasoning_text().expect("rendered");
        assert!(rendered.contains("pe_ratio"));

        assert_eq!(AnalystSignal::default().reasoning_text(), None);
    }

    #[test]
    fn test_has_content() {
        let mut result = AnalysisResult::default();
        assert!(!result.has_content());

        result.analyst_signals.insert(
            "AAPL".to_string(),
            HashMap::from([("warren_buffett".to_string(), AnalystSignal::default())]),
        );
        assert!(result.has_content());
    }

    #[test]
    fn test_mentioned_tickers_sorted_unique() {
        let mut result = AnalysisResult {
            tickers: vec!["NVDA".to_string()],
            ..AnalysisResult::default()
        };
        result.decisions.insert(
            "MSFT".to_string(),
            Decision {
                action: "HOLD".to_string(),
                quantity: 0,
                confidence: None,
                reasoning: None,
            },
        );
        result
            .analyst_signals
            .insert("MSFT".to_string(), HashMap::new());

        assert_eq!(result.mentioned_tickers(), vec!["MSFT", "NVDA"]);
    }
}
