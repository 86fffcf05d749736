//! Response payload normalization
//!
//! The analysis endpoint answers with one of several JSON shapes depending
//! on which stage produced the reply: a full decision set, analyst signals
//! only, a lightweight echo of the run parameters, or (for older runs and
//! partial failures) an arbitrary record. This module folds all of them
//! into one canonical [`AnalysisResult`] so nothing downstream has to
//! re-derive shape detection.

use fund_core::{AnalysisResult, AnalystSignal, Decision};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Recognized payload variants, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `portfolio_value` plus a `tickers` array: a parameter echo, not a
    /// full result
    ParameterEcho,
    /// A `decisions` object, possibly with `analyst_signals` alongside
    Decisions,
    /// `analyst_signals` without decisions
    AnalystSignals,
    /// Nothing recognizable; surfaced as an opaque record, not an error
    Opaque,
}

/// Classify a payload; first match wins
pub fn detect(payload: &Value) -> ResponseShape {
    let Some(object) = payload.as_object() else {
        return ResponseShape::Opaque;
    };

    if object.contains_key("portfolio_value") && object.get("tickers").is_some_and(Value::is_array)
    {
        return ResponseShape::ParameterEcho;
    }
    if object.contains_key("decisions") {
        return ResponseShape::Decisions;
    }
    if object.contains_key("analyst_signals") {
        return ResponseShape::AnalystSignals;
    }
    ResponseShape::Opaque
}

/// Fold a raw payload into the canonical result shape
///
/// Pure and idempotent: the same payload always normalizes to a
/// structurally identical result. A payload carrying neither decisions nor
/// signals produces an empty (but valid) result.
pub fn normalize(payload: &Value) -> AnalysisResult {
    let Some(object) = payload.as_object() else {
        return AnalysisResult::default();
    };

    match detect(payload) {
        ResponseShape::ParameterEcho => AnalysisResult {
            portfolio_value: object.get("portfolio_value").and_then(Value::as_f64),
            tickers: object.get("tickers").map(string_list).unwrap_or_default(),
            ..AnalysisResult::default()
        },
        ResponseShape::Decisions => {
            let mut result = AnalysisResult::default();
            if let Some(decisions) = object.get("decisions").and_then(Value::as_object) {
                decode_decisions(decisions, &mut result);
            }
            if let Some(signals) = object.get("analyst_signals").and_then(Value::as_object) {
                result.analyst_signals = pivot_signals(signals);
            }
            result
        }
        ResponseShape::AnalystSignals => {
            let mut result = AnalysisResult::default();
            if let Some(signals) = object.get("analyst_signals").and_then(Value::as_object) {
                result.analyst_signals = pivot_signals(signals);
            }
            result
        }
        ResponseShape::Opaque => AnalysisResult {
            extra: object.clone().into_iter().collect(),
            ..AnalysisResult::default()
        },
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Interpret every key of a `decisions` object except the literal
/// `portfolio_value`, which rides along inside it
fn decode_decisions(decisions: &Map<String, Value>, result: &mut AnalysisResult) {
    for (key, value) in decisions {
        if key == "portfolio_value" {
            result.portfolio_value = value.as_f64();
            continue;
        }
        if let Some(decision) = decode_decision(value) {
            result.decisions.insert(key.clone(), decision);
        }
    }
}

fn decode_decision(value: &Value) -> Option<Decision> {
    let object = value.as_object()?;

    // Actions are upper-cased but otherwise passed through untouched:
    // an unrecognized action stays visible instead of degrading to HOLD.
    let action = object
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN")
        .to_uppercase();

    Some(Decision {
        action,
        quantity: object.get("quantity").and_then(Value::as_i64).unwrap_or(0),
        // Confidence is expected on a 0-100 scale; out-of-range values are
        // deliberately not clamped here, that is a display concern.
        confidence: object.get("confidence").and_then(Value::as_f64),
        reasoning: object
            .get("reasoning")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Pivot analyst-major signal data (analyst -> ticker -> signal) into the
/// ticker-major canonical form
///
/// Risk-manager style analysts emit a top-level `reasoning` entry next to
/// their per-ticker data; that key is not a ticker and is skipped.
fn pivot_signals(
    signals: &Map<String, Value>,
) -> HashMap<String, HashMap<String, AnalystSignal>> {
    let mut by_ticker: HashMap<String, HashMap<String, AnalystSignal>> = HashMap::new();

    for (analyst, data) in signals {
        let Some(entries) = data.as_object() else {
            continue;
        };
        for (ticker, value) in entries {
            if ticker == "reasoning" {
                continue;
            }
            if let Some(signal) = decode_signal(value) {
                by_ticker
                    .entry(ticker.clone())
                    .or_default()
                    .insert(analyst.clone(), signal);
            }
        }
    }

    by_ticker
}

fn decode_signal(value: &Value) -> Option<AnalystSignal> {
    match value {
        Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        // Persisted runs sometimes flatten a signal to its bare label
        Value::String(label) => Some(AnalystSignal {
            signal: Some(label.clone()),
            ..AnalystSignal::default()
        }),
        _ => None,
    }
}
