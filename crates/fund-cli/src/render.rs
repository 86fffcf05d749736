//! Plain-text rendering of analysis output

use fund_client::{Analyst, ModelInfo, display_name};
use fund_core::{AnalysisResult, SignalKind};

/// Render headers and rows as a pipe-separated table
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut output = String::new();
    output.push_str(&headers.join(" | "));
    output.push('\n');
    for row in rows {
        output.push_str(&row.join(" | "));
        output.push('\n');
    }
    output
}

pub fn error_line(error: &str) -> String {
    format!("❌ Error: {error}")
}

fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

fn format_confidence(confidence: Option<f64>) -> String {
    confidence.map_or_else(|| "N/A".to_string(), |c| format!("{}%", c.round()))
}

fn signal_marker(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::Bullish => "▲",
        SignalKind::Bearish => "▼",
        SignalKind::Neutral => "•",
        SignalKind::Unknown => "?",
    }
}

/// Render a normalized result the way the results pane lays it out:
/// portfolio value, trading recommendations, then analyst signals per
/// ticker
pub fn result_report(result: &AnalysisResult, show_reasoning: bool) -> String {
    let mut output = String::new();

    if let Some(value) = result.portfolio_value {
        output.push_str(&format!("Portfolio Value: {}\n\n", format_currency(value)));
    }

    if !result.tickers.is_empty() && !result.has_content() {
        // Parameter echo: nothing to recommend, just restate the run
        output.push_str(&format!("Tickers: {}\n", result.tickers.join(", ")));
        return output;
    }

    output.push_str("Trading Recommendations\n");
    if result.decisions.is_empty() {
        output.push_str("No trades are recommended at this time.\n");
    } else {
        let headers = ["Ticker", "Action", "Quantity", "Confidence"]
            .map(String::from)
            .to_vec();
        let mut tickers: Vec<&String> = result.decisions.keys().collect();
        tickers.sort();
        let rows: Vec<Vec<String>> = tickers
            .iter()
            .filter_map(|ticker| result.decisions.get(*ticker).map(|d| (ticker, d)))
            .map(|(ticker, decision)| {
                vec![
                    (*ticker).clone(),
                    decision.action.clone(),
                    decision.quantity.to_string(),
                    format_confidence(decision.confidence),
                ]
            })
            .collect();
        output.push_str(&format_table(&headers, &rows));

        if show_reasoning {
            for ticker in &tickers {
                if let Some(reasoning) = result
                    .decisions
                    .get(*ticker)
                    .and_then(|d| d.reasoning.as_deref())
                {
                    output.push_str(&format!("\n{ticker}: {reasoning}\n"));
                }
            }
        }
    }

    if !result.analyst_signals.is_empty() {
        output.push_str("\nAnalyst Signals\n");
        let mut tickers: Vec<&String> = result.analyst_signals.keys().collect();
        tickers.sort();

        for ticker in tickers {
            let Some(signals) = result.analyst_signals.get(ticker) else {
                continue;
            };
            output.push_str(&format!("\n{ticker}\n"));

            let headers = ["Analyst", "Signal", "Confidence"].map(String::from).to_vec();
            let mut analysts: Vec<&String> = signals.keys().collect();
            analysts.sort();
            let rows: Vec<Vec<String>> = analysts
                .iter()
                .filter_map(|analyst| signals.get(*analyst).map(|s| (analyst, s)))
                .map(|(analyst, signal)| {
                    vec![
                        display_name(analyst),
                        format!(
                            "{} {}",
                            signal_marker(signal.kind()),
                            signal.signal.as_deref().unwrap_or("N/A")
                        ),
                        format_confidence(signal.confidence),
                    ]
                })
                .collect();
            output.push_str(&format_table(&headers, &rows));

            if show_reasoning {
                for analyst in &analysts {
                    if let Some(reasoning) =
                        signals.get(*analyst).and_then(|s| s.reasoning_text())
                    {
                        output.push_str(&format!("{}: {reasoning}\n", display_name(analyst)));
                    }
                }
            }
        }
    }

    if !result.has_content() {
        if result.extra.is_empty() {
            output.push_str("No analyst signals are available for this run.\n");
        } else {
            // Unrecognized payload: show what came back rather than nothing
            output.push_str("Additional information:\n");
            let mut keys: Vec<&String> = result.extra.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(value) = result.extra.get(key) {
                    output.push_str(&format!("  {}: {value}\n", display_name(key)));
                }
            }
        }
    }

    output
}

pub fn analyst_table(analysts: &[Analyst]) -> String {
    let headers = ["Analyst", "Identifier"].map(String::from).to_vec();
    let rows: Vec<Vec<String>> = analysts
        .iter()
        .map(|analyst| vec![analyst.name.clone(), analyst.value.clone()])
        .collect();
    format_table(&headers, &rows)
}

pub fn model_table(models: &[ModelInfo]) -> String {
    let headers = ["Model", "Identifier"].map(String::from).to_vec();
    let rows: Vec<Vec<String>> = models
        .iter()
        .map(|model| vec![model.display.clone(), model.value.clone()])
        .collect();
    format_table(&headers, &rows)
}
