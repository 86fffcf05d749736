//! Analyst and model catalogs served by the API

use serde::{Deserialize, Serialize};

/// Analysts surfaced first in pickers
pub const FEATURED_ANALYSTS: [&str; 5] = [
    "warren_buffett",
    "ben_graham",
    "bill_ackman",
    "charlie_munger",
    "cathie_wood",
];

/// A selectable analyst strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analyst {
    /// Human-readable name
    pub name: String,
    /// Identifier sent in `selected_analysts`
    pub value: String,
}

impl Analyst {
    pub fn is_featured(&self) -> bool {
        FEATURED_ANALYSTS.contains(&self.value.as_str())
    }
}

/// A selectable language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Human-readable label
    pub display: String,
    /// Identifier sent as `model_name`
    pub value: String,
}

/// Body of `GET /analysts`
#[derive(Debug, Deserialize)]
pub(crate) struct AnalystsResponse {
    pub analysts: Vec<Analyst>,
}

/// Body of `GET /models`
#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// Turn an identifier like `warren_buffett` into `Warren Buffett`
pub fn display_name(ident: &str) -> String {
    ident
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
