//! Saved analysis records

use chrono::{DateTime, Utc};
use fund_core::{AnalysisRequest, AnalysisResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a saved analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    InProgress,
    Completed,
    Failed,
}

/// One persisted analysis: the parameters it ran with and whatever results
/// it produced, owned by the user who ran it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub parameters: Value,
    pub results: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub status: AnalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Payload for creating a record; id, owner, and timestamp are assigned by
/// the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalysis {
    pub title: String,
    pub description: String,
    pub parameters: Value,
    pub results: Option<Value>,
    pub status: AnalysisStatus,
    pub error_message: Option<String>,
}

impl NewAnalysis {
    /// Record a finished run: the request it was built from plus its
    /// normalized result
    pub fn completed(
        title: impl Into<String>,
        description: impl Into<String>,
        request: &AnalysisRequest,
        result: &AnalysisResult,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            parameters: serde_json::to_value(request).unwrap_or(Value::Null),
            results: serde_json::to_value(result).ok(),
            status: AnalysisStatus::Completed,
            error_message: None,
        }
    }

    /// Record a run that failed after submission
    pub fn failed(
        title: impl Into<String>,
        request: &AnalysisRequest,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            parameters: serde_json::to_value(request).unwrap_or(Value::Null),
            results: None,
            status: AnalysisStatus::Failed,
            error_message: Some(error_message.into()),
        }
    }
}

/// Partial update for a record; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub results: Option<Value>,
    pub status: Option<AnalysisStatus>,
    pub error_message: Option<String>,
}

impl AnalysisPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.results.is_none()
            && self.status.is_none()
            && self.error_message.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AnalysisRequest {
        AnalysisRequest::builder()
            .ticker("AAPL")
            .analyst("warren_buffett")
            .model("gpt-4o", "OpenAI")
            .build()
            .expect("valid request")
    }

    #[test]
    fn test_completed_draft_keeps_parameters() {
        let draft = NewAnalysis::completed(
            "AAPL run",
            "single ticker smoke test",
            &request(),
            &AnalysisResult::default(),
        );

        assert_eq!(draft.status, AnalysisStatus::Completed);
        assert_eq!(draft.parameters["tickers"], serde_json::json!(["AAPL"]));
        assert!(draft.results.is_some());
        assert!(draft.error_message.is_none());
    }

    #[test]
    fn test_failed_draft_keeps_message() {
        let draft = NewAnalysis::failed("AAPL run", &request(), "connection refused");

        assert_eq!(draft.status, AnalysisStatus::Failed);
        assert!(draft.results.is_none());
        assert_eq!(draft.error_message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_status_wire_names() {
        let status = serde_json::to_value(AnalysisStatus::InProgress).expect("serializes");
        assert_eq!(status, "in_progress");
    }
}
