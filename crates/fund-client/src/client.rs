//! Hedge fund analysis API client

use crate::catalog::{Analyst, AnalystsResponse, ModelInfo, ModelsResponse};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::normalize;
use crate::transport::{HttpTransport, RawResponse, Transport};
use fund_core::{AnalysisRequest, AnalysisResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Detail message used when a failure body carries no explanation of its own
const GENERIC_FAILURE_DETAIL: &str = "an error occurred while running the analysis";

/// Client for the analysis API
///
/// One [`submit`](HedgeFundClient::submit) call performs exactly one
/// attempt: validation first (nothing is sent when it fails), then a single
/// POST, then normalization of whatever JSON came back. Retry and backoff
/// policy stays with the caller, since an analysis run is a long,
/// non-idempotent job.
///
/// # Example
///
/// ```no_run
/// use fund_client::{ClientConfig, HedgeFundClient};
/// use fund_core::AnalysisRequest;
///
/// # async fn example() -> fund_client::Result<()> {
/// let client = HedgeFundClient::new(ClientConfig::from_env())?;
///
/// let request = AnalysisRequest::builder()
///     .tickers(["AAPL", "MSFT"])
///     .analyst("warren_buffett")
///     .model("gpt-4o", "OpenAI")
///     .build()?;
///
/// let result = client.submit(&request).await?;
/// for (ticker, decision) in &result.decisions {
///     println!("{ticker}: {} x{}", decision.action, decision.quantity);
/// }
/// # Ok(())
/// # }
/// ```
pub struct HedgeFundClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl HedgeFundClient {
    /// Create a client with the default reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self { config, transport })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate and submit one analysis request, returning the normalized
    /// result
    #[instrument(skip(self, request), fields(tickers = request.tickers.len(), model = %request.model_name))]
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        // Rejected input never reaches the wire
        request.validate()?;

        let url = self.config.endpoint("/hedge-fund")?;
        let body = serde_json::to_value(request)
            .map_err(|e| ClientError::Decode(format!("failed to encode request: {e}")))?;

        debug!("submitting analysis request to {url}");
        let response = self.transport.post_json(&url, &body).await?;
        let payload = parse_success(&response)?;

        let result = normalize::normalize(&payload);
        debug!(
            decisions = result.decisions.len(),
            signal_tickers = result.analyst_signals.len(),
            "analysis response normalized"
        );
        Ok(result)
    }

    /// Fetch the selectable analysts
    pub async fn analysts(&self) -> Result<Vec<Analyst>> {
        let url = self.config.endpoint("/analysts")?;
        let response = self.transport.get(&url).await?;
        let payload = parse_success(&response)?;

        let catalog: AnalystsResponse = serde_json::from_value(payload)
            .map_err(|e| ClientError::Decode(format!("unexpected analysts payload: {e}")))?;
        Ok(catalog.analysts)
    }

    /// Fetch the selectable models
    pub async fn models(&self) -> Result<Vec<ModelInfo>> {
        let url = self.config.endpoint("/models")?;
        let response = self.transport.get(&url).await?;
        let payload = parse_success(&response)?;

        let catalog: ModelsResponse = serde_json::from_value(payload)
            .map_err(|e| ClientError::Decode(format!("unexpected models payload: {e}")))?;
        Ok(catalog.models)
    }
}

/// Turn a raw response into its JSON payload, mapping failure statuses into
/// [`ClientError::Server`]
fn parse_success(response: &RawResponse) -> Result<Value> {
    if !(200..300).contains(&response.status) {
        return Err(ClientError::Server {
            status: response.status,
            detail: error_detail(&response.body),
        });
    }

    serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Decode(format!("response body is not valid JSON: {e}")))
}

/// Pull the backend's own explanation out of a failure body when it has one
fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return GENERIC_FAILURE_DETAIL.to_string();
    };

    value
        .get("detail")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map_or_else(|| GENERIC_FAILURE_DETAIL.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use fund_core::ValidationError;
    use serde_json::json;

    fn stub_client(transport: MockTransport) -> HedgeFundClient {
        HedgeFundClient::with_transport(ClientConfig::default(), Arc::new(transport))
    }

    fn valid_request() -> AnalysisRequest {
        AnalysisRequest::builder()
            .tickers(["AAPL", "MSFT"])
            .analyst("warren_buffett")
            .show_reasoning(true)
            .model("gpt-4o", "OpenAI")
            .build()
            .expect("valid request")
    }

    fn ok_response(payload: Value) -> RawResponse {
        RawResponse {
            status: 200,
            body: payload.to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_request_never_touches_the_wire() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().times(0);
        transport.expect_get().times(0);
        let client = stub_client(transport);

        let request = AnalysisRequest {
            tickers: Vec::new(),
            ..valid_request()
        };
        let err = client.submit(&request).await.unwrap_err();

        assert_eq!(err, ClientError::Validation(ValidationError::EmptyTickers));
    }

    #[tokio::test]
    async fn test_date_range_checked_before_submission() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().times(0);
        let client = stub_client(transport);

        let request = AnalysisRequest {
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            ..valid_request()
        };
        let err = client.submit(&request).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::DateRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_submit_posts_once_and_normalizes() {
        let payload = json!({
            "decisions": {
                "AAPL": {"action": "BUY", "quantity": 5, "confidence": 90, "reasoning": "x"},
                "portfolio_value": 50_000.0
            },
            "analyst_signals": {
                "warren_buffett": {
                    "AAPL": {"signal": "bullish", "confidence": 80, "reasoning": "y"}
                }
            }
        });

        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .withf(|url, body| {
                url == "http://localhost:8000/hedge-fund"
                    && body["tickers"] == json!(["AAPL", "MSFT"])
                    && body["model_name"] == "gpt-4o"
            })
            .times(1)
            .returning(move |_, _| Ok(ok_response(payload.clone())));
        let client = stub_client(transport);

        let result = client.submit(&valid_request()).await.expect("succeeds");

        assert_eq!(result.decisions.len(), 1);
        assert_eq!(result.decisions["AAPL"].quantity, 5);
        assert_eq!(result.portfolio_value, Some(50_000.0));
        let signal = &result.analyst_signals["AAPL"]["warren_buffett"];
        assert_eq!(signal.signal.as_deref(), Some("bullish"));
        assert_eq!(signal.confidence, Some(80.0));
    }

    #[tokio::test]
    async fn test_server_error_detail_from_body() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().times(1).returning(|_, _| {
            Ok(RawResponse {
                status: 422,
                body: json!({"detail": "unknown analyst: elon"}).to_string(),
            })
        });
        let client = stub_client(transport);

        let err = client.submit(&valid_request()).await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Server {
                status: 422,
                detail: "unknown analyst: elon".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_error_field_then_generic() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().times(1).returning(|_, _| {
            Ok(RawResponse {
                status: 500,
                body: json!({"error": "model overloaded"}).to_string(),
            })
        });
        let client = stub_client(transport);
        let err = client.submit(&valid_request()).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Server {
                status: 500,
                detail: "model overloaded".to_string(),
            }
        );

        let mut transport = MockTransport::new();
        transport.expect_post_json().times(1).returning(|_, _| {
            Ok(RawResponse {
                status: 502,
                body: "<html>bad gateway</html>".to_string(),
            })
        });
        let client = stub_client(transport);
        let err = client.submit(&valid_request()).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Server {
                status: 502,
                detail: GENERIC_FAILURE_DETAIL.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .times(1)
            .returning(|_, _| Err(ClientError::Network("connection refused".to_string())));
        let client = stub_client(transport);

        let err = client.submit(&valid_request()).await.unwrap_err();
        assert_eq!(err, ClientError::Network("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_empty_payload_is_an_empty_result_not_an_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_post_json()
            .times(1)
            .returning(|_, _| Ok(ok_response(json!({"note": "nothing to report"}))));
        let client = stub_client(transport);

        let result = client.submit(&valid_request()).await.expect("succeeds");
        assert!(!result.has_content());
        assert_eq!(result.extra["note"], "nothing to report");
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_a_decode_error() {
        let mut transport = MockTransport::new();
        transport.expect_post_json().times(1).returning(|_, _| {
            Ok(RawResponse {
                status: 200,
                body: "not json".to_string(),
            })
        });
        let client = stub_client(transport);

        let err = client.submit(&valid_request()).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_analysts_catalog() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url| url == "http://localhost:8000/analysts")
            .times(1)
            .returning(|_| {
                Ok(ok_response(json!({
                    "analysts": [
                        {"name": "Warren Buffett", "value": "warren_buffett"},
                        {"name": "Cathie Wood", "value": "cathie_wood"}
                    ]
                })))
            });
        let client = stub_client(transport);

        let analysts = client.analysts().await.expect("succeeds");
        assert_eq!(analysts.len(), 2);
        assert_eq!(analysts[0].value, "warren_buffett");
    }

    #[tokio::test]
    async fn test_models_catalog() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url| url == "http://localhost:8000/models")
            .times(1)
            .returning(|_| {
                Ok(ok_response(json!({
                    "models": [{"display": "GPT 4o", "value": "gpt-4o"}]
                })))
            });
        let client = stub_client(transport);

        let models = client.models().await.expect("succeeds");
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].display, "GPT 4o");
    }
}
