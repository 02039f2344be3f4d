//! Gemini HTTP client.
//!
//! Production [`Oracle`] adapter over the `generateContent` REST API.
//! Handles authentication, structured-output and grounding request shapes,
//! and conversion of grounding chunks to domain records.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::domain::GroundingRecord;

use super::error::OracleError;
use super::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, LatLng, RetrievalConfig,
    Schema, Tool, ToolConfig,
};
use super::{GroundedReply, Oracle};

/// Default base URL for the Gemini API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for both pipelines.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini client.
///
/// The API key is passed in explicitly; there is no process-wide client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, OracleError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| OracleError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-goog-api-key"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            model: config.model,
        })
    }

    /// POST a `generateContent` request and decode the response.
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, OracleError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OracleError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OracleError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OracleError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// The response schema required of every estimate reply.
fn estimate_schema() -> Schema {
    Schema::object(vec![
        ("rangeKm", Schema::scalar("NUMBER")),
        ("timeLeftHours", Schema::scalar("NUMBER")),
        ("efficiencyNote", Schema::scalar("STRING")),
    ])
}

impl Oracle for GeminiClient {
    async fn generate_estimate(&self, prompt: &str) -> Result<String, OracleError> {
        let mut request = GenerateContentRequest::from_prompt(prompt);
        request.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(estimate_schema()),
        });

        let response = self.generate(&request).await?;
        response.text().ok_or(OracleError::Empty)
    }

    async fn generate_grounded(
        &self,
        prompt: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<GroundedReply, OracleError> {
        let mut request = GenerateContentRequest::from_prompt(prompt);
        request.tools = Some(vec![Tool::google_maps()]);
        request.tool_config = Some(ToolConfig {
            retrieval_config: Some(RetrievalConfig {
                lat_lng: LatLng {
                    latitude,
                    longitude,
                },
            }),
        });

        let response = self.generate(&request).await?;

        // Drop chunks carrying neither a title nor a link; they cannot
        // contribute anything to the merge.
        let grounding = response
            .maps_chunks()
            .into_iter()
            .filter(|c| c.title.is_some() || c.uri.is_some())
            .map(|c| GroundingRecord {
                title: c.title.clone(),
                uri: c.uri.clone(),
            })
            .collect();

        Ok(GroundedReply {
            // An absent text body is not an error here: the reconciler
            // falls back to building stations from grounding alone.
            text: response.text().unwrap_or_default(),
            grounding,
        })
    }
}
