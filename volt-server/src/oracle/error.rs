//! Oracle client error types.

/// Errors from the generative-model client.
///
/// None of these cross the estimation or reconciliation boundary; callers
/// absorb them into deterministic fallback values.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid or missing API key
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the model API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON for the expected shape
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The reply carried no candidate text
    #[error("no data returned from the model")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = OracleError::Empty;
        assert_eq!(err.to_string(), "no data returned from the model");

        let err = OracleError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = OracleError::Json {
            message: "expected number".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
    }
}
