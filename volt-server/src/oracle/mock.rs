//! Deterministic oracle stub for testing without API access.
//!
//! Serves canned replies (or a canned failure) so the estimation and
//! reconciliation logic can be exercised hermetically.

use crate::domain::GroundingRecord;

use super::error::OracleError;
use super::{GroundedReply, Oracle};

/// Stub oracle with fixed replies.
///
/// By default it returns a plausible estimate payload and an empty grounded
/// reply; both can be replaced, and the whole oracle can be switched into a
/// failing mode to exercise fallback paths.
#[derive(Debug, Clone)]
pub struct MockOracle {
    estimate_reply: String,
    grounded_reply: GroundedReply,
    fail: bool,
}

impl Default for MockOracle {
    fn default() -> Self {
        Self {
            estimate_reply:
                r#"{"rangeKm": 250.0, "timeLeftHours": 2.8, "efficiencyNote": "Mild evening conditions."}"#
                    .to_string(),
            grounded_reply: GroundedReply {
                text: String::new(),
                grounding: Vec::new(),
            },
            fail: false,
        }
    }
}

impl MockOracle {
    /// A mock returning the default replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the estimate reply text.
    pub fn with_estimate_reply(mut self, reply: impl Into<String>) -> Self {
        self.estimate_reply = reply.into();
        self
    }

    /// Replace the grounded reply.
    pub fn with_grounded_reply(
        mut self,
        text: impl Into<String>,
        grounding: Vec<GroundingRecord>,
    ) -> Self {
        self.grounded_reply = GroundedReply {
            text: text.into(),
            grounding,
        };
        self
    }

    /// Make every call fail with a service error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check_failure(&self) -> Result<(), OracleError> {
        if self.fail {
            Err(OracleError::Api {
                status: 503,
                message: "mock oracle configured to fail".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl Oracle for MockOracle {
    async fn generate_estimate(&self, _prompt: &str) -> Result<String, OracleError> {
        self.check_failure()?;
        Ok(self.estimate_reply.clone())
    }

    async fn generate_grounded(
        &self,
        _prompt: &str,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<GroundedReply, OracleError> {
        self.check_failure()?;
        Ok(self.grounded_reply.clone())
    }
}
