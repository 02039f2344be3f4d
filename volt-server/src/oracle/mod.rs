//! Generative-model oracle boundary.
//!
//! Both estimation and station search delegate their inference to a remote
//! generative model. This module defines the narrow [`Oracle`] seam those
//! pipelines depend on, together with one production adapter
//! ([`GeminiClient`]) and one deterministic stub ([`MockOracle`]) so the
//! reconciliation logic can be exercised without network access.
//!
//! Key characteristics of the upstream service:
//! - Estimation uses schema-constrained generation, so a successful reply
//!   is JSON text with the three required fields.
//! - Station search uses location-grounded retrieval: the reply carries a
//!   free-form text body plus an out-of-band list of grounding metadata
//!   records (title/uri pairs, either possibly absent).
//! - A failed call is final. There is no retry.

mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::GroundingRecord;

pub use client::{GeminiClient, GeminiConfig};
pub use error::OracleError;
pub use mock::MockOracle;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, LatLng, MapsChunk, Part, RetrievalConfig, Schema, Tool,
    ToolConfig,
};

/// A grounded model reply: the text body plus the metadata side-channel.
///
/// Grounding records lacking both a title and a uri are discarded by the
/// adapter before they reach this type.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundedReply {
    pub text: String,
    pub grounding: Vec<GroundingRecord>,
}

/// The inference boundary used by the estimation and station pipelines.
///
/// Implementations issue at most one outstanding request per call and
/// surface every failure as an [`OracleError`]; callers convert failures
/// into deterministic fallback values.
pub trait Oracle: Send + Sync {
    /// Request a schema-constrained estimate. Returns the raw JSON text of
    /// the reply.
    fn generate_estimate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, OracleError>> + Send;

    /// Request a location-grounded reply seeded with the given coordinate.
    fn generate_grounded(
        &self,
        prompt: &str,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<GroundedReply, OracleError>> + Send;
}
