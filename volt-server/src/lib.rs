//! VoltMind EV companion server.
//!
//! Backend for a dashboard that turns raw telemetry (battery percentage,
//! timestamp, geolocation) into user-facing estimates by delegating
//! inference to a generative model, with deterministic fallbacks when the
//! model fails, is partially correct, or ignores its instructions.

pub mod domain;
pub mod drive;
pub mod estimate;
pub mod history;
pub mod oracle;
pub mod stations;
pub mod web;
