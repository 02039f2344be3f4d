//! Web layer for the EV companion dashboard.
//!
//! Provides the JSON endpoints the browser dashboard talks to: estimates,
//! station search, reading history, and the simulated drive.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
