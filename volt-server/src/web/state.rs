//! Application state for the web layer.

use std::sync::Arc;

use crate::drive::DriveSimulator;
use crate::estimate::Estimator;
use crate::history::ReadingLog;
use crate::oracle::GeminiClient;
use crate::stations::StationFinder;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Range/time estimation pipeline
    pub estimator: Arc<Estimator<GeminiClient>>,

    /// Station search pipeline
    pub finder: Arc<StationFinder<GeminiClient>>,

    /// Saved reading history
    pub log: Arc<ReadingLog>,

    /// Simulated drive task
    pub drive: Arc<DriveSimulator<GeminiClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        estimator: Estimator<GeminiClient>,
        finder: StationFinder<GeminiClient>,
        log: ReadingLog,
        drive: DriveSimulator<GeminiClient>,
    ) -> Self {
        Self {
            estimator: Arc::new(estimator),
            finder: Arc::new(finder),
            log: Arc::new(log),
            drive: Arc::new(drive),
        }
    }
}
