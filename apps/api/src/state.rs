use std::sync::Arc;

use crate::analysis::scoring::MatchScorer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable match scorer. Default: TfidfMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
}
