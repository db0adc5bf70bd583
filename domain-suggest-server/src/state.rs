//! Shared application state.

use domain_suggest_lib::AvailabilityChecker;
use std::sync::Arc;

/// State injected into every request handler.
///
/// The checker owns the provider client and holds the process-wide rate
/// budget and result cache handles, so one `Arc` covers everything the
/// handlers need.
#[derive(Clone)]
pub struct AppState {
    /// Shared availability checker built at startup
    pub checker: Arc<AvailabilityChecker>,
}

impl AppState {
    /// Wrap a checker into the shared state.
    pub fn new(checker: AvailabilityChecker) -> Self {
        Self {
            checker: Arc::new(checker),
        }
    }
}
