//! Application state for the UKRI rules engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::FunderProfileRegistry;

/// Shared application state.
///
/// Holds the funder profiles the handlers resolve grants against. Nothing
/// else is kept between requests.
#[derive(Clone)]
pub struct AppState {
    funder_profiles: Arc<FunderProfileRegistry>,
}

impl AppState {
    /// Creates a new application state with the given funder profiles.
    pub fn new(funder_profiles: FunderProfileRegistry) -> Self {
        Self {
            funder_profiles: Arc::new(funder_profiles),
        }
    }

    /// Returns the funder profile registry.
    pub fn funder_profiles(&self) -> &FunderProfileRegistry {
        &self.funder_profiles
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FunderProfileRegistry::builtin())
    }
}
