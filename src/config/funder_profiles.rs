//! Process-wide funder profile registry.
//!
//! The registry is set at most once. A host that loads profiles from YAML
//! calls [`install`] at startup; otherwise the first [`global`] call falls
//! back to [`FunderProfileRegistry::builtin`]. There is no way to change the
//! registry after that.

use std::sync::OnceLock;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::FunderProfile;

use super::registry::FunderProfileRegistry;

static REGISTRY: OnceLock<FunderProfileRegistry> = OnceLock::new();

/// Installs `registry` as the process-wide registry.
///
/// Fails with [`EngineError::RegistryAlreadyInitialized`] if a registry was
/// already installed or [`global`] has already been called.
pub fn install(registry: FunderProfileRegistry) -> EngineResult<()> {
    let count = registry.len();
    REGISTRY
        .set(registry)
        .map_err(|_| EngineError::RegistryAlreadyInitialized)?;
    info!(profiles = count, "Installed funder profile registry");
    Ok(())
}

/// The process-wide registry.
pub fn global() -> &'static FunderProfileRegistry {
    REGISTRY.get_or_init(FunderProfileRegistry::builtin)
}

/// Looks up a profile in the process-wide registry.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::config::funder_profiles;
///
/// let ukri = funder_profiles::lookup("ukri").unwrap();
/// assert_eq!(ukri.name, "UK Research & Innovation");
/// ```
pub fn lookup(id: &str) -> Option<&'static FunderProfile> {
    global().lookup(id)
}

/// All profiles in the process-wide registry, sorted by id.
pub fn list_all() -> Vec<&'static FunderProfile> {
    global().list_all()
}
