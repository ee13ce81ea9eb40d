//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading funder profiles
//! from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::FunderProfile;

use super::registry::FunderProfileRegistry;

/// Loads funder profiles from a directory of YAML files.
///
/// # Directory Structure
///
/// Each `.yaml` file holds exactly one funder profile. Other files are ignored.
/// ```text
/// config/funders/
/// ├── ukri.yaml
/// └── wellcome.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use ukri_rules_engine::config::{ConfigLoader, funder_profiles};
///
/// let loader = ConfigLoader::load("./config/funders")?;
/// funder_profiles::install(loader.into_registry())?;
/// # Ok::<(), ukri_rules_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    registry: FunderProfileRegistry,
}

impl ConfigLoader {
    /// Loads every funder profile in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The directory does not exist or contains no `.yaml` files
    /// - Any file contains invalid YAML or is missing a required field
    /// - Two files declare the same profile id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no funder profile files found)", dir_str),
            });
        }

        // Directory order is platform dependent.
        files.sort();

        let mut profiles = Vec::with_capacity(files.len());
        for file in &files {
            let profile = Self::load_yaml::<FunderProfile>(file)?;
            debug!(id = %profile.id, path = %file.display(), "Loaded funder profile");
            profiles.push(profile);
        }

        let registry = FunderProfileRegistry::from_profiles(profiles)?;
        info!(
            path = %dir_str,
            profiles = registry.len(),
            "Loaded funder profile configuration"
        );

        Ok(Self { registry })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded registry.
    pub fn registry(&self) -> &FunderProfileRegistry {
        &self.registry
    }

    /// Consumes the loader, returning the registry.
    pub fn into_registry(self) -> FunderProfileRegistry {
        self.registry
    }

    /// Gets a loaded profile by id.
    pub fn get_funder_profile(&self, id: &str) -> EngineResult<&FunderProfile> {
        self.registry.get(id)
    }
}
