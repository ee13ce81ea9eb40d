//! Funder profile registry.
//!
//! A [`FunderProfileRegistry`] maps funder profile ids to their methodology
//! parameters. It is built once, from the builtin profiles or from YAML via
//! [`ConfigLoader`](super::ConfigLoader), and is read-only afterwards.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::FunderProfile;

/// Profile id used when a caller has no funder to go on.
pub const DEFAULT_FUNDER_PROFILE_ID: &str = "ukri";

/// Submission deadline used when a grant's funder profile is unknown.
pub const DEFAULT_SUBMISSION_DEADLINE_DAYS: u32 = 10;

/// Read-only map of funder profiles keyed by id.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::config::FunderProfileRegistry;
///
/// let registry = FunderProfileRegistry::builtin();
/// let ukri = registry.lookup("ukri").unwrap();
/// assert_eq!(ukri.submission_deadline_days, 10);
/// assert!(registry.lookup("wellcome").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunderProfileRegistry {
    profiles: HashMap<String, FunderProfile>,
}

impl FunderProfileRegistry {
    /// The registry compiled into the crate: UKRI only.
    pub fn builtin() -> Self {
        let ukri = FunderProfile::ukri();
        Self {
            profiles: HashMap::from([(ukri.id.clone(), ukri)]),
        }
    }

    /// Builds a registry from a list of profiles.
    ///
    /// Returns [`EngineError::DuplicateFunderProfile`] if two profiles share an id.
    pub fn from_profiles(profiles: Vec<FunderProfile>) -> EngineResult<Self> {
        let mut map = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            if map.contains_key(&profile.id) {
                return Err(EngineError::DuplicateFunderProfile { id: profile.id });
            }
            map.insert(profile.id.clone(), profile);
        }
        Ok(Self { profiles: map })
    }

    /// Looks up a profile by id.
    pub fn lookup(&self, id: &str) -> Option<&FunderProfile> {
        self.profiles.get(id)
    }

    /// Looks up a profile by id, failing with [`EngineError::FunderProfileNotFound`].
    pub fn get(&self, id: &str) -> EngineResult<&FunderProfile> {
        self.lookup(id)
            .ok_or_else(|| EngineError::FunderProfileNotFound { id: id.to_string() })
    }

    /// All profiles, sorted by id.
    pub fn list_all(&self) -> Vec<&FunderProfile> {
        let mut profiles: Vec<&FunderProfile> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }

    /// Number of registered profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no profiles are registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for FunderProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FunderMethodology, PeriodGranularity, TimeCapture};

    fn create_test_profile(id: &str) -> FunderProfile {
        FunderProfile {
            id: id.to_string(),
            name: format!("{id} funder"),
            fec_rate: None,
            calculation_method: FunderMethodology::HalfDayRate,
            time_capture: TimeCapture::ProjectOnly,
            period_granularity: PeriodGranularity::Weekly,
            requires_pi_signature: false,
            submission_deadline_days: 20,
            working_days_per_year: Some(220),
            notes: String::new(),
        }
    }

    #[test]
    fn test_builtin_contains_only_ukri() {
        let registry = FunderProfileRegistry::builtin();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("ukri"), Some(&FunderProfile::ukri()));
    }

    #[test]
    fn test_lookup_miss_returns_none() {
        let registry = FunderProfileRegistry::builtin();
        assert!(registry.lookup("horizon-europe").is_none());
    }

    #[test]
    fn test_get_miss_returns_not_found_error() {
        let registry = FunderProfileRegistry::builtin();
        match registry.get("nihr") {
            Err(EngineError::FunderProfileNotFound { id }) => assert_eq!(id, "nihr"),
            other => panic!("Expected FunderProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_from_profiles_rejects_duplicates() {
        let result = FunderProfileRegistry::from_profiles(vec![
            create_test_profile("wellcome"),
            create_test_profile("wellcome"),
        ]);

        match result {
            Err(EngineError::DuplicateFunderProfile { id }) => assert_eq!(id, "wellcome"),
            other => panic!("Expected DuplicateFunderProfile, got {other:?}"),
        }
    }

    #[test]
    fn test_list_all_sorted_by_id() {
        let registry = FunderProfileRegistry::from_profiles(vec![
            FunderProfile::ukri(),
            create_test_profile("charity"),
            create_test_profile("wellcome"),
        ])
        .unwrap();

        let ids: Vec<&str> = registry.list_all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["charity", "ukri", "wellcome"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = FunderProfileRegistry::from_profiles(vec![]).unwrap();
        assert!(registry.is_empty());
        assert!(registry.list_all().is_empty());
    }
}
