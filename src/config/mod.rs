//! Funder profile configuration for the UKRI rules engine.
//!
//! This module provides the funder profile registry, the process-wide
//! instance the validation rules consult, and loading of profiles from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use ukri_rules_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/funders").unwrap();
//! for profile in loader.registry().list_all() {
//!     println!("Loaded funder: {}", profile.name);
//! }
//! ```

pub mod funder_profiles;
mod loader;
mod registry;

pub use loader::ConfigLoader;
pub use registry::{
    DEFAULT_FUNDER_PROFILE_ID, DEFAULT_SUBMISSION_DEADLINE_DAYS, FunderProfileRegistry,
};
