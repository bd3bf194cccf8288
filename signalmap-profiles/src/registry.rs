//! Profile Registry
//!
//! Thread-safe store of named deployment profiles. Applications usually load
//! the built-ins once at startup, add their own profiles from disk and then
//! hand out clones to whichever task builds estimators.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use crate::{defaults, Profile, ProfileError};

/// Thread-safe profile registry keyed by profile name
pub struct ProfileRegistry {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl ProfileRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Registry pre-loaded with the built-in profiles
    pub fn with_defaults() -> Result<Self, ProfileError> {
        let registry = Self::new();
        registry.load_defaults()?;
        Ok(registry)
    }

    /// Validate and register a profile, replacing any profile of the same name
    pub fn register(&self, profile: Profile) -> Result<(), ProfileError> {
        profile.validate()?;

        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| ProfileError::Io("Lock poisoned".to_string()))?;

        let name = profile.name.clone();
        if profiles.insert(name.clone(), profile).is_some() {
            log::debug!("Replaced profile {}", name);
        } else {
            log::debug!("Registered profile {}", name);
        }
        Ok(())
    }

    /// Get a copy of a profile by name
    pub fn get(&self, name: &str) -> Result<Profile, ProfileError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| ProfileError::Io("Lock poisoned".to_string()))?;

        profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }

    /// Check whether a profile is registered
    pub fn contains(&self, name: &str) -> bool {
        self.profiles
            .read()
            .map(|profiles| profiles.contains_key(name))
            .unwrap_or(false)
    }

    /// Remove a profile, returning it if it was registered
    pub fn remove(&self, name: &str) -> Option<Profile> {
        self.profiles.write().ok()?.remove(name)
    }

    /// Registered profile names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .profiles
            .read()
            .map(|profiles| profiles.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.profiles.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register every built-in profile
    pub fn load_defaults(&self) -> Result<(), ProfileError> {
        for profile in defaults::builtin_profiles()? {
            self.register(profile)?;
        }
        log::info!("Loaded {} built-in profiles", defaults::BUILTIN_PROFILES.len());
        Ok(())
    }

    /// Parse, validate and register a JSON profile, returning its name
    pub fn load_str(&self, json: &str) -> Result<String, ProfileError> {
        let profile = Profile::from_json(json)?;
        let name = profile.name.clone();
        self.register(profile)?;
        Ok(name)
    }

    /// Load a JSON profile from disk, returning its name
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<String, ProfileError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ProfileError::Io(format!("{}: {}", path.display(), e)))?;

        match self.load_str(&json) {
            Ok(name) => {
                log::info!("Loaded profile {} from {}", name, path.display());
                Ok(name)
            }
            Err(e) => {
                log::warn!("Rejected profile file {}: {}", path.display(), e);
                Err(e)
            }
        }
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
