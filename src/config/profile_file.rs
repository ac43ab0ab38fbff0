use crate::profiles::QueryProfile;
use crate::utils::error::{MensaError, Result};
use crate::utils::validation::Validate;
use std::path::Path;

impl QueryProfile {
    /// Loads a custom layout from a TOML file and validates it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MensaError::IoError)?;
        let profile = Self::from_toml_str(&content)?;
        tracing::debug!(
            "loaded profile {} from {}",
            profile.name,
            path.as_ref().display()
        );
        Ok(profile)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let profile: QueryProfile =
            toml::from_str(content).map_err(|e| MensaError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        profile.validate()?;
        Ok(profile)
    }
}
