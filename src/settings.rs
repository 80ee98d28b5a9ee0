//! Host/session settings
//!
//! Flags the host toggles at runtime that do not change game balance.

use serde::{Deserialize, Serialize};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw hitbox outlines on top of entities
    pub debug_overlay: bool,
    /// Cheat: the player never leaves the invincible state
    pub infinite_invincibility: bool,
    /// Forward particle requests to the host (purely visual)
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_overlay: false,
            infinite_invincibility: false,
            particles: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings from JSON, logging and using defaults on failure
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Serialize settings for the host to persist
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = Settings {
            debug_overlay: true,
            ..Default::default()
        };
        let parsed = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::load_or_default(r#"{ "infinite_invincibility": true }"#);
        assert!(settings.infinite_invincibility);
        assert!(settings.particles);
        assert!(!settings.debug_overlay);
    }
}
