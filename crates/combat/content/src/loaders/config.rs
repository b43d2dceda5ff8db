//! Combat AI configuration loader.

use std::path::Path;

use combat_core::CombatAiConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat AI configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults. The result is validated, so a
    /// returned config can always build an orchestrator.
    pub fn load(path: &Path) -> LoadResult<CombatAiConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    pub fn from_toml_str(content: &str) -> LoadResult<CombatAiConfig> {
        let config: CombatAiConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::from_toml_str(
            "emergency_hp_threshold = 0.15\nenable_performance_tracking = false\n",
        )
        .unwrap();
        assert_eq!(config.emergency_hp_threshold, 0.15);
        assert!(!config.enable_performance_tracking);
        assert_eq!(
            config.retreat_hp_threshold,
            CombatAiConfig::DEFAULT_RETREAT_HP_THRESHOLD
        );
    }

    #[test]
    fn out_of_order_thresholds_are_rejected() {
        let err = ConfigLoader::from_toml_str(
            "emergency_hp_threshold = 0.5\nretreat_hp_threshold = 0.3\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("emergency"), "{err}");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::from_toml_str("emergency_hp_threshold = \"low\"").is_err());
    }
}
