//! Driver configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use combat_core::TacticalRole;

/// Everything the driver needs besides the snapshot stream itself.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// TOML file with [`combat_core::CombatAiConfig`] overrides.
    pub config_path: Option<PathBuf>,
    /// Fixed role; when absent the role follows the character's job.
    pub role: Option<String>,
    /// RON skill catalog replacing the built-in one.
    pub skills_path: Option<PathBuf>,
    /// Directory for a log file in addition to stderr.
    pub log_dir: Option<PathBuf>,
    /// Snapshot file; stdin when absent.
    pub input: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_CONFIG` - Path to a TOML decision config (default: built-in thresholds)
    /// - `COMBAT_ROLE` - Tactical role name, e.g. `tank` (default: derived from job)
    /// - `COMBAT_SKILLS` - Path to a RON skill catalog (default: built-in catalog)
    /// - `COMBAT_LOG_DIR` - Directory for `combat-ai.log` (default: stderr only)
    pub fn from_env() -> Self {
        Self {
            config_path: read_env::<PathBuf>("COMBAT_CONFIG"),
            role: env::var("COMBAT_ROLE").ok().filter(|r| !r.trim().is_empty()),
            skills_path: read_env::<PathBuf>("COMBAT_SKILLS"),
            log_dir: read_env::<PathBuf>("COMBAT_LOG_DIR"),
            input: None,
        }
    }

    /// First positional argument names the snapshot file.
    #[must_use]
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        self.input = args.nth(1).map(PathBuf::from);
        self
    }

    /// Role for a character of `job` under this configuration.
    pub fn role_for(&self, job: &str) -> Option<TacticalRole> {
        match self.role {
            Some(_) => None,
            None => Some(TacticalRole::for_job(job)),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_argument_is_the_input() {
        let args = ["combat-ai", "ticks.jsonl"].into_iter().map(String::from);
        let config = CliConfig::default().with_args(args);
        assert_eq!(config.input, Some(PathBuf::from("ticks.jsonl")));
    }

    #[test]
    fn job_decides_role_unless_fixed() {
        let auto = CliConfig::default();
        assert_eq!(auto.role_for("high_priest"), Some(TacticalRole::Support));

        let fixed = CliConfig {
            role: Some("tank".into()),
            ..CliConfig::default()
        };
        assert_eq!(fixed.role_for("high_priest"), None);
    }
}
