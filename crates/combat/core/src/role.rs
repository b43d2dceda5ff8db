//! Closed enumeration of tactical roles.

use core::str::FromStr;

use crate::error::ConfigError;

/// Tactical role selecting which tactics implementation drives engagement.
///
/// Roles parse from snake_case names (`"melee_dps"`), case-insensitively.
/// The compact spellings (`"MeleeDPS"`) are accepted as well.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TacticalRole {
    /// Holds aggro, protects the party.
    Tank,
    /// Close-range damage, finishes weakened targets.
    #[strum(to_string = "melee_dps", serialize = "meleedps")]
    MeleeDps,
    /// Keeps distance inside an effective range band.
    #[strum(to_string = "ranged_dps", serialize = "rangeddps")]
    RangedDps,
    /// Elemental caster, SP-gated.
    #[strum(to_string = "magic_dps", serialize = "magicdps")]
    MagicDps,
    /// Heals the party before attacking anything.
    Support,
    /// Switches between the other policies based on the situation.
    #[default]
    Hybrid,
}

impl TacticalRole {
    pub const ALL: [TacticalRole; 6] = [
        TacticalRole::Tank,
        TacticalRole::MeleeDps,
        TacticalRole::RangedDps,
        TacticalRole::MagicDps,
        TacticalRole::Support,
        TacticalRole::Hybrid,
    ];

    /// Parses a role name, failing with a configuration error.
    ///
    /// Unknown names are rejected; there is no fallback role.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        TacticalRole::from_str(name.trim()).map_err(|_| ConfigError::UnknownRole(name.to_owned()))
    }

    /// Suggests a role for a job identifier.
    ///
    /// Matching is by substring on the lowercase job name so that advanced
    /// classes ("lord_knight", "high_wizard") map like their base class.
    pub fn for_job(job: &str) -> Self {
        const TABLE: &[(&[&str], TacticalRole)] = &[
            (&["swordman", "knight", "crusader", "paladin"], TacticalRole::Tank),
            (
                &["thief", "assassin", "rogue", "monk", "champion"],
                TacticalRole::MeleeDps,
            ),
            (
                &["archer", "hunter", "sniper", "gunslinger", "bard", "dancer"],
                TacticalRole::RangedDps,
            ),
            (
                &["mage", "wizard", "sage", "professor", "warlock"],
                TacticalRole::MagicDps,
            ),
            (&["acolyte", "priest", "bishop"], TacticalRole::Support),
        ];

        let job = job.to_ascii_lowercase();
        TABLE
            .iter()
            .find(|(needles, _)| needles.iter().any(|needle| job.contains(needle)))
            .map(|(_, role)| *role)
            .unwrap_or(TacticalRole::Hybrid)
    }

    /// Returns true for roles whose primary output is damage.
    pub const fn is_offensive(self) -> bool {
        matches!(
            self,
            TacticalRole::MeleeDps | TacticalRole::RangedDps | TacticalRole::MagicDps
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_and_compact_names() {
        assert_eq!(TacticalRole::parse("tank"), Ok(TacticalRole::Tank));
        assert_eq!(TacticalRole::parse("melee_dps"), Ok(TacticalRole::MeleeDps));
        assert_eq!(TacticalRole::parse("MeleeDPS"), Ok(TacticalRole::MeleeDps));
        assert_eq!(TacticalRole::parse(" Support "), Ok(TacticalRole::Support));
    }

    #[test]
    fn unknown_role_is_a_config_error() {
        assert_eq!(
            TacticalRole::parse("berserker"),
            Err(ConfigError::UnknownRole("berserker".to_owned()))
        );
        assert!(TacticalRole::parse("").is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for role in TacticalRole::ALL {
            assert_eq!(TacticalRole::parse(&role.to_string()), Ok(role));
        }
    }

    #[test]
    fn job_suggestions() {
        assert_eq!(TacticalRole::for_job("Lord_Knight"), TacticalRole::Tank);
        assert_eq!(TacticalRole::for_job("high_wizard"), TacticalRole::MagicDps);
        assert_eq!(TacticalRole::for_job("priest"), TacticalRole::Support);
        assert_eq!(TacticalRole::for_job("novice"), TacticalRole::Hybrid);
    }
}
