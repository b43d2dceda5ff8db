use std::io::Write;

use combat_content::{ConfigLoader, SkillCatalog};
use combat_core::CombatAiConfig;
use tempfile::NamedTempFile;

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn config_from_toml_file() {
    let file = file_with(
        r#"
emergency_hp_threshold = 0.1
retreat_hp_threshold = 0.3
engage_threat_threshold = 0.8
retreat_when_solo_vs_boss = false
"#,
    );

    let config = ConfigLoader::load(file.path()).expect("valid config");
    assert_eq!(config.emergency_hp_threshold, 0.1);
    assert_eq!(config.engage_threat_threshold, 0.8);
    assert!(!config.retreat_when_solo_vs_boss);
    assert_eq!(config.threat_radius, CombatAiConfig::DEFAULT_THREAT_RADIUS);
}

#[test]
fn invalid_config_file_names_the_path() {
    let file = file_with("engage_threat_threshold = 4.0\n");
    let err = ConfigLoader::load(file.path()).unwrap_err();
    assert!(err.to_string().contains(&file.path().display().to_string()), "{err}");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(ConfigLoader::load(&dir.path().join("absent.toml")).is_err());
    assert!(SkillCatalog::load(&dir.path().join("absent.ron")).is_err());
}

#[test]
fn skill_catalog_from_ron_file() {
    let file = file_with(
        r#"(
    jobs: {
        "gunslinger": [
            (id: "GS_TRACKING", name: "Tracking", sp_cost: 15, range: 9, power: 600),
            (id: "GS_ADJUSTMENT", kind: buff, sp_cost: 30, grants: Some("adjustment")),
        ],
    },
)"#,
    );

    let catalog = SkillCatalog::load(file.path()).expect("valid catalog");
    let skills = catalog.skills_for("rebellion_gunslinger");
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[1].grants.as_deref(), Some("adjustment"));
}
