use anyhow::Result;
use pickset::config::{Config, HttpMethod, Preset};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_from_file_with_custom_paths() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("pickset.toml");
    fs::write(
        &path,
        r#"
[api]
base_url = "https://picks.example.com"
timeout_seconds = 15

[app]
preset = "start-bench-cut"
catalog_path = "/api/players"
catalog_method = "get"
submit_path = "/api/players/picks"

[storage]
session_file = "state/session.json"
history_file = "state/history.json"
log_dir = "state/logs"
"#,
    )?;

    let config = Config::load_from(&path)?;
    let profile = config.app_profile()?;
    assert_eq!(profile.preset, Preset::StartBenchCut);
    assert_eq!(profile.catalog_path, "/api/players");
    assert_eq!(profile.catalog_method, HttpMethod::Get);
    assert_eq!(profile.submit_path, "/api/players/picks");
    assert_eq!(config.storage.history_file.to_str(), Some("state/history.json"));
    Ok(())
}

#[test]
fn test_missing_file_is_a_config_error() {
    let dir = tempdir().unwrap();
    let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_malformed_toml_is_reported() {
    assert!(matches!(Config::parse("[api\nbase_url ="), Err(pickset::PicksError::Toml(_))));
}
