/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::fs;
use std::time::Duration;
use emptydcst::app_config::{Config, LogLevel, DEFAULT_CONFIG_FILE};
use emptydcst::dcst::{DCST_2007_NAMESPACE, DCST_2010_NAMESPACE, DCST_2014_NAMESPACE};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.document.language, "en");
    assert_eq!(config.document.title, "No Title");
    assert_eq!(config.document.frame_rate, "24");
    assert_eq!(config.document.reel_number, 1);
    assert_eq!(config.document.display_index, 0);
    assert_eq!(config.document.duration, 24);
    assert_eq!(config.document.namespace, DCST_2014_NAMESPACE);
    assert_eq!(config.track_file.binary, "asdcp-wrap");
    assert_eq!(config.track_file.timeout(), None);
    assert_eq!(config.font_resource, None);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.document.language = " ".to_string();
    assert!(config.validate().is_err());
    config.document.language = "fr".to_string();

    config.document.reel_number = 0;
    assert!(config.validate().is_err());
    config.document.reel_number = 2;

    config.document.frame_rate = "fast".to_string();
    assert!(config.validate().is_err());
    config.document.frame_rate = "0".to_string();
    assert!(config.validate().is_err());
    config.document.frame_rate = "23.976".to_string();
    assert!(config.validate().is_ok());

    config.document.namespace = DCST_2007_NAMESPACE.to_string();
    assert!(config.validate().is_err());
    config.document.namespace = DCST_2010_NAMESPACE.to_string();
    assert!(config.validate().is_ok());

    config.track_file.timeout_secs = Some(0);
    assert!(config.validate().is_err());
    config.track_file.timeout_secs = Some(30);
    assert!(config.validate().is_ok());
    assert_eq!(config.track_file.timeout(), Some(Duration::from_secs(30)));

    config.track_file.binary = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_title_shouldBeValid() {
    let mut config = Config::default();
    config.document.title.clear();
    assert!(config.validate().is_ok());
}

#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"document": {"language": "fr", "frame_rate": "25"}, "log_level": "debug"}"#)?;

    assert_eq!(config.document.language, "fr");
    assert_eq!(config.document.frame_rate, "25");
    assert_eq!(config.document.title, "No Title");
    assert_eq!(config.document.reel_number, 1);
    assert_eq!(config.track_file.binary, "asdcp-wrap");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_load_withMissingFileAndNoCreate_shouldUseDefaultsWithoutWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);

    let config = Config::load(&path, false)?;

    assert_eq!(config, Config::default());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_load_withMissingFileAndCreate_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("emptydcst.json");

    let config = Config::load(&path, true)?;

    assert_eq!(config, Config::default());
    let written: Config = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written, config);
    Ok(())
}

/// A config that cannot be written is not fatal
#[test]
fn test_load_withUnwritableLocation_shouldStillReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let occupied = common::create_test_file(temp_dir.path(), "occupied", "plain file")?;
    let path = occupied.join("emptydcst.json");

    let config = Config::load(&path, true)?;

    assert_eq!(config, Config::default());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_load_withExistingFile_shouldReadIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"document": {"title": "Feature", "reel_number": 4}, "track_file": {"timeout_secs": 120}}"#,
    )?;

    let config = Config::load(&path, false)?;
    assert_eq!(config.document.title, "Feature");
    assert_eq!(config.document.reel_number, 4);
    assert_eq!(config.track_file.timeout_secs, Some(120));
    Ok(())
}

#[test]
fn test_load_withBrokenJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load(&path, true).is_err());
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldKeepValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("saved.json");
    let mut config = Config::default();
    config.document.language = "de".to_string();
    config.track_file.timeout_secs = Some(45);

    config.save(&path)?;

    assert_eq!(Config::load(&path, false)?, config);
    Ok(())
}

#[test]
fn test_log_level_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
