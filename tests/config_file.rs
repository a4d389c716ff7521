//! Loading settings from JSON files on disk.

use std::io::Write;

use anyhow::Result;
use rstest::rstest;
use skulk::{ConfigError, LayerMask, SkulkConfig};
use tempfile::NamedTempFile;

fn write_config(text: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() -> Result<()> {
    let file = write_config(
        r#"{
            "movement": { "sprint_speed": 14.0, "ground_layers": 6 },
            "noise": { "loud_range": 25.0 }
        }"#,
    )?;
    let config = SkulkConfig::from_path(file.path())?;
    let defaults = SkulkConfig::default();

    assert_eq!(config.movement.sprint_speed, 14.0);
    assert_eq!(config.movement.ground_layers, LayerMask(6));
    assert_eq!(config.movement.walk_speed, defaults.movement.walk_speed);
    assert_eq!(config.noise.loud_range, 25.0);
    assert_eq!(config.noise.quiet_range, defaults.noise.quiet_range);
    Ok(())
}

#[test]
fn empty_object_is_the_default_config() -> Result<()> {
    let file = write_config("{}")?;
    assert_eq!(SkulkConfig::from_path(file.path())?, SkulkConfig::default());
    Ok(())
}

#[rstest]
#[case::steep_limit(r#"{ "movement": { "max_slope_angle": 95.0 } }"#, "movement.max_slope_angle")]
#[case::negative_speed(r#"{ "movement": { "walk_speed": -1.0 } }"#, "movement.walk_speed")]
#[case::ranges_swapped(
    r#"{ "noise": { "quiet_range": 20.0, "loud_range": 10.0 } }"#,
    "noise.quiet_range"
)]
fn invalid_values_name_the_field(#[case] text: &str, #[case] expected: &str) -> Result<()> {
    let file = write_config(text)?;
    match SkulkConfig::from_path(file.path()) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected invalid {expected}, got {other:?}"),
    }
    Ok(())
}

#[test]
fn malformed_json_is_a_parse_error() -> Result<()> {
    let file = write_config("{ movement: ")?;
    assert!(matches!(
        SkulkConfig::from_path(file.path()),
        Err(ConfigError::Parse(_))
    ));
    Ok(())
}

#[test]
fn missing_file_reports_its_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("absent.json");
    match SkulkConfig::from_path(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    Ok(())
}
