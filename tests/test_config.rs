use shapesketch::config::{AppConfig, StorageConfig};
use std::path::PathBuf;

#[test]
fn test_empty_config_uses_defaults() -> anyhow::Result<()> {
    let config = AppConfig::from_toml("")?;

    assert_eq!(config.model_dir, PathBuf::from("models"));
    assert_eq!(config.sample_dir, PathBuf::from("sampel"));
    assert_eq!(config.temp_dir, PathBuf::from("temp"));
    assert_eq!(config.canvas.stroke_width, 3.0);
    assert_eq!(
        config.storage,
        StorageConfig::Local {
            dir: PathBuf::from("uploads"),
            public_base_url: None,
        }
    );
    Ok(())
}

#[test]
fn test_firebase_backend() -> anyhow::Result<()> {
    let config = AppConfig::from_toml(
        r#"
        model_dir = "/opt/shapes/models"

        [canvas]
        stroke_width = 5.0

        [storage]
        backend = "firebase"
        bucket = "shapes.appspot.com"
        credentials = "service-account.json"
        "#,
    )?;

    assert_eq!(config.model_dir, PathBuf::from("/opt/shapes/models"));
    assert_eq!(config.canvas.stroke_width, 5.0);
    assert_eq!(
        config.storage,
        StorageConfig::Firebase {
            bucket: "shapes.appspot.com".to_string(),
            credentials: PathBuf::from("service-account.json"),
        }
    );
    Ok(())
}

#[test]
fn test_disabled_backend() -> anyhow::Result<()> {
    let config = AppConfig::from_toml("[storage]\nbackend = \"disabled\"\n")?;

    assert_eq!(config.storage, StorageConfig::Disabled);
    assert!(shapesketch::StorageBackend::from_config(&config.storage)?.is_none());
    Ok(())
}

#[test]
fn test_invalid_configs_are_rejected() {
    assert!(AppConfig::from_toml("[storage]\nbackend = \"s3\"\n").is_err());
    assert!(AppConfig::from_toml("[canvas]\nstroke_width = 0.0\n").is_err());
    assert!(AppConfig::from_toml("unknown_key = 1\n").is_err());
    assert!(
        AppConfig::from_toml(
            "[storage]\nbackend = \"firebase\"\nbucket = \" \"\ncredentials = \"sa.json\"\n"
        )
        .is_err()
    );
}

#[test]
fn test_explicit_config_must_exist() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.toml");

    let err = AppConfig::load(Some(&missing)).unwrap_err();

    assert!(err.to_string().contains("missing.toml"));
    Ok(())
}

#[test]
fn test_credentials_override() -> anyhow::Result<()> {
    let mut config = AppConfig::from_toml(
        "[storage]\nbackend = \"firebase\"\nbucket = \"b\"\ncredentials = \"a.json\"\n",
    )?;

    config.override_credentials(PathBuf::from("/secrets/b.json"));

    assert!(matches!(
        config.storage,
        StorageConfig::Firebase { ref credentials, .. } if credentials == &PathBuf::from("/secrets/b.json")
    ));
    Ok(())
}
