//! Configuration loading tests
//!
//! Every test that loads runs inside a figment `Jail`, which serializes them
//! and isolates the working directory and environment.

use figment::Jail;
use svd_domain::Lifetime;
use svd_infrastructure::constants::DEFAULT_LOG_LEVEL;
use svd_infrastructure::{ConfigLoader, ContainerConfig};
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = ContainerConfig::default();

    assert_eq!(config.delegates.default_lifetime, Lifetime::Transient);
    assert!(config.delegates.discover_markings);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(!config.logging.json_format);
}

#[test]
fn test_explicit_file_overrides_defaults() {
    Jail::expect_with(|_| {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[delegates]\ndefault_lifetime = \"scoped\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

        assert_eq!(config.delegates.default_lifetime, Lifetime::Scoped);
        assert!(config.delegates.discover_markings);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|_| {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_config_path(temp_dir.path().join("absent.toml"));

        let config = loader.load().unwrap();

        assert_eq!(config, ContainerConfig::default());
        assert!(loader.config_path().is_some());
        Ok(())
    });
}

#[test]
fn test_save_then_load() {
    Jail::expect_with(|_| {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved.toml");
        let mut original = ContainerConfig::default();
        original.delegates.default_lifetime = Lifetime::Singleton;
        original.logging.json_format = true;

        let loader = ConfigLoader::new();
        loader.save_to_file(&original, &path).unwrap();
        let loaded = ConfigLoader::new().with_config_path(&path).load().unwrap();

        assert_eq!(loaded, original);
        Ok(())
    });
}

#[test]
fn test_invalid_log_level_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("svd.toml", "[logging]\nlevel = \"loud\"\n")?;

        let err = ConfigLoader::new().load().unwrap_err();

        assert!(err.to_string().contains("Invalid log level: loud"), "{err}");
        Ok(())
    });
}

#[test]
fn test_invalid_lifetime_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("svd.toml", "[delegates]\ndefault_lifetime = \"forever\"\n")?;

        let err = ConfigLoader::new().load().unwrap_err();

        assert!(err.to_string().contains("Failed to extract configuration"), "{err}");
        Ok(())
    });
}

#[test]
fn test_default_file_and_environment() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "svd.toml",
            "[delegates]\ndefault_lifetime = \"singleton\"\ndiscover_markings = true\n",
        )?;
        jail.set_env("SVD_DELEGATES__DISCOVER_MARKINGS", "false");
        jail.set_env("SVD_LOGGING__LEVEL", "warn");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.delegates.default_lifetime, Lifetime::Singleton);
        assert!(!config.delegates.discover_markings);
        assert_eq!(config.logging.level, "warn");
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("APP_DELEGATES__DEFAULT_LIFETIME", "scoped");
        jail.set_env("SVD_DELEGATES__DEFAULT_LIFETIME", "singleton");

        let config = ConfigLoader::new()
            .with_env_prefix("APP")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.delegates.default_lifetime, Lifetime::Scoped);
        Ok(())
    });
}
