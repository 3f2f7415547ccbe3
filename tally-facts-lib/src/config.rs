use crate::Result;
use crate::registry::ProductRegistry;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// Name of the configuration file looked up when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "tally-facts.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Age past which a host's subscription-manager sync is considered stale
    #[serde(default = "default_host_last_sync_threshold", with = "humantime_serde")]
    pub host_last_sync_threshold: Duration,

    /// Threads per core assumed when deriving cores from vCPUs
    #[serde(default = "default_threads_per_core")]
    pub threads_per_core_default: f64,

    /// Trust reported threads-per-core for every product, not only OpenShift
    #[serde(default)]
    pub use_cpu_system_facts_for_all_products: bool,

    /// Product registry to load instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<Utf8PathBuf>,
}

const fn default_host_last_sync_threshold() -> Duration {
    Duration::from_hours(24)
}

const fn default_threads_per_core() -> f64 {
    2.0
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `tally-facts.toml` is looked up in `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading tally-facts configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading tally-facts configuration file '{path}'")),
            }
        };

        let mut config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        // a relative registry path is relative to the configuration file
        if let Some(registry) = &config.registry
            && registry.is_relative()
            && let Some(parent) = final_path.parent()
        {
            config.registry = Some(parent.join(registry));
        }

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if !self.threads_per_core_default.is_finite() || self.threads_per_core_default <= 0.0 {
            return Err(app_err!(
                "threads_per_core_default must be greater than 0, got {}",
                self.threads_per_core_default
            ));
        }

        if self.host_last_sync_threshold.is_zero() {
            return Err(app_err!("host_last_sync_threshold must not be zero"));
        }

        Ok(())
    }

    /// Load the product registry this configuration names, or the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if the registry file cannot be read or is invalid
    pub fn product_registry(&self) -> Result<ProductRegistry> {
        match &self.registry {
            Some(path) => ProductRegistry::load(path),
            None => Ok(ProductRegistry::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.host_last_sync_threshold, Duration::from_hours(24));
        assert!((config.threads_per_core_default - 2.0).abs() < f64::EPSILON);
        assert!(!config.use_cpu_system_facts_for_all_products);
        assert!(config.registry.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_zero_threads_per_core() {
        let config = Config { threads_per_core_default: 0.0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_threads_per_core() {
        let config = Config { threads_per_core_default: -2.0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nan_threads_per_core() {
        let config = Config { threads_per_core_default: f64::NAN, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_threshold() {
        let config = Config { host_last_sync_threshold: Duration::ZERO, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_humantime_threshold() {
        let config: Config = toml::from_str(r#"host_last_sync_threshold = "3days""#).unwrap();
        assert_eq!(config.host_last_sync_threshold, Duration::from_hours(72));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let result: core::result::Result<Config, _> = toml::from_str("thread_per_core_default = 1.0");
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = Utf8PathBuf::try_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        Config::save_default(&output_path).unwrap();

        let loaded = Config::load(Utf8Path::new("."), Some(&output_path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_finds_file_in_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(base_dir.join(CONFIG_FILE_NAME), "threads_per_core_default = 4.0\n").unwrap();

        let config = Config::load(&base_dir, None).unwrap();
        assert!((config.threads_per_core_default - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_invalid_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("bad.toml")).unwrap();
        fs::write(&path, "threads_per_core_default = 0.0\n").unwrap();

        let err = Config::load(Utf8Path::new("."), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("threads_per_core_default"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_registry_path_is_relative_to_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config_path = dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, "registry = \"products.toml\"\n").unwrap();
        fs::write(dir.join("products.toml"), crate::registry::DEFAULT_REGISTRY_TOML).unwrap();

        let config = Config::load(Utf8Path::new("."), Some(&config_path)).unwrap();
        assert_eq!(config.registry.as_deref(), Some(dir.join("products.toml").as_path()));

        let registry = config.product_registry().unwrap();
        assert!(registry.is_known_tag("RHEL for x86"));
    }

    #[test]
    fn test_product_registry_defaults_to_builtin() {
        let registry = Config::default().product_registry().unwrap();
        assert!(registry.is_known_tag("OpenShift Container Platform"));
    }

    #[test]
    fn test_missing_registry_file_fails() {
        let config = Config {
            registry: Some(Utf8PathBuf::from("no/such/registry.toml")),
            ..Config::default()
        };
        let _ = config.product_registry().unwrap_err();
    }
}
