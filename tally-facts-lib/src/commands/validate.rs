use super::Host;
use super::common::CommonArgs;
use crate::Result;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Validates a configuration file and the product registry it names
///
/// # Errors
///
/// Returns an error if the configuration or the registry cannot be loaded or is invalid
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    match args.common.normalizer() {
        Ok(normalizer) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = &args.common.config {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration unless tally-facts.toml is present");
            }

            let registry = normalizer.registry();
            match &normalizer.config().registry {
                Some(path) => {
                    let _ = writeln!(host.output(), "Product registry: {path} ({} subscriptions)", registry.subscriptions().len());
                }
                None => {
                    let _ = writeln!(host.output(), "Product registry: built-in ({} subscriptions)", registry.subscriptions().len());
                }
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::common::LogLevel;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};
    use camino::Utf8PathBuf;

    fn validate(config: Option<Utf8PathBuf>) -> (TestHost, Result<()>) {
        let mut host = TestHost::new();
        let args = ValidateArgs {
            common: CommonArgs {
                config,
                log_level: LogLevel::None,
            },
        };
        let result = validate_config(&mut host, &args);
        (host, result)
    }

    fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_generated_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = Utf8PathBuf::try_from(tmp.path().join("tally-facts.toml")).unwrap();

        let mut init_host = TestHost::new();
        init_config(&mut init_host, &InitArgs { output: Some(config_path.clone()) }).unwrap();

        let (host, result) = validate(Some(config_path));
        assert!(result.is_ok(), "default configuration should validate: {result:?}");
        assert!(host.output_str().contains("Configuration file is valid"));
        assert!(host.output_str().contains("built-in"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_empty_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "empty.toml", "# Empty config file\n");

        let (_, result) = validate(Some(path));
        assert!(result.is_ok(), "empty config should be valid (uses defaults)");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_toml_syntax() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "invalid.toml", "host_last_sync_threshold = \n");

        let (host, result) = validate(Some(path));
        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_str().contains("Configuration validation failed"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_field() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "unknown.toml", "unknown_field = \"value\"\n");

        let (_, result) = validate(Some(path));
        assert!(result.is_err(), "unknown field should fail validation");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_duration_format() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "duration.toml", "host_last_sync_threshold = \"not a valid duration\"\n");

        let (_, result) = validate(Some(path));
        assert!(result.is_err(), "invalid duration should fail validation");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_registry_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let _ = write_config(&tmp, "registry.toml", "[architectures]\nx86_64 = \"Nowhere\"\n");
        let path = write_config(&tmp, "config.toml", "registry = \"registry.toml\"\n");

        let (host, result) = validate(Some(path));
        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_custom_registry_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let _ = write_config(&tmp, "registry.toml", crate::registry::DEFAULT_REGISTRY_TOML);
        let path = write_config(&tmp, "config.toml", "registry = \"registry.toml\"\n");

        let (host, result) = validate(Some(path));
        assert!(result.is_ok(), "{result:?}");
        assert!(host.output_str().contains("registry.toml"));
    }
}
