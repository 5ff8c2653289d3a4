use super::Host;
use super::config::Config;
use crate::Result;
use crate::source::EsClient;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `es2graphite.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Loads the configuration and checks that every host parses as a cluster address
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Config> {
    let config = Config::load(base_dir, config_path)?;
    let _ = EsClient::new(&config.hosts, config.request_timeout())?;
    Ok(config)
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    validate_in(host, Utf8Path::new("."), args)
}

fn validate_in<H: Host>(host: &mut H, base_dir: &Utf8Path, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match validate_config_inner(base_dir, config_path) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file given)");
            }
            let _ = writeln!(host.output(), "Hosts: {}", config.hosts.join(", "));
            let _ = writeln!(
                host.output(),
                "Graphite: {}:{} ({})",
                config.graphite_host, config.graphite_port, config.protocol
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn write_config(dir: &tempfile::TempDir, name: &str, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_generated_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("es2graphite.toml")).unwrap();

        let mut host = TestHost::new();
        init_config(&mut host, &InitArgs { output: Some(path.clone()) }).unwrap();

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(path) }).unwrap();
        assert!(host.output_text().starts_with("Configuration file is valid"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let mut host = TestHost::new();
        validate_in(&mut host, &base_dir, &ValidateArgs { config: None }).unwrap();
        let text = host.output_text();
        assert!(text.contains("Using default configuration"));
        assert!(text.contains("Hosts: localhost:9200"));
        assert!(text.contains("Graphite: localhost:2004 (pickle)"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_toml_syntax() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "bad.toml", "hosts = [\"es1:9200\"\n");

        let mut host = TestHost::new();
        let _ = validate_config(&mut host, &ValidateArgs { config: Some(path) }).unwrap_err();
        assert_eq!(host.exit_code, Some(1));
        assert!(String::from_utf8_lossy(&host.error_buf).contains("Configuration validation failed"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_field() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "unknown.toml", "carbon_host = \"graphite\"\n");

        let mut host = TestHost::new();
        let _ = validate_config(&mut host, &ValidateArgs { config: Some(path) }).unwrap_err();
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_level() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "level.toml", "health_level = \"everything\"\n");

        let mut host = TestHost::new();
        let _ = validate_config(&mut host, &ValidateArgs { config: Some(path) }).unwrap_err();
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unparseable_host() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "host.toml", "hosts = [\"http://[::1\"]\n");

        let mut host = TestHost::new();
        let _ = validate_config(&mut host, &ValidateArgs { config: Some(path) }).unwrap_err();
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_empty_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(&tmp, "empty.toml", "# Empty config file\n");

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(path) }).unwrap();
    }
}
