//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use dnspector::{DnspectorError, SourceDescriptor, DOMAIN_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Nameserver used when `--nameserver` is not given.
    pub nameserver: Option<String>,

    /// DNS and zone transfer timeout in seconds.
    pub timeout: Option<u64>,

    /// HTTP timeout for passive sources and WHOIS, in seconds.
    pub http_timeout: Option<u64>,

    /// Always run quietly (as if --quiet was passed).
    #[serde(default)]
    pub quiet: bool,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Replacement passive source table.
    pub sources: Option<Vec<SourceDescriptor>>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "dnspector", "dnspector")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DnspectorError::Config(e.to_string()))
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(sources) = &config.sources {
            if let Some(bad) = sources.iter().find(|s| !s.url_template.contains(DOMAIN_PLACEHOLDER)) {
                return Err(DnspectorError::Config(format!(
                    "source {} has no {DOMAIN_PLACEHOLDER} placeholder in its URL template",
                    bad.name
                ))
                .into());
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_all_fields() {
        let file = write_config(
            r#"
nameserver = "1.1.1.1"
timeout = 3
http_timeout = 20
quiet = true
output_format = "json"

[[sources]]
name = "local"
url_template = "http://127.0.0.1:9000/{domain}"
"#,
        );

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.nameserver.as_deref(), Some("1.1.1.1"));
        assert_eq!(config.timeout, Some(3));
        assert_eq!(config.http_timeout, Some(20));
        assert!(config.quiet);
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        let sources = config.sources.unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url_for("a.io"), "http://127.0.0.1:9000/a.io");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = write_config("");
        assert_eq!(Config::load_from(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let file = write_config("api_key = \"nope\"\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("configuration error"));
    }

    #[test]
    fn rejects_source_without_placeholder() {
        let file = write_config(
            "[[sources]]\nname = \"broken\"\nurl_template = \"http://example.invalid/\"\n",
        );
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("broken"));
        assert!(matches!(
            err.downcast_ref::<DnspectorError>(),
            Some(DnspectorError::Config(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }
}
