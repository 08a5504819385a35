//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `GRAFT_TEMPLATES__ROOT`, `GRAFT_OUTPUT__NO_COLOR`, ...
//! 3. Config file (`--config`, or [`AppConfig::config_path`] if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

const ENV_PREFIX: &str = "GRAFT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where templates live.
    pub templates: TemplateConfig,
    /// Where version slugs are resolved.
    pub versions: VersionConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Log settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// TOML file with a `[versions]` table.
    pub registry: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit log events as JSON lines.
    pub json: bool,
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let config: Self = Config::builder()
            .add_source(
                Config::try_from(&Self::default()).context("Failed to encode defaults")?,
            )
            .add_source(File::from(path.as_path()).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.output_format()
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("output.format: {e}"))
    }

    /// `output.format` as a typed value.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.output.format.parse()
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.graft.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "graft", "graft")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".graft.toml"))
    }

    /// Template root: the flag, then `templates.root`, then `fallback`.
    pub fn templates_root(&self, flag: Option<&Path>, fallback: &Path) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.templates.root.clone())
            .unwrap_or_else(|| fallback.to_path_buf())
    }

    /// Version registry file: the flag, then `versions.registry`.
    pub fn versions_registry(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.versions.registry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let cfg = AppConfig::default();
        assert!(cfg.templates.root.is_none());
        assert!(cfg.versions.registry.is_none());
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.output_format(), Ok(OutputFormat::Auto));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[templates]\nroot = \"/srv/templates\"\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.templates.root, Some(PathBuf::from("/srv/templates")));
        assert_eq!(cfg.output_format(), Ok(OutputFormat::Json));
        assert!(!cfg.logging.json);
    }

    #[test]
    fn explicit_file_must_exist() {
        let missing = PathBuf::from("/definitely/not/here/graft.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("output.format"));
    }

    #[test]
    fn flags_win_over_config() {
        let mut cfg = AppConfig::default();
        cfg.templates.root = Some(PathBuf::from("/cfg"));

        assert_eq!(
            cfg.templates_root(Some(Path::new("/flag")), Path::new("/fallback")),
            PathBuf::from("/flag")
        );
        assert_eq!(
            cfg.templates_root(None, Path::new("/fallback")),
            PathBuf::from("/cfg")
        );
        assert_eq!(
            AppConfig::default().templates_root(None, Path::new("/fallback")),
            PathBuf::from("/fallback")
        );
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
