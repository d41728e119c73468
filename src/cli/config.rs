//! Configuration file support.

use crate::cli::output::SortOrder;
use crate::corpus::DEFAULT_EXTENSION;
use crate::domain::{DEFAULT_TAG_PREFIX, LinkStyle};
use crate::index::{BackendChoice, DEFAULT_SEARCH_TIMEOUT, ExternalTool};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default notes directory
    pub dir: Option<PathBuf>,

    /// Note file extension, including the dot (default `.md`)
    pub extension: Option<String>,

    /// Tag prefix character (default `#`)
    pub tag_prefix: Option<char>,

    /// Generate `[[double]]` instead of `[single]` bracket links
    pub double_brackets: Option<bool>,

    /// Index backend selection
    pub backend: Option<BackendChoice>,

    /// External search tool command for the accelerated backend
    pub search_tool: Option<String>,

    /// External search timeout in seconds
    pub search_timeout: Option<u64>,

    /// Sidecar results file name, relative to the notes directory.
    /// Unset disables sidecar listings.
    pub results_file: Option<String>,

    /// Sort order for note listings
    pub sort_notes_by: Option<SortOrder>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/zettel/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zettel")
            .join("config.toml")
    }

    /// Resolve the notes directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Current working directory
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Note file extension, including the dot.
    pub fn extension(&self) -> String {
        self.extension
            .clone()
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }

    /// Tag prefix character.
    pub fn tag_prefix(&self) -> char {
        self.tag_prefix.unwrap_or(DEFAULT_TAG_PREFIX)
    }

    /// Bracket style for generated links.
    pub fn link_style(&self) -> LinkStyle {
        if self.double_brackets.unwrap_or(true) {
            LinkStyle::Double
        } else {
            LinkStyle::Single
        }
    }

    /// Index backend, with CLI override taking precedence.
    pub fn backend(&self, cli_backend: Option<BackendChoice>) -> BackendChoice {
        cli_backend.or(self.backend).unwrap_or_default()
    }

    /// External search tool invocation target.
    pub fn search_tool(&self) -> ExternalTool {
        let mut tool = ExternalTool::default();
        if let Some(command) = &self.search_tool {
            tool.command = command.clone();
        }
        tool.timeout = self
            .search_timeout
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SEARCH_TIMEOUT);
        tool
    }

    /// Sort order for note listings.
    pub fn sort_notes_by(&self) -> SortOrder {
        self.sort_notes_by.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
    }

    #[test]
    fn notes_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Config::default()
        };
        let cli_dir = PathBuf::from("/cli/notes");
        assert_eq!(
            config.notes_dir(Some(&cli_dir)),
            PathBuf::from("/cli/notes")
        );
    }

    #[test]
    fn notes_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            ..Config::default()
        };
        assert_eq!(config.notes_dir(None), PathBuf::from("/config/notes"));
    }

    #[test]
    fn notes_dir_falls_back_to_cwd() {
        let config = Config::default();
        assert_eq!(config.notes_dir(None), PathBuf::from("."));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("zettel/config.toml"));
    }

    #[test]
    fn defaults_match_conventions() {
        let config = Config::default();
        assert_eq!(config.extension(), ".md");
        assert_eq!(config.tag_prefix(), '#');
        assert_eq!(config.link_style(), LinkStyle::Double);
        assert_eq!(config.backend(None), BackendChoice::Auto);
        assert_eq!(config.sort_notes_by(), SortOrder::Id);
        assert!(config.results_file.is_none());
    }

    #[test]
    fn cli_backend_overrides_config() {
        let config = Config {
            backend: Some(BackendChoice::Direct),
            ..Config::default()
        };
        assert_eq!(
            config.backend(Some(BackendChoice::Accelerated)),
            BackendChoice::Accelerated
        );
        assert_eq!(config.backend(None), BackendChoice::Direct);
    }

    #[test]
    fn parses_full_config_file() {
        let config: Config = toml::from_str(
            r#"
            dir = "/notes"
            extension = ".markdown"
            tag_prefix = "@"
            double_brackets = false
            backend = "direct"
            search_tool = "rg"
            search_timeout = 5
            results_file = ".results.zkr"
            sort_notes_by = "title"
            "#,
        )
        .unwrap();

        assert_eq!(config.extension(), ".markdown");
        assert_eq!(config.tag_prefix(), '@');
        assert_eq!(config.link_style(), LinkStyle::Single);
        assert_eq!(config.backend(None), BackendChoice::Direct);
        assert_eq!(config.search_tool().command, "rg");
        assert_eq!(config.search_tool().timeout, Duration::from_secs(5));
        assert_eq!(config.sort_notes_by(), SortOrder::Title);
        assert_eq!(config.results_file.as_deref(), Some(".results.zkr"));
    }
}
