//! Configuration management for mdlens.
//!
//! Parses `mdlens.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page template path.
    pub template: Option<PathBuf>,
    /// Override output file path.
    pub output: Option<PathBuf>,
    /// Override syntax highlighting flag.
    pub highlight_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdlens.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation configuration (paths are relative strings from TOML).
    generate: GenerateConfigRaw,
    /// Syntax highlighting configuration.
    pub highlight: HighlightConfig,

    /// Resolved generation configuration (set after loading).
    #[serde(skip)]
    pub generate_resolved: GenerateConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw generation configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GenerateConfigRaw {
    template: Option<String>,
    output: Option<String>,
}

/// Resolved generation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct GenerateConfig {
    /// Page template the rendered fragment is injected into.
    pub template: PathBuf,
    /// Output file the finished page is written to.
    pub output: PathBuf,
}

/// Syntax highlighting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Whether fenced code blocks are syntax highlighted.
    pub enabled: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdlens.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template) = &settings.template {
            self.generate_resolved.template.clone_from(template);
        }
        if let Some(output) = &settings.output {
            self.generate_resolved.output.clone_from(output);
        }
        if let Some(enabled) = settings.highlight_enabled {
            self.highlight.enabled = enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            generate: GenerateConfigRaw::default(),
            highlight: HighlightConfig::default(),
            generate_resolved: GenerateConfig {
                template: base.join("template.html"),
                output: base.join("index.html"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.generate_resolved = GenerateConfig {
            template: resolve(self.generate.template.as_deref(), "template.html"),
            output: resolve(self.generate.output.as_deref(), "index.html"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(
            config.generate_resolved.template,
            PathBuf::from("/site/template.html")
        );
        assert_eq!(
            config.generate_resolved.output,
            PathBuf::from("/site/index.html")
        );
        assert!(config.highlight.enabled);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.highlight.enabled);
    }

    #[test]
    fn test_parse_generate_config() {
        let toml = r#"
[generate]
template = "page.html"
output = "out/docs.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.generate_resolved.template,
            PathBuf::from("/project/page.html")
        );
        assert_eq!(
            config.generate_resolved.output,
            PathBuf::from("/project/out/docs.html")
        );
    }

    #[test]
    fn test_parse_highlight_config() {
        let toml = r#"
[highlight]
enabled = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.highlight.enabled);
    }

    #[test]
    fn test_partial_generate_section_keeps_other_default() {
        let toml = r#"
[generate]
output = "site.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.generate_resolved.template,
            PathBuf::from("/project/template.html")
        );
        assert_eq!(
            config.generate_resolved.output,
            PathBuf::from("/project/site.html")
        );
    }

    #[test]
    fn test_cli_settings_take_precedence() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let settings = CliSettings {
            template: Some(PathBuf::from("custom.html")),
            output: None,
            highlight_enabled: Some(false),
        };
        config.apply_cli_settings(&settings);
        assert_eq!(
            config.generate_resolved.template,
            PathBuf::from("custom.html")
        );
        assert_eq!(
            config.generate_resolved.output,
            PathBuf::from("/site/index.html")
        );
        assert!(!config.highlight.enabled);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let result = Config::load(Some(Path::new("/nonexistent/mdlens.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdlens.toml");
        std::fs::write(&path, "[generate]\ntemplate = \"t.html\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.generate_resolved.template, dir.path().join("t.html"));
        assert_eq!(config.generate_resolved.output, dir.path().join("index.html"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdlens.toml");
        std::fs::write(&path, "[generate\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
