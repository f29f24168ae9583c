//! Configuration loading
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. `.ng-html-data.json` in the working directory, or the file given with
//!    `--config`
//! 3. command line flags
//!
//! Empty strings in a layer are treated as unset.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{HtmlDataError, Result};
use crate::extract::Extractor;
use crate::format::FormatterKind;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".ng-html-data.json";

pub const DEFAULT_DESTINATION: &str = "custom.html-data.json";
pub const DEFAULT_FILES: &str = "**/*.ts";
pub const DEFAULT_EXCLUDE: &[&str] = &["**/*.spec.ts"];

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Output file; relative paths resolve against the working directory
    pub destination: String,
    /// Include glob; relative globs resolve against the working directory
    pub files: String,
    /// Globs removed from the selection
    pub exclude: Vec<String>,
    pub tag_formatter: FormatterKind,
    pub attribute_formatter: FormatterKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            destination: DEFAULT_DESTINATION.to_string(),
            files: DEFAULT_FILES.to_string(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            tag_formatter: FormatterKind::default(),
            attribute_formatter: FormatterKind::default(),
        }
    }
}

/// One partial layer of settings: the config file or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigLayer {
    pub destination: Option<String>,
    pub files: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub tag_formatter: Option<FormatterKind>,
    pub attribute_formatter: Option<FormatterKind>,
}

impl ConfigLayer {
    /// Parse the JSON config file format
    pub fn from_json(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Read a config file, mapping every failure to [`HtmlDataError::Config`]
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        let layer = Self::from_json(&contents).map_err(|e| config_error(path, e))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(layer)
    }
}

impl Config {
    /// Defaults, then the config file, then `overrides`.
    ///
    /// With `explicit_path` set the file must exist; otherwise
    /// [`CONFIG_FILE_NAME`] in `cwd` is used when present.
    pub fn load(cwd: &Path, explicit_path: Option<&Path>, overrides: &ConfigLayer) -> Result<Self> {
        let mut config = Self::default();

        let file_layer = match explicit_path {
            Some(path) => Some(ConfigLayer::read(&cwd.join(path))?),
            None => {
                let path = cwd.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    Some(ConfigLayer::read(&path)?)
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    None
                }
            }
        };

        if let Some(layer) = &file_layer {
            config.apply(layer);
        }
        config.apply(overrides);
        Ok(config)
    }

    /// Overwrite every field `layer` sets
    pub fn apply(&mut self, layer: &ConfigLayer) {
        if let Some(destination) = non_empty(&layer.destination) {
            self.destination = destination.to_string();
        }
        if let Some(files) = non_empty(&layer.files) {
            self.files = files.to_string();
        }
        if let Some(exclude) = &layer.exclude {
            self.exclude = exclude.iter().filter(|g| !g.is_empty()).cloned().collect();
        }
        if let Some(kind) = layer.tag_formatter {
            self.tag_formatter = kind;
        }
        if let Some(kind) = layer.attribute_formatter {
            self.attribute_formatter = kind;
        }
    }

    /// Output path resolved against `cwd`
    pub fn destination_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.destination)
    }

    /// Extractor using the configured formatters
    pub fn extractor(&self) -> Extractor {
        Extractor::builder()
            .formatter_kinds(self.tag_formatter, self.attribute_formatter)
            .build()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn config_error(path: &Path, error: impl std::fmt::Display) -> HtmlDataError {
    HtmlDataError::Config {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.destination, "custom.html-data.json");
        assert_eq!(config.files, "**/*.ts");
        assert_eq!(config.exclude, vec!["**/*.spec.ts".to_string()]);
        assert_eq!(config.tag_formatter, FormatterKind::Simple);
    }

    #[test]
    fn test_layer_from_json() {
        let layer = ConfigLayer::from_json(
            r#"{ "destination": "out.json", "tagFormatter": "summary", "exclude": [] }"#,
        )
        .unwrap();
        assert_eq!(layer.destination.as_deref(), Some("out.json"));
        assert_eq!(layer.tag_formatter, Some(FormatterKind::Summary));
        assert_eq!(layer.exclude, Some(Vec::new()));
        assert_eq!(layer.files, None);
    }

    #[test]
    fn test_layer_rejects_unknown_keys() {
        assert!(ConfigLayer::from_json(r#"{ "dest": "x.json" }"#).is_err());
        assert!(ConfigLayer::from_json(r#"{ "tagFormatter": "fancy" }"#).is_err());
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let mut config = Config::default();
        config.apply(&ConfigLayer {
            destination: Some(String::new()),
            files: Some("src/**/*.ts".to_string()),
            ..Default::default()
        });
        assert_eq!(config.destination, DEFAULT_DESTINATION);
        assert_eq!(config.files, "src/**/*.ts");
    }

    #[test]
    fn test_load_layers_file_then_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "destination": "from-file.json", "files": "lib/**/*.ts" }"#,
        )
        .unwrap();

        let overrides = ConfigLayer {
            destination: Some("from-cli.json".to_string()),
            ..Default::default()
        };
        let config = Config::load(dir.path(), None, &overrides).unwrap();

        assert_eq!(config.destination, "from-cli.json");
        assert_eq!(config.files, "lib/**/*.ts");
        assert_eq!(
            config.destination_path(dir.path()),
            dir.path().join("from-cli.json")
        );
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path(), None, &ConfigLayer::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path(), Some(Path::new("nope.json")), &ConfigLayer::default())
            .unwrap_err();
        assert!(matches!(err, HtmlDataError::Config { .. }));
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        let err = Config::load(dir.path(), None, &ConfigLayer::default()).unwrap_err();
        assert!(matches!(err, HtmlDataError::Config { .. }));
    }
}
