//! Configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::render::{RenderOptions, DEFAULT_BACKGROUND, DEFAULT_THEME};
use crate::resolve::{Resolver, Strategy, DEFAULT_EXECUTABLE, NPM_GLOBAL_FALLBACK};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Binary name looked up on PATH
    pub executable: String,
    /// Explicit renderer path, tried before PATH
    pub executable_path: Option<PathBuf>,
    /// Fallback locations relative to the home directory
    pub fallback_paths: Vec<PathBuf>,
    pub theme: String,
    pub background: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            executable_path: None,
            fallback_paths: vec![PathBuf::from(NPM_GLOBAL_FALLBACK)],
            theme: DEFAULT_THEME.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl Config {
    /// Load from `path` if given, otherwise from the default location when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(default_path) if default_path.exists() => Self::load_from(&default_path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Strategy list: explicit path, PATH lookup, then home fallbacks.
    pub fn resolver(&self) -> Resolver {
        let mut strategies = Vec::new();

        if let Some(path) = &self.executable_path {
            strategies.push(Strategy::Explicit { path: path.clone() });
        }
        strategies.push(Strategy::SearchPath { name: self.executable.clone() });
        strategies.extend(
            self.fallback_paths
                .iter()
                .map(|path| Strategy::HomeRelative { path: path.clone() }),
        );

        Resolver::new(strategies)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            theme: self.theme.clone(),
            background: self.background.clone(),
        }
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mermaid-render").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_matches_builtin_resolver() {
        let config = Config::default();
        assert_eq!(config.resolver(), Resolver::default());
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "theme": "forest" }"#).unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.theme, "forest");
        assert_eq!(config.background, "transparent");
        assert_eq!(config.executable, "mmdc");
    }

    #[test]
    fn test_executable_path_goes_first() {
        let config = Config {
            executable_path: Some(PathBuf::from("/opt/mmdc")),
            fallback_paths: vec![PathBuf::from("a/mmdc"), PathBuf::from("b/mmdc")],
            ..Default::default()
        };

        let resolver = config.resolver();
        let strategies = resolver.strategies();
        assert_eq!(strategies.len(), 4);
        assert_eq!(strategies[0], Strategy::Explicit { path: PathBuf::from("/opt/mmdc") });
        assert_eq!(strategies[1], Strategy::SearchPath { name: "mmdc".into() });
        assert_eq!(strategies[3], Strategy::HomeRelative { path: PathBuf::from("b/mmdc") });
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(Some(temp_dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_serialization() {
        let config = Config {
            theme: "neutral".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
