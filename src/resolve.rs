//! Locating the Mermaid CLI executable
//!
//! Resolution walks an ordered list of [`Strategy`] values and stops at the
//! first one that yields an existing file. The environment is read through a
//! [`Probe`] so lookups can be pointed at a scratch directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{RenderError, Result};

/// Default name of the Mermaid CLI binary.
pub const DEFAULT_EXECUTABLE: &str = "mmdc";

/// Where the global npm prefix puts `mmdc`, relative to the home directory.
#[cfg(windows)]
pub const NPM_GLOBAL_FALLBACK: &str = "AppData/Roaming/npm/mmdc.cmd";
#[cfg(not(windows))]
pub const NPM_GLOBAL_FALLBACK: &str = ".npm-global/bin/mmdc";

/// One way of finding the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Look the name up on the executable search path.
    SearchPath { name: String },
    /// A path below the user's home directory.
    HomeRelative { path: PathBuf },
    /// A path used verbatim.
    Explicit { path: PathBuf },
}

impl Strategy {
    fn describe(&self, probe: &dyn Probe) -> String {
        match self {
            Strategy::SearchPath { name } => format!("`{}` on PATH", name),
            Strategy::HomeRelative { path } => match probe.home_dir() {
                Some(home) => home.join(path).display().to_string(),
                None => format!("~/{}", path.display()),
            },
            Strategy::Explicit { path } => path.display().to_string(),
        }
    }
}

/// Read-only view of the environment used during resolution.
pub trait Probe {
    /// Find `name` on the executable search path.
    fn search_path(&self, name: &str) -> Option<PathBuf>;

    /// The current user's home directory, if known.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Whether `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Probe backed by the real process environment.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    search_path: Option<OsString>,
    home: Option<PathBuf>,
}

impl SystemProbe {
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
            home: dirs::home_dir(),
        }
    }

    /// Override the search path (same format as `PATH`).
    #[cfg(test)]
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    #[cfg(test)]
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl Probe for SystemProbe {
    fn search_path(&self, name: &str) -> Option<PathBuf> {
        let paths = self.search_path.as_ref()?;
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        which::which_in(name, Some(paths), cwd).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Ordered list of strategies, first hit wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    strategies: Vec<Strategy>,
}

impl Resolver {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    /// `mmdc` on PATH, then the global npm install directory.
    pub fn default_strategies() -> Vec<Strategy> {
        vec![
            Strategy::SearchPath { name: DEFAULT_EXECUTABLE.to_string() },
            Strategy::HomeRelative { path: PathBuf::from(NPM_GLOBAL_FALLBACK) },
        ]
    }

    #[cfg(test)]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Name reported when nothing is found.
    fn executable_name(&self) -> String {
        self.strategies
            .iter()
            .find_map(|s| match s {
                Strategy::SearchPath { name } => Some(name.clone()),
                _ => None,
            })
            .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string())
    }

    pub fn resolve(&self, probe: &dyn Probe) -> Result<PathBuf> {
        for strategy in &self.strategies {
            let found = match strategy {
                Strategy::SearchPath { name } => probe.search_path(name),
                Strategy::HomeRelative { path } => probe
                    .home_dir()
                    .map(|home| home.join(path))
                    .filter(|candidate| probe.is_file(candidate)),
                Strategy::Explicit { path } => {
                    Some(path.clone()).filter(|candidate| probe.is_file(candidate))
                }
            };

            match found {
                Some(path) => {
                    debug!("Resolved renderer via {:?}: {}", strategy, path.display());
                    return Ok(path);
                }
                None if matches!(strategy, Strategy::Explicit { .. }) => {
                    warn!("Configured renderer {} does not exist", strategy.describe(probe))
                }
                None => debug!("No renderer at {}", strategy.describe(probe)),
            }
        }

        Err(RenderError::ExecutableNotFound {
            name: self.executable_name(),
            tried: self.strategies.iter().map(|s| s.describe(probe)).collect(),
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Self::default_strategies())
    }
}
