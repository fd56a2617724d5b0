//! Configuration file support for Stevedore.
//!
//! Stevedore supports two configuration file locations:
//! - Global: `~/.stevedore/config.toml` - User-wide defaults
//! - Project: `.stevedore/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Everything has a
//! working default, so both files are optional: an unconfigured run
//! reproduces the stock jemalloc-enabled musl build.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Fixed target platform the launcher builds for unless overridden.
pub const DEFAULT_TARGET: &str = "x86_64-unknown-linux-musl";

/// Package built by the `binary` artifact unless overridden.
pub const DEFAULT_PACKAGE: &str = "pet_store";

/// Cross C compiler/linker used on the native path unless overridden.
pub const DEFAULT_CROSS_CC: &str = "musl-gcc";

fn default_features() -> Vec<String> {
    vec!["jemalloc".to_string()]
}

/// Stevedore configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildSettings,

    /// Feature flags per artifact
    pub features: FeatureSettings,

    /// Build tool overrides
    pub tools: ToolSettings,

    /// Cross-toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Target triple to build for (default: x86_64-unknown-linux-musl)
    pub target: Option<String>,

    /// Package name built by the `binary` artifact (default: pet_store)
    pub package: Option<String>,
}

/// Feature flags passed to the build tool, per artifact.
///
/// An absent field means the default (`["jemalloc"]`); an explicitly
/// empty list disables the `--features` flag entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    /// Features for library builds
    pub library: Option<Vec<String>>,

    /// Features for binary builds
    pub binary: Option<Vec<String>>,
}

/// Paths to the underlying build tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Path to cargo (default: `cargo` on PATH)
    pub cargo: Option<PathBuf>,

    /// Path to the cross wrapper (default: `cross` on PATH)
    pub cross: Option<PathBuf>,
}

/// Cross-toolchain settings for the native path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// C compiler/linker for the fixed target (default: musl-gcc)
    pub cc: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.target.is_some() {
            self.build.target = other.build.target;
        }
        if other.build.package.is_some() {
            self.build.package = other.build.package;
        }
        if other.features.library.is_some() {
            self.features.library = other.features.library;
        }
        if other.features.binary.is_some() {
            self.features.binary = other.features.binary;
        }
        if other.tools.cargo.is_some() {
            self.tools.cargo = other.tools.cargo;
        }
        if other.tools.cross.is_some() {
            self.tools.cross = other.tools.cross;
        }
        if other.toolchain.cc.is_some() {
            self.toolchain.cc = other.toolchain.cc;
        }
    }

    /// The target triple to build for.
    pub fn target(&self) -> &str {
        self.build.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    /// The package built by the `binary` artifact.
    pub fn package(&self) -> &str {
        self.build.package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    /// The cross C compiler/linker for the native path.
    pub fn cross_cc(&self) -> &str {
        self.toolchain.cc.as_deref().unwrap_or(DEFAULT_CROSS_CC)
    }

    /// Feature flags for library builds.
    pub fn library_features(&self) -> Vec<String> {
        self.features.library.clone().unwrap_or_else(default_features)
    }

    /// Feature flags for binary builds.
    pub fn binary_features(&self) -> Vec<String> {
        self.features.binary.clone().unwrap_or_else(default_features)
    }

    /// The cargo program to invoke on the native path.
    pub fn cargo_program(&self) -> String {
        resolve_tool(self.tools.cargo.as_ref(), "STEVEDORE_CARGO", "cargo")
    }

    /// The cross program to invoke on the alternate path.
    pub fn cross_program(&self) -> String {
        resolve_tool(self.tools.cross.as_ref(), "STEVEDORE_CROSS", "cross")
    }
}

/// Resolve a tool: configured path, then environment override, then the
/// bare name (looked up on PATH at spawn time).
fn resolve_tool(configured: Option<&PathBuf>, env_key: &str, fallback: &str) -> String {
    if let Some(path) = configured {
        return path.display().to_string();
    }

    if let Ok(value) = std::env::var(env_key) {
        if !value.is_empty() {
            return value;
        }
    }

    fallback.to_string()
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.stevedore/config.toml)
/// 2. Global config (~/.stevedore/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        if global.exists() {
            config.merge(Config::load_or_default(global));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config path (~/.stevedore/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".stevedore").join("config.toml"))
}

/// Get the project config path (.stevedore/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".stevedore").join("config.toml")
}
