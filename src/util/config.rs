//! Configuration file support for Redbuild.
//!
//! Redbuild supports two configuration file locations:
//! - Global: `~/.redbuild/config.toml` - User-wide defaults
//! - Project: `.redbuild/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. This is separate
//! from the `build.config` project descriptor, which only carries the
//! package type and ignore list.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::platform::TargetSelector;

/// Redbuild configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Compiler and archiver names
    pub toolchain: ToolchainSettings,

    /// Core runtime dependency
    pub runtime: RuntimeConfig,

    /// Optional graphics dependency (native targets only)
    pub graphics: GraphicsConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Source extension to discover
    pub extension: Option<String>,

    /// Sort discovered sources by file name
    pub sort_sources: Option<bool>,

    /// Always emit compile_commands.json
    pub emit_compile_commands: bool,

    /// Run `make` for dependencies that require an external build
    pub build_deps: bool,

    /// Generate C sources from `.cred` files before discovery
    pub cred: bool,

    /// Default number of parallel jobs for library units
    pub jobs: Option<usize>,

    /// Default target selector
    pub target: Option<TargetSelector>,
}

/// Toolchain names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Compiler for native targets (default `gcc`)
    pub cc: Option<String>,

    /// Compiler for the freestanding target (default `aarch64-none-elf-gcc`)
    pub cross_cc: Option<String>,

    /// Archiver (default `ar`)
    pub ar: Option<String>,

    /// Source transpiler (default `cred`)
    pub cred: Option<String>,
}

/// Core runtime dependency linked into every build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Include directory
    pub include: Option<String>,

    /// Archive linked on native targets
    pub archive: Option<String>,

    /// Archive linked on the freestanding target
    pub freestanding_archive: Option<String>,

    /// `make` directory on native targets
    pub build: Option<String>,

    /// `make` directory on the freestanding target
    pub freestanding_build: Option<String>,
}

impl RuntimeConfig {
    pub fn include(&self) -> &str {
        self.include.as_deref().unwrap_or(DEFAULT_RUNTIME_INCLUDE)
    }

    pub fn archive(&self) -> &str {
        self.archive.as_deref().unwrap_or(DEFAULT_RUNTIME_ARCHIVE)
    }

    pub fn freestanding_archive(&self) -> &str {
        self.freestanding_archive
            .as_deref()
            .unwrap_or(DEFAULT_FREESTANDING_ARCHIVE)
    }

    pub fn build(&self) -> &str {
        self.build.as_deref().unwrap_or(DEFAULT_RUNTIME_BUILD)
    }

    pub fn freestanding_build(&self) -> &str {
        self.freestanding_build
            .as_deref()
            .unwrap_or(DEFAULT_FREESTANDING_BUILD)
    }

    fn merge(&mut self, other: RuntimeConfig) {
        if other.include.is_some() {
            self.include = other.include;
        }
        if other.archive.is_some() {
            self.archive = other.archive;
        }
        if other.freestanding_archive.is_some() {
            self.freestanding_archive = other.freestanding_archive;
        }
        if other.build.is_some() {
            self.build = other.build;
        }
        if other.freestanding_build.is_some() {
            self.freestanding_build = other.freestanding_build;
        }
    }
}

/// Graphics dependency linked on native targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Whether to link the graphics archive (default `true`)
    pub enabled: Option<bool>,

    /// Include directory
    pub include: Option<String>,

    /// Archive to link
    pub archive: Option<String>,
}

impl GraphicsConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn include(&self) -> &str {
        self.include.as_deref().unwrap_or(DEFAULT_GRAPHICS_INCLUDE)
    }

    pub fn archive(&self) -> &str {
        self.archive.as_deref().unwrap_or(DEFAULT_GRAPHICS_ARCHIVE)
    }

    fn merge(&mut self, other: GraphicsConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.include.is_some() {
            self.include = other.include;
        }
        if other.archive.is_some() {
            self.archive = other.archive;
        }
    }
}

/// Fallback values used when neither config layer sets a field.
pub const DEFAULT_EXTENSION: &str = ".c";
pub const DEFAULT_CC: &str = "gcc";
pub const DEFAULT_CROSS_CC: &str = "aarch64-none-elf-gcc";
pub const DEFAULT_AR: &str = "ar";
pub const DEFAULT_CRED: &str = "cred";
pub const DEFAULT_RUNTIME_INCLUDE: &str = "~/redlib";
pub const DEFAULT_RUNTIME_ARCHIVE: &str = "~/redlib/clibshared.a";
pub const DEFAULT_FREESTANDING_ARCHIVE: &str = "~/redlib/libshared.a";
pub const DEFAULT_RUNTIME_BUILD: &str = "~/redlib";
pub const DEFAULT_FREESTANDING_BUILD: &str = "~/os/";
pub const DEFAULT_GRAPHICS_INCLUDE: &str = "~/raylib/src";
pub const DEFAULT_GRAPHICS_ARCHIVE: &str = "~/raylib/src/libraylib.a";

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
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.extension.is_some() {
            self.build.extension = other.build.extension;
        }
        if other.build.sort_sources.is_some() {
            self.build.sort_sources = other.build.sort_sources;
        }
        if other.build.emit_compile_commands {
            self.build.emit_compile_commands = true;
        }
        if other.build.build_deps {
            self.build.build_deps = true;
        }
        if other.build.cred {
            self.build.cred = true;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.target.is_some() {
            self.build.target = other.build.target;
        }

        if other.toolchain.cc.is_some() {
            self.toolchain.cc = other.toolchain.cc;
        }
        if other.toolchain.cross_cc.is_some() {
            self.toolchain.cross_cc = other.toolchain.cross_cc;
        }
        if other.toolchain.ar.is_some() {
            self.toolchain.ar = other.toolchain.ar;
        }
        if other.toolchain.cred.is_some() {
            self.toolchain.cred = other.toolchain.cred;
        }

        self.runtime.merge(other.runtime);
        self.graphics.merge(other.graphics);
    }

    /// Source extension, with a leading dot.
    pub fn extension(&self) -> String {
        match self.build.extension.as_deref() {
            Some(ext) if ext.starts_with('.') => ext.to_string(),
            Some(ext) if !ext.is_empty() => format!(".{}", ext),
            _ => DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Whether discovery sorts its results.
    pub fn sort_sources(&self) -> bool {
        self.build.sort_sources.unwrap_or(true)
    }

    /// Native compiler name.
    pub fn cc(&self) -> &str {
        self.toolchain.cc.as_deref().unwrap_or(DEFAULT_CC)
    }

    /// Freestanding compiler name.
    pub fn cross_cc(&self) -> &str {
        self.toolchain.cross_cc.as_deref().unwrap_or(DEFAULT_CROSS_CC)
    }

    /// Archiver name.
    pub fn ar(&self) -> &str {
        self.toolchain.ar.as_deref().unwrap_or(DEFAULT_AR)
    }

    /// Transpiler name.
    pub fn cred(&self) -> &str {
        self.toolchain.cred.as_deref().unwrap_or(DEFAULT_CRED)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.redbuild/config.toml)
/// 2. Global config (~/.redbuild/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the project config path (.redbuild/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".redbuild").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.extension(), ".c");
        assert!(config.sort_sources());
        assert_eq!(config.cc(), "gcc");
        assert_eq!(config.cross_cc(), "aarch64-none-elf-gcc");
        assert_eq!(config.ar(), "ar");
        assert_eq!(config.cred(), "cred");
        assert!(!config.build.cred);
        assert!(config.graphics.enabled());
        assert_eq!(config.runtime.archive(), "~/redlib/clibshared.a");
        assert_eq!(config.runtime.freestanding_build(), "~/os/");
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[build]
extension = "cpp"
sort_sources = false
jobs = 4
target = "red"

[toolchain]
cc = "clang"

[graphics]
enabled = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.extension(), ".cpp");
        assert!(!config.sort_sources());
        assert_eq!(config.build.jobs, Some(4));
        assert_eq!(config.build.target, Some(TargetSelector::Red));
        assert_eq!(config.cc(), "clang");
        assert_eq!(config.ar(), "ar");
        assert!(!config.graphics.enabled());
        assert_eq!(config.graphics.include(), "~/raylib/src");
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[build\nnot toml").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[toolchain]
cc = "gcc-13"
ar = "llvm-ar"

[build]
jobs = 2
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[toolchain]
cc = "clang"

[build]
emit_compile_commands = true
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);
        assert_eq!(config.cc(), "clang");
        assert_eq!(config.ar(), "llvm-ar");
        assert_eq!(config.build.jobs, Some(2));
        assert!(config.build.emit_compile_commands);
    }

    #[test]
    fn test_partial_section_override_keeps_global_fields() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[runtime]
include = "/opt/redlib"
archive = "/opt/redlib/clibshared.a"

[graphics]
enabled = false
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[runtime]
build = "/work/redlib"

[graphics]
include = "/opt/raylib/src"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);
        assert_eq!(config.runtime.include(), "/opt/redlib");
        assert_eq!(config.runtime.archive(), "/opt/redlib/clibshared.a");
        assert_eq!(config.runtime.build(), "/work/redlib");
        assert_eq!(config.runtime.freestanding_archive(), "~/redlib/libshared.a");
        assert!(!config.graphics.enabled());
        assert_eq!(config.graphics.include(), "/opt/raylib/src");
        assert_eq!(config.graphics.archive(), "~/raylib/src/libraylib.a");
    }
}
