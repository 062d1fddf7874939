//! Build spec - package type and ignore set resolved from `build.config`.
//!
//! Resolution is permissive: a missing descriptor, an unreadable one, or an
//! unknown `build_type` are reported and the defaults are kept. Unknown keys
//! are ignored so newer descriptors still load.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::descriptor::{parse_entries, split_list, strip_quotes};

/// File name of the project descriptor.
pub const DESCRIPTOR_NAME: &str = "build.config";

/// Shape of the final artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Executable (`<name>.elf`)
    #[default]
    Binary,
    /// Static library (`<name>.a`)
    StaticLib,
    /// Bundle directory (`<name>.red/`) holding the executable and resources
    Bundle,
}

impl PackageType {
    /// Get the descriptor keyword for this package type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Binary => "bin",
            PackageType::StaticLib => "lib",
            PackageType::Bundle => "pkg",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = String;

    /// Case-insensitive prefix match: `bin`, `binary`, `LIB`, `pkg...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = strip_quotes(s).to_ascii_lowercase();
        if lower.starts_with("bin") {
            Ok(PackageType::Binary)
        } else if lower.starts_with("pkg") {
            Ok(PackageType::Bundle)
        } else if lower.starts_with("lib") {
            Ok(PackageType::StaticLib)
        } else {
            Err(format!(
                "unknown build type '{}'; expected 'bin', 'lib' or 'pkg'",
                s
            ))
        }
    }
}

/// Package type and ignore set for one build session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
    package_type: PackageType,
    ignore: BTreeSet<String>,
}

impl BuildSpec {
    /// Resolve a spec from descriptor text.
    pub fn resolve(text: &str) -> Self {
        SpecBuilder::default().apply_text(text).finish()
    }

    /// Resolve the spec for a project root, with an optional package type
    /// override applied before the spec is frozen.
    ///
    /// A missing descriptor yields the defaults (binary, empty ignore set).
    pub fn load(root: &Path, package_override: Option<PackageType>) -> Self {
        let mut builder = SpecBuilder::default();
        let path = descriptor_path(root);

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => builder = builder.apply_text(&text),
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}; using defaults", path.display(), e)
                }
            }
        } else {
            tracing::debug!("No {} found, using defaults", path.display());
        }

        if let Some(package_type) = package_override {
            builder.package_type = package_type;
        }

        builder.finish()
    }

    /// The resolved package type.
    pub fn package_type(&self) -> PackageType {
        self.package_type
    }

    /// Filenames excluded from discovery.
    pub fn ignore_set(&self) -> &BTreeSet<String> {
        &self.ignore
    }

    /// Whether a bare filename is ignored.
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore.contains(file_name)
    }
}

/// Path of the descriptor for a project root.
pub fn descriptor_path(root: &Path) -> PathBuf {
    root.join(DESCRIPTOR_NAME)
}

#[derive(Default)]
struct SpecBuilder {
    package_type: PackageType,
    ignore: BTreeSet<String>,
}

impl SpecBuilder {
    fn apply_text(mut self, text: &str) -> Self {
        parse_entries(text, |key, value| match key {
            "build_type" => match value.parse::<PackageType>() {
                Ok(package_type) => {
                    tracing::debug!("Package type {}", package_type);
                    self.package_type = package_type;
                }
                Err(e) => tracing::warn!("{}; keeping '{}'", e, self.package_type),
            },
            "ignore" => {
                for entry in split_list(value) {
                    let name = strip_quotes(entry);
                    if !name.is_empty() {
                        tracing::debug!("Will ignore {}", name);
                        self.ignore.insert(name.to_string());
                    }
                }
            }
            _ => {}
        });
        self
    }

    fn finish(self) -> BuildSpec {
        BuildSpec {
            package_type: self.package_type,
            ignore: self.ignore,
        }
    }
}
