//! Target platform selection.
//!
//! The platform is chosen once at session start from a [`TargetSelector`].
//! `Native` is only one resolution strategy; logic downstream only ever
//! sees a concrete [`Platform`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A concrete target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux with a GNU-style linker
    Linux,
    /// macOS with system frameworks
    Macos,
    /// Windows with the LLD linker
    Windows,
    /// The freestanding aarch64 target (no libc, no entry symbol)
    Freestanding,
}

impl Platform {
    /// Resolve the platform of the host running this process.
    ///
    /// Hosts other than Linux, macOS and Windows resolve to Linux.
    pub fn host() -> Self {
        Platform::from_os(std::env::consts::OS)
    }

    /// Map an OS name (as in `std::env::consts::OS`) to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::Macos,
            "windows" => Platform::Windows,
            _ => Platform::Linux,
        }
    }

    /// Whether this is the freestanding cross target.
    pub fn is_freestanding(&self) -> bool {
        matches!(self, Platform::Freestanding)
    }

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Macos => "macos",
            Platform::Windows => "windows",
            Platform::Freestanding => "red",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the target platform is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSelector {
    /// Detect the host platform
    #[default]
    Native,
    /// Explicit Linux target
    Linux,
    /// Explicit macOS target
    Macos,
    /// Explicit Windows target
    Windows,
    /// The freestanding cross target
    #[serde(alias = "freestanding")]
    Red,
}

impl TargetSelector {
    /// Resolve the selector into a concrete platform.
    pub fn resolve(self) -> Platform {
        match self {
            TargetSelector::Native => Platform::host(),
            TargetSelector::Linux => Platform::Linux,
            TargetSelector::Macos => Platform::Macos,
            TargetSelector::Windows => Platform::Windows,
            TargetSelector::Red => Platform::Freestanding,
        }
    }
}

impl FromStr for TargetSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" | "cross" => Ok(TargetSelector::Native),
            "linux" => Ok(TargetSelector::Linux),
            "macos" | "mac" => Ok(TargetSelector::Macos),
            "windows" => Ok(TargetSelector::Windows),
            "red" | "freestanding" => Ok(TargetSelector::Red),
            _ => Err(format!(
                "invalid target '{}'; expected 'native', 'linux', 'macos', 'windows' or 'red'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("macos"), Platform::Macos);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("freebsd"), Platform::Linux);
    }

    #[test]
    fn test_selector_resolve() {
        assert_eq!(TargetSelector::Red.resolve(), Platform::Freestanding);
        assert_eq!(TargetSelector::Macos.resolve(), Platform::Macos);
        assert!(!TargetSelector::Native.resolve().is_freestanding());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!("RED".parse::<TargetSelector>().unwrap(), TargetSelector::Red);
        assert_eq!("mac".parse::<TargetSelector>().unwrap(), TargetSelector::Macos);
        assert_eq!("cross".parse::<TargetSelector>().unwrap(), TargetSelector::Native);
        assert!("amiga".parse::<TargetSelector>().is_err());
    }
}
