//! Dependency records - include/link targets added during platform setup.
//!
//! A dependency contributes an include directory (`-I...`) and/or a link
//! target. How the link target renders depends on its [`DependencyKind`].
//!
//! Paths may start with `~`, which stands for the invoking user's home
//! directory. The placeholder is kept verbatim in the record and only
//! expanded when the dependency is rendered.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Placeholder for the user's home directory.
pub const HOME_PLACEHOLDER: char = '~';

/// Classification of a link/include target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Path-based archive or object, linked verbatim
    Local,
    /// System library, linked as `-l<name>`
    System,
    /// Apple framework, linked as `-framework <name>`
    Framework,
}

impl DependencyKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Local => "local",
            DependencyKind::System => "system",
            DependencyKind::Framework => "framework",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dependency of the build session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency kind (decides link rendering)
    pub kind: DependencyKind,
    /// Include directory, rendered as `-I<path>`
    pub include: Option<String>,
    /// Link target (path, library name or framework name)
    pub link: Option<String>,
    /// Directory to run `make` in before building
    pub build: Option<String>,
    /// Whether the dependency is built externally with `make`
    pub use_make: bool,
}

impl Dependency {
    /// Create a dependency. Empty strings are treated as absent.
    pub fn new(kind: DependencyKind, include: Option<&str>, link: Option<&str>) -> Self {
        Dependency {
            kind,
            include: non_empty(include),
            link: non_empty(link),
            build: None,
            use_make: false,
        }
    }

    /// Create a local (path-based) dependency.
    pub fn local(include: Option<&str>, link: Option<&str>) -> Self {
        Dependency::new(DependencyKind::Local, include, link)
    }

    /// Create a system library dependency (`-l<name>`).
    pub fn system_lib(name: &str) -> Self {
        Dependency::new(DependencyKind::System, None, Some(name))
    }

    /// Create a framework dependency (`-framework <name>`).
    pub fn framework(name: &str) -> Self {
        Dependency::new(DependencyKind::Framework, None, Some(name))
    }

    /// Attach an external `make` build directory.
    pub fn with_build(mut self, build: &str, use_make: bool) -> Self {
        self.build = non_empty(Some(build));
        self.use_make = use_make;
        self
    }

    /// Render the include directory, if any.
    pub fn render_include(&self, home: &Path) -> Option<String> {
        self.include
            .as_deref()
            .map(|include| format!("-I{}", expand_home(include, home)))
    }

    /// Render the link target as command-line tokens.
    ///
    /// Frameworks take two tokens (`-framework`, `<name>`).
    pub fn render_link(&self, home: &Path) -> Vec<String> {
        let Some(link) = self.link.as_deref() else {
            return Vec::new();
        };
        let link = expand_home(link, home);

        match self.kind {
            DependencyKind::Local => vec![link],
            DependencyKind::System => vec![format!("-l{}", link)],
            DependencyKind::Framework => vec!["-framework".to_string(), link],
        }
    }

    /// The external build directory with the home placeholder expanded.
    pub fn build_dir(&self, home: &Path) -> Option<String> {
        self.build.as_deref().map(|b| expand_home(b, home))
    }
}

/// Expand a leading `~` into the home directory.
///
/// Only the first character is considered; `~` anywhere else is kept.
pub fn expand_home(value: &str, home: &Path) -> String {
    match value.strip_prefix(HOME_PLACEHOLDER) {
        Some(rest) => format!("{}{}", home.display(), rest),
        None => value.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
