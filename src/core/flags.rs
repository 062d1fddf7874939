//! Flag classes and their render rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four flag classes accumulated by a build session.
///
/// The class decides both the render prefix and where the flags land in a
/// synthesized command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagClass {
    /// Preprocessor definitions, rendered as `-D<token>`
    Preprocessor,
    /// Warning/compilation flags, rendered as `-W<token>`
    Compilation,
    /// Linker flags placed before includes and sources
    LinkerFront,
    /// Linker flags placed after link libraries
    LinkerBack,
}

impl FlagClass {
    /// All classes, in the order they first appear in a link command.
    pub const ALL: [FlagClass; 4] = [
        FlagClass::Preprocessor,
        FlagClass::LinkerFront,
        FlagClass::Compilation,
        FlagClass::LinkerBack,
    ];

    /// Render prefix for this class.
    pub fn prefix(&self) -> &'static str {
        match self {
            FlagClass::Preprocessor => "-D",
            FlagClass::Compilation => "-W",
            FlagClass::LinkerFront | FlagClass::LinkerBack => "",
        }
    }

    /// Render a single token.
    pub fn render(&self, token: &str) -> String {
        format!("{}{}", self.prefix(), token)
    }

    /// Get the class name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagClass::Preprocessor => "preprocessor",
            FlagClass::Compilation => "compilation",
            FlagClass::LinkerFront => "linker-front",
            FlagClass::LinkerBack => "linker-back",
        }
    }
}

impl fmt::Display for FlagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
