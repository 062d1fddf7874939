//! compile_commands.json emission for IDE integration.
//!
//! The database holds a single entry describing the session's
//! compile-and-link command. `file` always names `main.c` in the working
//! directory. Library sessions have no single command and are not
//! recorded.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::builder::command::CommandSpec;
use crate::util::fs::write_string;

/// File name of the database, written to the project root.
pub const COMPILE_COMMANDS_NAME: &str = "compile_commands.json";

/// Entry point recorded in the `file` field.
pub const ENTRY_POINT: &str = "main.c";

/// compile_commands.json entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    pub arguments: Vec<String>,
    pub directory: String,
    pub file: String,
    pub output: String,
}

impl CompileCommand {
    /// Build an entry from a synthesized command.
    pub fn from_spec(command: &CommandSpec, cwd: &Path, artifact: &Path) -> Self {
        CompileCommand::with_arguments(command.tokens(), cwd, artifact)
    }

    /// Build an entry from rendered command text.
    ///
    /// The text is split on runs of whitespace; no empty arguments are
    /// produced.
    pub fn from_command_line(line: &str, cwd: &Path, artifact: &Path) -> Self {
        let arguments = line.split_whitespace().map(str::to_string).collect();
        CompileCommand::with_arguments(arguments, cwd, artifact)
    }

    fn with_arguments(arguments: Vec<String>, cwd: &Path, artifact: &Path) -> Self {
        CompileCommand {
            arguments,
            directory: cwd.display().to_string(),
            file: cwd.join(ENTRY_POINT).display().to_string(),
            output: cwd.join(artifact).display().to_string(),
        }
    }
}

/// Render the single-entry database.
pub fn render(entry: &CompileCommand) -> Result<String> {
    Ok(serde_json::to_string_pretty(&[entry])?)
}

/// Write the database to `<root>/compile_commands.json`.
pub fn emit(entry: &CompileCommand, root: &Path) -> Result<()> {
    let path = root.join(COMPILE_COMMANDS_NAME);
    write_string(&path, &render(entry)?)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
