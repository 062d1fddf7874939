//! Source generation with the `cred` transpiler.
//!
//! When enabled, every discovered `.cred` file is handed to one `cred`
//! invocation producing `<name><ext>` in the project root. The generated
//! file is then discovered like any other source.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::command::CommandSpec;
use crate::builder::discovery::discover;
use crate::builder::errors::BuildError;
use crate::util::process::CommandRunner;

/// Extension of `cred` sources.
pub const CRED_EXTENSION: &str = ".cred";

/// Command that transpiles `inputs` into `output`.
pub fn cred_command(program: &str, inputs: &[PathBuf], output: &Path) -> CommandSpec {
    CommandSpec::new(program)
        .args(inputs.iter().map(|p| p.display().to_string()))
        .arg("-o")
        .arg(output.display().to_string())
}

/// One generation pass over a project.
#[derive(Debug, Clone)]
pub struct CodeGen<'a> {
    root: &'a Path,
    program: &'a str,
    output: PathBuf,
    sort: bool,
}

impl<'a> CodeGen<'a> {
    /// Generate `<project_name><extension>` under `root` using `program`.
    pub fn new(root: &'a Path, program: &'a str, project_name: &str, extension: &str) -> Self {
        CodeGen {
            root,
            program,
            output: PathBuf::from(format!("{}{}", project_name, extension)),
            sort: true,
        }
    }

    pub fn sorted(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Build the command for the `.cred` sources under the root, if any.
    pub fn command(&self, ignore: &BTreeSet<String>) -> Option<CommandSpec> {
        let inputs: Vec<PathBuf> = discover(self.root, CRED_EXTENSION, ignore, self.sort)
            .into_iter()
            .map(|unit| unit.source)
            .collect();
        if inputs.is_empty() {
            return None;
        }
        Some(cred_command(self.program, &inputs, &self.output))
    }

    /// Run the transpiler. A failing run is fatal.
    ///
    /// Returns the generated path, or `None` when there was nothing to
    /// generate or `dry_run` only printed the command.
    pub fn run(
        &self,
        ignore: &BTreeSet<String>,
        runner: &dyn CommandRunner,
        dry_run: bool,
    ) -> Result<Option<PathBuf>> {
        let Some(command) = self.command(ignore) else {
            tracing::warn!("no {} sources found; skipping code generation", CRED_EXTENSION);
            return Ok(None);
        };

        if dry_run {
            println!("{}", command);
            return Ok(None);
        }

        eprintln!("  Generating {}", self.output.display());
        tracing::debug!("{}", command);
        let status = runner.run(&command, self.root)?;
        if !status.is_success() {
            return Err(BuildError::CommandFailed {
                command: command.to_string(),
                code: status.code,
            }
            .into());
        }
        Ok(Some(self.output.clone()))
    }
}
