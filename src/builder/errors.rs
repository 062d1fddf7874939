//! Build session error types and diagnostics.
//!
//! Only fatal conditions are errors. Configuration problems, discovery
//! failures, scaffold failures and failing library units are reported with
//! `tracing::warn!` and the session continues.

use miette::Diagnostic;
use thiserror::Error;

/// Fatal error in a build session.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("no compiler selected for this session")]
    #[diagnostic(
        code(redbuild::compiler_unset),
        help("platform setup must run before synthesis; pick a target with `--target`")
    )]
    CompilerUnset,

    #[error("cannot derive a project name from `{root}`")]
    #[diagnostic(
        code(redbuild::no_project_name),
        help("run redbuild from inside the project directory")
    )]
    NoProjectName { root: String },

    #[error("`{command}` failed{}", exit_suffix(.code))]
    #[diagnostic(code(redbuild::command_failed))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("archiving failed: `{command}`")]
    #[diagnostic(
        code(redbuild::archive_failed),
        help("{failed_units} unit(s) failed to compile; see the warnings above")
    )]
    ArchiveFailed {
        command: String,
        failed_units: usize,
    },

    #[error("`{action}` needs a {expected} package, but this project builds a {actual}")]
    #[diagnostic(
        code(redbuild::wrong_package_type),
        help("set `build_type` in build.config or pass `--package`")
    )]
    WrongPackageType {
        action: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("artifact `{path}` does not exist")]
    #[diagnostic(code(redbuild::no_artifact), help("run `redbuild build` first"))]
    NoArtifact { path: String },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err = BuildError::CommandFailed {
            command: "gcc a.c -o demo.elf".to_string(),
            code: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "`gcc a.c -o demo.elf` failed with exit code 1"
        );

        let err = BuildError::CommandFailed {
            command: "gcc".to_string(),
            code: None,
        };
        assert_eq!(err.to_string(), "`gcc` failed");
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = BuildError::CompilerUnset;
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("redbuild::compiler_unset".to_string())
        );
    }
}
