//! Build executor with progress reporting.
//!
//! Runs a synthesized [`Invocation`] through a [`CommandRunner`]. A failing
//! link command ends the session. Library units are compiled independently:
//! a failing unit is reported and the remaining units still compile; only
//! the archive command's own failure is fatal.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::builder::command::CommandSpec;
use crate::builder::errors::BuildError;
use crate::builder::synthesis::{Invocation, UnitCommand};
use crate::util::process::{CommandRunner, RunStatus};

/// Outcome of a finished execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Number of commands handed to the runner
    pub commands_run: usize,
    /// Sources of library units that failed to compile, in discovery order
    pub failed_units: Vec<PathBuf>,
}

impl ExecutionReport {
    pub fn is_clean(&self) -> bool {
        self.failed_units.is_empty()
    }
}

/// Build executor.
pub struct BuildExecutor<'a> {
    runner: &'a dyn CommandRunner,
    root: &'a Path,
    verbose: bool,
    jobs: Option<usize>,
}

impl<'a> BuildExecutor<'a> {
    /// Create an executor running commands from `root`.
    pub fn new(runner: &'a dyn CommandRunner, root: &'a Path) -> Self {
        BuildExecutor {
            runner,
            root,
            verbose: false,
            jobs: None,
        }
    }

    /// Enable verbose output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Compile library units on `jobs` threads (more than one enables the pool).
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Execute every command of the invocation.
    pub fn execute(&self, invocation: &Invocation) -> Result<ExecutionReport> {
        let start = Instant::now();

        let report = match invocation {
            Invocation::Link { command } => {
                eprintln!("     Linking {}", artifact_of(command));
                self.run_checked(command)?;
                ExecutionReport {
                    commands_run: 1,
                    failed_units: Vec::new(),
                }
            }
            Invocation::Library { compiles, archive } => {
                let failed_units = self.compile_units(compiles)?;
                if !failed_units.is_empty() {
                    tracing::warn!(
                        "{} of {} unit(s) failed to compile",
                        failed_units.len(),
                        compiles.len()
                    );
                }

                eprintln!("   Archiving {}", artifact_of(archive));
                let status = self.run(archive)?;
                if !status.is_success() {
                    return Err(BuildError::ArchiveFailed {
                        command: archive.to_string(),
                        failed_units: failed_units.len(),
                    }
                    .into());
                }

                ExecutionReport {
                    commands_run: compiles.len() + 1,
                    failed_units,
                }
            }
        };

        eprintln!("    Finished in {:.2}s", start.elapsed().as_secs_f64());
        Ok(report)
    }

    fn compile_units(&self, compiles: &[UnitCommand]) -> Result<Vec<PathBuf>> {
        if compiles.is_empty() {
            return Ok(Vec::new());
        }
        eprintln!("   Compiling {} unit(s)", compiles.len());

        let pb = self.progress_bar(compiles.len());
        let compile_one = |unit: &UnitCommand| -> bool {
            if self.verbose {
                eprintln!("   Compiling {}", unit.unit.source.display());
            }
            let ok = match self.run(&unit.command) {
                Ok(status) => status.is_success(),
                Err(err) => {
                    tracing::warn!("{:#}", err);
                    false
                }
            };
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            ok
        };

        let results: Vec<bool> = match self.jobs {
            Some(jobs) if jobs > 1 => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .context("failed to start the compile thread pool")?;
                pool.install(|| compiles.par_iter().map(compile_one).collect())
            }
            _ => compiles.iter().map(compile_one).collect(),
        };

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let mut failed = Vec::new();
        for (unit, ok) in compiles.iter().zip(results) {
            if !ok {
                tracing::warn!("failed to compile `{}`", unit.unit.source.display());
                failed.push(unit.unit.source.clone());
            }
        }
        Ok(failed)
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if self.verbose || total <= 1 {
            return None;
        }
        let pb = ProgressBar::new(total as u64);
        let template = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }

    fn run(&self, command: &CommandSpec) -> Result<RunStatus> {
        if self.verbose {
            eprintln!("{}", command);
        }
        self.runner
            .run(command, self.root)
            .with_context(|| format!("failed to run `{}`", command))
    }

    fn run_checked(&self, command: &CommandSpec) -> Result<()> {
        let status = self.run(command)?;
        if !status.is_success() {
            return Err(BuildError::CommandFailed {
                command: command.to_string(),
                code: status.code,
            }
            .into());
        }
        Ok(())
    }
}

/// Output path of a command: the token after `-o`, or the archive target.
fn artifact_of(command: &CommandSpec) -> &str {
    let args = &command.args;
    args.iter()
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 1))
        .or_else(|| args.get(1))
        .map(String::as_str)
        .unwrap_or(&command.program)
}
