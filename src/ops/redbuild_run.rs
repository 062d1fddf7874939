//! Implementation of `redbuild run`.

use anyhow::Result;

use crate::builder::command::CommandSpec;
use crate::builder::errors::BuildError;
use crate::core::build_spec::{BuildSpec, PackageType};
use crate::ops::redbuild_build::{build, BuildOptions};
use crate::util::context::GlobalContext;
use crate::util::process::{CommandRunner, RunStatus};

/// Build the project, then execute its artifact with `args`.
///
/// Only binary and bundle packages can be run. On a dry run the artifact
/// command is printed instead of executed.
pub fn run(
    ctx: &GlobalContext,
    opts: &BuildOptions,
    args: &[String],
    runner: &dyn CommandRunner,
) -> Result<RunStatus> {
    let package_type = BuildSpec::load(ctx.cwd(), opts.package).package_type();
    if package_type == PackageType::StaticLib {
        return Err(BuildError::WrongPackageType {
            action: "run",
            expected: "bin or pkg",
            actual: package_type.to_string(),
        }
        .into());
    }

    let result = build(ctx, opts, runner)?;
    let artifact = ctx.cwd().join(&result.artifact);
    let command = CommandSpec::new(artifact.display().to_string()).args(args);

    if opts.dry_run {
        println!("{}", command);
        return Ok(RunStatus::success());
    }

    if !artifact.is_file() {
        return Err(BuildError::NoArtifact {
            path: result.artifact.display().to_string(),
        }
        .into());
    }

    eprintln!("     Running `{}`", command);
    runner.run(&command, ctx.cwd())
}
