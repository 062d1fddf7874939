//! `redbuild build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use redbuild::ops::redbuild_build::{build, BuildOptions};
use redbuild::util::process::SystemRunner;
use redbuild::util::GlobalContext;

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let opts = options(args, verbose);

    let result = build(&ctx, &opts, &SystemRunner)?;

    if let Some(report) = &result.report {
        if !report.is_clean() {
            eprintln!(
                "     Skipped {} unit(s) that failed to compile",
                report.failed_units.len()
            );
        }
    }

    Ok(())
}

/// Translate CLI arguments into build options.
pub fn options(args: BuildArgs, verbose: bool) -> BuildOptions {
    BuildOptions {
        target: args.target,
        package: args.package,
        extension: args.extension,
        emit_compile_commands: args.emit_compile_commands,
        dry_run: args.dry_run,
        jobs: args.jobs,
        build_deps: args.build_deps,
        cred: args.cred,
        verbose,
    }
}
