//! `redbuild run` command

use anyhow::Result;

use crate::cli::RunArgs;
use crate::commands::build::options;
use redbuild::ops::redbuild_run::run;
use redbuild::util::process::SystemRunner;
use redbuild::util::GlobalContext;

/// Returns the exit code of the program.
pub fn execute(args: RunArgs, verbose: bool) -> Result<i32> {
    let ctx = GlobalContext::new()?;
    let opts = options(args.build, verbose);

    let status = run(&ctx, &opts, &args.args, &SystemRunner)?;
    Ok(status.code.unwrap_or(1))
}
