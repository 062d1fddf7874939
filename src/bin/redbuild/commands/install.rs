//! `redbuild install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use redbuild::ops::redbuild_install::install;
use redbuild::util::GlobalContext;

pub fn execute(args: InstallArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    install(&ctx, &args.location, args.package)?;
    Ok(())
}
