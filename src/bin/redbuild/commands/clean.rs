//! `redbuild clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use redbuild::ops::redbuild_clean::clean;
use redbuild::util::GlobalContext;

pub fn execute(_args: CleanArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    clean(&ctx)?;
    Ok(())
}
