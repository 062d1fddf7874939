//! Implementation of `redbuild clean`.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::compile_commands::COMPILE_COMMANDS_NAME;
use crate::builder::discovery::discover;
use crate::builder::errors::BuildError;
use crate::builder::planner::{bundle_dir, project_name, BINARY_SUFFIX, LIBRARY_SUFFIX};
use crate::core::build_spec::BuildSpec;
use crate::util::context::GlobalContext;
use crate::util::fs::remove_path_if_exists;

/// Remove build outputs of the project.
///
/// Every artifact shape is removed regardless of the current package type,
/// along with the objects of all currently discoverable units and the
/// compile database. Returns the removed paths, relative to the root.
pub fn clean(ctx: &GlobalContext) -> Result<Vec<PathBuf>> {
    let root = ctx.cwd();
    let name = project_name(root).ok_or_else(|| BuildError::NoProjectName {
        root: root.display().to_string(),
    })?;
    let config = ctx.load_config();
    let spec = BuildSpec::load(root, None);

    let mut candidates = vec![
        PathBuf::from(format!("{}{}", name, BINARY_SUFFIX)),
        PathBuf::from(format!("{}{}", name, LIBRARY_SUFFIX)),
        bundle_dir(&name),
        PathBuf::from(COMPILE_COMMANDS_NAME),
    ];
    candidates.extend(
        discover(root, &config.extension(), spec.ignore_set(), true)
            .into_iter()
            .map(|unit| unit.object),
    );

    let mut removed = Vec::new();
    for path in candidates {
        if remove_path_if_exists(&root.join(&path))? {
            tracing::debug!("Removed {}", path.display());
            removed.push(path);
        }
    }

    eprintln!("     Removed {} file(s)", removed.len());
    Ok(removed)
}
