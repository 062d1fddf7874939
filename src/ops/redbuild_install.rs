//! Implementation of `redbuild install`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::errors::BuildError;
use crate::builder::planner::{bundle_dir, project_name};
use crate::core::build_spec::{BuildSpec, PackageType};
use crate::util::context::GlobalContext;
use crate::util::fs::copy_dir_all;

/// Copy the project's bundle directory to `location`.
///
/// An existing directory receives the bundle inside it; any other path
/// becomes the bundle copy itself. Returns the installed path.
pub fn install(
    ctx: &GlobalContext,
    location: &Path,
    package: Option<PackageType>,
) -> Result<PathBuf> {
    let root = ctx.cwd();
    let package_type = BuildSpec::load(root, package).package_type();
    if package_type != PackageType::Bundle {
        return Err(BuildError::WrongPackageType {
            action: "install",
            expected: "pkg",
            actual: package_type.to_string(),
        }
        .into());
    }

    let name = project_name(root).ok_or_else(|| BuildError::NoProjectName {
        root: root.display().to_string(),
    })?;
    let bundle = bundle_dir(&name);
    let source = root.join(&bundle);
    if !source.is_dir() {
        return Err(BuildError::NoArtifact {
            path: bundle.display().to_string(),
        }
        .into());
    }

    let dest = if location.is_dir() {
        location.join(&bundle)
    } else {
        location.to_path_buf()
    };

    tracing::debug!("Installing {} to {}", source.display(), dest.display());
    copy_dir_all(&source, &dest)?;
    eprintln!("   Installed {} to {}", bundle.display(), dest.display());
    Ok(dest)
}
