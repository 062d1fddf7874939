//! High-level operations.
//!
//! This module contains the implementation of redbuild commands.

pub mod redbuild_build;
pub mod redbuild_clean;
pub mod redbuild_install;
pub mod redbuild_run;

pub use redbuild_build::{build, build_dependencies, BuildOptions, BuildResult};
pub use redbuild_clean::clean;
pub use redbuild_install::install;
pub use redbuild_run::run;
