//! Redbuild - a build-descriptor resolver and compiler-invocation synthesizer for C
//!
//! This crate provides the core library functionality for Redbuild:
//! resolving `build.config`, discovering sources, accumulating flags and
//! dependencies, planning outputs, and synthesizing the compiler, archiver
//! and compile-database output for one build session.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Redbuild unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording process runner and project
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildSpec, Dependency, PackageType, Platform, Registry, TargetSelector};

pub use builder::{BuildError, BuildSession, CommandSpec, SourceUnit};
pub use util::context::GlobalContext;
