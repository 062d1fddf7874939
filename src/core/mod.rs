//! Core data structures for redbuild.
//!
//! - The project descriptor and the package type it selects
//! - Dependencies and flag classes, accumulated in a registry
//! - Target platforms

pub mod build_spec;
pub mod dependency;
pub mod flags;
pub mod platform;
pub mod registry;

pub use build_spec::{BuildSpec, PackageType, DESCRIPTOR_NAME};
pub use dependency::{Dependency, DependencyKind};
pub use flags::FlagClass;
pub use platform::{Platform, TargetSelector};
pub use registry::Registry;
