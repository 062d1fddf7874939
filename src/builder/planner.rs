//! Output planning - artifact path and bundle scaffold.
//!
//! Artifact naming is fixed: executables always get `.elf`, on every
//! platform, and static libraries get `.a`. A bundle is the directory
//! `<name>.red/` holding `<name>.elf`, `package.info` and `resources/`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::build_spec::PackageType;
use crate::util::fs::{copy_path, ensure_dir};

/// Executable suffix.
pub const BINARY_SUFFIX: &str = ".elf";
/// Static library suffix.
pub const LIBRARY_SUFFIX: &str = ".a";
/// Bundle directory suffix.
pub const BUNDLE_SUFFIX: &str = ".red";
/// Bundle metadata file copied from the project root.
pub const BUNDLE_METADATA: &str = "package.info";
/// Bundle resource directory copied from the project root.
pub const BUNDLE_RESOURCES: &str = "resources";

/// A filesystem step needed before the artifact can be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScaffoldAction {
    /// Create a directory (and its parents)
    CreateDir { path: PathBuf },
    /// Copy a file or directory tree
    Copy { from: PathBuf, to: PathBuf },
}

impl ScaffoldAction {
    /// Perform the action with paths resolved against `root`.
    pub fn apply(&self, root: &Path) -> anyhow::Result<()> {
        match self {
            ScaffoldAction::CreateDir { path } => ensure_dir(&root.join(path)),
            ScaffoldAction::Copy { from, to } => copy_path(&root.join(from), &root.join(to)),
        }
    }
}

impl fmt::Display for ScaffoldAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldAction::CreateDir { path } => write!(f, "mkdir -p {}", path.display()),
            ScaffoldAction::Copy { from, to } => {
                write!(f, "cp -rf {} {}", from.display(), to.display())
            }
        }
    }
}

/// Where the artifact goes and what must exist first.
///
/// All paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPlan {
    /// Final artifact path
    pub artifact: PathBuf,
    /// Scaffold actions, in order
    pub scaffold: Vec<ScaffoldAction>,
}

impl OutputPlan {
    /// Plan the output of a package.
    pub fn new(package_type: PackageType, project_name: &str) -> Self {
        match package_type {
            PackageType::Binary => OutputPlan {
                artifact: PathBuf::from(format!("{}{}", project_name, BINARY_SUFFIX)),
                scaffold: Vec::new(),
            },
            PackageType::StaticLib => OutputPlan {
                artifact: PathBuf::from(format!("{}{}", project_name, LIBRARY_SUFFIX)),
                scaffold: Vec::new(),
            },
            PackageType::Bundle => {
                let bundle = bundle_dir(project_name);
                OutputPlan {
                    artifact: bundle.join(format!("{}{}", project_name, BINARY_SUFFIX)),
                    scaffold: vec![
                        ScaffoldAction::CreateDir {
                            path: bundle.clone(),
                        },
                        ScaffoldAction::Copy {
                            from: PathBuf::from(BUNDLE_METADATA),
                            to: bundle.join(BUNDLE_METADATA),
                        },
                        ScaffoldAction::Copy {
                            from: PathBuf::from(BUNDLE_RESOURCES),
                            to: bundle.join(BUNDLE_RESOURCES),
                        },
                    ],
                }
            }
        }
    }

    /// Run every scaffold action, best effort.
    ///
    /// Failures are reported and skipped. Returns the number of failed
    /// actions.
    pub fn apply_scaffold(&self, root: &Path) -> usize {
        let mut failed = 0;
        for action in &self.scaffold {
            tracing::info!("{}", action);
            if let Err(e) = action.apply(root) {
                tracing::warn!("scaffold step `{}` failed: {:#}", action, e);
                failed += 1;
            }
        }
        failed
    }
}

/// The bundle directory of a project.
pub fn bundle_dir(project_name: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", project_name, BUNDLE_SUFFIX))
}

/// Project name: the final path segment of the project root.
pub fn project_name(root: &Path) -> Option<String> {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plan_binary_and_library() {
        let plan = OutputPlan::new(PackageType::Binary, "demo");
        assert_eq!(plan.artifact, PathBuf::from("demo.elf"));
        assert!(plan.scaffold.is_empty());

        let plan = OutputPlan::new(PackageType::StaticLib, "demo");
        assert_eq!(plan.artifact, PathBuf::from("demo.a"));
        assert!(plan.scaffold.is_empty());
    }

    #[test]
    fn test_plan_bundle() {
        let plan = OutputPlan::new(PackageType::Bundle, "demo");
        assert_eq!(plan.artifact, PathBuf::from("demo.red/demo.elf"));
        assert_eq!(
            plan.scaffold,
            vec![
                ScaffoldAction::CreateDir {
                    path: PathBuf::from("demo.red")
                },
                ScaffoldAction::Copy {
                    from: PathBuf::from("package.info"),
                    to: PathBuf::from("demo.red/package.info"),
                },
                ScaffoldAction::Copy {
                    from: PathBuf::from("resources"),
                    to: PathBuf::from("demo.red/resources"),
                },
            ]
        );
        assert_eq!(plan.scaffold[1].to_string(), "cp -rf package.info demo.red/package.info");
    }

    #[test]
    fn test_project_name() {
        assert_eq!(project_name(Path::new("/home/u/demo")).as_deref(), Some("demo"));
        assert_eq!(project_name(Path::new("/")), None);
    }

    #[test]
    fn test_apply_scaffold() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("package.info"), "name=demo").unwrap();
        fs::create_dir_all(tmp.path().join("resources/icons")).unwrap();
        fs::write(tmp.path().join("resources/icons/app.png"), "png").unwrap();

        let plan = OutputPlan::new(PackageType::Bundle, "demo");
        assert_eq!(plan.apply_scaffold(tmp.path()), 0);

        let bundle = tmp.path().join("demo.red");
        assert!(bundle.join("package.info").is_file());
        assert!(bundle.join("resources/icons/app.png").is_file());
    }

    #[test]
    fn test_apply_scaffold_is_best_effort() {
        let tmp = TempDir::new().unwrap();

        let plan = OutputPlan::new(PackageType::Bundle, "demo");
        assert_eq!(plan.apply_scaffold(tmp.path()), 2);
        assert!(tmp.path().join("demo.red").is_dir());
        assert_eq!(plan.artifact, PathBuf::from("demo.red/demo.elf"));
    }
}
