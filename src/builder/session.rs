//! Build session - all state of one invocation.
//!
//! A session is created once per invocation and threaded through every
//! phase. Nothing survives between sessions: the next invocation resolves,
//! discovers and synthesizes from scratch.

use std::path::{Path, PathBuf};

use crate::builder::discovery::{Discovery, SourceUnit};
use crate::builder::errors::BuildError;
use crate::builder::planner::{project_name, OutputPlan};
use crate::core::build_spec::BuildSpec;
use crate::core::platform::Platform;
use crate::core::registry::Registry;
use crate::util::config::DEFAULT_AR;

/// State of one build session.
#[derive(Debug, Clone)]
pub struct BuildSession {
    spec: BuildSpec,
    platform: Platform,
    root: PathBuf,
    home: PathBuf,
    project_name: String,

    /// Dependencies and flags accumulated by platform setup
    pub registry: Registry,

    /// Discovered source units, in discovery order
    pub units: Vec<SourceUnit>,

    compiler: Option<String>,
    archiver: String,
}

impl BuildSession {
    /// Start a session for the project at `root`.
    ///
    /// `home` replaces the `~` placeholder in dependency paths.
    pub fn new(
        root: impl Into<PathBuf>,
        home: impl Into<PathBuf>,
        spec: BuildSpec,
        platform: Platform,
    ) -> Result<Self, BuildError> {
        let root = root.into();
        let project_name = project_name(&root).ok_or_else(|| BuildError::NoProjectName {
            root: root.display().to_string(),
        })?;

        tracing::debug!(
            "Session for `{}`: {} package, target {}",
            project_name,
            spec.package_type(),
            platform
        );

        Ok(BuildSession {
            spec,
            platform,
            root,
            home: home.into(),
            project_name,
            registry: Registry::new(),
            units: Vec::new(),
            compiler: None,
            archiver: DEFAULT_AR.to_string(),
        })
    }

    /// Walk the project root and record every source unit.
    pub fn discover(&mut self, extension: &str, sort: bool) -> &[SourceUnit] {
        tracing::debug!("Adding all non-ignored files with {} extension", extension);
        self.units = Discovery::new(&self.root, extension, self.spec.ignore_set())
            .sorted(sort)
            .walk()
            .collect();
        &self.units
    }

    /// Plan the artifact of this session.
    pub fn output_plan(&self) -> OutputPlan {
        OutputPlan::new(self.spec.package_type(), &self.project_name)
    }

    /// Select the compiler.
    pub fn set_compiler(&mut self, compiler: impl Into<String>) {
        let compiler = compiler.into();
        tracing::debug!("Compiler {}", compiler);
        self.compiler = Some(compiler);
    }

    /// Select the archiver used for static libraries.
    pub fn set_archiver(&mut self, archiver: impl Into<String>) {
        self.archiver = archiver.into();
    }

    /// The selected compiler, if platform setup has run.
    pub fn compiler(&self) -> Option<&str> {
        self.compiler.as_deref()
    }

    /// The archiver.
    pub fn archiver(&self) -> &str {
        &self.archiver
    }

    /// The resolved build spec.
    pub fn spec(&self) -> &BuildSpec {
        &self.spec
    }

    /// The target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Home directory used for `~` expansion.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Project name (final segment of the root).
    pub fn project_name(&self) -> &str {
        &self.project_name
    }
}
