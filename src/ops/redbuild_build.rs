//! Implementation of `redbuild build`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::codegen::CodeGen;
use crate::builder::command::CommandSpec;
use crate::builder::compile_commands::{self, CompileCommand, COMPILE_COMMANDS_NAME};
use crate::builder::executor::{BuildExecutor, ExecutionReport};
use crate::builder::session::BuildSession;
use crate::builder::setup::prepare;
use crate::builder::synthesis::{synthesize, Invocation};
use crate::core::build_spec::{BuildSpec, PackageType};
use crate::core::platform::{Platform, TargetSelector};
use crate::util::config::Config;
use crate::util::context::GlobalContext;
use crate::util::process::{find_executable, CommandRunner};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Target platform (None = configuration, then native)
    pub target: Option<TargetSelector>,

    /// Package type override, applied before the build spec is frozen
    pub package: Option<PackageType>,

    /// Source extension override
    pub extension: Option<String>,

    /// Emit compile_commands.json
    pub emit_compile_commands: bool,

    /// Print commands instead of running them
    pub dry_run: bool,

    /// Number of parallel jobs for library units
    pub jobs: Option<usize>,

    /// Run `make` for dependencies that carry a build directory
    pub build_deps: bool,

    /// Generate sources from `.cred` files first
    pub cred: bool,

    /// Verbose output
    pub verbose: bool,
}

impl BuildOptions {
    /// Fold the options into the loaded configuration (options win).
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ext) = &self.extension {
            config.build.extension = Some(ext.clone());
        }
        if self.target.is_some() {
            config.build.target = self.target;
        }
        if self.jobs.is_some() {
            config.build.jobs = self.jobs;
        }
        config.build.emit_compile_commands |= self.emit_compile_commands;
        config.build.build_deps |= self.build_deps;
        config.build.cred |= self.cred;
    }
}

/// Result of a build session.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Project name
    pub name: String,
    /// Package type that was built
    pub package_type: PackageType,
    /// Target platform
    pub platform: Platform,
    /// Artifact path, relative to the project root
    pub artifact: PathBuf,
    /// Source written by the `cred` step, if it ran
    pub generated: Option<PathBuf>,
    /// Synthesized commands
    pub invocation: Invocation,
    /// Execution outcome (None on dry runs)
    pub report: Option<ExecutionReport>,
    /// Path of the written compile database, if any
    pub compile_commands: Option<PathBuf>,
}

/// Build the project in the context's working directory.
pub fn build(
    ctx: &GlobalContext,
    opts: &BuildOptions,
    runner: &dyn CommandRunner,
) -> Result<BuildResult> {
    let mut config = ctx.load_config();
    opts.apply_to(&mut config);

    let root = ctx.cwd();
    let spec = BuildSpec::load(root, opts.package);
    let platform = config.build.target.unwrap_or_default().resolve();

    let mut session = BuildSession::new(root, ctx.user_home(), spec, platform)?;
    let generated = if config.build.cred {
        CodeGen::new(root, config.cred(), session.project_name(), &config.extension())
            .sorted(config.sort_sources())
            .run(session.spec().ignore_set(), runner, opts.dry_run)?
    } else {
        None
    };
    session.discover(&config.extension(), config.sort_sources());
    prepare(&mut session, &config);

    eprintln!(
        "    Building {} ({} package, {} target, {} unit(s))",
        session.project_name(),
        session.spec().package_type(),
        platform,
        session.units.len()
    );

    if config.build.build_deps {
        build_dependencies(&session, runner, opts.dry_run);
    }

    let plan = session.output_plan();
    if opts.dry_run {
        for action in &plan.scaffold {
            println!("{}", action);
        }
    } else {
        plan.apply_scaffold(root);
    }

    let invocation = synthesize(&session, &plan)?;

    let compile_commands = if config.build.emit_compile_commands {
        emit_compile_commands(&session, &invocation, &plan.artifact)?
    } else {
        None
    };

    let report = if opts.dry_run {
        for command in invocation.commands() {
            println!("{}", command);
        }
        None
    } else {
        if let Some(compiler) = session.compiler() {
            if find_executable(compiler).is_none() {
                tracing::warn!("compiler `{}` was not found in PATH", compiler);
            }
        }
        let report = BuildExecutor::new(runner, root)
            .verbose(opts.verbose)
            .jobs(config.build.jobs)
            .execute(&invocation)?;
        eprintln!("     Created {}", plan.artifact.display());
        Some(report)
    };

    Ok(BuildResult {
        name: session.project_name().to_string(),
        package_type: session.spec().package_type(),
        platform,
        artifact: plan.artifact,
        generated,
        invocation,
        report,
        compile_commands,
    })
}

fn emit_compile_commands(
    session: &BuildSession,
    invocation: &Invocation,
    artifact: &Path,
) -> Result<Option<PathBuf>> {
    match invocation.link_command() {
        Some(command) => {
            let entry = CompileCommand::from_spec(command, session.root(), artifact);
            compile_commands::emit(&entry, session.root())?;
            eprintln!("     Created {}", COMPILE_COMMANDS_NAME);
            Ok(Some(session.root().join(COMPILE_COMMANDS_NAME)))
        }
        None => {
            tracing::warn!(
                "compile_commands.json has no single command for a library package; skipping"
            );
            Ok(None)
        }
    }
}

/// Run `make -C <dir>` for every dependency with a make build directory.
///
/// Failures are reported and the session continues.
pub fn build_dependencies(session: &BuildSession, runner: &dyn CommandRunner, dry_run: bool) {
    for dep in session.registry.external_builds() {
        let Some(dir) = dep.build_dir(session.home()) else {
            continue;
        };
        let command = CommandSpec::new("make").arg("-C").arg(dir);

        if dry_run {
            println!("{}", command);
            continue;
        }

        eprintln!("    Building dependency in {}", command.args[1]);
        match runner.run(&command, session.root()) {
            Ok(status) if status.is_success() => {}
            Ok(status) => tracing::warn!(
                "`{}` failed with exit code {:?}; continuing",
                command,
                status.code
            ),
            Err(err) => tracing::warn!("{:#}; continuing", err),
        }
    }
}
