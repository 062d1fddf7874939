//! Invocation synthesis.
//!
//! Renders a prepared [`BuildSession`] and its [`OutputPlan`] into the
//! commands that build the artifact.
//!
//! Binary and bundle packages build with a single command:
//!
//! ```text
//! <cc> <preprocessor> <linker-front> <includes> <sources...> <links> <compilation> <linker-back> -o <artifact>
//! ```
//!
//! The token-class order is fixed; linker group flags only work when they
//! surround the link libraries.
//!
//! Static libraries compile each unit separately and archive the objects:
//!
//! ```text
//! <cc> <preprocessor> <compilation> <includes> -c <source> -o <object>
//! ar rcs <artifact> <objects...>
//! ```

use std::path::Path;

use serde::Serialize;

use crate::builder::command::CommandSpec;
use crate::builder::discovery::SourceUnit;
use crate::builder::errors::BuildError;
use crate::builder::planner::OutputPlan;
use crate::builder::session::BuildSession;
use crate::core::build_spec::PackageType;
use crate::core::flags::FlagClass;
use crate::core::registry::Registry;

/// Compile-only command for one library unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitCommand {
    /// The unit being compiled
    pub unit: SourceUnit,
    /// The compile command
    pub command: CommandSpec,
}

/// All commands of a session, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Invocation {
    /// One compile-and-link command (binary and bundle packages)
    Link { command: CommandSpec },
    /// Per-unit compiles followed by one archive command
    Library {
        compiles: Vec<UnitCommand>,
        archive: CommandSpec,
    },
}

impl Invocation {
    /// Every command, in the order it runs.
    pub fn commands(&self) -> Vec<&CommandSpec> {
        match self {
            Invocation::Link { command } => vec![command],
            Invocation::Library { compiles, archive } => compiles
                .iter()
                .map(|c| &c.command)
                .chain(std::iter::once(archive))
                .collect(),
        }
    }

    /// The link command, if this is a single-command invocation.
    pub fn link_command(&self) -> Option<&CommandSpec> {
        match self {
            Invocation::Link { command } => Some(command),
            Invocation::Library { .. } => None,
        }
    }
}

/// Synthesize the commands for a session.
///
/// Fails before producing anything when no compiler has been selected.
pub fn synthesize(session: &BuildSession, plan: &OutputPlan) -> Result<Invocation, BuildError> {
    let compiler = session.compiler().ok_or(BuildError::CompilerUnset)?;
    let registry = &session.registry;
    let home = session.home();

    let invocation = match session.spec().package_type() {
        PackageType::Binary | PackageType::Bundle => Invocation::Link {
            command: link_command(compiler, registry, &session.units, &plan.artifact, home),
        },
        PackageType::StaticLib => Invocation::Library {
            compiles: session
                .units
                .iter()
                .map(|unit| UnitCommand {
                    unit: unit.clone(),
                    command: unit_command(compiler, registry, unit, home),
                })
                .collect(),
            archive: archive_command(session.archiver(), &plan.artifact, &session.units),
        },
    };

    tracing::debug!("Synthesized {} command(s)", invocation.commands().len());
    Ok(invocation)
}

/// Single compile-and-link command.
pub fn link_command(
    compiler: &str,
    registry: &Registry,
    units: &[SourceUnit],
    artifact: &Path,
    home: &Path,
) -> CommandSpec {
    CommandSpec::new(compiler)
        .args(registry.render_flags(FlagClass::Preprocessor))
        .args(registry.render_flags(FlagClass::LinkerFront))
        .args(registry.render_includes(home))
        .args(units.iter().map(|u| u.source.display().to_string()))
        .args(registry.render_links(home))
        .args(registry.render_flags(FlagClass::Compilation))
        .args(registry.render_flags(FlagClass::LinkerBack))
        .arg("-o")
        .arg(artifact.display().to_string())
}

/// Compile-only command for one unit.
pub fn unit_command(
    compiler: &str,
    registry: &Registry,
    unit: &SourceUnit,
    home: &Path,
) -> CommandSpec {
    CommandSpec::new(compiler)
        .args(registry.render_flags(FlagClass::Preprocessor))
        .args(registry.render_flags(FlagClass::Compilation))
        .args(registry.render_includes(home))
        .arg("-c")
        .arg(unit.source.display().to_string())
        .arg("-o")
        .arg(unit.object.display().to_string())
}

/// Archive command creating a static library from unit objects.
pub fn archive_command(archiver: &str, artifact: &Path, units: &[SourceUnit]) -> CommandSpec {
    CommandSpec::new(archiver)
        .arg("rcs")
        .arg(artifact.display().to_string())
        .args(units.iter().map(|u| u.object.display().to_string()))
}
