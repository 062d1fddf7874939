//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use redbuild::core::{PackageType, TargetSelector};

/// Redbuild - build C projects described by a build.config file
#[derive(Parser)]
#[command(name = "redbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the project in the current directory
    Build(BuildArgs),

    /// Build, then run the resulting executable
    Run(RunArgs),

    /// Copy the built bundle to a location
    Install(InstallArgs),

    /// Remove build artifacts
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Target platform: native, linux, macos, windows or red
    #[arg(long, env = "REDBUILD_TARGET")]
    pub target: Option<TargetSelector>,

    /// Package type, overriding build_type: bin, lib or pkg
    #[arg(long)]
    pub package: Option<PackageType>,

    /// Source file extension
    #[arg(long = "ext")]
    pub extension: Option<String>,

    /// Emit compile_commands.json
    #[arg(long)]
    pub emit_compile_commands: bool,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Number of parallel jobs for library units
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Run make for dependencies before building
    #[arg(long)]
    pub build_deps: bool,

    /// Generate C sources from .cred files before building
    #[arg(long)]
    pub cred: bool,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Arguments passed to the program
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Where to copy the bundle
    pub location: PathBuf,

    /// Package type, overriding build_type
    #[arg(long)]
    pub package: Option<PackageType>,
}

#[derive(Args)]
pub struct CleanArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
