//! Build pipeline.
//!
//! Optional `cred` code generation, discovery, platform setup, output planning, synthesis and execution of
//! the external compiler and archiver commands.

pub mod codegen;
pub mod command;
pub mod compile_commands;
pub mod discovery;
pub mod errors;
pub mod executor;
pub mod planner;
pub mod session;
pub mod setup;
pub mod synthesis;

pub use codegen::CodeGen;
pub use command::CommandSpec;
pub use compile_commands::CompileCommand;
pub use discovery::{Discovery, SourceUnit};
pub use errors::BuildError;
pub use executor::{BuildExecutor, ExecutionReport};
pub use planner::{OutputPlan, ScaffoldAction};
pub use session::BuildSession;
pub use synthesis::{synthesize, Invocation, UnitCommand};
