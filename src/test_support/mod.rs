//! Test utilities and mocks for redbuild unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use redbuild::test_support::{MockRunner, ProjectFixture};
//!
//! #[test]
//! fn test_example() {
//!     let runner = MockRunner::new();
//!     runner.expect_prefix("ar rcs", 1);
//!
//!     // Hand `&runner` to the executor...
//!     assert_eq!(runner.calls().len(), 1);
//! }
//! ```

pub mod fixtures;

use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::builder::command::CommandSpec;
use crate::util::process::{CommandRunner, RunStatus};

pub use fixtures::*;

/// Pattern for matching commands in [`MockRunner`].
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Exit code to report when matched.
    pub code: i32,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, code: i32) -> Self {
        CommandExpectation {
            pattern,
            code,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
}

/// Mock command runner.
///
/// Records every command it is asked to run. Commands matching no
/// expectation succeed, so tests only describe the failures they care
/// about. Interior locking lets the executor share it across threads.
#[derive(Debug, Default)]
pub struct MockRunner {
    state: Mutex<MockState>,
    strict: bool,
}

impl MockRunner {
    /// Create a runner where unmatched commands succeed.
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Create a runner that rejects unmatched commands.
    pub fn strict() -> Self {
        MockRunner {
            state: Mutex::default(),
            strict: true,
        }
    }

    fn push(&self, expectation: CommandExpectation) -> &Self {
        if let Ok(mut state) = self.state.lock() {
            state.expectations.push(expectation);
        }
        self
    }

    /// Report `code` for an exact command.
    pub fn expect(&self, cmd: &str, code: i32) -> &Self {
        self.push(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            code,
        ))
    }

    /// Report `code` for commands starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, code: i32) -> &Self {
        self.push(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            code,
        ))
    }

    /// Report `code` for commands containing a substring.
    pub fn expect_contains(&self, substring: &str, code: i32) -> &Self {
        self.push(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            code,
        ))
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&self, expectation: CommandExpectation) -> &Self {
        self.push(expectation)
    }

    /// All commands run so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.calls.clear();
        }
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        let state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => bail!("mock runner state poisoned"),
        };
        for (i, exp) in state.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandSpec, _cwd: &Path) -> Result<RunStatus> {
        let full_cmd = command.to_string();
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => bail!("mock runner state poisoned"),
        };
        state.calls.push(full_cmd.clone());

        for exp in &mut state.expectations {
            if exp.pattern.matches(&full_cmd) && exp.available() {
                exp.used += 1;
                return Ok(RunStatus::failure(exp.code));
            }
        }

        if self.strict {
            bail!("unexpected command: {}", full_cmd);
        }
        Ok(RunStatus::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_pattern() {
        assert!(CommandPattern::Exact("gcc -c a.c".into()).matches("gcc -c a.c"));
        assert!(CommandPattern::StartsWith("ar".into()).matches("ar rcs x.a"));
        assert!(CommandPattern::Contains("b.c".into()).matches("gcc -c src/b.c -o src/b.o"));
        assert!(CommandPattern::Any.matches("anything"));
    }

    #[test]
    fn test_mock_runner_records_calls() {
        let runner = MockRunner::new();
        runner.expect_contains("bad.c", 1);

        let cwd = Path::new(".");
        let ok = runner.run(&CommandSpec::new("gcc").arg("a.c"), cwd).unwrap();
        let bad = runner.run(&CommandSpec::new("gcc").arg("bad.c"), cwd).unwrap();

        assert!(ok.is_success());
        assert_eq!(bad.code, Some(1));
        assert_eq!(runner.calls(), vec!["gcc a.c", "gcc bad.c"]);
    }

    #[test]
    fn test_mock_runner_strict() {
        let runner = MockRunner::strict();
        assert!(runner.run(&CommandSpec::new("gcc"), Path::new(".")).is_err());
    }

    #[test]
    fn test_mock_runner_verify() {
        let runner = MockRunner::new();
        runner.expect_pattern(
            CommandExpectation::new(CommandPattern::StartsWith("ar".into()), 2).times(1),
        );
        assert!(runner.verify().is_err());

        runner
            .run(&CommandSpec::new("ar").arg("rcs"), Path::new("."))
            .unwrap();
        assert!(runner.verify().is_ok());
    }
}
