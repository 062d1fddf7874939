//! Synthesized commands as explicit token lists.
//!
//! A command is only joined into text for display. Execution passes the
//! tokens straight to the process, and the compile database copies them
//! verbatim, so no quoting or re-splitting is involved.

use std::fmt;

use serde::Serialize;

/// A command to execute: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "gcc", "ar")
    pub program: String,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<String>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Program followed by all arguments.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.args.len() + 1);
        tokens.push(self.program.clone());
        tokens.extend(self.args.iter().cloned());
        tokens
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let cmd = CommandSpec::new("gcc")
            .arg("-Ifoo")
            .args(["a.c", "-o", "demo.elf"]);

        assert_eq!(cmd.to_string(), "gcc -Ifoo a.c -o demo.elf");
        assert_eq!(cmd.tokens(), vec!["gcc", "-Ifoo", "a.c", "-o", "demo.elf"]);
    }
}
