//! Test fixtures for common test scenarios.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::build_spec::DESCRIPTOR_NAME;

/// Fixture for a complete project directory.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Project name (directory name).
    pub name: String,
    /// build.config content, if any.
    pub descriptor: Option<String>,
    /// Files (path relative to project root -> content).
    pub files: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// Create a new empty project fixture.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            descriptor: None,
            files: BTreeMap::new(),
        }
    }

    /// A binary project with a single `main.c`.
    pub fn binary(name: impl Into<String>) -> Self {
        ProjectFixture::new(name)
            .with_descriptor("build_type = bin\n")
            .with_file(
                "main.c",
                "#include <stdio.h>\n\nint main(void) {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}\n",
            )
    }

    /// A static library with two units and a header.
    pub fn library(name: impl Into<String>) -> Self {
        ProjectFixture::new(name)
            .with_descriptor("build_type = lib\n")
            .with_file("util.c", "int util(void) { return 1; }\n")
            .with_file("src/extra.c", "int extra(void) { return 2; }\n")
            .with_file("util.h", "int util(void);\n")
    }

    /// A bundle with package metadata and a resources directory.
    pub fn bundle(name: impl Into<String>) -> Self {
        ProjectFixture::new(name)
            .with_descriptor("build_type = pkg\n")
            .with_file("main.c", "int main(void) { return 0; }\n")
            .with_file("package.info", "name = demo\n")
            .with_file("resources/icon.txt", "icon\n")
    }

    /// Set the build.config content.
    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    /// Add a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write the project under `base_path` and return its root.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        let project_path = base_path.join(&self.name);
        std::fs::create_dir_all(&project_path)?;

        if let Some(descriptor) = &self.descriptor {
            std::fs::write(project_path.join(DESCRIPTOR_NAME), descriptor)?;
        }

        for (path, content) in &self.files {
            let full_path = project_path.join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        Ok(project_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_library_fixture() {
        let tmp = TempDir::new().unwrap();
        let root = ProjectFixture::library("mylib").write_to(tmp.path()).unwrap();

        assert_eq!(root, tmp.path().join("mylib"));
        assert!(root.join("build.config").is_file());
        assert!(root.join("src/extra.c").is_file());
    }
}
