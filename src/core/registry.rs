//! Flag/dependency registry for one build session.
//!
//! The registry is append-only: dependencies and flags are kept in insertion
//! order and rendering never reorders them. Linker group flags such as
//! `-Wl,--start-group`/`-Wl,--end-group` rely on that.

use std::path::Path;

use serde::Serialize;

use crate::core::dependency::{Dependency, DependencyKind};
use crate::core::flags::FlagClass;

/// Ordered dependencies and flags of a build session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    dependencies: Vec<Dependency>,
    preprocessor: Vec<String>,
    compilation: Vec<String>,
    linker_front: Vec<String>,
    linker_back: Vec<String>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Append a fully constructed dependency.
    pub fn push_dependency(&mut self, dep: Dependency) {
        tracing::debug!(
            "Adding {} dependency include={:?} link={:?}",
            dep.kind,
            dep.include,
            dep.link
        );
        self.dependencies.push(dep);
    }

    /// Append a dependency of the given kind.
    pub fn add_dependency(
        &mut self,
        kind: DependencyKind,
        include: Option<&str>,
        link: Option<&str>,
    ) {
        self.push_dependency(Dependency::new(kind, include, link));
    }

    /// Append a local dependency with an optional external build directory.
    pub fn add_local_dependency(
        &mut self,
        include: Option<&str>,
        link: Option<&str>,
        build: Option<&str>,
        use_make: bool,
    ) {
        let dep = Dependency::local(include, link).with_build(build.unwrap_or(""), use_make);
        self.push_dependency(dep);
    }

    /// Link against a system library (`-l<name>`).
    pub fn add_system_lib(&mut self, name: &str) {
        self.push_dependency(Dependency::system_lib(name));
    }

    /// Link against an Apple framework.
    pub fn add_system_framework(&mut self, name: &str) {
        self.push_dependency(Dependency::framework(name));
    }

    /// Add the project root itself as an include directory.
    pub fn include_self(&mut self) {
        self.add_dependency(DependencyKind::Local, Some("."), None);
    }

    /// Append a flag to a class.
    pub fn add_flag(&mut self, class: FlagClass, token: impl Into<String>) {
        let token = token.into();
        tracing::debug!("Adding {} flag {}", class, token);
        self.list_mut(class).push(token);
    }

    /// Append a preprocessor definition.
    pub fn add_precomp_flag(&mut self, name: &str) {
        self.add_flag(FlagClass::Preprocessor, name);
    }

    /// Append a compilation (warning) flag.
    pub fn add_compilation_flag(&mut self, name: &str) {
        self.add_flag(FlagClass::Compilation, name);
    }

    /// Append a linker flag to the front or back group.
    pub fn add_linker_flag(&mut self, name: &str, back: bool) {
        let class = if back {
            FlagClass::LinkerBack
        } else {
            FlagClass::LinkerFront
        };
        self.add_flag(class, name);
    }

    /// All dependencies in insertion order.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Raw tokens of a flag class in insertion order.
    pub fn flags(&self, class: FlagClass) -> &[String] {
        match class {
            FlagClass::Preprocessor => &self.preprocessor,
            FlagClass::Compilation => &self.compilation,
            FlagClass::LinkerFront => &self.linker_front,
            FlagClass::LinkerBack => &self.linker_back,
        }
    }

    fn list_mut(&mut self, class: FlagClass) -> &mut Vec<String> {
        match class {
            FlagClass::Preprocessor => &mut self.preprocessor,
            FlagClass::Compilation => &mut self.compilation,
            FlagClass::LinkerFront => &mut self.linker_front,
            FlagClass::LinkerBack => &mut self.linker_back,
        }
    }

    /// Render a flag class with its prefix rule.
    pub fn render_flags(&self, class: FlagClass) -> Vec<String> {
        self.flags(class).iter().map(|t| class.render(t)).collect()
    }

    /// Render every include directory as `-I<path>`.
    pub fn render_includes(&self, home: &Path) -> Vec<String> {
        self.dependencies
            .iter()
            .filter_map(|dep| dep.render_include(home))
            .collect()
    }

    /// Render every link target.
    pub fn render_links(&self, home: &Path) -> Vec<String> {
        self.dependencies
            .iter()
            .flat_map(|dep| dep.render_link(home))
            .collect()
    }

    /// Dependencies that need an external `make` run before building.
    pub fn external_builds(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|dep| dep.use_make && dep.build.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_keep_insertion_order() {
        let mut registry = Registry::new();
        registry.add_precomp_flag("CROSS");
        registry.add_precomp_flag("DEBUG=1");
        registry.add_compilation_flag("no-format-invalid-specifier");
        registry.add_compilation_flag("all");
        registry.add_linker_flag("-Wl,--start-group", false);
        registry.add_linker_flag("-Wl,--end-group", true);
        registry.add_linker_flag("-nostdlib", false);

        assert_eq!(
            registry.render_flags(FlagClass::Preprocessor),
            vec!["-DCROSS", "-DDEBUG=1"]
        );
        assert_eq!(
            registry.render_flags(FlagClass::Compilation),
            vec!["-Wno-format-invalid-specifier", "-Wall"]
        );
        assert_eq!(
            registry.render_flags(FlagClass::LinkerFront),
            vec!["-Wl,--start-group", "-nostdlib"]
        );
        assert_eq!(
            registry.render_flags(FlagClass::LinkerBack),
            vec!["-Wl,--end-group"]
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let mut registry = Registry::new();
        registry.include_self();
        registry.add_system_lib("c");
        let home = Path::new("/home/u");

        let first = (registry.render_includes(home), registry.render_links(home));
        let second = (registry.render_includes(home), registry.render_links(home));
        assert_eq!(first, second);
        assert_eq!(registry.dependencies().len(), 2);
    }

    #[test]
    fn test_render_includes_and_links() {
        let mut registry = Registry::new();
        registry.include_self();
        registry.add_system_lib("c");
        registry.add_system_lib("m");
        registry.add_local_dependency(
            Some("~/redlib"),
            Some("~/redlib/clibshared.a"),
            Some("~/redlib"),
            true,
        );
        registry.add_system_framework("Cocoa");

        let home = Path::new("/home/u");
        assert_eq!(
            registry.render_includes(home),
            vec!["-I.", "-I/home/u/redlib"]
        );
        assert_eq!(
            registry.render_links(home),
            vec![
                "-lc",
                "-lm",
                "/home/u/redlib/clibshared.a",
                "-framework",
                "Cocoa"
            ]
        );
    }

    #[test]
    fn test_external_builds() {
        let mut registry = Registry::new();
        registry.add_local_dependency(Some("~/redlib"), Some("a.a"), Some("~/redlib"), true);
        registry.add_local_dependency(Some("~/raylib"), Some("b.a"), None, false);
        registry.add_local_dependency(Some("~/other"), Some("c.a"), Some(""), true);

        let builds: Vec<_> = registry.external_builds().collect();
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].include.as_deref(), Some("~/redlib"));
    }
}
