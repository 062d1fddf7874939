//! Platform and package setup.
//!
//! Runs before synthesis and fills the session registry. Exactly one of the
//! two branches runs per session:
//!
//! - native targets (Linux, macOS, Windows): libc/libm, the core runtime
//!   archive, the optional graphics archive, a `CROSS` definition, and one
//!   platform-specific linker addition;
//! - the freestanding target: the cross compiler, the freestanding runtime
//!   archive, and no-libc/no-entry linker flags.

use crate::builder::session::BuildSession;
use crate::core::flags::FlagClass;
use crate::core::platform::Platform;
use crate::util::config::Config;

/// Frameworks linked on macOS.
pub const MACOS_FRAMEWORKS: [&str; 4] = ["Cocoa", "IOKit", "CoreVideo", "CoreFoundation"];

/// Warnings silenced for every target.
pub const COMMON_COMPILATION_FLAGS: [&str; 2] =
    ["no-format-invalid-specifier", "no-format-extra-args"];

/// Populate the registry and select compiler and archiver.
pub fn prepare(session: &mut BuildSession, config: &Config) {
    common(session);

    if session.platform().is_freestanding() {
        freestanding(session, config);
    } else {
        native(session, config);
    }

    session.set_archiver(config.ar());
    for class in FlagClass::ALL {
        tracing::debug!("{} flags: {:?}", class, session.registry.flags(class));
    }
}

fn common(session: &mut BuildSession) {
    session.registry.include_self();
    for flag in COMMON_COMPILATION_FLAGS {
        session.registry.add_compilation_flag(flag);
    }
}

fn native(session: &mut BuildSession, config: &Config) {
    tracing::debug!("Native platform setup");
    let registry = &mut session.registry;

    registry.add_system_lib("c");
    registry.add_system_lib("m");

    let runtime = &config.runtime;
    registry.add_local_dependency(
        Some(runtime.include()),
        Some(runtime.archive()),
        Some(runtime.build()),
        true,
    );

    let graphics = &config.graphics;
    if graphics.enabled() {
        registry.add_local_dependency(
            Some(graphics.include()),
            Some(graphics.archive()),
            None,
            false,
        );
    }

    registry.add_precomp_flag("CROSS");

    match session.platform() {
        Platform::Linux => {
            session.registry.add_linker_flag("-Wl,--start-group", false);
            session.registry.add_linker_flag("-Wl,--end-group", true);
        }
        Platform::Windows => session.registry.add_linker_flag("-fuse-ld=lld", false),
        Platform::Macos => {
            for framework in MACOS_FRAMEWORKS {
                session.registry.add_system_framework(framework);
            }
        }
        Platform::Freestanding => {}
    }

    session.set_compiler(config.cc());
}

fn freestanding(session: &mut BuildSession, config: &Config) {
    tracing::debug!("Freestanding platform setup");
    session.set_compiler(config.cross_cc());

    let runtime = &config.runtime;
    let registry = &mut session.registry;
    registry.add_local_dependency(
        Some(runtime.include()),
        Some(runtime.freestanding_archive()),
        Some(runtime.freestanding_build()),
        true,
    );
    registry.add_linker_flag("-Wl,-emain", false);
    registry.add_linker_flag("-ffreestanding", false);
    registry.add_linker_flag("-nostdlib", false);
}
