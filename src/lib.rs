//! Stevedore - a host-aware cross-build launcher.
//!
//! Given an artifact selector and the host's operating system and CPU
//! architecture, stevedore picks one of four fixed build invocations
//! (native `cargo` with explicit cross-linker environment variables vs.
//! the `cross` wrapper, crossed with library- vs. package-scoped builds),
//! forwards any extra arguments verbatim, and propagates the build tool's
//! exit code unchanged.

pub mod core;
pub mod ops;
pub mod strategy;
pub mod util;

pub use crate::core::{
    artifact::ArtifactKind,
    host::{HostSpec, ToolchainKind},
};

pub use crate::strategy::{BuildStrategy, Invocation};
pub use crate::util::config::Config;
