//! Core domain types.

pub mod artifact;
pub mod host;

pub use artifact::{ArtifactKind, UnknownArtifactError};
pub use host::{HostSpec, ToolchainKind};
