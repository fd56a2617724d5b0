//! The artifact selector: which of the two downstream artifacts to build.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which downstream artifact a build targets.
///
/// `Library` builds the library crate only (`--lib`); `Binary` builds the
/// service package (`-p <package>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Library,
    Binary,
}

/// Error returned when the target argument is not a recognized artifact.
#[derive(Debug, Error)]
#[error("unrecognized target '{value}'; expected 'library' or 'binary'")]
pub struct UnknownArtifactError {
    /// The offending value as supplied on the command line.
    pub value: String,
}

impl FromStr for ArtifactKind {
    type Err = UnknownArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "library" => Ok(ArtifactKind::Library),
            "binary" => Ok(ArtifactKind::Binary),
            other => Err(UnknownArtifactError {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Library => write!(f, "library"),
            ArtifactKind::Binary => write!(f, "binary"),
        }
    }
}
