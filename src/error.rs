/// Error types shared by the skill checks
///
/// Scans themselves never fail on a single unreadable file; these errors cover
/// the fatal cases at the edges (a missing target path, an unparsable context
/// document).

use std::path::PathBuf;

/// Errors surfaced by the library to the binaries
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    /// The path given on the command line does not exist
    #[error("Path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// Reading a required input failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The context document is not valid JSON
    #[error("Invalid context document: {0}")]
    InvalidContext(#[from] serde_json::Error),

    /// The context document parsed, but its top level is not an object
    #[error("Context document must be a JSON object")]
    ContextNotObject,
}

/// Convenience alias for library results
pub type Result<T> = std::result::Result<T, SkillError>;
