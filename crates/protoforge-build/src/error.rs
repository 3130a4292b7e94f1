//! Error types for build configuration and orchestration

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while assembling a build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An empty path pattern was registered.
    #[error("empty path pattern registered for {target}")]
    EmptyPattern { target: &'static str },

    /// A path pattern contains whitespace.
    #[error("path pattern {pattern:?} registered for {target} contains whitespace")]
    InvalidPattern { target: &'static str, pattern: String },

    /// A build manifest file could not be read.
    #[error("failed to read build manifest {path}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A build manifest could not be parsed.
    #[error("failed to parse build manifest")]
    ManifestParse(#[from] toml::de::Error),
}

/// Errors surfaced by the code-generation orchestrator.
///
/// Compiler failures are wrapped, not interpreted: the underlying error is
/// carried verbatim as the source.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No output directory was configured and `OUT_DIR` is not set.
    #[error("no output directory configured and OUT_DIR is not set")]
    NoOutputDir,

    /// The output directory could not be created.
    #[error("failed to create output directory {dir}")]
    OutputDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external protobuf compiler reported a failure.
    #[error("protobuf compilation failed")]
    Compile(#[source] io::Error),
}

/// Result type alias for orchestration entry points.
pub type Result<T> = std::result::Result<T, BuildError>;
