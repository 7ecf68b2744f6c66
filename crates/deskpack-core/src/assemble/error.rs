//! Error types for the assembly pipeline.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use crate::manifest::ManifestError;

/// Failure of an external tool (dependency installer or packager).
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{program} not found in PATH")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Fatal failure of a generation. Nothing is retried; the caller re-runs from scratch.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("the '{0}' manifest format is not valid for this platform")]
    UnsupportedFormat(String),
    #[error("manifest has no start_url")]
    MissingStartUrl,
    #[error("manifest has neither short_name nor name")]
    MissingName,
    #[error("failed to create {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to copy the project template from {}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to persist the manifest")]
    Persist(#[source] ManifestError),
    #[error("failed to inject the app name into {}", path.display())]
    InjectName {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to install dependencies")]
    Install(#[source] ToolError),
    #[error("packaging failed")]
    Package(#[source] ToolError),
    #[error("failed to copy the manifest into {}", path.display())]
    Relocate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
