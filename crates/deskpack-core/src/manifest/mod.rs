//! Web-app manifest: data model, loading and persistence.

mod icons;
mod types;

pub use icons::{add_icon, find_icon_by_size, list_icon_sources};
pub use types::{AccessWhitelistEntry, IconDescriptor, Manifest};

use std::path::{Path, PathBuf};

/// The only manifest format this platform accepts.
pub const BASE_MANIFEST_FORMAT: &str = "W3C";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("read manifest {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse manifest {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("write manifest {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialize manifest")]
    Serialize(#[from] serde_json::Error),
}

/// A manifest together with the format it was supplied in.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestInfo {
    pub format: String,
    pub content: Manifest,
}

impl ManifestInfo {
    pub fn w3c(content: Manifest) -> Self {
        Self {
            format: BASE_MANIFEST_FORMAT.to_string(),
            content,
        }
    }

    pub fn is_base_format(&self) -> bool {
        self.format == BASE_MANIFEST_FORMAT
    }
}

/// Reads and parses a JSON manifest file.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    let bytes = std::fs::read(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Manifest =
        serde_json::from_slice(&bytes).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    for (src, token) in icons::malformed_size_tokens(&manifest) {
        tracing::warn!(src, "ignoring malformed icon size {:?}", token);
    }
    Ok(manifest)
}

/// Pretty-printed JSON for a manifest.
pub fn to_json(manifest: &Manifest) -> Result<String, ManifestError> {
    Ok(serde_json::to_string_pretty(manifest)?)
}

/// Writes the manifest as pretty JSON.
pub fn save(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let json = to_json(manifest)?;
    std::fs::write(path, json).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}
