//! Crate error type

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while loading settings, reading map data or writing shots
#[derive(Debug)]
pub enum MapshotError {
    /// No plugin declaration carries the marker
    MissingParameters(String),
    /// The plugin registry file could not be read
    RegistryRead { path: PathBuf, source: io::Error },
    /// The plugin registry file is not valid TOML
    RegistryParse { path: PathBuf, source: toml::de::Error },
    /// Map or map info JSON could not be read or parsed
    MapParse(String),
    /// A composited image could not be encoded
    Encode(image::ImageError),
    /// A file-system operation failed
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for MapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapshotError::MissingParameters(marker) => {
                write!(f, "Couldn't find plugin parameters marked {marker}")
            }
            MapshotError::RegistryRead { path, source } => {
                write!(f, "Failed to read plugin registry {}: {source}", path.display())
            }
            MapshotError::RegistryParse { path, source } => {
                write!(f, "Failed to parse plugin registry {}: {source}", path.display())
            }
            MapshotError::MapParse(msg) => write!(f, "Failed to load map data: {msg}"),
            MapshotError::Encode(e) => write!(f, "Failed to encode mapshot: {e}"),
            MapshotError::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for MapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapshotError::RegistryRead { source, .. } => Some(source),
            MapshotError::RegistryParse { source, .. } => Some(source),
            MapshotError::Encode(e) => Some(e),
            MapshotError::Io { source, .. } => Some(source),
            MapshotError::MissingParameters(_) | MapshotError::MapParse(_) => None,
        }
    }
}

impl From<image::ImageError> for MapshotError {
    fn from(e: image::ImageError) -> Self {
        MapshotError::Encode(e)
    }
}

pub type Result<T, E = MapshotError> = std::result::Result<T, E>;
