//! Plugin settings
//!
//! The host keeps a registry of plugin declarations (name, enabled flag,
//! description and a table of raw string parameters). Mapshot finds its own
//! block by looking for [`PARAMETERS_MARKER`] in the description and coerces
//! the raw values into a [`MapshotConfig`] exactly once, at startup.

use crate::error::{MapshotError, Result};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Marker searched for in plugin descriptions
pub const PARAMETERS_MARKER: &str = "<Mapshot>";

/// Print screen
pub const DEFAULT_KEY_CODE: i64 = 44;

pub const DEFAULT_OUTPUT_DIR: &str = "Mapshots";

pub const REGISTRY_FILE_NAME: &str = "plugins.toml";

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct MapshotConfig {
    /// Name files after the map's display name instead of its id
    pub use_map_name: bool,
    /// Write the lower and upper passes to two files
    pub separate_layers: bool,
    /// Legacy key code that triggers a shot. `None` when the declared value
    /// is not a number, in which case no key ever matches.
    pub key_code: Option<i64>,
    pub output_dir: PathBuf,
}

impl Default for MapshotConfig {
    fn default() -> Self {
        Self {
            use_map_name: true,
            separate_layers: false,
            key_code: Some(DEFAULT_KEY_CODE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl MapshotConfig {
    /// Build the configuration from the host's plugin registry.
    ///
    /// Fails when no declaration carries [`PARAMETERS_MARKER`]; the feature
    /// cannot run without its settings.
    pub fn from_registry(registry: &PluginRegistry) -> Result<Self> {
        let declaration = registry
            .find(PARAMETERS_MARKER)
            .ok_or_else(|| MapshotError::MissingParameters(PARAMETERS_MARKER.to_string()))?;

        Ok(Self::from_declaration(declaration))
    }

    pub fn from_declaration(declaration: &PluginDeclaration) -> Self {
        let use_map_name = declaration.parameter("useMapName").as_deref() != Some("false");
        let separate_layers = declaration.parameter("separateLayers").as_deref() == Some("true");

        let raw_key_code = declaration.parameter("keyCode");
        let key_code = parse_key_code(raw_key_code.as_deref());
        if key_code.is_none() {
            warn!(
                "Mapshot keyCode {:?} is not a number; no key will trigger a mapshot",
                raw_key_code.unwrap_or_default()
            );
        }

        Self {
            use_map_name,
            separate_layers,
            key_code,
            ..default()
        }
    }

    pub fn matches_key(&self, legacy_code: u32) -> bool {
        self.key_code == Some(i64::from(legacy_code))
    }
}

/// Number coercion for the `keyCode` parameter.
///
/// Absent or empty falls back to the default. A whitespace-only value is
/// zero. Decimal integers, `0x` hex and integral decimals are accepted.
/// Binary (`0b`) and octal (`0o`) literals are not, and read as not a number.
fn parse_key_code(raw: Option<&str>) -> Option<i64> {
    let raw = match raw {
        None | Some("") => return Some(DEFAULT_KEY_CODE),
        Some(raw) => raw.trim(),
    };

    if raw.is_empty() {
        return Some(0);
    }

    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }

    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .map(|value| value as i64)
}

/// One entry of the host's plugin list
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PluginDeclaration {
    pub name: String,
    #[serde(default = "enabled")]
    pub status: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, toml::Value>,
}

fn enabled() -> bool {
    true
}

impl PluginDeclaration {
    /// Raw parameter value as the host would hand it over, a string.
    ///
    /// Non-string TOML values are rendered back to text so `keyCode = 44`
    /// and `keyCode = "44"` read the same.
    pub fn parameter(&self, key: &str) -> Option<Cow<'_, str>> {
        self.parameters.get(key).map(|value| match value {
            toml::Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PluginRegistry {
    #[serde(default)]
    pub plugins: Vec<PluginDeclaration>,
}

impl PluginRegistry {
    pub fn find(&self, marker: &str) -> Option<&PluginDeclaration> {
        self.plugins
            .iter()
            .find(|plugin| plugin.description.contains(marker))
    }

    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| MapshotError::RegistryParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| MapshotError::RegistryRead {
                path: path.to_path_buf(),
                source,
            })?;
        let registry = Self::from_toml_str(&content, path)?;
        info!(
            "Loaded {} plugin declarations from {}",
            registry.plugins.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Resolve the registry file: an explicit path wins, then the working
    /// directory, then the user config directory.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = PathBuf::from(REGISTRY_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        ProjectDirs::from("", "", "mapshot")
            .map(|dirs| dirs.config_dir().join(REGISTRY_FILE_NAME))
            .filter(|path| path.exists())
    }
}
