//! Shot dispatcher
//!
//! Turns a [`MapshotRequest`] into PNG files. Compositing happens inline on
//! the update thread; encoding and writing run on the IO task pool and are
//! never awaited. Failures are logged and otherwise dropped.

use crate::compositor::{TilePainter, TileRules, composite_map};
use crate::config::MapshotConfig;
use crate::error::{MapshotError, Result};
use crate::events::MapshotRequest;
use crate::map::{CurrentMap, MapInfo};
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// What the running environment lets the plugin do
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostEnvironment {
    /// Direct access to the desktop file-system
    pub desktop_fs: bool,
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self {
            desktop_fs: !cfg!(target_arch = "wasm32"),
        }
    }
}

/// The host's tile predicates and draw primitives
#[derive(Resource, Clone)]
pub struct TileCapabilities {
    pub rules: Arc<dyn TileRules>,
    pub painter: Arc<dyn TilePainter>,
}

impl TileCapabilities {
    pub fn new(rules: impl TileRules + 'static, painter: impl TilePainter + 'static) -> Self {
        Self {
            rules: Arc::new(rules),
            painter: Arc::new(painter),
        }
    }
}

pub fn base_file_name(info: &MapInfo, config: &MapshotConfig) -> String {
    if config.use_map_name {
        info.name.clone()
    } else {
        format!("Map{:03}", info.id)
    }
}

/// Output files in image order: one combined file, or lower then upper
pub fn output_paths(info: &MapInfo, config: &MapshotConfig) -> Vec<PathBuf> {
    let base = base_file_name(info, config);
    let names = if config.separate_layers {
        vec![format!("{base}_lower.png"), format!("{base}_upper.png")]
    } else {
        vec![format!("{base}.png")]
    };

    names
        .into_iter()
        .map(|name| config.output_dir.join(name))
        .collect()
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Replace `path` with `bytes` in one step.
///
/// The bytes go to a sibling temp file first and are renamed over the
/// target, so readers only ever see a whole file.
pub fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(
        ".{file_name}.{}.{}.tmp",
        std::process::id(),
        SEQUENCE.fetch_add(1, Ordering::Relaxed)
    ));

    std::fs::write(&temp_path, bytes).map_err(|source| MapshotError::Io {
        path: temp_path.clone(),
        source,
    })?;

    if let Err(source) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(MapshotError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn save_png(path: &Path, image: &RgbaImage) -> Result<()> {
    let bytes = encode_png(image)?;
    write_replacing(path, &bytes)
}

/// Composite the current map and start writing it out.
///
/// Returns the pending writes, one per image. Nothing happens without
/// desktop file access.
pub fn take_shot(
    environment: &HostEnvironment,
    map: &CurrentMap,
    capabilities: &TileCapabilities,
    config: &MapshotConfig,
) -> Vec<Task<Result<PathBuf>>> {
    if !environment.desktop_fs {
        debug!("No desktop file access, skipping mapshot");
        return Vec::new();
    }

    if let Err(e) = std::fs::create_dir_all(&config.output_dir) {
        error!(
            "An error occurred while creating the mapshot directory {}: {}",
            config.output_dir.display(),
            e
        );
    }

    let paths = output_paths(&map.info, config);
    let shot = composite_map(
        &map.data,
        map.tile_size,
        capabilities.rules.as_ref(),
        capabilities.painter.as_ref(),
        config,
    );

    let pool = IoTaskPool::get();
    paths
        .into_iter()
        .zip(shot.into_images())
        .map(|(path, image)| {
            pool.spawn(async move {
                match save_png(&path, &image) {
                    Ok(()) => {
                        info!("Saved mapshot: {}", path.display());
                        Ok(path)
                    }
                    Err(e) => {
                        error!("An error occurred while saving the mapshot: {}", e);
                        Err(e)
                    }
                }
            })
        })
        .collect()
}

pub fn dispatch_mapshot_requests(
    mut requests: EventReader<MapshotRequest>,
    environment: Res<HostEnvironment>,
    config: Res<MapshotConfig>,
    capabilities: Res<TileCapabilities>,
    map: Option<Res<CurrentMap>>,
) {
    for _ in requests.read() {
        let Some(map) = map.as_deref() else {
            warn!("Mapshot requested but no map is loaded");
            continue;
        };

        for task in take_shot(&environment, map, &capabilities, &config) {
            task.detach();
        }
    }
}
