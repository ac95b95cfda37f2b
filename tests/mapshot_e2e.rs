//! End-to-end checks driving the plugin through a headless app

use bevy::input::keyboard::KeyboardInput;
use mapshot::map::tile_id::{TILE_ID_A2, TILE_ID_C};
use mapshot::map::tileset::{FLAG_HIGHER, FLAG_TABLE};
use mapshot::prelude::*;
use mapshot::test_utils::{create_test_app, enter_scene, release_key};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const TILE: u32 = 4;

fn sample_map() -> CurrentMap {
    let mut data = MapData::new(3, 3);
    // counter on top of a plain floor, star tile on layer 2
    data.set(1, 0, 1, TILE_ID_A2);
    data.set(1, 1, 0, TILE_ID_C + 1);
    data.set(2, 2, 2, TILE_ID_C + 2);
    data.set(0, 2, 4, 0b1111);

    CurrentMap {
        info: MapInfo {
            id: 3,
            name: "Forest".to_string(),
        },
        data,
        tile_size: TileSize::new(TILE, TILE),
    }
}

fn sample_rules() -> TilesetFlags {
    let mut flags = vec![0; 8192];
    flags[TILE_ID_A2 as usize] = FLAG_TABLE;
    flags[(TILE_ID_C + 2) as usize] = FLAG_HIGHER;
    TilesetFlags::new(flags)
}

fn mapshot_app(config: MapshotConfig) -> App {
    let mut app = create_test_app();
    app.insert_resource(sample_map());
    app.add_plugins(MapshotPlugin::new(
        config,
        HostScene::Map,
        sample_rules(),
        SwatchPainter,
    ));
    app
}

fn config_in(dir: &Path) -> MapshotConfig {
    MapshotConfig {
        output_dir: dir.join("Mapshots"),
        ..default()
    }
}

/// Writes finish on the IO pool; poll until they land
fn wait_for(paths: &[PathBuf]) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if paths.iter().all(|path| path.exists()) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[test]
fn test_key_release_on_map_writes_combined_png() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let expected = config.output_dir.join("Forest.png");
    let mut app = mapshot_app(config);

    enter_scene(&mut app, HostScene::Map);
    release_key(&mut app, KeyCode::PrintScreen);
    app.update();

    assert!(wait_for(&[expected.clone()]));
    let image = image::open(&expected).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (3 * TILE, 3 * TILE));

    // table edge from the counter above, drawn in the cell below it
    let edge = image.get_pixel(TILE, TILE);
    assert_ne!(edge, &SwatchPainter::swatch(TILE_ID_C + 1));
    assert_eq!(
        image.get_pixel(TILE, 2 * TILE - 1),
        &SwatchPainter::swatch(TILE_ID_C + 1)
    );
}

#[test]
fn test_separate_layers_split_star_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let config = MapshotConfig {
        use_map_name: false,
        separate_layers: true,
        ..config_in(dir.path())
    };
    let lower_path = config.output_dir.join("Map003_lower.png");
    let upper_path = config.output_dir.join("Map003_upper.png");
    let mut app = mapshot_app(config);

    enter_scene(&mut app, HostScene::Map);
    release_key(&mut app, KeyCode::PrintScreen);
    app.update();

    assert!(wait_for(&[lower_path.clone(), upper_path.clone()]));
    let lower = image::open(&lower_path).unwrap().to_rgba8();
    let upper = image::open(&upper_path).unwrap().to_rgba8();

    let star = (2 * TILE, 2 * TILE);
    assert_eq!(lower.get_pixel(star.0, star.1)[3], 0);
    assert_eq!(
        upper.get_pixel(star.0, star.1),
        &SwatchPainter::swatch(TILE_ID_C + 2)
    );

    // shadows never reach the upper image
    assert_eq!(upper.get_pixel(0, 2 * TILE)[3], 0);
    assert_ne!(lower.get_pixel(0, 2 * TILE)[3], 0);
}

#[test]
fn test_key_outside_map_scene_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let output_dir = config.output_dir.clone();
    let mut app = mapshot_app(config);

    enter_scene(&mut app, HostScene::Battle);
    release_key(&mut app, KeyCode::PrintScreen);
    app.update();
    app.update();

    std::thread::sleep(Duration::from_millis(100));
    assert!(!output_dir.exists());
}

#[test]
fn test_no_desktop_fs_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let output_dir = config.output_dir.clone();

    let mut app = create_test_app();
    app.insert_resource(HostEnvironment { desktop_fs: false });
    app.insert_resource(sample_map());
    app.add_plugins(MapshotPlugin::new(
        config,
        HostScene::Map,
        sample_rules(),
        SwatchPainter,
    ));

    enter_scene(&mut app, HostScene::Map);
    release_key(&mut app, KeyCode::PrintScreen);
    app.update();

    std::thread::sleep(Duration::from_millis(100));
    assert!(!output_dir.exists());
}

#[derive(Resource, Default)]
struct SeenReleases(usize);

fn count_releases(mut events: EventReader<KeyboardInput>, mut seen: ResMut<SeenReleases>) {
    seen.0 += events
        .read()
        .filter(|event| event.state == bevy::input::ButtonState::Released)
        .count();
}

#[test]
fn test_other_key_listeners_still_see_the_release() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let expected = config.output_dir.join("Forest.png");
    let mut app = mapshot_app(config);
    app.init_resource::<SeenReleases>();
    app.add_systems(Update, count_releases.after(MapshotSet));

    enter_scene(&mut app, HostScene::Map);
    release_key(&mut app, KeyCode::PrintScreen);
    app.update();

    assert_eq!(app.world().resource::<SeenReleases>().0, 1);
    assert!(wait_for(&[expected]));
}

#[test]
fn test_registry_file_drives_the_plugin() {
    let dir = tempfile::tempdir().unwrap();
    let registry_path = dir.path().join("plugins.toml");
    std::fs::write(
        &registry_path,
        r#"
        [[plugins]]
        name = "Mapshot"
        status = true
        description = "Saves a picture of the entire map <Mapshot>"

        [plugins.parameters]
        useMapName = "false"
        separateLayers = "false"
        keyCode = "80"
        "#,
    )
    .unwrap();

    let registry = PluginRegistry::load(&registry_path).unwrap();
    let mut config = MapshotConfig::from_registry(&registry).unwrap();
    config.output_dir = dir.path().join("Mapshots");
    let expected = config.output_dir.join("Map003.png");
    let mut app = mapshot_app(config);

    enter_scene(&mut app, HostScene::Map);
    release_key(&mut app, KeyCode::PrintScreen);
    app.update();
    release_key(&mut app, KeyCode::KeyP);
    app.update();

    assert!(wait_for(&[expected]));
}
