use bevy::log::{Level, LogPlugin};
use clap::Parser;
use mapshot::cli::Args;
use mapshot::prelude::*;

fn main() -> AppExit {
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    let map = match args.load_map() {
        Ok(map) => map,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    let rules = match args.load_rules(map.data.tileset_id) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(LogPlugin { level, ..default() })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: format!("Mapshot - {}", map.info.name),
                    ..default()
                }),
                ..default()
            }),
    );

    app.init_state::<HostScene>();
    app.insert_resource(map);
    app.add_plugins(MapshotPlugin::new(
        config,
        HostScene::Map,
        rules,
        SwatchPainter,
    ));

    app.add_systems(Startup, log_build_info);
    app.add_systems(Update, switch_scene.before(MapshotSet));
    app.add_systems(OnEnter(HostScene::Map), announce_map);

    app.run()
}

fn log_build_info() {
    info!(
        "mapshot {} (built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );
}

fn announce_map(map: Res<CurrentMap>) {
    info!(
        "On map {} ({}x{}), Escape returns to the title",
        map.info.name, map.data.width, map.data.height
    );
}

fn switch_scene(
    keys: Res<ButtonInput<KeyCode>>,
    scene: Res<State<HostScene>>,
    mut next_scene: ResMut<NextState<HostScene>>,
    mut exit: EventWriter<AppExit>,
) {
    match scene.get() {
        HostScene::Title if keys.just_pressed(KeyCode::Enter) => next_scene.set(HostScene::Map),
        HostScene::Title if keys.just_pressed(KeyCode::Escape) => {
            exit.write_default();
        }
        HostScene::Map if keys.just_pressed(KeyCode::Escape) => next_scene.set(HostScene::Title),
        _ => {}
    }
}
