//! Input trigger
//!
//! Listens to key releases next to every other keyboard listener in the
//! host. Events are only read, never drained, so other systems keep seeing
//! each release.

use super::keys::legacy_key_code;
use crate::config::MapshotConfig;
use crate::events::MapshotRequest;
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

/// Host scene in which mapshots may be taken
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MapScene<S: States>(pub S);

pub fn request_mapshot_on_key_release<S: States>(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut requests: EventWriter<MapshotRequest>,
    config: Res<MapshotConfig>,
    map_scene: Res<MapScene<S>>,
    scene: Option<Res<State<S>>>,
) {
    for event in keyboard_events.read() {
        if event.state != ButtonState::Released {
            continue;
        }

        let Some(code) = legacy_key_code(event.key_code) else {
            continue;
        };
        if !config.matches_key(code) {
            continue;
        }

        if scene.as_deref().map(State::get) != Some(&map_scene.0) {
            debug!("Mapshot key released outside the map scene, ignoring");
            continue;
        }

        requests.write(MapshotRequest);
    }
}
