//! Test utilities for plugin testing

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::states::HostScene;

/// Creates a minimal headless app with input and the demo host's scenes
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        bevy::input::InputPlugin,
        bevy::state::app::StatesPlugin,
    ));

    app.init_state::<HostScene>();

    app
}

fn send_key(app: &mut App, key: KeyCode, state: ButtonState) {
    app.world_mut().send_event(KeyboardInput {
        key_code: key,
        logical_key: Key::Unidentified(bevy::input::keyboard::NativeKey::Unidentified),
        state,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
}

/// Helper to simulate a key press
pub fn press_key(app: &mut App, key: KeyCode) {
    send_key(app, key, ButtonState::Pressed);
}

/// Helper to simulate a key release
pub fn release_key(app: &mut App, key: KeyCode) {
    send_key(app, key, ButtonState::Released);
}

/// Switch the host scene and let the transition run
pub fn enter_scene(app: &mut App, scene: HostScene) {
    app.world_mut()
        .resource_mut::<NextState<HostScene>>()
        .set(scene);
    app.update();
}
