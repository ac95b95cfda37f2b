use bevy::prelude::*;

/// Top-level scenes of the demo host
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum HostScene {
    #[default]
    Title,
    Map,
    Menu,
    Battle,
}
