pub mod mapshot;

pub use mapshot::MapshotPlugin;
