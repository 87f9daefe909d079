//! The per-frame tracking update: matches detections to tracks per class,
//! spawns, updates, and retires tracks, plus the [`ApplicationContext`]
//! bundle a pipeline runs against.

mod config;
mod context;
mod error;
mod update;

pub use config::{ClassTrackingConfig, TrackingUpdateConfig};
pub use context::ApplicationContext;
pub use error::CoreError;
pub use update::{update_tracks, TrackMap, TrackingOutcome};
