//! Geo Timeline Common Library
//!
//! タイムライン（スクロールリスト）と地図ビューポートの同期エンジン。
//! CLIとWeb(WASM)で共有される。

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod highlight;
pub mod minimap;
pub mod probe;
pub mod tracker;
pub mod types;
pub mod viewport;

pub use config::SyncConfig;
pub use engine::SyncEngine;
pub use error::{Error, Result};
pub use geometry::{LatLng, LatLngBounds, Region};
pub use highlight::{HighlightReconciler, HighlightTarget};
pub use minimap::{MinimapMirror, MinimapSurface, MirrorState, MirrorTransition};
pub use probe::{ProbeMarker, ProbeMarkerTool};
pub use tracker::{select_active, ActiveChange, ActiveIndexTracker};
pub use types::{GeoRecord, RawRecord, Timeline};
pub use viewport::{CameraCommand, ViewportController, ViewportState};
