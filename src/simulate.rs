//! ヘッドレスのスクロール再生
//!
//! 同じ高さの要素が並んだリストを上から下までスクロールし、
//! アクティブ要素の変化とカメラ移動を記録する。

use crate::config::Config;
use crate::error::Result;
use geo_timeline_common::headless::{RecordingHighlight, RecordingMinimap, SimulatedViewport, UniformLayout};
use geo_timeline_common::{LatLng, LatLngBounds, SyncEngine, Timeline, ViewportController};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStep {
    pub scroll: f64,
    pub previous: usize,
    pub active: usize,
    pub name: String,
    pub target: LatLng,
    pub zoom: u8,
    /// ミニマップに描かれた主地図の表示範囲
    pub minimap_bounds: Option<LatLngBounds>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationTrace {
    pub records: usize,
    pub scroll_events: usize,
    pub steps: Vec<TraceStep>,
    pub final_active: usize,
}

pub fn run_simulation(timeline: Timeline, config: &Config) -> Result<SimulationTrace> {
    config.validate()?;

    let layout = UniformLayout {
        count: timeline.len(),
        item_height: config.item_height,
        viewport_height: config.viewport_height,
    };
    let viewport = SimulatedViewport::new(&config.sync, config.map_width, config.map_height);
    let highlight = RecordingHighlight::new(timeline.len());
    let records = timeline.len();

    let mut engine = SyncEngine::new(timeline, config.sync.clone(), viewport, highlight)?;
    let mut minimap = RecordingMinimap::default();
    engine.mount();
    engine.mount_minimap(&mut minimap);

    let mut steps = Vec::new();
    let mut scroll_events = 0;
    let max_scroll = layout.max_scroll();
    let mut scroll = 0.0;

    loop {
        scroll_events += 1;
        if let Some(change) = engine.on_scroll(&layout.regions(scroll), layout.viewport_height) {
            let minimap_bounds = engine.on_primary_changed(&mut minimap);
            let state = engine.viewport().state();
            let name = engine
                .active_record()
                .map(|r| r.name.clone())
                .unwrap_or_default();

            debug!(scroll, active = change.current, "simulated active change");
            steps.push(TraceStep {
                scroll,
                previous: change.previous,
                active: change.current,
                name,
                target: state.center,
                zoom: state.zoom,
                minimap_bounds,
            });
        }

        if scroll >= max_scroll {
            break;
        }
        scroll = (scroll + config.scroll_step).min(max_scroll);
    }

    Ok(SimulationTrace {
        records,
        scroll_events,
        steps,
        final_active: engine.active_index(),
    })
}
