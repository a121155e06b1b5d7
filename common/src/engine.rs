//! タイムライン・地図の同期エンジン
//!
//! スクロール → アクティブ判定 → {カメラ移動, ハイライト}
//! 主地図の移動 → ミニマップ
//! ミニマップのクリック → 主地図
//! 地図クリック → プローブマーカー

use crate::config::SyncConfig;
use crate::error::Result;
use crate::geometry::{LatLng, LatLngBounds, Region};
use crate::highlight::{HighlightReconciler, HighlightTarget};
use crate::minimap::{MinimapMirror, MinimapSurface};
use crate::probe::{ProbeMarker, ProbeMarkerTool};
use crate::tracker::{ActiveChange, ActiveIndexTracker};
use crate::types::{GeoRecord, Timeline};
use crate::viewport::{ViewportController, ViewportState};
use tracing::debug;

pub struct SyncEngine<V, H> {
    timeline: Timeline,
    config: SyncConfig,
    viewport: V,
    highlight: H,
    tracker: ActiveIndexTracker,
    reconciler: HighlightReconciler,
    mirror: MinimapMirror,
    probes: ProbeMarkerTool,
}

impl<V, H> SyncEngine<V, H>
where
    V: ViewportController,
    H: HighlightTarget,
{
    pub fn new(timeline: Timeline, config: SyncConfig, viewport: V, highlight: H) -> Result<Self> {
        config.validate()?;
        let tracker = ActiveIndexTracker::new(timeline.len());
        let mirror = MinimapMirror::new(config.minimap_zoom);

        Ok(Self {
            timeline,
            config,
            viewport,
            highlight,
            tracker,
            reconciler: HighlightReconciler::new(),
            mirror,
            probes: ProbeMarkerTool::new(),
        })
    }

    /// 初回描画: 先頭レコードをハイライトし、そこへ移動する
    pub fn mount(&mut self) {
        self.follow_active();
    }

    /// スクロール・リサイズ・レイアウト変更
    ///
    /// `regions` は全要素の表示領域を一度に取得したもの。
    pub fn on_scroll(&mut self, regions: &[Region], viewport_height: f64) -> Option<ActiveChange> {
        let change = self.tracker.observe(regions, viewport_height)?;
        self.follow_active();
        Some(change)
    }

    fn follow_active(&mut self) {
        let active = self.tracker.active();
        if let Some(record) = self.timeline.get(active) {
            let zoom = self.config.clamp_zoom(self.config.fly_to_zoom);
            debug!(index = active, name = %record.name, zoom, "fly to active record");
            self.viewport.fly_to(record.position, zoom);
        }
        self.reconciler.apply(&mut self.highlight, active);
    }

    /// ハイライトだけを再適用する（リスト再描画後など）
    pub fn reconcile_highlight(&mut self) -> bool {
        self.reconciler.apply(&mut self.highlight, self.tracker.active())
    }

    /// 地図クリック（他の要素が処理していないもの）
    pub fn on_map_click(&mut self, position: LatLng, claimed: bool) -> Option<&ProbeMarker> {
        self.probes.on_map_click(position, claimed)
    }

    pub fn on_probe_drag(&mut self, id: u64, position: LatLng) -> bool {
        self.probes.drag(id, position)
    }

    /// レコードのマーカーをクリック: 現在のズームのまま移動する
    ///
    /// アクティブ要素は変えない。クリックは処理済みとして扱う（`true`）。
    pub fn on_record_marker_click(&mut self, index: usize) -> bool {
        let Some(record) = self.timeline.get(index) else {
            return false;
        };
        let zoom = self.viewport.zoom();
        self.viewport.fly_to(record.position, zoom);
        true
    }

    pub fn mount_minimap<M: MinimapSurface + ?Sized>(&mut self, surface: &mut M) {
        self.mirror.mount(Some(&self.viewport), surface);
    }

    pub fn unmount_minimap(&mut self) {
        self.mirror.unmount();
    }

    /// 主地図の move / zoom
    pub fn on_primary_changed<M: MinimapSurface + ?Sized>(
        &mut self,
        surface: &mut M,
    ) -> Option<LatLngBounds> {
        self.mirror.on_primary_changed(&self.viewport, surface)
    }

    pub fn on_minimap_click(&mut self, point: LatLng) -> Option<ViewportState> {
        self.mirror.on_minimap_click(point, &mut self.viewport)
    }

    pub fn active_index(&self) -> usize {
        self.tracker.active()
    }

    pub fn active_record(&self) -> Option<&GeoRecord> {
        self.timeline.get(self.tracker.active())
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// ユーザー操作など、エンジン外からのカメラ変更用
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn highlight(&self) -> &H {
        &self.highlight
    }

    pub fn highlight_mut(&mut self) -> &mut H {
        &mut self.highlight
    }

    pub fn probes(&self) -> &ProbeMarkerTool {
        &self.probes
    }

    pub fn mirror(&self) -> &MinimapMirror {
        &self.mirror
    }

    /// ビュー破棄: プローブマーカーを捨て、ミニマップを Idle に戻す
    pub fn teardown(&mut self) {
        self.probes.clear();
        self.mirror.unmount();
    }
}
