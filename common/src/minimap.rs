//! ミニマップ（主地図の表示範囲を矩形で映す）
//!
//! 状態は Idle / Mirroring の2つ。主地図を書き換えるのは
//! ミニマップのクリック（ReverseRecenter）だけ。

use crate::geometry::{LatLng, LatLngBounds};
use crate::viewport::{ViewportController, ViewportState};
use serde::Serialize;
use tracing::debug;

/// ミニマップの描画先
pub trait MinimapSurface {
    /// ミニマップ自身のカメラ
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// 主地図の表示範囲を示す矩形を描き直す
    fn draw_bounds(&mut self, bounds: LatLngBounds);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MirrorState {
    Idle,
    Mirroring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MirrorTransition {
    /// Idle → Mirroring
    Mount,
    /// 主地図が未初期化のため Idle のまま
    Deferred,
    /// 主地図の移動・ズームを反映
    Mirror,
    /// ミニマップのクリックで主地図を移動
    ReverseRecenter,
    /// Mirroring → Idle
    Unmount,
}

#[derive(Debug, Clone)]
pub struct MinimapMirror {
    state: MirrorState,
    zoom: u8,
    drawn: Option<LatLngBounds>,
    last_transition: Option<MirrorTransition>,
}

impl MinimapMirror {
    /// `zoom` はミニマップ固有のズーム（主地図とは独立）
    pub fn new(zoom: u8) -> Self {
        Self {
            state: MirrorState::Idle,
            zoom,
            drawn: None,
            last_transition: None,
        }
    }

    pub fn state(&self) -> MirrorState {
        self.state
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// 最後に描いた矩形
    pub fn drawn(&self) -> Option<LatLngBounds> {
        self.drawn
    }

    pub fn last_transition(&self) -> Option<MirrorTransition> {
        self.last_transition
    }

    /// 主地図へ購読を開始する
    ///
    /// 主地図がまだ無ければ Idle のまま `Deferred` を返す。後で再度呼べばよい。
    pub fn mount<V, M>(&mut self, primary: Option<&V>, surface: &mut M) -> MirrorTransition
    where
        V: ViewportController + ?Sized,
        M: MinimapSurface + ?Sized,
    {
        if self.state == MirrorState::Mirroring {
            return MirrorTransition::Mount;
        }

        let Some(primary) = primary else {
            debug!("primary viewport not ready, minimap mount deferred");
            return self.transition(MirrorTransition::Deferred);
        };

        self.state = MirrorState::Mirroring;
        self.redraw(primary, surface);
        self.transition(MirrorTransition::Mount)
    }

    pub fn unmount(&mut self) -> MirrorTransition {
        self.state = MirrorState::Idle;
        self.drawn = None;
        self.transition(MirrorTransition::Unmount)
    }

    /// 主地図の move / zoom イベント
    ///
    /// Idle 中は何もしない（`None`）。
    pub fn on_primary_changed<V, M>(&mut self, primary: &V, surface: &mut M) -> Option<LatLngBounds>
    where
        V: ViewportController + ?Sized,
        M: MinimapSurface + ?Sized,
    {
        if self.state != MirrorState::Mirroring {
            return None;
        }
        self.transition(MirrorTransition::Mirror);
        Some(self.redraw(primary, surface))
    }

    /// ミニマップ上のクリック: 主地図を現在のズームのまま `point` へ移動する
    pub fn on_minimap_click<V>(&mut self, point: LatLng, primary: &mut V) -> Option<ViewportState>
    where
        V: ViewportController + ?Sized,
    {
        if self.state != MirrorState::Mirroring || !point.is_finite() {
            return None;
        }

        let zoom = primary.zoom();
        primary.set_view(point, zoom);
        debug!(lat = point.lat, lng = point.lng, zoom, "minimap reverse recenter");
        self.transition(MirrorTransition::ReverseRecenter);
        Some(primary.state())
    }

    fn redraw<V, M>(&mut self, primary: &V, surface: &mut M) -> LatLngBounds
    where
        V: ViewportController + ?Sized,
        M: MinimapSurface + ?Sized,
    {
        let bounds = primary.bounds();
        surface.set_view(primary.center(), self.zoom);
        surface.draw_bounds(bounds);
        self.drawn = Some(bounds);
        bounds
    }

    fn transition(&mut self, transition: MirrorTransition) -> MirrorTransition {
        self.last_transition = Some(transition);
        transition
    }
}
