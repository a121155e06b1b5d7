//! 描画先を持たない実装（CLIのシミュレーションとテスト用）

use crate::config::SyncConfig;
use crate::geometry::{LatLng, LatLngBounds, Region};
use crate::highlight::HighlightTarget;
use crate::minimap::MinimapSurface;
use crate::viewport::{CameraCommand, ViewportController, ViewportState};

/// 平面CRS上の地図カメラ
///
/// ズーム `z` で 1 単位 = 2^z ピクセル。緯度は上、経度は右へ増える。
/// アニメーションは即時に完了したものとして扱う。
#[derive(Debug, Clone)]
pub struct SimulatedViewport {
    state: ViewportState,
    width_px: f64,
    height_px: f64,
    min_zoom: u8,
    max_zoom: u8,
    commands: Vec<CameraCommand>,
}

impl SimulatedViewport {
    pub fn new(config: &SyncConfig, width_px: f64, height_px: f64) -> Self {
        Self {
            state: ViewportState {
                center: config.initial_center,
                zoom: config.clamp_zoom(config.initial_zoom),
            },
            width_px,
            height_px,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            commands: Vec::new(),
        }
    }

    /// 発行された命令（古い順）
    pub fn commands(&self) -> &[CameraCommand] {
        &self.commands
    }

    /// `fly_to` だけを取り出す
    pub fn flights(&self) -> Vec<CameraCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, CameraCommand::FlyTo { .. }))
            .copied()
            .collect()
    }

    /// ユーザーのパン・ズーム操作（命令履歴には残さない）
    pub fn pan_to(&mut self, center: LatLng, zoom: u8) {
        self.state = ViewportState {
            center,
            zoom: zoom.clamp(self.min_zoom, self.max_zoom),
        };
    }

    fn apply(&mut self, command: CameraCommand) {
        let zoom = command.zoom().clamp(self.min_zoom, self.max_zoom);
        let command = match command {
            CameraCommand::FlyTo { target, .. } => CameraCommand::FlyTo { target, zoom },
            CameraCommand::SetView { target, .. } => CameraCommand::SetView { target, zoom },
        };
        self.state = ViewportState {
            center: command.target(),
            zoom,
        };
        self.commands.push(command);
    }
}

impl ViewportController for SimulatedViewport {
    fn fly_to(&mut self, target: LatLng, zoom: u8) {
        self.apply(CameraCommand::FlyTo { target, zoom });
    }

    fn set_view(&mut self, target: LatLng, zoom: u8) {
        self.apply(CameraCommand::SetView { target, zoom });
    }

    fn state(&self) -> ViewportState {
        self.state
    }

    fn bounds(&self) -> LatLngBounds {
        let scale = 2f64.powi(i32::from(self.state.zoom));
        let half_w = self.width_px / 2.0 / scale;
        let half_h = self.height_px / 2.0 / scale;
        let c = self.state.center;
        LatLngBounds::from_corners(
            LatLng::new(c.lat - half_h, c.lng - half_w),
            LatLng::new(c.lat + half_h, c.lng + half_w),
        )
    }
}

/// 表示状態を記録するだけのリスト
#[derive(Debug, Clone, Default)]
pub struct RecordingHighlight {
    nodes: Vec<bool>,
}

impl RecordingHighlight {
    /// `rendered` 件が描画済みのリスト
    pub fn new(rendered: usize) -> Self {
        Self {
            nodes: vec![false; rendered],
        }
    }

    pub fn active_nodes(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i)
            .collect()
    }
}

impl HighlightTarget for RecordingHighlight {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn set_active(&mut self, index: usize, active: bool) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                *node = active;
                true
            }
            None => false,
        }
    }
}

/// 描画内容を記録するだけのミニマップ
#[derive(Debug, Clone, Default)]
pub struct RecordingMinimap {
    pub view: Option<ViewportState>,
    pub rect: Option<LatLngBounds>,
    pub draw_count: usize,
}

impl MinimapSurface for RecordingMinimap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some(ViewportState { center, zoom });
    }

    fn draw_bounds(&mut self, bounds: LatLngBounds) {
        self.rect = Some(bounds);
        self.draw_count += 1;
    }
}

/// 同じ高さの要素を縦に並べたリストの表示領域
#[derive(Debug, Clone, Copy)]
pub struct UniformLayout {
    pub count: usize,
    pub item_height: f64,
    pub viewport_height: f64,
}

impl UniformLayout {
    /// 一番下までスクロールしたときのオフセット
    pub fn max_scroll(&self) -> f64 {
        (self.count as f64 * self.item_height - self.viewport_height).max(0.0)
    }

    /// `scroll` ピクセルだけスクロールした状態の領域（一括取得）
    pub fn regions(&self, scroll: f64) -> Vec<Region> {
        (0..self.count)
            .map(|i| {
                let top = i as f64 * self.item_height - scroll;
                Region::new(i, top, top + self.item_height)
            })
            .collect()
    }
}
