//! 主地図のカメラ操作

use crate::geometry::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// カメラ状態（中心とズーム）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub center: LatLng,
    pub zoom: u8,
}

/// 地図へ発行したカメラ命令
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CameraCommand {
    FlyTo { target: LatLng, zoom: u8 },
    SetView { target: LatLng, zoom: u8 },
}

impl CameraCommand {
    pub fn target(&self) -> LatLng {
        match self {
            CameraCommand::FlyTo { target, .. } | CameraCommand::SetView { target, .. } => *target,
        }
    }

    pub fn zoom(&self) -> u8 {
        match self {
            CameraCommand::FlyTo { zoom, .. } | CameraCommand::SetView { zoom, .. } => *zoom,
        }
    }
}

/// 主地図のカメラ
///
/// `fly_to` はアニメーション付きで、実行中の遷移を中断してよい（最後の呼び出しが勝つ）。
/// 待ち行列は持たない。
pub trait ViewportController {
    fn fly_to(&mut self, target: LatLng, zoom: u8);

    /// アニメーションなしで即座に移動
    fn set_view(&mut self, target: LatLng, zoom: u8);

    fn state(&self) -> ViewportState;

    /// 現在の表示範囲
    fn bounds(&self) -> LatLngBounds;

    fn center(&self) -> LatLng {
        self.state().center
    }

    fn zoom(&self) -> u8 {
        self.state().zoom
    }
}

impl<V: ViewportController + ?Sized> ViewportController for Box<V> {
    fn fly_to(&mut self, target: LatLng, zoom: u8) {
        (**self).fly_to(target, zoom)
    }

    fn set_view(&mut self, target: LatLng, zoom: u8) {
        (**self).set_view(target, zoom)
    }

    fn state(&self) -> ViewportState {
        (**self).state()
    }

    fn bounds(&self) -> LatLngBounds {
        (**self).bounds()
    }
}
