//! 同期エンジンの設定
//!
//! 既定値は元のビューア（平面CRSのタイル画像）に合わせている。

use crate::error::{Error, Result};
use crate::geometry::LatLng;
use serde::{Deserialize, Serialize};

/// タイル座標系で扱える最大ズーム
pub const MAX_SUPPORTED_ZOOM: u8 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// スクロール追従時のズーム（ユーザーの現在ズームは無視する）
    pub fly_to_zoom: u8,
    /// ミニマップ固有のズーム（主地図のズームとは独立）
    pub minimap_zoom: u8,
    pub initial_center: LatLng,
    pub initial_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub no_wrap: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fly_to_zoom: 8,
            minimap_zoom: 0,
            initial_center: LatLng::new(-55.75, 130.13609890147245),
            initial_zoom: 3,
            min_zoom: 0,
            max_zoom: 8,
            tile_url: "./tiles/{z}/{x}/{y}.png".into(),
            no_wrap: true,
        }
    }
}

impl SyncConfig {
    /// JSON文字列から読み込み（未指定の項目は既定値）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(Error::Config(format!(
                "maxZoom {} exceeds {}",
                self.max_zoom, MAX_SUPPORTED_ZOOM
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(Error::Config(format!(
                "minZoom {} is greater than maxZoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        for (name, zoom) in [
            ("flyToZoom", self.fly_to_zoom),
            ("initialZoom", self.initial_zoom),
            ("minimapZoom", self.minimap_zoom),
        ] {
            if zoom < self.min_zoom || zoom > self.max_zoom {
                return Err(Error::Config(format!(
                    "{} {} is outside {}..={}",
                    name, zoom, self.min_zoom, self.max_zoom
                )));
            }
        }
        if !self.initial_center.is_finite() {
            return Err(Error::Config("initialCenter must be finite".into()));
        }
        Ok(())
    }

    /// 設定範囲にズームを丸める
    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
