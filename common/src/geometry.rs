//! 座標・矩形の基本型
//!
//! 地図座標（LatLng / LatLngBounds）と、タイムライン要素の表示領域（Region）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 地図上の座標
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub fn approx_eq(&self, other: &LatLng, eps: f64) -> bool {
        (self.lat - other.lat).abs() <= eps && (self.lng - other.lng).abs() <= eps
    }
}

/// プローブマーカーのラベル形式 `"{lat}, {lng}"`
impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// 表示範囲の矩形（南西端・北東端）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// 2点から矩形を作る（順序は問わない）
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub fn approx_eq(&self, other: &LatLngBounds, eps: f64) -> bool {
        self.south_west.approx_eq(&other.south_west, eps)
            && self.north_east.approx_eq(&other.north_east, eps)
    }
}

/// タイムライン要素1件の縦方向の表示領域（ビューポート基準のピクセル座標）
///
/// `index` は GeoRecord の並び順と1対1で対応する。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub index: usize,
    pub top: f64,
    pub bottom: f64,
}

impl Region {
    pub fn new(index: usize, top: f64, bottom: f64) -> Self {
        Self { index, top, bottom }
    }

    /// 可視帯 `[0, viewport_height)` と交差するか
    pub fn intersects_band(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latlng_display_label() {
        assert_eq!(LatLng::new(5.0, -12.5).to_string(), "5, -12.5");
        assert_eq!(LatLng::new(-55.75, 130.125).to_string(), "-55.75, 130.125");
    }

    #[test]
    fn test_latlng_is_finite() {
        assert!(LatLng::new(1.0, 2.0).is_finite());
        assert!(!LatLng::new(f64::NAN, 2.0).is_finite());
        assert!(!LatLng::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_bounds_from_corners_normalizes() {
        let bounds = LatLngBounds::from_corners(LatLng::new(10.0, 20.0), LatLng::new(-10.0, -20.0));
        assert_eq!(bounds.south_west, LatLng::new(-10.0, -20.0));
        assert_eq!(bounds.north_east, LatLng::new(10.0, 20.0));
        assert_eq!(bounds.center(), LatLng::new(0.0, 0.0));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = LatLngBounds::from_corners(LatLng::new(0.0, 0.0), LatLng::new(10.0, 10.0));
        assert!(bounds.contains(&LatLng::new(5.0, 5.0)));
        assert!(bounds.contains(&LatLng::new(0.0, 10.0)));
        assert!(!bounds.contains(&LatLng::new(11.0, 5.0)));
    }

    #[test]
    fn test_region_intersects_band() {
        // 上端・下端ちょうどは交差しない
        assert!(!Region::new(0, -100.0, 0.0).intersects_band(600.0));
        assert!(!Region::new(0, 600.0, 700.0).intersects_band(600.0));
        assert!(Region::new(0, -100.0, 1.0).intersects_band(600.0));
        assert!(Region::new(0, 599.0, 700.0).intersects_band(600.0));
        assert!(Region::new(0, -10.0, 900.0).intersects_band(600.0));
    }
}
