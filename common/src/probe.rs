//! プローブマーカー
//!
//! 地図クリックで置く一時的な座標メモ。件数の上限も永続化もない。

use crate::geometry::LatLng;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeMarker {
    pub id: u64,
    pub position: LatLng,
    /// 作成時の座標文字列。ドラッグ後も更新しない
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProbeMarkerTool {
    markers: Vec<ProbeMarker>,
    next_id: u64,
}

impl ProbeMarkerTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 地図クリック
    ///
    /// 他の要素（既存マーカー等）が処理済みのクリックでは何も作らない。
    pub fn on_map_click(&mut self, position: LatLng, claimed: bool) -> Option<&ProbeMarker> {
        if claimed || !position.is_finite() {
            return None;
        }

        let marker = ProbeMarker {
            id: self.next_id,
            position,
            label: position.to_string(),
        };
        self.next_id += 1;
        debug!(id = marker.id, label = %marker.label, "probe marker placed");
        self.markers.push(marker);
        self.markers.last()
    }

    /// ドラッグ終了。位置だけ更新する
    pub fn drag(&mut self, id: u64, position: LatLng) -> bool {
        match self.markers.iter_mut().find(|m| m.id == id) {
            Some(marker) if position.is_finite() => {
                marker.position = position;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: u64) -> Option<&ProbeMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn markers(&self) -> &[ProbeMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// ビュー破棄時
    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicks_accumulate_markers() {
        let mut tool = ProbeMarkerTool::new();
        let points = [(1.0, 2.0), (-3.5, 4.25), (1.0, 2.0), (80.0, -170.0)];

        for (lat, lng) in points {
            tool.on_map_click(LatLng::new(lat, lng), false);
        }

        assert_eq!(tool.len(), points.len());
        for (marker, (lat, lng)) in tool.markers().iter().zip(points) {
            assert_eq!(marker.position, LatLng::new(lat, lng));
            assert_eq!(marker.label, format!("{}, {}", lat, lng));
        }

        // 同じ座標でも別マーカー
        let ids: Vec<u64> = tool.markers().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_claimed_click_creates_nothing() {
        let mut tool = ProbeMarkerTool::new();
        assert!(tool.on_map_click(LatLng::new(1.0, 1.0), true).is_none());
        assert!(tool.is_empty());
    }

    #[test]
    fn test_drag_keeps_label() {
        let mut tool = ProbeMarkerTool::new();
        let id = tool.on_map_click(LatLng::new(10.0, 20.0), false).unwrap().id;
        tool.on_map_click(LatLng::new(30.0, 40.0), false);

        assert!(tool.drag(id, LatLng::new(11.0, 21.0)));

        let dragged = tool.get(id).unwrap();
        assert_eq!(dragged.position, LatLng::new(11.0, 21.0));
        assert_eq!(dragged.label, "10, 20");
        // 他のマーカーは動かない
        assert_eq!(tool.get(1).unwrap().position, LatLng::new(30.0, 40.0));
    }

    #[test]
    fn test_drag_unknown_marker() {
        let mut tool = ProbeMarkerTool::new();
        assert!(!tool.drag(42, LatLng::new(0.0, 0.0)));
    }

    #[test]
    fn test_clear() {
        let mut tool = ProbeMarkerTool::new();
        tool.on_map_click(LatLng::new(0.0, 0.0), false);
        tool.clear();
        assert!(tool.is_empty());
    }
}
