//! Leaflet バインディング
//!
//! 地図の描画は JavaScript 側（js/leaflet-bridge.js）に任せ、
//! Rust 側は共通ライブラリのトレイトを実装する。

use geo_timeline_common::{
    LatLng, LatLngBounds, MinimapSurface, SyncConfig, ViewportController, ViewportState,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/leaflet-bridge.js")]
extern "C" {
    /// Leaflet の L.Map
    #[derive(Clone)]
    pub type MapHandle;

    #[wasm_bindgen(js_name = "createMap", catch)]
    fn create_map_js(container_id: &str, options_json: &str) -> Result<MapHandle, JsValue>;

    #[wasm_bindgen(js_name = "removeMap")]
    fn remove_map_js(map: &MapHandle);

    #[wasm_bindgen(js_name = "flyTo")]
    fn fly_to_js(map: &MapHandle, lat: f64, lng: f64, zoom: f64);

    #[wasm_bindgen(js_name = "setView")]
    fn set_view_js(map: &MapHandle, lat: f64, lng: f64, zoom: f64, animate: bool);

    #[wasm_bindgen(js_name = "getCenter")]
    fn get_center_js(map: &MapHandle) -> Vec<f64>;

    #[wasm_bindgen(js_name = "getZoom")]
    fn get_zoom_js(map: &MapHandle) -> f64;

    #[wasm_bindgen(js_name = "getBounds")]
    fn get_bounds_js(map: &MapHandle) -> Vec<f64>;

    #[wasm_bindgen(js_name = "onMapEvent")]
    fn on_map_event_js(map: &MapHandle, name: &str, callback: &js_sys::Function);

    #[wasm_bindgen(js_name = "offMapEvent")]
    fn off_map_event_js(map: &MapHandle, name: &str, callback: &js_sys::Function);

    #[wasm_bindgen(js_name = "drawRectangle")]
    fn draw_rectangle_js(
        map: &MapHandle,
        rect: &JsValue,
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    ) -> JsValue;

    #[wasm_bindgen(js_name = "addRecordMarker")]
    fn add_record_marker_js(
        map: &MapHandle,
        lat: f64,
        lng: f64,
        index: usize,
        title: &str,
        on_click: &js_sys::Function,
    ) -> JsValue;

    #[wasm_bindgen(js_name = "addProbeMarker")]
    fn add_probe_marker_js(
        map: &MapHandle,
        lat: f64,
        lng: f64,
        label: &str,
        id: f64,
        on_drag_end: &js_sys::Function,
    ) -> JsValue;
}

/// createMap に渡す設定
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub no_wrap: bool,
    pub handlers: MapHandlers,
}

/// Leaflet の操作ハンドラ（オプション名そのまま）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapHandlers {
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub keyboard: bool,
    pub box_zoom: bool,
    pub touch_zoom: bool,
    pub zoom_control: bool,
}

impl MapHandlers {
    /// すべて有効 / すべて無効
    pub fn all(enabled: bool) -> Self {
        Self {
            dragging: enabled,
            scroll_wheel_zoom: enabled,
            double_click_zoom: enabled,
            keyboard: enabled,
            box_zoom: enabled,
            touch_zoom: enabled,
            zoom_control: enabled,
        }
    }
}

impl MapOptions {
    pub fn primary(config: &SyncConfig) -> Self {
        Self {
            center: config.initial_center,
            zoom: config.initial_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            tile_url: config.tile_url.clone(),
            no_wrap: config.no_wrap,
            handlers: MapHandlers::all(true),
        }
    }

    pub fn minimap(config: &SyncConfig) -> Self {
        Self {
            zoom: config.minimap_zoom,
            // ミニマップは主地図に追従するだけで、直接のパン・ズームはさせない
            handlers: MapHandlers::all(false),
            ..Self::primary(config)
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("JSON serialization failed: {}", e))
    }
}

/// 主地図
#[derive(Clone)]
pub struct LeafletMap {
    handle: MapHandle,
    min_zoom: u8,
    max_zoom: u8,
}

impl LeafletMap {
    pub fn create(container_id: &str, options: &MapOptions) -> Result<Self, String> {
        let handle = create_map_js(container_id, &options.to_json()?)
            .map_err(|e| format!("地図の作成に失敗: {:?}", e))?;
        Ok(Self {
            handle,
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
        })
    }

    pub fn handle(&self) -> &MapHandle {
        &self.handle
    }

    pub fn remove(&self) {
        remove_map_js(&self.handle);
    }

    /// `callback(lat, lng)` を購読する。戻り値を drop すると解除される
    pub fn subscribe(&self, event: &'static str, callback: impl FnMut(f64, f64) + 'static) -> MapListener {
        let closure = Closure::<dyn FnMut(f64, f64)>::new(callback);
        on_map_event_js(&self.handle, event, closure.as_ref().unchecked_ref());
        MapListener {
            map: self.handle.clone(),
            event,
            closure,
        }
    }

    pub fn add_record_marker(&self, position: LatLng, index: usize, title: &str, on_click: &js_sys::Function) {
        add_record_marker_js(&self.handle, position.lat, position.lng, index, title, on_click);
    }

    pub fn add_probe_marker(&self, position: LatLng, label: &str, id: u64, on_drag_end: &js_sys::Function) {
        add_probe_marker_js(&self.handle, position.lat, position.lng, label, id as f64, on_drag_end);
    }
}

fn zoom_level(raw: f64, min: u8, max: u8) -> u8 {
    if !raw.is_finite() {
        return min;
    }
    raw.round().clamp(f64::from(min), f64::from(max)) as u8
}

fn latlng_from(values: &[f64]) -> LatLng {
    match values {
        [lat, lng, ..] => LatLng::new(*lat, *lng),
        _ => LatLng::default(),
    }
}

fn bounds_from(values: &[f64]) -> LatLngBounds {
    match values {
        [south, west, north, east, ..] => {
            LatLngBounds::from_corners(LatLng::new(*south, *west), LatLng::new(*north, *east))
        }
        _ => LatLngBounds::default(),
    }
}

impl ViewportController for LeafletMap {
    fn fly_to(&mut self, target: LatLng, zoom: u8) {
        fly_to_js(&self.handle, target.lat, target.lng, f64::from(zoom));
    }

    fn set_view(&mut self, target: LatLng, zoom: u8) {
        set_view_js(&self.handle, target.lat, target.lng, f64::from(zoom), true);
    }

    fn state(&self) -> ViewportState {
        ViewportState {
            center: latlng_from(&get_center_js(&self.handle)),
            zoom: zoom_level(get_zoom_js(&self.handle), self.min_zoom, self.max_zoom),
        }
    }

    fn bounds(&self) -> LatLngBounds {
        bounds_from(&get_bounds_js(&self.handle))
    }
}

/// ミニマップ（矩形を1つだけ持つ）
pub struct LeafletMinimap {
    map: LeafletMap,
    rect: JsValue,
}

impl LeafletMinimap {
    pub fn new(map: LeafletMap) -> Self {
        Self {
            map,
            rect: JsValue::NULL,
        }
    }

    pub fn map(&self) -> &LeafletMap {
        &self.map
    }
}

impl MinimapSurface for LeafletMinimap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        set_view_js(&self.map.handle, center.lat, center.lng, f64::from(zoom), false);
    }

    fn draw_bounds(&mut self, bounds: LatLngBounds) {
        self.rect = draw_rectangle_js(
            &self.map.handle,
            &self.rect,
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng,
        );
    }
}

/// 地図イベントの購読。drop で解除
pub struct MapListener {
    map: MapHandle,
    event: &'static str,
    closure: Closure<dyn FnMut(f64, f64)>,
}

impl Drop for MapListener {
    fn drop(&mut self) {
        off_map_event_js(&self.map, self.event, self.closure.as_ref().unchecked_ref());
    }
}
