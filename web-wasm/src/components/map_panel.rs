//! 地図コンテナ（主地図とミニマップ）
//!
//! 中身は Leaflet が描画する。ここでは id 付きの器だけを用意する。

use leptos::prelude::*;
use crate::session::{MINIMAP_ID, PRIMARY_MAP_ID};

#[component]
pub fn MapPanel() -> impl IntoView {
    view! {
        <div class="map-panel">
            <div id=PRIMARY_MAP_ID class="primary-map"></div>
            <div id=MINIMAP_ID class="minimap"></div>
        </div>
    }
}
