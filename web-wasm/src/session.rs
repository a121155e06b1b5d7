//! ビューアのセッション
//!
//! 地図・リスト・イベント購読をまとめて持ち、drop ですべて解放する。
//! イベントは単一スレッドで順に届くので `Rc<RefCell<_>>` で共有する。

use crate::dom::{self, DomTimeline};
use crate::leaflet::{LeafletMap, LeafletMinimap, MapListener, MapOptions};
use geo_timeline_common::{
    HighlightTarget, LatLng, MinimapSurface, SyncConfig, SyncEngine, Timeline, ViewportController,
};
use gloo::events::EventListener;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub const PRIMARY_MAP_ID: &str = "primary-map";
pub const MINIMAP_ID: &str = "minimap";
pub const TIMELINE_ID: &str = "timeline";

type LiveShared = Shared<LeafletMap, DomTimeline, LeafletMinimap>;

struct Shared<V: ViewportController, H: HighlightTarget, M: MinimapSurface> {
    engine: RefCell<SyncEngine<V, H>>,
    minimap: RefCell<Option<M>>,
    redraw_pending: Cell<bool>,
}

impl<V: ViewportController, H: HighlightTarget, M: MinimapSurface> Shared<V, H, M> {
    fn new(engine: SyncEngine<V, H>) -> Self {
        Self {
            engine: RefCell::new(engine),
            minimap: RefCell::new(None),
            redraw_pending: Cell::new(false),
        }
    }

    /// エンジン操作中に地図が同期的にイベントを出すことがあるので、
    /// 使用中なら何もしない（`None`）。
    fn with_engine<R>(&self, f: impl FnOnce(&mut SyncEngine<V, H>) -> R) -> Option<R> {
        let result = {
            let mut engine = self.engine.try_borrow_mut().ok()?;
            f(&mut engine)
        };
        self.flush_redraw();
        Some(result)
    }

    /// ミニマップの再描画を予約し、可能ならすぐ実行する
    fn request_redraw(&self) {
        self.redraw_pending.set(true);
        self.flush_redraw();
    }

    fn flush_redraw(&self) {
        while self.redraw_pending.get() {
            let Ok(mut engine) = self.engine.try_borrow_mut() else {
                return;
            };
            let Ok(mut minimap) = self.minimap.try_borrow_mut() else {
                return;
            };
            self.redraw_pending.set(false);
            if let Some(surface) = minimap.as_mut() {
                engine.on_primary_changed(surface);
            }
        }
    }
}

pub struct ViewerSession {
    shared: Rc<LiveShared>,
    _dom_listeners: Vec<EventListener>,
    _map_listeners: Vec<MapListener>,
    _marker_callbacks: Vec<Closure<dyn FnMut(f64, f64, f64)>>,
    _record_click: Closure<dyn FnMut(usize)>,
}

impl ViewerSession {
    /// 地図を作成し、イベントを購読して初回同期を行う
    pub fn start(timeline: Timeline, config: SyncConfig) -> Result<Self, String> {
        let window = web_sys::window().ok_or("window がありません")?;
        let document = window.document().ok_or("document がありません")?;
        let container = document
            .get_element_by_id(TIMELINE_ID)
            .ok_or_else(|| format!("#{} が見つかりません", TIMELINE_ID))?;

        let primary = LeafletMap::create(PRIMARY_MAP_ID, &MapOptions::primary(&config))?;
        let records: Vec<(usize, LatLng, String)> = timeline
            .iter()
            .map(|r| (r.index, r.position, r.name.clone()))
            .collect();
        let highlight = DomTimeline::new(document, timeline.len());
        let engine = SyncEngine::new(timeline, config.clone(), primary.clone(), highlight)
            .map_err(|e| e.to_string())?;

        let shared: Rc<LiveShared> = Rc::new(Shared::new(engine));

        // スクロール・リサイズ → アクティブ判定
        let on_layout = {
            let shared = Rc::clone(&shared);
            move || {
                shared.with_engine(|engine| {
                    let regions = engine.highlight().regions();
                    engine.on_scroll(&regions, dom::viewport_height());
                });
            }
        };
        let dom_listeners = vec![
            EventListener::new(&container, "scroll", {
                let on_layout = on_layout.clone();
                move |_| on_layout()
            }),
            EventListener::new(&window, "resize", move |_| on_layout()),
        ];

        let mut map_listeners = Vec::new();

        // 主地図の move / zoom → ミニマップ
        for event in ["move", "zoom"] {
            let shared = Rc::clone(&shared);
            map_listeners.push(primary.subscribe(event, move |_, _| shared.request_redraw()));
        }

        // 主地図のクリック → プローブマーカー
        let on_drag_end = {
            let shared = Rc::clone(&shared);
            Closure::<dyn FnMut(f64, f64, f64)>::new(move |id: f64, lat: f64, lng: f64| {
                shared.with_engine(|engine| engine.on_probe_drag(id as u64, LatLng::new(lat, lng)));
            })
        };
        {
            let shared = Rc::clone(&shared);
            let map = primary.clone();
            let drag_fn: js_sys::Function = on_drag_end.as_ref().unchecked_ref::<js_sys::Function>().clone();
            map_listeners.push(primary.subscribe("click", move |lat, lng| {
                let placed = shared
                    .with_engine(|engine| {
                        engine
                            .on_map_click(LatLng::new(lat, lng), false)
                            .map(|m| (m.id, m.position, m.label.clone()))
                    })
                    .flatten();
                if let Some((id, position, label)) = placed {
                    map.add_probe_marker(position, &label, id, &drag_fn);
                }
            }));
        }

        // レコードのマーカー
        let record_click = {
            let shared = Rc::clone(&shared);
            Closure::<dyn FnMut(usize)>::new(move |index: usize| {
                shared.with_engine(|engine| engine.on_record_marker_click(index));
            })
        };
        for (index, position, name) in &records {
            primary.add_record_marker(*position, *index, name, record_click.as_ref().unchecked_ref());
        }

        // ミニマップ（コンテナが無ければ省略）
        if let Ok(map) = LeafletMap::create(MINIMAP_ID, &MapOptions::minimap(&config)) {
            let shared_click = Rc::clone(&shared);
            map_listeners.push(map.subscribe("click", move |lat, lng| {
                shared_click.with_engine(|engine| engine.on_minimap_click(LatLng::new(lat, lng)));
            }));

            let mut surface = LeafletMinimap::new(map);
            shared.engine.borrow_mut().mount_minimap(&mut surface);
            *shared.minimap.borrow_mut() = Some(surface);
        }

        shared.with_engine(|engine| engine.mount());

        Ok(Self {
            shared,
            _dom_listeners: dom_listeners,
            _map_listeners: map_listeners,
            _marker_callbacks: vec![on_drag_end],
            _record_click: record_click,
        })
    }
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        if let Ok(mut engine) = self.shared.engine.try_borrow_mut() {
            engine.teardown();
            engine.viewport().remove();
        }
        if let Ok(mut minimap) = self.shared.minimap.try_borrow_mut() {
            if let Some(surface) = minimap.take() {
                surface.map().remove();
            }
        }
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_move_during_minimap_click_redraws() {
        super::tests::check_move_during_minimap_click_redraws();
    }
}
