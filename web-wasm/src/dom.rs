//! タイムラインのDOM操作
//!
//! 要素は `timeline-item-{index}` の id で引く。

use geo_timeline_common::{HighlightTarget, Region};
use web_sys::Document;

pub const ACTIVE_CLASS: &str = "active";

pub fn item_id(index: usize) -> String {
    format!("timeline-item-{}", index)
}

pub struct DomTimeline {
    document: Document,
    count: usize,
}

impl DomTimeline {
    pub fn new(document: Document, count: usize) -> Self {
        Self { document, count }
    }

    /// 全要素の表示領域を一度に取得する（未描画の要素は含めない）
    pub fn regions(&self) -> Vec<Region> {
        (0..self.count)
            .filter_map(|index| {
                let element = self.document.get_element_by_id(&item_id(index))?;
                let rect = element.get_bounding_client_rect();
                Some(Region::new(index, rect.top(), rect.bottom()))
            })
            .collect()
    }
}

impl HighlightTarget for DomTimeline {
    fn node_count(&self) -> usize {
        self.count
    }

    fn set_active(&mut self, index: usize, active: bool) -> bool {
        let Some(element) = self.document.get_element_by_id(&item_id(index)) else {
            return false;
        };
        let classes = element.class_list();
        let result = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
        result.is_ok()
    }
}

/// 可視帯の高さ（ウィンドウの内側の高さ）
pub fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id() {
        assert_eq!(item_id(0), "timeline-item-0");
        assert_eq!(item_id(12), "timeline-item-12");
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document_with_items(count: usize) -> Document {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html("");
        for i in 0..count {
            let el = document.create_element("div").unwrap();
            el.set_id(&item_id(i));
            el.set_attribute("style", "height: 50px").unwrap();
            body.append_child(&el).unwrap();
        }
        document
    }

    #[wasm_bindgen_test]
    fn wasm_regions_are_stacked() {
        let timeline = DomTimeline::new(document_with_items(3), 3);
        let regions = timeline.regions();
        assert_eq!(regions.len(), 3);
        assert!((regions[1].top - regions[0].bottom).abs() < 1.0);
    }

    #[wasm_bindgen_test]
    fn wasm_highlight_single_node() {
        let document = document_with_items(3);
        let mut timeline = DomTimeline::new(document.clone(), 3);
        let mut reconciler = geo_timeline_common::HighlightReconciler::new();

        reconciler.apply(&mut timeline, 2);
        reconciler.apply(&mut timeline, 2);

        let active = document.get_elements_by_class_name(ACTIVE_CLASS);
        assert_eq!(active.length(), 1);
        assert_eq!(active.item(0).unwrap().id(), item_id(2));
    }
}
