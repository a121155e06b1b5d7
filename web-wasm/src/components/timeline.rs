//! タイムラインコンポーネント

use leptos::prelude::*;
use geo_timeline_common::GeoRecord;
use crate::dom::item_id;
use crate::session::TIMELINE_ID;

#[component]
pub fn TimelineList(records: Vec<GeoRecord>) -> impl IntoView {
    view! {
        <div id=TIMELINE_ID class="timeline">
            {records
                .into_iter()
                .map(|record| view! { <TimelineItem record=record /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn TimelineItem(record: GeoRecord) -> impl IntoView {
    // 初回描画では先頭だけ active。以降はエンジンが付け替える
    let class = if record.index == 0 {
        "timeline-item active"
    } else {
        "timeline-item"
    };

    view! {
        <div id=item_id(record.index) class=class>
            <span class="timeline-date">{record.date_opened.clone()}</span>
            <h3 class="timeline-title">{record.name.clone()}</h3>
            <h4 class="timeline-subtitle">{record.status.clone()}</h4>
            <p>{record.stall_count}</p>
        </div>
    }
}
