//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{header::Header, map_panel::MapPanel, timeline::TimelineList};
use crate::session::ViewerSession;
use geo_timeline_common::{SyncConfig, Timeline};

const TIMELINE_JSON: &str = include_str!("../data/timeline.json");
const CONFIG_JSON: &str = include_str!("../data/config.json");

/// 同梱データの読み込み
fn load_data() -> Result<(Timeline, SyncConfig), String> {
    let timeline = Timeline::from_json(TIMELINE_JSON).map_err(|e| format!("レコード読み込み失敗: {}", e))?;
    let config = SyncConfig::from_json(CONFIG_JSON).map_err(|e| format!("設定読み込み失敗: {}", e))?;
    Ok((timeline, config))
}

fn report(message: &str) {
    web_sys::console::error_1(&message.into());
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (error, set_error) = signal(None::<String>);
    let session = StoredValue::new_local(None::<ViewerSession>);

    let data = load_data();
    let records = data
        .as_ref()
        .map(|(timeline, _)| timeline.records().to_vec())
        .unwrap_or_default();
    if let Err(message) = &data {
        report(message);
        set_error.set(Some(message.clone()));
    }

    // DOMが出来てから地図を作り、購読を開始する
    let mut pending = data.ok();
    Effect::new(move |_| {
        let Some((timeline, config)) = pending.take() else {
            return;
        };
        match ViewerSession::start(timeline, config) {
            Ok(started) => session.set_value(Some(started)),
            Err(message) => {
                report(&message);
                set_error.set(Some(message));
            }
        }
    });

    // 購読・地図はセッションと一緒に解放される
    on_cleanup(move || session.set_value(None));

    view! {
        <div class="flexbox-container">
            <Header title="Geo Timeline".to_string() />

            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <TimelineList records=records />
            <MapPanel />
        </div>
    }
}
