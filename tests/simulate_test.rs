//! スクロールシミュレーションのテスト

use geo_timeline::config::Config;
use geo_timeline::simulate::run_simulation;
use geo_timeline_common::{LatLng, Timeline};

fn timeline(points: &[(f64, f64)]) -> Timeline {
    let records: Vec<serde_json::Value> = points
        .iter()
        .enumerate()
        .map(|(i, (lat, lng))| {
            serde_json::json!({
                "name": format!("Site {}", i),
                "status": "OPEN",
                "stallCount": i,
                "dateOpened": "2020-01-01",
                "gps": { "latitude": lat, "longitude": lng }
            })
        })
        .collect();
    Timeline::from_json(&serde_json::to_string(&records).unwrap()).unwrap()
}

fn config(item_height: f64, viewport_height: f64, step: f64) -> Config {
    Config {
        item_height,
        viewport_height,
        scroll_step: step,
        ..Default::default()
    }
}

/// 上から下までスクロールすると各要素を順に通る
#[test]
fn test_simulation_visits_records_in_order() {
    let points = [(10.0, 20.0), (30.0, 40.0), (-5.0, 60.0), (0.0, 0.0), (1.0, 1.0)];
    let trace = run_simulation(timeline(&points), &config(100.0, 200.0, 10.0)).unwrap();

    let visited: Vec<usize> = trace.steps.iter().map(|s| s.active).collect();
    assert_eq!(visited, vec![1, 2, 3]);
    assert_eq!(trace.final_active, 3);

    for step in &trace.steps {
        assert_eq!(step.target, LatLng::new(points[step.active].0, points[step.active].1));
        assert_eq!(step.zoom, 8);
    }
}

/// ミニマップの矩形は毎回主地図の中心を含む
#[test]
fn test_simulation_minimap_follows() {
    let points = [(10.0, 20.0), (30.0, 40.0), (50.0, 60.0)];
    let trace = run_simulation(timeline(&points), &config(100.0, 100.0, 50.0)).unwrap();

    assert!(!trace.steps.is_empty());
    for step in &trace.steps {
        let bounds = step.minimap_bounds.expect("ミニマップ未描画");
        assert!(bounds.center().approx_eq(&step.target, 1e-9));
    }
}

/// リスト全体が表示範囲に収まる場合はアクティブが変わらない
#[test]
fn test_simulation_short_list() {
    let trace = run_simulation(timeline(&[(1.0, 1.0), (2.0, 2.0)]), &config(100.0, 600.0, 40.0)).unwrap();
    assert!(trace.steps.is_empty());
    assert_eq!(trace.scroll_events, 1);
    assert_eq!(trace.final_active, 0);
}
