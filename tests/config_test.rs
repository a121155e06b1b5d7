//! 設定ファイルのテスト

use geo_timeline::config::{Config, FLY_TO_ZOOM_ENV};
use geo_timeline::error::GeoTimelineError;
use tempfile::tempdir;

/// ファイルが無ければ既定値
#[test]
fn test_load_missing_file_gives_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config.sync.fly_to_zoom, 8);
    assert_eq!(config.item_height, 160.0);
}

/// 保存と再読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.sync.fly_to_zoom = 6;
    config.sync.minimap_zoom = 1;
    config.scroll_step = 25.0;
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.sync.fly_to_zoom, 6);
    assert_eq!(loaded.sync.minimap_zoom, 1);
    assert_eq!(loaded.scroll_step, 25.0);
}

/// 一部の項目だけのファイル
#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "sync": { "flyToZoom": 4 }, "itemHeight": 90 }"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.sync.fly_to_zoom, 4);
    assert_eq!(config.sync.max_zoom, 8);
    assert_eq!(config.item_height, 90.0);
    assert_eq!(config.viewport_height, 720.0);
}

/// 不正な値は保存しない
#[test]
fn test_invalid_config_not_saved() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.scroll_step = 0.0;
    let err = config.save_to(&path).unwrap_err();

    assert!(matches!(err, GeoTimelineError::Config(_)));
    assert!(!path.exists());
}

/// ズーム範囲外は共通エラー
#[test]
fn test_zoom_out_of_range() {
    let mut config = Config::default();
    config.sync.fly_to_zoom = 20;
    assert!(matches!(config.validate(), Err(GeoTimelineError::Common(_))));
}

/// 環境変数は実行時の設定だけに反映される
#[test]
fn test_fly_to_zoom_override_is_runtime_only() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    Config::default().save_to(&path).expect("保存失敗");

    let stored = Config::load_from(&path).unwrap();
    let effective = stored.effective_with(Some("3")).unwrap();
    assert_eq!(effective.sync.fly_to_zoom, 3);
    assert_eq!(stored.sync.fly_to_zoom, 8);

    // 別の項目を変更して保存しても上書き値は残らない
    let mut edited = stored;
    edited.sync.minimap_zoom = 1;
    edited.save_to(&path).expect("保存失敗");

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.sync.fly_to_zoom, 8);
    assert_eq!(reloaded.sync.minimap_zoom, 1);
}

/// ホームの設定ファイル + 環境変数
#[test]
fn test_env_override_not_persisted_by_save() {
    let home = tempdir().expect("Failed to create temp dir");
    std::env::set_var("HOME", home.path());
    std::env::set_var(FLY_TO_ZOOM_ENV, "3");

    let config = Config::load().unwrap();
    assert_eq!(config.effective().unwrap().sync.fly_to_zoom, 3);

    let mut config = config;
    config.sync.minimap_zoom = 1;
    config.save().expect("保存失敗");
    std::env::remove_var(FLY_TO_ZOOM_ENV);

    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.sync.fly_to_zoom, 8);
    assert_eq!(reloaded.sync.minimap_zoom, 1);
    assert_eq!(reloaded.effective().unwrap().sync.fly_to_zoom, 8);
}

/// 不正な上書き値は実行時にだけエラー
#[test]
fn test_invalid_override_rejected() {
    let config = Config::default();

    let err = config.effective_with(Some("eight")).unwrap_err();
    assert!(matches!(err, GeoTimelineError::Config(_)));

    let err = config.effective_with(Some("20")).unwrap_err();
    assert!(matches!(err, GeoTimelineError::Common(_)));

    assert!(config.validate().is_ok());
}

/// 検証に通らないファイルも読み込めるので、修正して保存し直せる
#[test]
fn test_invalid_file_can_be_repaired() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "sync": { "flyToZoom": 20 } }"#).unwrap();

    let mut config = Config::load_from(&path).unwrap();
    assert!(config.effective_with(None).is_err());

    config.sync.fly_to_zoom = 6;
    config.save_to(&path).expect("保存失敗");
    assert_eq!(Config::load_from(&path).unwrap().effective_with(None).unwrap().sync.fly_to_zoom, 6);
}
