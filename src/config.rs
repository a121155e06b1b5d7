use crate::error::{GeoTimelineError, Result};
use geo_timeline_common::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const FLY_TO_ZOOM_ENV: &str = "GEO_TIMELINE_FLY_TO_ZOOM";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub sync: SyncConfig,
    /// シミュレーション時のタイムライン要素の高さ(px)
    pub item_height: f64,
    /// シミュレーション時のリスト表示高さ(px)
    pub viewport_height: f64,
    /// シミュレーション時の1回あたりのスクロール量(px)
    pub scroll_step: f64,
    /// シミュレーション時の主地図サイズ(px)
    pub map_width: f64,
    pub map_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            item_height: 160.0,
            viewport_height: 720.0,
            scroll_step: 40.0,
            map_width: 960.0,
            map_height: 720.0,
        }
    }
}

impl Config {
    /// 設定ファイルの内容をそのまま読み込む（環境変数は反映しない）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 実行時に使う設定。環境変数を優先し、検証済みの複製を返す
    ///
    /// 保存用の内容には混ぜない。
    pub fn effective(&self) -> Result<Self> {
        self.effective_with(std::env::var(FLY_TO_ZOOM_ENV).ok().as_deref())
    }

    pub fn effective_with(&self, fly_to_zoom: Option<&str>) -> Result<Self> {
        let mut config = self.clone();
        if let Some(value) = fly_to_zoom {
            config.sync.fly_to_zoom = value.trim().parse().map_err(|_| {
                GeoTimelineError::Config(format!("{} が不正です: {}", FLY_TO_ZOOM_ENV, value))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// 指定パスから読み込み。ファイルが無ければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GeoTimelineError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("geo-timeline").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        self.sync.validate()?;

        for (name, value) in [
            ("itemHeight", self.item_height),
            ("viewportHeight", self.viewport_height),
            ("scrollStep", self.scroll_step),
            ("mapWidth", self.map_width),
            ("mapHeight", self.map_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeoTimelineError::Config(format!(
                    "{} は正の値が必要です: {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
