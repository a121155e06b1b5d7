//! タイムラインレコードの型定義
//!
//! - RawRecord: 外部データ（JSON）の形そのまま
//! - GeoRecord: 検証済み・不変のレコード
//! - Timeline: 並び順（=スクロール順）を持つ空でないレコード列

use crate::error::{Error, Result};
use crate::geometry::LatLng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// GPS座標（入力形式）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGps {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// 入力レコード
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    pub name: String,
    pub status: String,
    pub stall_count: u32,
    pub date_opened: String,
    pub gps: RawGps,
}

/// 検証済みのタイムラインレコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    pub index: usize,
    pub name: String,
    pub status: String,
    pub stall_count: u32,
    pub date_opened: String,
    pub position: LatLng,
}

impl GeoRecord {
    /// 入力レコードを検証して変換
    ///
    /// 座標が欠けている・有限でない場合は拒否する（NaN へ飛ばさない）。
    pub fn from_raw(index: usize, raw: RawRecord) -> Result<Self> {
        let lat = coordinate(index, "latitude", raw.gps.latitude)?;
        let lng = coordinate(index, "longitude", raw.gps.longitude)?;

        Ok(Self {
            index,
            name: raw.name,
            status: raw.status,
            stall_count: raw.stall_count,
            date_opened: raw.date_opened,
            position: LatLng::new(lat, lng),
        })
    }
}

fn coordinate(index: usize, field: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(Error::InvalidRecord {
            index,
            reason: format!("gps.{} is not finite ({})", field, v),
        }),
        None => Err(Error::InvalidRecord {
            index,
            reason: format!("gps.{} is missing", field),
        }),
    }
}

/// 並び順付きのレコード列（1件以上）
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    records: Vec<GeoRecord>,
}

impl Timeline {
    pub fn from_raw(raw: Vec<RawRecord>) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::EmptyTimeline);
        }

        let records = raw
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                GeoRecord::from_raw(index, r).inspect_err(|e| warn!(error = %e, "record rejected"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// JSON配列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawRecord> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&GeoRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 構築時に空を拒否しているので常に false
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a GeoRecord;
    type IntoIter = std::slice::Iter<'a, GeoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
