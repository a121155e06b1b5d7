//! アクティブ要素の判定
//!
//! スクロール／リサイズのたびに、一括取得した表示領域を先頭から走査し、
//! 可視帯と交差する最初の要素をアクティブにする。

use crate::geometry::Region;
use serde::Serialize;
use tracing::debug;

/// アクティブ要素の変化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveChange {
    pub previous: usize,
    pub current: usize,
}

/// 可視帯と交差する最初の要素を返す
///
/// 交差面積の大小は見ない。複数が交差する場合は添字の小さい方を選ぶ。
pub fn select_active(regions: &[Region], viewport_height: f64) -> Option<usize> {
    let mut ordered: Vec<&Region> = regions.iter().collect();
    ordered.sort_by_key(|r| r.index);

    ordered
        .into_iter()
        .find(|r| r.intersects_band(viewport_height))
        .map(|r| r.index)
}

#[derive(Debug, Clone)]
pub struct ActiveIndexTracker {
    active: usize,
    len: usize,
}

impl ActiveIndexTracker {
    /// `len` 件のタイムラインに対するトラッカー（初期値0）
    pub fn new(len: usize) -> Self {
        Self { active: 0, len }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// スクロール信号を処理する
    ///
    /// 交差なし・範囲外・同一インデックスの場合は `None`（何もしない）。
    pub fn observe(&mut self, regions: &[Region], viewport_height: f64) -> Option<ActiveChange> {
        let selected = select_active(regions, viewport_height)?;
        if selected >= self.len || selected == self.active {
            return None;
        }

        let change = ActiveChange {
            previous: self.active,
            current: selected,
        };
        self.active = selected;
        debug!(previous = change.previous, current = change.current, "active index changed");
        Some(change)
    }
}
