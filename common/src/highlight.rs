//! アクティブ表示の整合
//!
//! 毎回「全要素から外す → アクティブ要素にだけ付ける」を行う。
//! 何度適用しても同じ結果になる。

/// "active" 表示を付け外しできる描画先
pub trait HighlightTarget {
    /// 描画済み要素の数（未描画の要素があってもよい）
    fn node_count(&self) -> usize;

    /// `index` の要素の表示を切り替える。要素が無ければ `false`
    fn set_active(&mut self, index: usize, active: bool) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct HighlightReconciler {
    applied: Option<usize>,
}

impl HighlightReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最後に表示を付けたインデックス
    pub fn applied(&self) -> Option<usize> {
        self.applied
    }

    /// アクティブ要素を1つだけにする
    ///
    /// 該当要素がまだ描画されていない場合は何もしない（`false`）。
    pub fn apply<T: HighlightTarget + ?Sized>(&mut self, target: &mut T, active: usize) -> bool {
        for index in 0..target.node_count() {
            target.set_active(index, false);
        }

        let present = target.set_active(active, true);
        self.applied = present.then_some(active);
        present
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::RecordingHighlight;

    #[test]
    fn test_apply_marks_exactly_one() {
        let mut target = RecordingHighlight::new(4);
        let mut reconciler = HighlightReconciler::new();

        assert!(reconciler.apply(&mut target, 2));
        assert_eq!(target.active_nodes(), vec![2]);
        assert_eq!(reconciler.applied(), Some(2));

        assert!(reconciler.apply(&mut target, 0));
        assert_eq!(target.active_nodes(), vec![0]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut target = RecordingHighlight::new(3);
        let mut reconciler = HighlightReconciler::new();

        reconciler.apply(&mut target, 1);
        let first = target.active_nodes();
        reconciler.apply(&mut target, 1);
        assert_eq!(target.active_nodes(), first);
        assert_eq!(first, vec![1]);
    }

    #[test]
    fn test_apply_clears_stray_markers() {
        let mut target = RecordingHighlight::new(3);
        target.set_active(0, true);
        target.set_active(2, true);

        HighlightReconciler::new().apply(&mut target, 1);
        assert_eq!(target.active_nodes(), vec![1]);
    }

    #[test]
    fn test_missing_node_is_noop() {
        let mut target = RecordingHighlight::new(2);
        let mut reconciler = HighlightReconciler::new();

        assert!(!reconciler.apply(&mut target, 5));
        assert!(target.active_nodes().is_empty());
        assert_eq!(reconciler.applied(), None);
    }
}
