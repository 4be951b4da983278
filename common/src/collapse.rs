//! カテゴリの折りたたみ状態
//!
//! カテゴリ名をキーに投影結果とは別に保持する。並べ替えや再読み込みで
//! 再投影しても状態は残る。

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: HashSet<String>,
}

impl CollapseState {
    pub fn is_collapsed(&self, category: &str) -> bool {
        self.collapsed.contains(category)
    }

    /// 開閉を切り替え、切替後に折りたたまれているかを返す
    pub fn toggle(&mut self, category: &str) -> bool {
        if self.collapsed.remove(category) {
            false
        } else {
            self.collapsed.insert(category.to_string());
            true
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn collapse_all<'a>(&mut self, categories: impl IntoIterator<Item = &'a str>) {
        self.collapsed
            .extend(categories.into_iter().map(str::to_string));
    }

    pub fn collapsed_count(&self) -> usize {
        self.collapsed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut state = CollapseState::default();
        assert!(!state.is_collapsed("Tools"));

        assert!(state.toggle("Tools"));
        assert!(state.is_collapsed("Tools"));
        assert!(!state.is_collapsed("Wound Care"));

        assert!(!state.toggle("Tools"));
        assert!(!state.is_collapsed("Tools"));
    }

    #[test]
    fn test_collapse_and_expand_all() {
        let mut state = CollapseState::default();
        state.collapse_all(["Tools", "Wound Care"]);
        assert_eq!(state.collapsed_count(), 2);
        assert!(state.is_collapsed("Wound Care"));

        state.expand_all();
        assert_eq!(state.collapsed_count(), 0);
    }

    #[test]
    fn test_state_survives_unknown_categories() {
        let mut state = CollapseState::default();
        state.toggle("Removed Category");
        // 再読み込みで消えたカテゴリは参照されないだけ
        assert!(!state.is_collapsed("Tools"));
    }
}
