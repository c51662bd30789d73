//! Selection set: checked rows, keyed by record id rather than by position.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// What happens to selected rows that a filter change hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HiddenSelectionPolicy {
    /// Hidden rows stay selected and are still included in bulk actions.
    #[default]
    RetainHidden,
    /// Hidden rows are deselected whenever the view changes.
    PruneHidden,
}

/// State of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderState {
    Unchecked,
    Indeterminate,
    Checked,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    selected: BTreeSet<String>,
    policy: HiddenSelectionPolicy,
}

impl SelectionSet {
    pub fn new(policy: HiddenSelectionPolicy) -> Self {
        Self {
            selected: BTreeSet::new(),
            policy,
        }
    }

    pub fn policy(&self) -> HiddenSelectionPolicy {
        self.policy
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn set(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    pub fn toggle(&mut self, id: &str) {
        let checked = !self.is_selected(id);
        self.set(id, checked);
    }

    /// Select every visible id. Selection outside `visible` is left as is.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) {
        for id in visible {
            self.selected.insert(id.to_string());
        }
    }

    /// Deselect every visible id. Selection outside `visible` is left as is.
    pub fn deselect_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) {
        for id in visible {
            self.selected.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// All selected ids, including rows the current view hides.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn selected_visible_count<'a>(&self, visible: impl IntoIterator<Item = &'a str>) -> usize {
        visible
            .into_iter()
            .filter(|id| self.selected.contains(*id))
            .count()
    }

    /// Header checkbox state relative to the visible rows.
    pub fn header_state<'a>(&self, visible: impl IntoIterator<Item = &'a str>) -> HeaderState {
        let mut total = 0usize;
        let mut selected = 0usize;
        for id in visible {
            total += 1;
            if self.selected.contains(id) {
                selected += 1;
            }
        }
        if selected == 0 {
            HeaderState::Unchecked
        } else if selected < total {
            HeaderState::Indeterminate
        } else {
            HeaderState::Checked
        }
    }

    /// Header checkbox click: clears the visible rows when all are checked,
    /// otherwise checks them all.
    pub fn toggle_header(&mut self, visible: &[&str]) {
        if self.header_state(visible.iter().copied()) == HeaderState::Checked {
            self.deselect_all(visible.iter().copied());
        } else {
            self.select_all(visible.iter().copied());
        }
    }

    /// Apply the hidden-row policy after the visible set changed.
    pub fn on_view_changed<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) {
        if self.policy == HiddenSelectionPolicy::PruneHidden {
            let keep: BTreeSet<&str> = visible.into_iter().collect();
            self.selected.retain(|id| keep.contains(id.as_str()));
        }
    }

    /// Forget ids that no longer exist in the collection at all.
    pub fn retain_existing<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) {
        let keep: BTreeSet<&str> = existing.into_iter().collect();
        self.selected.retain(|id| keep.contains(id.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_tri_state() {
        let visible = ["a", "b", "c"];
        let mut sel = SelectionSet::default();
        assert_eq!(sel.header_state(visible), HeaderState::Unchecked);
        sel.set("a", true);
        assert_eq!(sel.header_state(visible), HeaderState::Indeterminate);
        sel.select_all(visible);
        assert_eq!(sel.header_state(visible), HeaderState::Checked);
    }

    #[test]
    fn test_header_empty_view_is_unchecked() {
        let mut sel = SelectionSet::default();
        sel.set("hidden", true);
        assert_eq!(sel.header_state(Vec::<&str>::new()), HeaderState::Unchecked);
    }

    #[test]
    fn test_widening_filter_does_not_select_new_rows() {
        let mut sel = SelectionSet::default();
        let narrow = ["t1", "t3"];
        sel.select_all(narrow);
        let wide = ["t1", "t2", "t3", "t4"];
        sel.on_view_changed(wide);
        assert!(!sel.is_selected("t2"));
        assert!(!sel.is_selected("t4"));
        assert_eq!(sel.selected_visible_count(wide), 2);
        assert_eq!(sel.header_state(wide), HeaderState::Indeterminate);
    }

    #[test]
    fn test_retain_policy_keeps_hidden_selection() {
        let mut sel = SelectionSet::new(HiddenSelectionPolicy::RetainHidden);
        sel.select_all(["a", "b", "c"]);
        sel.on_view_changed(["a"]);
        assert_eq!(sel.len(), 3);
        assert_eq!(sel.header_state(["a"]), HeaderState::Checked);
    }

    #[test]
    fn test_prune_policy_drops_hidden_selection() {
        let mut sel = SelectionSet::new(HiddenSelectionPolicy::PruneHidden);
        sel.select_all(["a", "b", "c"]);
        sel.on_view_changed(["a", "z"]);
        assert_eq!(sel.ids().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_toggle_header_round_trip() {
        let mut sel = SelectionSet::default();
        sel.set("outside", true);
        let visible = vec!["a", "b"];
        sel.toggle_header(&visible);
        assert_eq!(sel.len(), 3);
        sel.toggle_header(&visible);
        assert_eq!(sel.ids().collect::<Vec<_>>(), vec!["outside"]);
    }
}
