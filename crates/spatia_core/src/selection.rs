//! Single selection over an ordered item set
//!
//! [`SelectionController`] keeps at most one "current" item out of a fixed,
//! ordered list of keys. It never owns the items: every state change is
//! reported through a [`SelectionHost`] supplied by the caller, which is where
//! visuals, haptics and click actions live.
//!
//! States are [`SelectionState::NoSelection`] and
//! [`SelectionState::Selected`]. Selection travels with wrap-around, and
//! travelling from no selection always lands on the first item.

use std::fmt::Debug;

use tracing::{debug, trace, warn};

use crate::input::{GestureDirection, Navigate};

/// Receives selection side effects for items identified by `K`.
pub trait SelectionHost<K> {
    /// `item` became the current selection
    fn on_select(&mut self, item: K);

    /// `item` stopped being the current selection
    fn on_deselect(&mut self, item: K);

    /// The current selection was activated
    fn on_activate(&mut self, item: K);

    /// A feedback pulse should be emitted (on select and on activate)
    fn feedback_pulse(&mut self) {}
}

/// Observable selection state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState<K> {
    NoSelection,
    Selected(K),
}

/// Tracks the current selection within an ordered set of keys.
#[derive(Clone, Debug)]
pub struct SelectionController<K> {
    items: Vec<K>,
    selected: Option<K>,
    interaction_enabled: bool,
}

impl<K> SelectionController<K>
where
    K: Copy + Eq + Debug,
{
    /// Create a controller over `items`, in traversal order.
    pub fn new(items: impl IntoIterator<Item = K>) -> Self {
        Self {
            items: items.into_iter().collect(),
            selected: None,
            interaction_enabled: true,
        }
    }

    /// A controller with nothing to select. Every operation is a no-op.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn items(&self) -> &[K] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    /// Position of the current selection in traversal order
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected?;
        self.items.iter().position(|item| *item == selected)
    }

    pub fn state(&self) -> SelectionState<K> {
        match self.selected {
            Some(item) => SelectionState::Selected(item),
            None => SelectionState::NoSelection,
        }
    }

    pub fn is_interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Make `item` the current selection, or clear it with `None`.
    ///
    /// Selecting the current item again does nothing. While interaction is
    /// disabled only clearing is honoured. Keys that are not part of the set
    /// are ignored. Returns whether the selection changed.
    pub fn select(&mut self, item: Option<K>, host: &mut impl SelectionHost<K>) -> bool {
        if item == self.selected {
            return false;
        }

        if let Some(next) = item {
            if !self.interaction_enabled {
                trace!(?next, "selection ignored, interaction disabled");
                return false;
            }
            if !self.items.contains(&next) {
                warn!(?next, "selection ignored, item is not selectable here");
                return false;
            }
        }

        if let Some(previous) = self.selected.take() {
            host.on_deselect(previous);
        }

        self.selected = item;
        debug!(selected = ?self.selected, "selection changed");

        if let Some(current) = self.selected {
            host.on_select(current);
            host.feedback_pulse();
        }

        true
    }

    /// Select the item at `index` in traversal order.
    pub fn select_index(&mut self, index: usize, host: &mut impl SelectionHost<K>) -> bool {
        match self.items.get(index).copied() {
            Some(item) => self.select(Some(item), host),
            None => false,
        }
    }

    /// Move the selection one step with wrap-around.
    ///
    /// With nothing selected, the first item is selected whatever the
    /// direction.
    pub fn advance(&mut self, direction: Navigate, host: &mut impl SelectionHost<K>) {
        let count = self.items.len();
        if count == 0 || !self.interaction_enabled {
            return;
        }

        let index = match self.selected_index() {
            None => 0,
            Some(current) => match direction {
                Navigate::Previous => (current + count - 1) % count,
                Navigate::Next => (current + 1) % count,
            },
        };

        self.select_index(index, host);
    }

    /// Route a touchpad gesture. Unmapped directions are ignored.
    pub fn handle_gesture(
        &mut self,
        direction: GestureDirection,
        host: &mut impl SelectionHost<K>,
    ) {
        if !self.interaction_enabled {
            return;
        }
        if let Some(navigate) = direction.navigation() {
            self.advance(navigate, host);
        }
    }

    /// Activate the current selection. Returns the activated item.
    pub fn activate(&mut self, host: &mut impl SelectionHost<K>) -> Option<K> {
        let item = self.selected?;
        host.feedback_pulse();
        host.on_activate(item);
        debug!(?item, "activated");
        Some(item)
    }

    /// Enable or disable interaction. Disabling clears the selection.
    pub fn set_interaction_enabled(&mut self, enabled: bool, host: &mut impl SelectionHost<K>) {
        if !enabled {
            self.select(None, host);
        }
        if self.interaction_enabled != enabled {
            debug!(enabled, "interaction toggled");
        }
        self.interaction_enabled = enabled;
    }
}

impl<K> Default for SelectionController<K>
where
    K: Copy + Eq + Debug,
{
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Note {
        Select(u32),
        Deselect(u32),
        Activate(u32),
        Pulse,
    }

    #[derive(Default)]
    struct Recorder(Vec<Note>);

    impl SelectionHost<u32> for Recorder {
        fn on_select(&mut self, item: u32) {
            self.0.push(Note::Select(item));
        }
        fn on_deselect(&mut self, item: u32) {
            self.0.push(Note::Deselect(item));
        }
        fn on_activate(&mut self, item: u32) {
            self.0.push(Note::Activate(item));
        }
        fn feedback_pulse(&mut self) {
            self.0.push(Note::Pulse);
        }
    }

    #[test]
    fn test_select_notifies_in_order() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([1, 2, 3]);

        assert!(selection.select(Some(1), &mut host));
        assert!(selection.select(Some(2), &mut host));

        assert_eq!(
            host.0,
            vec![
                Note::Select(1),
                Note::Pulse,
                Note::Deselect(1),
                Note::Select(2),
                Note::Pulse,
            ]
        );
        assert_eq!(selection.state(), SelectionState::Selected(2));
    }

    #[test]
    fn test_self_selection_is_noop() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([1, 2]);

        selection.select(Some(1), &mut host);
        assert!(!selection.select(Some(1), &mut host));

        assert_eq!(host.0, vec![Note::Select(1), Note::Pulse]);
    }

    #[test]
    fn test_clear_selection() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([1, 2]);

        assert!(!selection.select(None, &mut host));
        selection.select(Some(2), &mut host);
        assert!(selection.select(None, &mut host));

        assert_eq!(selection.state(), SelectionState::NoSelection);
        assert_eq!(host.0.last(), Some(&Note::Deselect(2)));
    }

    #[test]
    fn test_unknown_item_fails_closed() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([1, 2]);

        selection.select(Some(1), &mut host);
        assert!(!selection.select(Some(99), &mut host));
        assert_eq!(selection.selected(), Some(1));
    }

    #[test]
    fn test_empty_set_is_inert() {
        let mut host = Recorder::default();
        let mut selection: SelectionController<u32> = SelectionController::empty();

        selection.advance(Navigate::Next, &mut host);
        selection.advance(Navigate::Previous, &mut host);
        assert_eq!(selection.activate(&mut host), None);
        selection.set_interaction_enabled(false, &mut host);

        assert!(host.0.is_empty());
        assert_eq!(selection.state(), SelectionState::NoSelection);
    }

    #[test]
    fn test_previous_from_nothing_picks_first() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([10, 20, 30]);

        selection.advance(Navigate::Previous, &mut host);
        assert_eq!(selection.selected(), Some(10));
    }

    #[test]
    fn test_next_wraps_after_full_cycle() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([10, 20, 30, 40]);

        // First advance lands on index 0, then N-1 more steps reach the end.
        for _ in 0..4 {
            selection.advance(Navigate::Next, &mut host);
        }
        assert_eq!(selection.selected_index(), Some(3));

        selection.advance(Navigate::Next, &mut host);
        assert_eq!(selection.selected_index(), Some(0));
    }

    #[test]
    fn test_single_item_advance_is_stable() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([7]);

        selection.advance(Navigate::Next, &mut host);
        selection.advance(Navigate::Next, &mut host);
        selection.advance(Navigate::Previous, &mut host);

        assert_eq!(selection.selected(), Some(7));
        assert_eq!(host.0, vec![Note::Select(7), Note::Pulse]);
    }

    #[test]
    fn test_activate_pulses_then_invokes() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([1, 2]);

        assert_eq!(selection.activate(&mut host), None);
        assert!(host.0.is_empty());

        selection.select(Some(2), &mut host);
        host.0.clear();

        assert_eq!(selection.activate(&mut host), Some(2));
        assert_eq!(host.0, vec![Note::Pulse, Note::Activate(2)]);
        assert_eq!(selection.selected(), Some(2));
    }

    #[test]
    fn test_disabled_interaction_suppresses_selection() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([1, 2, 3]);

        selection.advance(Navigate::Next, &mut host);
        selection.set_interaction_enabled(false, &mut host);
        assert_eq!(selection.state(), SelectionState::NoSelection);

        selection.advance(Navigate::Next, &mut host);
        selection.handle_gesture(GestureDirection::Right, &mut host);
        assert!(!selection.select(Some(2), &mut host));
        assert_eq!(selection.state(), SelectionState::NoSelection);

        selection.set_interaction_enabled(true, &mut host);
        selection.advance(Navigate::Next, &mut host);
        assert_eq!(selection.selected(), Some(1));
    }

    #[test]
    fn test_unmapped_gesture_is_ignored() {
        let mut host = Recorder::default();
        let mut selection = SelectionController::new([1, 2, 3]);

        selection.handle_gesture(GestureDirection::In, &mut host);
        assert!(host.0.is_empty());

        selection.handle_gesture(GestureDirection::CounterClockwise, &mut host);
        assert_eq!(selection.selected(), Some(1));
        selection.handle_gesture(GestureDirection::CounterClockwise, &mut host);
        assert_eq!(selection.selected(), Some(3));
    }
}
