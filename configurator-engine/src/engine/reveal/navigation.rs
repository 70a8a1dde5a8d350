use bevy::prelude::*;
use std::collections::HashSet;

/// Discrete navigation input, from keyboard shortcuts or the host page RPC.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    Advance,
    Retreat,
}

/// Reveal cursor plus the bookkeeping the transition diff needs: which part
/// indices the previous stage showed, and which currently carry the
/// highlight colour.
#[derive(Resource, Debug, Default)]
pub struct Navigation {
    current: usize,
    previous_visible: HashSet<usize>,
    highlighted: HashSet<usize>,
}

impl Navigation {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn previous_visible(&self) -> &HashSet<usize> {
        &self.previous_visible
    }

    pub fn highlighted(&self) -> &HashSet<usize> {
        &self.highlighted
    }

    /// Step forward, clamped to the last group. `None` means no-op.
    pub fn advance(&mut self, group_count: usize) -> Option<usize> {
        if self.current + 1 < group_count {
            self.current += 1;
            Some(self.current)
        } else {
            None
        }
    }

    /// Step back, clamped to the first group. `None` means no-op.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.current > 0 {
            self.current -= 1;
            Some(self.current)
        } else {
            None
        }
    }

    /// Record the outcome of an applied transition. The visible set replaces
    /// the previous one wholesale; the highlight set follows the plan.
    pub fn commit(&mut self, visible: HashSet<usize>, highlighted: HashSet<usize>) {
        self.previous_visible = visible;
        self.highlighted = highlighted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_clamps_at_last_group() {
        let mut nav = Navigation::default();
        assert_eq!(nav.advance(3), Some(1));
        assert_eq!(nav.advance(3), Some(2));
        assert_eq!(nav.advance(3), None);
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn retreat_clamps_at_first_group() {
        let mut nav = Navigation::default();
        assert_eq!(nav.retreat(), None);
        assert_eq!(nav.current(), 0);
        nav.advance(2);
        assert_eq!(nav.retreat(), Some(0));
        assert_eq!(nav.retreat(), None);
    }

    #[test]
    fn index_stays_in_bounds_over_any_sequence() {
        let mut nav = Navigation::default();
        let group_count = 4;
        let steps = [1, 1, 1, 1, 1, -1, -1, -1, -1, -1, 1, -1, 1, 1];
        for step in steps {
            if step > 0 {
                nav.advance(group_count);
            } else {
                nav.retreat();
            }
            assert!(nav.current() < group_count, "index {} escaped bounds", nav.current());
        }
    }

    #[test]
    fn single_group_table_never_moves() {
        let mut nav = Navigation::default();
        assert_eq!(nav.advance(1), None);
        assert_eq!(nav.retreat(), None);
    }
}
