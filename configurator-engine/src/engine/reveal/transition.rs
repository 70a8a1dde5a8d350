use std::collections::HashSet;

use super::groups::{BASE_PART, RevealGroup};

/// Everything one group transition has to do to the scene, computed up
/// front as data. Only the net delta animates: a part already on screen is
/// never replayed through its pop-in, and a part that stays hidden is left
/// alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Final visibility per part index. Disappearing parts are `false` here
    /// but stay on screen until their fly-out task completes.
    pub visible: Vec<bool>,
    /// Net-new parts: fly in, scale pulse, highlight. Base part excluded.
    pub appearing: Vec<usize>,
    /// Net-removed parts: fly out, hidden on task completion. Base part excluded.
    pub disappearing: Vec<usize>,
    /// Parts whose colour returns to the captured base snapshot.
    pub restore: Vec<usize>,
    /// Snap straight to base positions instead of animating (initial show).
    pub snap: bool,
}

impl TransitionPlan {
    /// First ever show: visibility per membership, positions snapped,
    /// colours untouched.
    pub fn initial(group: &RevealGroup, part_count: usize) -> Self {
        Self {
            visible: membership(group, part_count),
            appearing: Vec::new(),
            disappearing: Vec::new(),
            restore: Vec::new(),
            snap: true,
        }
    }

    /// Diff the target group against what the previous transition left on
    /// screen. Calling this twice for the same group is idempotent: the
    /// second plan carries empty appearing/disappearing/restore sets and
    /// the highlight set is left as it stands.
    pub fn between(
        group: &RevealGroup,
        previous_visible: &HashSet<usize>,
        highlighted: &HashSet<usize>,
        part_count: usize,
    ) -> Self {
        let new_visible: HashSet<usize> = group.parts.iter().copied().collect();

        if new_visible == *previous_visible {
            // Nothing changed; leave colours and positions exactly as they are.
            return Self {
                visible: membership(group, part_count),
                appearing: Vec::new(),
                disappearing: Vec::new(),
                restore: Vec::new(),
                snap: false,
            };
        }

        let mut appearing = Vec::new();
        let mut disappearing = Vec::new();
        for index in 0..part_count {
            if index == BASE_PART {
                continue;
            }
            match (new_visible.contains(&index), previous_visible.contains(&index)) {
                (true, false) => appearing.push(index),
                (false, true) => disappearing.push(index),
                _ => {}
            }
        }

        // Highlight lives for exactly one transition: whatever held it
        // before loses it now, whether it stayed visible or left the group.
        let mut restore: Vec<usize> = highlighted
            .iter()
            .copied()
            .filter(|&index| index != BASE_PART)
            .collect();
        restore.sort_unstable();

        Self {
            visible: membership(group, part_count),
            appearing,
            disappearing,
            restore,
            snap: false,
        }
    }

    /// Highlight set after this plan is applied.
    pub fn next_highlighted(&self, highlighted: &HashSet<usize>) -> HashSet<usize> {
        if self.appearing.is_empty() && self.disappearing.is_empty() && self.restore.is_empty() {
            highlighted.clone()
        } else {
            self.appearing.iter().copied().collect()
        }
    }

    /// Visible set after this plan is applied (and all fly-outs complete).
    pub fn next_visible(&self) -> HashSet<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(index, &shown)| shown.then_some(index))
            .collect()
    }
}

fn membership(group: &RevealGroup, part_count: usize) -> Vec<bool> {
    (0..part_count).map(|index| group.contains(index)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(parts: &[usize]) -> RevealGroup {
        RevealGroup {
            name: "stage".to_string(),
            icon: "fa-cube".to_string(),
            size: "1x1".to_string(),
            parts: parts.to_vec(),
        }
    }

    fn set(indices: &[usize]) -> HashSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn initial_show_snaps_without_diffing() {
        let plan = TransitionPlan::initial(&group(&[0, 2]), 4);
        assert!(plan.snap);
        assert_eq!(plan.visible, vec![true, false, true, false]);
        assert!(plan.appearing.is_empty());
        assert!(plan.disappearing.is_empty());
        assert!(plan.restore.is_empty());
    }

    #[test]
    fn only_the_delta_animates() {
        let plan = TransitionPlan::between(&group(&[0, 1, 2, 3]), &set(&[0, 1]), &set(&[1]), 6);
        assert_eq!(plan.appearing, vec![2, 3]);
        assert!(plan.disappearing.is_empty());
        assert_eq!(plan.restore, vec![1], "part 1 is no longer new, colour returns to base");
        assert_eq!(plan.visible, vec![true, true, true, true, false, false]);
    }

    #[test]
    fn retreat_flies_removed_parts_out() {
        let plan = TransitionPlan::between(&group(&[0, 1]), &set(&[0, 1, 2, 3]), &set(&[2, 3]), 4);
        assert!(plan.appearing.is_empty());
        assert_eq!(plan.disappearing, vec![2, 3]);
        assert_eq!(plan.restore, vec![2, 3]);
        assert_eq!(plan.visible, vec![true, true, false, false]);
    }

    #[test]
    fn base_part_is_never_animated_or_recoloured() {
        // Base part flips in and out of membership; the plan must ignore it.
        let plan = TransitionPlan::between(&group(&[0, 1]), &set(&[2]), &set(&[0, 2]), 3);
        assert!(!plan.appearing.contains(&BASE_PART));
        assert!(!plan.disappearing.contains(&BASE_PART));
        assert!(!plan.restore.contains(&BASE_PART));
    }

    #[test]
    fn repeated_target_is_idempotent() {
        let stage = group(&[0, 1, 2]);
        let first = TransitionPlan::between(&stage, &set(&[0]), &set(&[]), 4);
        assert_eq!(first.appearing, vec![1, 2]);

        let visible = first.next_visible();
        let highlighted = first.next_highlighted(&set(&[]));
        assert_eq!(highlighted, set(&[1, 2]));

        let second = TransitionPlan::between(&stage, &visible, &highlighted, 4);
        assert!(second.appearing.is_empty());
        assert!(second.disappearing.is_empty());
        assert!(second.restore.is_empty(), "second call must not strip the highlight");
        assert_eq!(second.next_highlighted(&highlighted), highlighted);
        assert_eq!(second.next_visible(), visible);
    }

    #[test]
    fn visibility_matches_group_membership_exactly() {
        let stage = group(&[0, 3, 5]);
        let plan = TransitionPlan::between(&stage, &set(&[0, 1, 2]), &set(&[]), 6);
        for index in 0..6 {
            assert_eq!(
                plan.visible[index],
                stage.contains(index),
                "part {} visibility must equal membership",
                index
            );
        }
    }

    #[test]
    fn two_forward_steps_walkthrough() {
        // groups = [[0], [0,1], [0,1,2,3]], starting with only part 0 shown.
        let mut visible = set(&[0]);
        let mut highlighted = set(&[]);

        let first = TransitionPlan::between(&group(&[0, 1]), &visible, &highlighted, 4);
        assert_eq!(first.appearing, vec![1]);
        assert!(first.disappearing.is_empty());
        highlighted = first.next_highlighted(&highlighted);
        visible = first.next_visible();
        assert_eq!(visible, set(&[0, 1]));
        assert_eq!(highlighted, set(&[1]));

        let second = TransitionPlan::between(&group(&[0, 1, 2, 3]), &visible, &highlighted, 4);
        assert_eq!(second.appearing, vec![2, 3]);
        assert_eq!(second.restore, vec![1], "part 1 stays visible but loses the highlight");
        highlighted = second.next_highlighted(&highlighted);
        visible = second.next_visible();
        assert_eq!(visible, set(&[0, 1, 2, 3]));
        assert_eq!(highlighted, set(&[2, 3]));
    }
}
