//! Workflow step ordering and per-step status.
//!
//! The workflow is strictly linear:
//! nomination → preparation → alignment → workshop → follow_up → finished

use crate::types::{Progression, ProgressionStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The canonical ordering of workflow steps.
///
/// Every comparison in the crate routes through this array and [`index_of`].
pub const ORDER: [Progression; 6] = [
    Progression::Nomination,
    Progression::Preparation,
    Progression::Alignment,
    Progression::Workshop,
    Progression::FollowUp,
    Progression::Finished,
];

/// 0-based position of `step` in [`ORDER`].
pub fn index_of(step: Progression) -> usize {
    match step {
        Progression::Nomination => 0,
        Progression::Preparation => 1,
        Progression::Alignment => 2,
        Progression::Workshop => 3,
        Progression::FollowUp => 4,
        Progression::Finished => 5,
    }
}

/// The step after `step`, or `None` at `Finished`.
pub fn next_of(step: Progression) -> Option<Progression> {
    ORDER.get(index_of(step) + 1).copied()
}

/// The step before `step`, or `None` at `Nomination`.
pub fn previous_of(step: Progression) -> Option<Progression> {
    index_of(step).checked_sub(1).map(|i| ORDER[i])
}

pub fn compare(a: Progression, b: Progression) -> Ordering {
    index_of(a).cmp(&index_of(b))
}

/// `Finished` marks the end of the workflow rather than a stage of work.
pub fn is_terminal(step: Progression) -> bool {
    next_of(step).is_none()
}

/// Every step that has work attached to it, i.e. all but `Finished`.
pub fn tracked_steps() -> &'static [Progression] {
    &ORDER[..ORDER.len() - 1]
}

impl Progression {
    pub fn index(self) -> usize {
        index_of(self)
    }

    pub fn next(self) -> Option<Progression> {
        next_of(self)
    }

    pub fn previous(self) -> Option<Progression> {
        previous_of(self)
    }
}

impl PartialOrd for Progression {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Progression {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(*self, *other)
    }
}

// ---------------------------------------------------------------------------
// Status calculation
// ---------------------------------------------------------------------------

/// Status of `compare_step` for a subject (evaluation or participant) that is
/// currently at `subject_step`.
pub fn status_of(subject_step: Progression, compare_step: Progression) -> ProgressionStatus {
    match compare(compare_step, subject_step) {
        Ordering::Less => ProgressionStatus::Completed,
        Ordering::Equal => ProgressionStatus::Current,
        Ordering::Greater => ProgressionStatus::NotStarted,
    }
}

/// Number of tracked steps that have `status` relative to `subject_step`.
pub fn count_by_status(status: ProgressionStatus, subject_step: Progression) -> usize {
    tracked_steps()
        .iter()
        .filter(|&&step| status_of(subject_step, step) == status)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub step: Progression,
    pub status: ProgressionStatus,
}

/// One entry per tracked step, in workflow order.
pub fn statuses(subject_step: Progression) -> Vec<StepStatus> {
    tracked_steps()
        .iter()
        .map(|&step| StepStatus {
            step,
            status: status_of(subject_step, step),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_index_table() {
        for (i, step) in ORDER.iter().enumerate() {
            assert_eq!(index_of(*step), i);
        }
    }

    #[test]
    fn navigation_at_boundaries() {
        assert_eq!(next_of(Progression::Nomination), Some(Progression::Preparation));
        assert_eq!(next_of(Progression::FollowUp), Some(Progression::Finished));
        assert_eq!(next_of(Progression::Finished), None);
        assert_eq!(previous_of(Progression::Nomination), None);
        assert_eq!(previous_of(Progression::Preparation), Some(Progression::Nomination));
    }

    #[test]
    fn ordering_follows_sequence() {
        assert!(Progression::Nomination < Progression::Preparation);
        assert!(Progression::Workshop < Progression::FollowUp);
        assert!(Progression::Finished > Progression::FollowUp);
        assert_eq!(compare(Progression::Alignment, Progression::Alignment), Ordering::Equal);
    }

    #[test]
    fn only_finished_is_terminal() {
        let terminal: Vec<_> = ORDER.iter().filter(|s| is_terminal(**s)).collect();
        assert_eq!(terminal, vec![&Progression::Finished]);
        assert_eq!(tracked_steps().len(), 5);
        assert!(!tracked_steps().contains(&Progression::Finished));
    }

    #[test]
    fn status_relative_to_subject() {
        assert_eq!(
            status_of(Progression::Workshop, Progression::Alignment),
            ProgressionStatus::Completed
        );
        assert_eq!(
            status_of(Progression::Workshop, Progression::Workshop),
            ProgressionStatus::Current
        );
        assert_eq!(
            status_of(Progression::Workshop, Progression::FollowUp),
            ProgressionStatus::NotStarted
        );
    }

    #[test]
    fn counts_at_nomination() {
        assert_eq!(count_by_status(ProgressionStatus::Completed, Progression::Nomination), 0);
        assert_eq!(count_by_status(ProgressionStatus::Current, Progression::Nomination), 1);
        assert_eq!(count_by_status(ProgressionStatus::NotStarted, Progression::Nomination), 4);
    }

    #[test]
    fn finished_completes_every_tracked_step() {
        assert_eq!(count_by_status(ProgressionStatus::Completed, Progression::Finished), 5);
        assert_eq!(count_by_status(ProgressionStatus::Current, Progression::Finished), 0);
        assert!(statuses(Progression::Finished)
            .iter()
            .all(|s| s.status == ProgressionStatus::Completed));
    }

    #[test]
    fn statuses_are_in_workflow_order() {
        let steps: Vec<_> = statuses(Progression::Alignment).iter().map(|s| s.step).collect();
        assert_eq!(steps, tracked_steps());
        let current: Vec<_> = statuses(Progression::Alignment)
            .into_iter()
            .filter(|s| s.status == ProgressionStatus::Current)
            .collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].step, Progression::Alignment);
    }
}
