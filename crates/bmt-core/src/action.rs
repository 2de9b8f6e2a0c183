//! Follow-up action classification and per-evaluation aggregation.

use crate::model::{Action, Evaluation, Question};
use crate::sort::{self, SortDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ActionState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    Open,
    Closed,
    Overdue,
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionState::Open => "open",
            ActionState::Closed => "closed",
            ActionState::Overdue => "overdue",
        };
        f.write_str(s)
    }
}

/// State of `action` at `now`. Depends only on `completed`, `due_date` and
/// `now`; an action due exactly at `now` is still open.
pub fn state_of(action: &Action, now: DateTime<Utc>) -> ActionState {
    if action.completed {
        return ActionState::Closed;
    }
    match action.due_date {
        Some(due) if due < now => ActionState::Overdue,
        _ => ActionState::Open,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionClass {
    pub state: ActionState,
    pub weight: u8,
}

pub fn classify(action: &Action, now: DateTime<Utc>) -> ActionClass {
    ActionClass {
        state: state_of(action, now),
        weight: action.priority.weight(),
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub open: usize,
    pub closed: usize,
    pub overdue: usize,
}

impl ActionCounts {
    pub fn total(&self) -> usize {
        self.open + self.closed + self.overdue
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ActionsByState<'a> {
    pub open: Vec<&'a Action>,
    pub closed: Vec<&'a Action>,
    pub overdue: Vec<&'a Action>,
}

impl<'a> ActionsByState<'a> {
    pub fn counts(&self) -> ActionCounts {
        ActionCounts {
            open: self.open.len(),
            closed: self.closed.len(),
            overdue: self.overdue.len(),
        }
    }

    pub fn bucket(&self, state: ActionState) -> &[&'a Action] {
        match state {
            ActionState::Open => &self.open,
            ActionState::Closed => &self.closed,
            ActionState::Overdue => &self.overdue,
        }
    }
}

/// Most urgent first, then oldest first.
fn urgency_order(bucket: &mut [&Action]) {
    sort::sort_by(bucket, SortDirection::Ascending, |a, b| {
        sort::compare(&a.priority.weight(), &b.priority.weight(), SortDirection::Descending)
            .then_with(|| sort::compare(&a.create_date, &b.create_date, SortDirection::Ascending))
    });
}

/// Partition every non-voided action of `evaluation` by state at `now`.
pub fn aggregate(evaluation: &Evaluation, now: DateTime<Utc>) -> ActionsByState<'_> {
    let mut out = ActionsByState::default();
    for action in evaluation.actions().filter(|a| !a.is_voided) {
        match state_of(action, now) {
            ActionState::Open => out.open.push(action),
            ActionState::Closed => out.closed.push(action),
            ActionState::Overdue => out.overdue.push(action),
        }
    }
    urgency_order(&mut out.open);
    urgency_order(&mut out.closed);
    urgency_order(&mut out.overdue);
    out
}

/// A question's actions, oldest first.
pub fn actions_by_creation(question: &Question) -> Vec<&Action> {
    let mut actions: Vec<&Action> = question.actions.iter().collect();
    sort::sort_by_key(&mut actions, SortDirection::Ascending, |a| a.create_date);
    actions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;
    use crate::types::{Priority, Progression};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn make_action(id: &str, priority: Priority, created_days_ago: i64) -> Action {
        Action::new(id, format!("Action {id}"), priority, now() - Duration::days(created_days_ago))
    }

    fn evaluation_with(actions: Vec<Action>) -> Evaluation {
        let mut ev = Evaluation::new("ev-1", "Test", Progression::Workshop, now(), Project::new("pr-1"));
        let mut q = Question::new("q-1", 1);
        q.actions = actions;
        ev.questions.push(q);
        ev
    }

    #[test]
    fn classification_rules() {
        let a = make_action("a", Priority::Low, 10);
        assert_eq!(state_of(&a, now()), ActionState::Open);

        let due_past = a.clone().with_due_date(now() - Duration::hours(1));
        assert_eq!(state_of(&due_past, now()), ActionState::Overdue);

        let due_now = a.clone().with_due_date(now());
        assert_eq!(state_of(&due_now, now()), ActionState::Open);

        let done_late = due_past.clone().completed();
        assert_eq!(state_of(&done_late, now()), ActionState::Closed);
    }

    #[test]
    fn classify_carries_priority_weight() {
        let a = make_action("a", Priority::High, 1);
        let class = classify(&a, now());
        assert_eq!(class.state, ActionState::Open);
        assert_eq!(class.weight, 3);
    }

    #[test]
    fn workshop_with_two_overdue_of_five() {
        let actions = vec![
            make_action("1", Priority::Medium, 5).with_due_date(now() - Duration::days(1)),
            make_action("2", Priority::Medium, 5),
            make_action("3", Priority::Low, 5).with_due_date(now() + Duration::days(3)),
            make_action("4", Priority::High, 5).with_due_date(now() - Duration::days(2)),
            make_action("5", Priority::Low, 5),
        ];
        let ev = evaluation_with(actions);
        let by_state = aggregate(&ev, now());
        assert_eq!(by_state.overdue.len(), 2);
        assert_eq!(by_state.open.len(), 3);
        assert_eq!(by_state.closed.len(), 0);
        assert_eq!(by_state.counts().total(), 5);
    }

    #[test]
    fn buckets_are_ordered_by_urgency_then_age() {
        let actions = vec![
            make_action("low-old", Priority::Low, 9),
            make_action("high-new", Priority::High, 1),
            make_action("high-old", Priority::High, 4),
            make_action("medium", Priority::Medium, 2),
        ];
        let ev = evaluation_with(actions);
        let ids: Vec<_> = aggregate(&ev, now()).open.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["high-old", "high-new", "medium", "low-old"]);
    }

    #[test]
    fn voided_actions_are_skipped() {
        let mut voided = make_action("v", Priority::High, 1);
        voided.is_voided = true;
        let ev = evaluation_with(vec![voided, make_action("a", Priority::Low, 1).completed()]);
        let counts = aggregate(&ev, now()).counts();
        assert_eq!(counts, ActionCounts { open: 0, closed: 1, overdue: 0 });
    }

    #[test]
    fn aggregates_across_questions() {
        let mut ev = evaluation_with(vec![make_action("1", Priority::Low, 1)]);
        let mut q2 = Question::new("q-2", 2);
        q2.actions.push(make_action("2", Priority::Low, 1).completed());
        ev.questions.push(q2);
        let counts = aggregate(&ev, now()).counts();
        assert_eq!(counts.open, 1);
        assert_eq!(counts.closed, 1);
    }

    #[test]
    fn creation_order_for_question() {
        let mut q = Question::new("q-1", 1);
        q.actions = vec![
            make_action("newest", Priority::Low, 1),
            make_action("oldest", Priority::Low, 30),
            make_action("middle", Priority::Low, 7),
        ];
        let ids: Vec<_> = actions_by_creation(&q).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["oldest", "middle", "newest"]);
    }
}
