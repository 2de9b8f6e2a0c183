//! Portfolio dashboard rows: one summary per evaluation, sortable by column
//! and grouped by portfolio and project master.

use crate::action::{aggregate, ActionCounts};
use crate::barrier::{assign, bowtie_visible, snapshot_step};
use crate::error::BmtError;
use crate::model::Evaluation;
use crate::progression::{count_by_status, statuses, tracked_steps, StepStatus};
use crate::sort::{self, SortDirection};
use crate::types::{Barrier, EvaluationStatus, Progression, ProgressionStatus, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Group name for evaluations whose project carries no portfolio or title.
pub const UNASSIGNED: &str = "Unassigned";

// ---------------------------------------------------------------------------
// EvaluationSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowtieCell {
    pub barrier: Barrier,
    pub question_id: String,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub id: String,
    pub name: String,
    pub progression: Progression,
    pub status: EvaluationStatus,
    pub completed_steps: usize,
    pub tracked_steps: usize,
    pub steps: Vec<StepStatus>,
    pub actions: ActionCounts,
    pub create_date: DateTime<Utc>,
    pub is_indicator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_master_title: Option<String>,
    /// Empty until the evaluation reaches the workshop.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bowtie: Vec<BowtieCell>,
}

impl EvaluationSummary {
    pub fn build(evaluation: &Evaluation, now: DateTime<Utc>) -> Self {
        let bowtie = if bowtie_visible(evaluation.progression) {
            assign(&evaluation.questions, snapshot_step(evaluation.progression))
                .into_values()
                .map(|entry| BowtieCell {
                    barrier: entry.barrier,
                    question_id: entry.question.id.clone(),
                    severity: entry.severity(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: evaluation.id.clone(),
            name: evaluation.name.clone(),
            progression: evaluation.progression,
            status: evaluation.status,
            completed_steps: count_by_status(ProgressionStatus::Completed, evaluation.progression),
            tracked_steps: tracked_steps().len(),
            steps: statuses(evaluation.progression),
            actions: aggregate(evaluation, now).counts(),
            create_date: evaluation.create_date,
            is_indicator: evaluation.is_indicator(),
            portfolio: evaluation.project.portfolio.clone(),
            project_master_title: evaluation.project.project_master_title.clone(),
            bowtie,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.status == EvaluationStatus::Voided
    }
}

/// Summaries for every evaluation, leaving out hidden (voided) ones unless
/// `include_hidden` is set.
pub fn summarize(
    evaluations: &[Evaluation],
    now: DateTime<Utc>,
    include_hidden: bool,
) -> Vec<EvaluationSummary> {
    evaluations
        .iter()
        .filter(|e| include_hidden || !e.is_voided())
        .map(|e| EvaluationSummary::build(e, now))
        .collect()
}

// ---------------------------------------------------------------------------
// SortColumn
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    Name,
    Workflow,
    OverdueActions,
    OpenActions,
    ClosedActions,
    CreateDate,
}

impl SortColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Workflow => "workflow",
            SortColumn::OverdueActions => "overdue_actions",
            SortColumn::OpenActions => "open_actions",
            SortColumn::ClosedActions => "closed_actions",
            SortColumn::CreateDate => "create_date",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortColumn {
    type Err = BmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "name" | "title" => Ok(SortColumn::Name),
            "workflow" | "progression" => Ok(SortColumn::Workflow),
            "overdue" | "overdue_actions" => Ok(SortColumn::OverdueActions),
            "open" | "open_actions" => Ok(SortColumn::OpenActions),
            "closed" | "closed_actions" => Ok(SortColumn::ClosedActions),
            "created" | "create_date" => Ok(SortColumn::CreateDate),
            _ => Err(BmtError::InvalidSortColumn(s.to_string())),
        }
    }
}

pub fn compare_summaries(
    a: &EvaluationSummary,
    b: &EvaluationSummary,
    column: SortColumn,
    direction: SortDirection,
) -> Ordering {
    match column {
        SortColumn::Name => sort::compare_ignore_case(&a.name, &b.name, direction),
        SortColumn::Workflow => sort::compare(&a.completed_steps, &b.completed_steps, direction),
        SortColumn::OverdueActions => {
            sort::compare(&a.actions.overdue, &b.actions.overdue, direction)
        }
        SortColumn::OpenActions => sort::compare(&a.actions.open, &b.actions.open, direction),
        SortColumn::ClosedActions => sort::compare(&a.actions.closed, &b.actions.closed, direction),
        SortColumn::CreateDate => sort::compare(&a.create_date, &b.create_date, direction),
    }
}

pub fn sort_summaries(summaries: &mut [EvaluationSummary], column: SortColumn, direction: SortDirection) {
    // Direction is applied inside compare_summaries.
    sort::sort_by(summaries, SortDirection::Ascending, |a, b| {
        compare_summaries(a, b, column, direction)
    });
}

// ---------------------------------------------------------------------------
// Portfolio grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectGroup {
    pub title: String,
    pub evaluations: Vec<EvaluationSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioGroup {
    pub portfolio: String,
    pub projects: Vec<ProjectGroup>,
}

/// Portfolios come out in reverse name order, project titles in name order.
/// Evaluations keep the order they arrive in, so sort before grouping.
pub fn group_by_portfolio(summaries: Vec<EvaluationSummary>) -> Vec<PortfolioGroup> {
    let mut tree: BTreeMap<String, BTreeMap<String, Vec<EvaluationSummary>>> = BTreeMap::new();
    for summary in summaries {
        let portfolio = summary.portfolio.clone().unwrap_or_else(|| UNASSIGNED.to_string());
        let title = summary
            .project_master_title
            .clone()
            .unwrap_or_else(|| UNASSIGNED.to_string());
        tree.entry(portfolio)
            .or_default()
            .entry(title)
            .or_default()
            .push(summary);
    }

    tree.into_iter()
        .rev()
        .map(|(portfolio, projects)| PortfolioGroup {
            portfolio,
            projects: projects
                .into_iter()
                .map(|(title, evaluations)| ProjectGroup { title, evaluations })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, Answer, Project, Question};
    use crate::types::Priority;
    use chrono::{Duration, TimeZone};
    use std::str::FromStr;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
    }

    fn make_evaluation(id: &str, name: &str, progression: Progression, days_old: i64) -> Evaluation {
        let mut project = Project::new(format!("pr-{id}"));
        project.portfolio = Some("Offshore".to_string());
        project.project_master_title = Some("Field A".to_string());
        Evaluation::new(id, name, progression, now() - Duration::days(days_old), project)
    }

    #[test]
    fn summary_counts_steps_and_actions() {
        let mut ev = make_evaluation("ev-1", "Alpha", Progression::Workshop, 3);
        let mut q = Question::new("q-1", 1).with_barrier(Barrier::Ps1);
        q.answers.push(Answer::new("a-1", Progression::Workshop, Severity::Limited, now()));
        q.actions.push(
            Action::new("ac-1", "Overdue", Priority::High, now() - Duration::days(5))
                .with_due_date(now() - Duration::days(1)),
        );
        q.actions.push(Action::new("ac-2", "Done", Priority::Low, now()).completed());
        ev.questions.push(q);
        ev.project.indicator_evaluation_id = Some("ev-1".to_string());

        let s = EvaluationSummary::build(&ev, now());
        assert_eq!(s.completed_steps, 3);
        assert_eq!(s.tracked_steps, 5);
        assert_eq!(s.actions, ActionCounts { open: 0, closed: 1, overdue: 1 });
        assert!(s.is_indicator);
        assert_eq!(s.bowtie.len(), 1);
        assert_eq!(s.bowtie[0].severity, Some(Severity::Limited));
    }

    #[test]
    fn bowtie_hidden_before_workshop() {
        let mut ev = make_evaluation("ev-1", "Alpha", Progression::Alignment, 3);
        ev.questions.push(Question::new("q-1", 1).with_barrier(Barrier::Gm));
        assert!(EvaluationSummary::build(&ev, now()).bowtie.is_empty());
    }

    #[test]
    fn finished_bowtie_uses_follow_up_answers() {
        let mut ev = make_evaluation("ev-1", "Alpha", Progression::Finished, 3);
        let mut q = Question::new("q-1", 1).with_barrier(Barrier::Ps7);
        q.answers.push(Answer::new("ws", Progression::Workshop, Severity::High, now()));
        q.answers.push(Answer::new("fu", Progression::FollowUp, Severity::None, now()));
        ev.questions.push(q);
        let s = EvaluationSummary::build(&ev, now());
        assert_eq!(s.bowtie[0].severity, Some(Severity::None));
    }

    #[test]
    fn hidden_evaluations_filtered_unless_requested() {
        let active = make_evaluation("ev-1", "Alpha", Progression::Nomination, 1);
        let mut voided = make_evaluation("ev-2", "Beta", Progression::Nomination, 1);
        voided.status = EvaluationStatus::Voided;
        let evaluations = vec![active, voided];
        assert_eq!(summarize(&evaluations, now(), false).len(), 1);
        let all = summarize(&evaluations, now(), true);
        assert_eq!(all.len(), 2);
        assert!(all[1].is_hidden());
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let evaluations = vec![
            make_evaluation("1", "b", Progression::Nomination, 1),
            make_evaluation("2", "A", Progression::Nomination, 1),
            make_evaluation("3", "a", Progression::Nomination, 1),
        ];
        let mut rows = summarize(&evaluations, now(), false);
        sort_summaries(&mut rows, SortColumn::Name, SortDirection::Ascending);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn sort_by_workflow_descending() {
        let evaluations = vec![
            make_evaluation("1", "x", Progression::Preparation, 1),
            make_evaluation("2", "y", Progression::FollowUp, 1),
            make_evaluation("3", "z", Progression::Nomination, 1),
        ];
        let mut rows = summarize(&evaluations, now(), false);
        sort_summaries(&mut rows, SortColumn::Workflow, SortDirection::Descending);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn sort_by_create_date() {
        let evaluations = vec![
            make_evaluation("new", "x", Progression::Nomination, 1),
            make_evaluation("old", "y", Progression::Nomination, 30),
        ];
        let mut rows = summarize(&evaluations, now(), false);
        sort_summaries(&mut rows, SortColumn::CreateDate, SortDirection::Ascending);
        assert_eq!(rows[0].id, "old");
    }

    #[test]
    fn sort_column_parses_short_names() {
        assert_eq!(SortColumn::from_str("overdue").unwrap(), SortColumn::OverdueActions);
        assert_eq!(SortColumn::from_str("create-date").unwrap(), SortColumn::CreateDate);
        assert!(SortColumn::from_str("bowtie").is_err());
    }

    #[test]
    fn groups_by_portfolio_in_reverse_order() {
        let mut a = make_evaluation("1", "a", Progression::Nomination, 1);
        a.project.portfolio = Some("Alpha".to_string());
        let mut b = make_evaluation("2", "b", Progression::Nomination, 1);
        b.project.portfolio = Some("Zulu".to_string());
        let mut c = make_evaluation("3", "c", Progression::Nomination, 1);
        c.project.portfolio = None;
        c.project.project_master_title = None;

        let groups = group_by_portfolio(summarize(&[a, b, c], now(), false));
        let names: Vec<_> = groups.iter().map(|g| g.portfolio.as_str()).collect();
        assert_eq!(names, vec!["Zulu", "Unassigned", "Alpha"]);
        assert_eq!(groups[1].projects[0].title, UNASSIGNED);
    }
}
