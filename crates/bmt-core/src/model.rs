//! Input records as supplied by the external query layer.
//!
//! Field names follow the GraphQL schema (camelCase), so a query result can be
//! deserialized directly. Nothing here is mutated by the engine.

use crate::types::{Barrier, EvaluationStatus, Organization, Priority, Progression, Role, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub fusion_project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_master_title: Option<String>,
    /// The evaluation currently selected as the project's indicator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator_evaluation_id: Option<String>,
}

impl Project {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub azure_unique_id: String,
    pub role: Role,
    pub organization: Organization,
    #[serde(default = "default_progression")]
    pub progression: Progression,
}

fn default_progression() -> Progression {
    Progression::Nomination
}

impl Participant {
    pub fn new(
        id: impl Into<String>,
        azure_unique_id: impl Into<String>,
        role: Role,
        organization: Organization,
    ) -> Self {
        Self {
            id: id.into(),
            azure_unique_id: azure_unique_id.into(),
            role,
            organization,
            progression: Progression::Nomination,
        }
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }
}

// ---------------------------------------------------------------------------
// Notes and closing remarks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub text: String,
    pub create_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingRemark {
    pub id: String,
    pub text: String,
    pub create_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub create_date: DateTime<Utc>,
    /// Participant id of the assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub closing_remarks: Vec<ClosingRemark>,
    #[serde(default)]
    pub is_voided: bool,
}

impl Action {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        priority: Priority,
        create_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority,
            completed: false,
            due_date: None,
            create_date,
            assigned_to: None,
            notes: Vec::new(),
            closing_remarks: Vec::new(),
            is_voided: false,
        }
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Answer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    /// The step this answer was recorded for.
    pub progression: Progression,
    pub severity: Severity,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered_by: Option<String>,
    pub create_date: DateTime<Utc>,
}

impl Answer {
    pub fn new(
        id: impl Into<String>,
        progression: Progression,
        severity: Severity,
        create_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            progression,
            severity,
            text: String::new(),
            answered_by: None,
            create_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrier: Option<Barrier>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Question {
    pub fn new(id: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            order,
            text: String::new(),
            barrier: None,
            answers: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_barrier(mut self, barrier: Barrier) -> Self {
        self.barrier = Some(barrier);
        self
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    pub name: String,
    pub progression: Progression,
    pub create_date: DateTime<Utc>,
    #[serde(default)]
    pub status: EvaluationStatus,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub project: Project,
}

impl Evaluation {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        progression: Progression,
        create_date: DateTime<Utc>,
        project: Project,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            progression,
            create_date,
            status: EvaluationStatus::Active,
            participants: Vec::new(),
            questions: Vec::new(),
            project,
        }
    }

    pub fn is_voided(&self) -> bool {
        self.status == EvaluationStatus::Voided
    }

    /// The participant record of the viewer, if they are part of this evaluation.
    pub fn participant_for(&self, azure_unique_id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.azure_unique_id == azure_unique_id)
    }

    /// Every action across all questions, in question order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.questions.iter().flat_map(|q| q.actions.iter())
    }

    /// True if the owning project has selected this evaluation as its indicator.
    pub fn is_indicator(&self) -> bool {
        self.project.indicator_evaluation_id.as_deref() == Some(self.id.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
