//! Decides whether an evaluation (or a single participant) may move to the
//! next workflow step.
//!
//! Advancing never skips a step and never moves backward. Rolling an
//! evaluation back is a separate operation and does not go through here.

use crate::error::{BmtError, Result};
use crate::model::{Evaluation, Participant};
use crate::policy;
use crate::progression::next_of;
use crate::types::Progression;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DenyReason
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The viewer's role does not allow the operation.
    PolicyDenied,
    Voided,
    AlreadyFinished,
    /// The "finish step" control belongs to a step the evaluation is not at.
    NotAtViewedStep,
    /// A participant may only complete the step the evaluation is at.
    ParticipantOutOfStep,
}

impl DenyReason {
    pub fn message(self) -> &'static str {
        match self {
            DenyReason::PolicyDenied => "viewer is not permitted to progress",
            DenyReason::Voided => "evaluation is voided",
            DenyReason::AlreadyFinished => "already at the final step",
            DenyReason::NotAtViewedStep => "evaluation is not at the viewed step",
            DenyReason::ParticipantOutOfStep => "participant is not at the evaluation's step",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ---------------------------------------------------------------------------
// GateDecision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub allowed: bool,
    pub from: Progression,
    /// The step an allowed advance moves to.
    pub to: Option<Progression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
}

impl GateDecision {
    fn allow(from: Progression, to: Progression) -> Self {
        Self {
            allowed: true,
            from,
            to: Some(to),
            reason: None,
        }
    }

    fn deny(from: Progression, reason: DenyReason) -> Self {
        Self {
            allowed: false,
            from,
            to: None,
            reason: Some(reason),
        }
    }

    fn into_result(self) -> Result<Progression> {
        match (self.to, self.reason) {
            (Some(step), None) => Ok(step),
            (_, reason) => Err(BmtError::InvalidTransition {
                from: self.from.to_string(),
                reason: reason
                    .map(|r| r.message().to_string())
                    .unwrap_or_else(|| "transition denied".to_string()),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation progression
// ---------------------------------------------------------------------------

/// Rules are checked in order and the first failure is reported:
/// policy, voided status, then existence of a next step.
pub fn decide(evaluation: &Evaluation, participant: Option<&Participant>, is_admin: bool) -> GateDecision {
    let from = evaluation.progression;
    if !policy::can_progress_evaluation(participant, is_admin) {
        return GateDecision::deny(from, DenyReason::PolicyDenied);
    }
    if evaluation.is_voided() {
        return GateDecision::deny(from, DenyReason::Voided);
    }
    match next_of(from) {
        Some(to) => GateDecision::allow(from, to),
        None => GateDecision::deny(from, DenyReason::AlreadyFinished),
    }
}

pub fn can_advance(evaluation: &Evaluation, participant: Option<&Participant>, is_admin: bool) -> bool {
    decide(evaluation, participant, is_admin).allowed
}

/// The step `evaluation` moves to when advanced.
///
/// Callers are expected to check [`can_advance`] first; this only guards
/// against advancing past the final step.
pub fn advance(evaluation: &Evaluation) -> Result<Progression> {
    next_of(evaluation.progression).ok_or_else(|| BmtError::InvalidTransition {
        from: evaluation.progression.to_string(),
        reason: DenyReason::AlreadyFinished.message().to_string(),
    })
}

/// [`advance`] with the full gate applied for the given viewer.
pub fn advance_as(
    evaluation: &Evaluation,
    participant: Option<&Participant>,
    is_admin: bool,
) -> Result<Progression> {
    decide(evaluation, participant, is_admin).into_result()
}

/// Gate for the "finish step" control shown on a step's own view: the
/// evaluation must be at `view_step` in addition to passing [`decide`].
pub fn decide_from_view(
    evaluation: &Evaluation,
    participant: Option<&Participant>,
    is_admin: bool,
    view_step: Progression,
) -> GateDecision {
    let decision = decide(evaluation, participant, is_admin);
    if decision.allowed && evaluation.progression != view_step {
        return GateDecision::deny(evaluation.progression, DenyReason::NotAtViewedStep);
    }
    decision
}

pub fn can_finish_step(
    evaluation: &Evaluation,
    participant: Option<&Participant>,
    is_admin: bool,
    view_step: Progression,
) -> bool {
    decide_from_view(evaluation, participant, is_admin, view_step).allowed
}

// ---------------------------------------------------------------------------
// Participant progression
// ---------------------------------------------------------------------------

/// A participant completes their own part of the evaluation's current step,
/// which moves them one step ahead of the evaluation.
pub fn decide_participant(evaluation: &Evaluation, participant: Option<&Participant>) -> GateDecision {
    let Some(p) = participant else {
        return GateDecision::deny(evaluation.progression, DenyReason::PolicyDenied);
    };
    let from = p.progression;
    if !policy::can_progress_participant(Some(p), false) {
        return GateDecision::deny(from, DenyReason::PolicyDenied);
    }
    if evaluation.is_voided() {
        return GateDecision::deny(from, DenyReason::Voided);
    }
    if p.progression != evaluation.progression {
        return GateDecision::deny(from, DenyReason::ParticipantOutOfStep);
    }
    match next_of(from) {
        Some(to) => GateDecision::allow(from, to),
        None => GateDecision::deny(from, DenyReason::AlreadyFinished),
    }
}

pub fn can_advance_participant(evaluation: &Evaluation, participant: Option<&Participant>) -> bool {
    decide_participant(evaluation, participant).allowed
}

pub fn advance_participant(evaluation: &Evaluation, participant: &Participant) -> Result<Progression> {
    decide_participant(evaluation, Some(participant)).into_result()
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    /// Participants who have completed the evaluation's current step.
    pub ready: usize,
    pub total: usize,
}

impl Readiness {
    /// False when nobody takes part in the steps.
    pub fn all_ready(&self) -> bool {
        self.total > 0 && self.ready == self.total
    }
}

/// Read-only participants take no part in the steps and are not counted.
pub fn readiness(evaluation: &Evaluation) -> Readiness {
    let members: Vec<&Participant> = evaluation
        .participants
        .iter()
        .filter(|p| policy::can_progress_participant(Some(*p), false))
        .collect();
    let ready = members
        .iter()
        .filter(|p| p.progression > evaluation.progression)
        .count();
    Readiness {
        ready,
        total: members.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
