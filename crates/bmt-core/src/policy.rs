//! Role-based access to gated evaluation operations.
//!
//! A viewer is the participant record they hold in the evaluation (if any)
//! plus the platform admin flag. Capabilities are derived from the role on
//! every call; nothing is cached.
//!
//! Creating evaluations is a platform-level action outside any evaluation. It
//! is granted only by the platform facilitator flag, never by a participant
//! role.

use crate::model::Participant;
use crate::types::{Organization, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    AddParticipant,
    RemoveParticipant,
    HideEvaluation,
    ProgressEvaluation,
    EditActions,
    ProgressSelf,
    CreateEvaluation,
}

impl Capability {
    pub fn all() -> &'static [Capability] {
        &[
            Capability::AddParticipant,
            Capability::RemoveParticipant,
            Capability::HideEvaluation,
            Capability::ProgressEvaluation,
            Capability::EditActions,
            Capability::ProgressSelf,
            Capability::CreateEvaluation,
        ]
    }

    /// Capabilities that apply inside a single evaluation.
    pub fn evaluation_scoped() -> &'static [Capability] {
        &[
            Capability::AddParticipant,
            Capability::RemoveParticipant,
            Capability::HideEvaluation,
            Capability::ProgressEvaluation,
            Capability::EditActions,
            Capability::ProgressSelf,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::AddParticipant => "add_participant",
            Capability::RemoveParticipant => "remove_participant",
            Capability::HideEvaluation => "hide_evaluation",
            Capability::ProgressEvaluation => "progress_evaluation",
            Capability::EditActions => "edit_actions",
            Capability::ProgressSelf => "progress_self",
            Capability::CreateEvaluation => "create_evaluation",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities a role grants inside an evaluation.
///
/// `RemoveParticipant` for an organization lead is further restricted to
/// targets in its own organization, see [`can_remove_participant`].
fn role_grants(role: Role) -> &'static [Capability] {
    match role {
        Role::Admin | Role::Facilitator => Capability::evaluation_scoped(),
        Role::OrganizationLead => &[
            Capability::AddParticipant,
            Capability::RemoveParticipant,
            Capability::EditActions,
            Capability::ProgressSelf,
        ],
        Role::Participant => &[Capability::EditActions, Capability::ProgressSelf],
        Role::ReadOnly => &[],
    }
}

// ---------------------------------------------------------------------------
// CapabilitySet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn union(mut self, other: CapabilitySet) -> CapabilitySet {
        self.0.extend(other.0);
        self
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything the viewer may do in the evaluation.
///
/// The platform admin flag grants every capability, even to a viewer who is
/// not a participant. Otherwise a missing participant record grants nothing.
pub fn capabilities(participant: Option<&Participant>, is_admin: bool) -> CapabilitySet {
    if is_admin {
        return Capability::evaluation_scoped().iter().copied().collect();
    }
    match participant {
        Some(p) => role_grants(p.role).iter().copied().collect(),
        None => CapabilitySet::default(),
    }
}

/// Platform-level capabilities of the viewer.
pub fn platform_capabilities(is_platform_facilitator: bool) -> CapabilitySet {
    if is_platform_facilitator {
        [Capability::CreateEvaluation].into_iter().collect()
    } else {
        CapabilitySet::default()
    }
}

pub fn can_create_evaluation(is_platform_facilitator: bool) -> bool {
    platform_capabilities(is_platform_facilitator).contains(Capability::CreateEvaluation)
}

pub fn is_granted(participant: Option<&Participant>, is_admin: bool, capability: Capability) -> bool {
    capabilities(participant, is_admin).contains(capability)
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

pub fn can_add_participant(participant: Option<&Participant>, is_admin: bool) -> bool {
    is_granted(participant, is_admin, Capability::AddParticipant)
}

pub fn can_hide_evaluation(participant: Option<&Participant>, is_admin: bool) -> bool {
    is_granted(participant, is_admin, Capability::HideEvaluation)
}

pub fn can_progress_evaluation(participant: Option<&Participant>, is_admin: bool) -> bool {
    is_granted(participant, is_admin, Capability::ProgressEvaluation)
}

pub fn can_edit_actions(participant: Option<&Participant>, is_admin: bool) -> bool {
    is_granted(participant, is_admin, Capability::EditActions)
}

pub fn can_progress_participant(participant: Option<&Participant>, is_admin: bool) -> bool {
    is_granted(participant, is_admin, Capability::ProgressSelf)
}

pub fn can_remove_participant(
    actor: Option<&Participant>,
    target: &Participant,
    is_admin: bool,
) -> bool {
    if !is_granted(actor, is_admin, Capability::RemoveParticipant) {
        return false;
    }
    match actor {
        Some(a) if a.role == Role::OrganizationLead && !is_admin => {
            a.organization == Organization::All || a.organization == target.organization
        }
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
