use crate::error::BmtError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase and strip separators so `FOLLOW_UP`, `follow-up` and `FollowUp`
/// all parse to the same variant.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Input-side deserialization for enums parsed with `FromStr`.
macro_rules! try_from_string {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = BmtError;

                fn try_from(s: String) -> Result<Self, Self::Error> {
                    s.parse()
                }
            }
        )*
    };
}

try_from_string!(Progression, Role, Organization, Barrier);

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

/// A workflow step. Ordering lives in [`crate::progression`]; `Ord` is
/// implemented there on top of the canonical sequence.
///
/// Serialized as the GraphQL name (`FOLLOW_UP`). Deserialization goes through
/// `FromStr`, so snapshots accept the same spellings as the CLI and an unknown
/// step fails with [`BmtError::InvalidProgression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Progression {
    Nomination,
    Preparation,
    Alignment,
    Workshop,
    FollowUp,
    Finished,
}

impl Progression {
    pub fn as_str(self) -> &'static str {
        match self {
            Progression::Nomination => "nomination",
            Progression::Preparation => "preparation",
            Progression::Alignment => "alignment",
            Progression::Workshop => "workshop",
            Progression::FollowUp => "follow_up",
            Progression::Finished => "finished",
        }
    }

    /// Human-facing step name used by the stepper and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Progression::Nomination => "Nomination",
            Progression::Preparation => "Preparation",
            Progression::Alignment => "Alignment",
            Progression::Workshop => "Workshop",
            Progression::FollowUp => "Follow-up",
            Progression::Finished => "Finished",
        }
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Progression {
    type Err = BmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "nomination" => Ok(Progression::Nomination),
            "preparation" => Ok(Progression::Preparation),
            "alignment" => Ok(Progression::Alignment),
            "workshop" => Ok(Progression::Workshop),
            "followup" => Ok(Progression::FollowUp),
            "finished" => Ok(Progression::Finished),
            _ => Err(BmtError::InvalidProgression(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProgressionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionStatus {
    Completed,
    Current,
    NotStarted,
}

impl fmt::Display for ProgressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProgressionStatus::Completed => "completed",
            ProgressionStatus::Current => "current",
            ProgressionStatus::NotStarted => "not started",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// EvaluationStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStatus {
    #[default]
    Active,
    Voided,
}

impl EvaluationStatus {
    /// The status the "hide from list" / "make visible" toggle moves to.
    pub fn toggled(self) -> EvaluationStatus {
        match self {
            EvaluationStatus::Active => EvaluationStatus::Voided,
            EvaluationStatus::Voided => EvaluationStatus::Active,
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationStatus::Active => f.write_str("active"),
            EvaluationStatus::Voided => f.write_str("voided"),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Role {
    Facilitator,
    Admin,
    OrganizationLead,
    Participant,
    ReadOnly,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Facilitator => "facilitator",
            Role::Admin => "admin",
            Role::OrganizationLead => "organization_lead",
            Role::Participant => "participant",
            Role::ReadOnly => "read_only",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = BmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "facilitator" => Ok(Role::Facilitator),
            "admin" => Ok(Role::Admin),
            "organizationlead" => Ok(Role::OrganizationLead),
            "participant" => Ok(Role::Participant),
            "readonly" => Ok(Role::ReadOnly),
            _ => Err(BmtError::InvalidRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Organization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Organization {
    All,
    Commissioning,
    Construction,
    Engineering,
    PreOps,
}

impl Organization {
    pub fn as_str(self) -> &'static str {
        match self {
            Organization::All => "all",
            Organization::Commissioning => "commissioning",
            Organization::Construction => "construction",
            Organization::Engineering => "engineering",
            Organization::PreOps => "pre_ops",
        }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Organization {
    type Err = BmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "all" => Ok(Organization::All),
            "commissioning" => Ok(Organization::Commissioning),
            "construction" => Ok(Organization::Construction),
            "engineering" => Ok(Organization::Engineering),
            "preops" => Ok(Organization::PreOps),
            _ => Err(BmtError::InvalidOrganization(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort weight; higher is more urgent.
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Limited,
    None,
    Na,
}

impl Severity {
    /// How bad the answer is for the bowtie; `High` ranks worst.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Limited => 2,
            Severity::None => 1,
            Severity::Na => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::High => "high",
            Severity::Limited => "limited",
            Severity::None => "none",
            Severity::Na => "n/a",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Barrier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Barrier {
    Gm,
    Ps1,
    Ps2,
    Ps3,
    Ps4,
    Ps6,
    Ps7,
    Ps12,
    Ps15,
    Ps22,
}

impl Barrier {
    pub fn all() -> &'static [Barrier] {
        &[
            Barrier::Gm,
            Barrier::Ps1,
            Barrier::Ps2,
            Barrier::Ps3,
            Barrier::Ps4,
            Barrier::Ps6,
            Barrier::Ps7,
            Barrier::Ps12,
            Barrier::Ps15,
            Barrier::Ps22,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Barrier::Gm => "GM",
            Barrier::Ps1 => "PS1",
            Barrier::Ps2 => "PS2",
            Barrier::Ps3 => "PS3",
            Barrier::Ps4 => "PS4",
            Barrier::Ps6 => "PS6",
            Barrier::Ps7 => "PS7",
            Barrier::Ps12 => "PS12",
            Barrier::Ps15 => "PS15",
            Barrier::Ps22 => "PS22",
        }
    }
}

impl fmt::Display for Barrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Barrier {
    type Err = BmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Barrier::all()
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BmtError::InvalidBarrier(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
