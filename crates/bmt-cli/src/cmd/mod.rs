pub mod access;
pub mod actions;
pub mod bowtie;
pub mod config;
pub mod dashboard;
pub mod gate;
pub mod steps;

use crate::config::Config;
use crate::snapshot::Snapshot;
use bmt_core::{Evaluation, Participant};
use chrono::{DateTime, Utc};

/// Everything a data command needs: the records, the acting user and the
/// evaluation time.
pub struct Session {
    pub snapshot: Snapshot,
    pub config: Config,
    pub viewer: Option<String>,
    pub now: DateTime<Utc>,
}

impl Session {
    pub fn evaluation(&self, id: &str) -> anyhow::Result<&Evaluation> {
        self.snapshot.evaluation(id)
    }

    pub fn is_admin(&self) -> bool {
        self.viewer
            .as_deref()
            .is_some_and(|id| self.config.is_admin(id))
    }

    pub fn is_platform_facilitator(&self) -> bool {
        self.viewer
            .as_deref()
            .is_some_and(|id| self.config.is_facilitator(id))
    }

    /// The acting user's participant record in `evaluation`.
    pub fn participant<'a>(&self, evaluation: &'a Evaluation) -> Option<&'a Participant> {
        let viewer = self.viewer.as_deref()?;
        let found = evaluation.participant_for(viewer);
        if found.is_none() {
            tracing::debug!(viewer, evaluation = %evaluation.id, "viewer is not a participant");
        }
        found
    }
}
