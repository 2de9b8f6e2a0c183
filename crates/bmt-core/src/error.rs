use thiserror::Error;

#[derive(Debug, Error)]
pub enum BmtError {
    #[error("invalid progression: {0}")]
    InvalidProgression(String),

    #[error("invalid transition from {from}: {reason}")]
    InvalidTransition { from: String, reason: String },

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid organization: {0}")]
    InvalidOrganization(String),

    #[error("invalid barrier: {0}")]
    InvalidBarrier(String),

    #[error("invalid sort column '{0}': expected name, workflow, overdue, open, closed or created")]
    InvalidSortColumn(String),

    #[error("invalid sort direction '{0}': expected asc or desc")]
    InvalidSortDirection(String),
}

pub type Result<T> = std::result::Result<T, BmtError>;
