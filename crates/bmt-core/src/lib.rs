//! Evaluation progression and derived-status engine for barrier management
//! workshops.
//!
//! Everything here is a pure function over records supplied by the caller.
//! No module performs I/O or reads the clock; the evaluation time and the
//! platform admin flag are always explicit parameters.

pub mod action;
pub mod barrier;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod model;
pub mod policy;
pub mod progression;
pub mod sort;
pub mod types;


pub use error::{BmtError, Result};
pub use model::{Action, Answer, Evaluation, Participant, Project, Question};
pub use types::{Barrier, EvaluationStatus, Organization, Priority, Progression, ProgressionStatus, Role, Severity};
