//! Barrier → answer assignment for the bowtie.
//!
//! Each snapshot step is independent: a question without an answer for the
//! requested step is unanswered, even if other steps have answers.

use crate::model::{Answer, Question};
use crate::sort::{self, SortDirection};
use crate::types::{Barrier, Progression, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

/// `Finished` records no answers of its own; its snapshot is `FollowUp`.
pub fn snapshot_step(step: Progression) -> Progression {
    match step {
        Progression::Finished => Progression::FollowUp,
        other => other,
    }
}

/// The bowtie is only meaningful once the workshop has started.
pub fn bowtie_visible(progression: Progression) -> bool {
    progression >= Progression::Workshop
}

/// The answer `question` holds for `step`. With several candidates the most
/// recently created wins; equal timestamps keep the first one listed.
pub fn select_answer(question: &Question, step: Progression) -> Option<&Answer> {
    let target = snapshot_step(step);
    question
        .answers
        .iter()
        .filter(|a| a.progression == target)
        .fold(None, |best: Option<&Answer>, a| match best {
            Some(b) if b.create_date >= a.create_date => Some(b),
            _ => Some(a),
        })
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BarrierAnswer<'a> {
    pub barrier: Barrier,
    pub question: &'a Question,
    pub answer: Option<&'a Answer>,
}

impl BarrierAnswer<'_> {
    pub fn severity(&self) -> Option<Severity> {
        self.answer.map(|a| a.severity)
    }

    /// Unanswered ranks below every answered severity.
    fn weight(&self) -> u8 {
        self.answer.map(|a| a.severity.rank() + 1).unwrap_or(0)
    }
}

/// One entry per barrier that has at least one tagged question.
///
/// When several questions feed the same barrier, the entry reports the most
/// severe selected answer. Ties, including a barrier where nothing is
/// answered, go to the question with the lowest `order`.
pub fn assign(questions: &[Question], step: Progression) -> BTreeMap<Barrier, BarrierAnswer<'_>> {
    let mut tagged: Vec<&Question> = questions.iter().filter(|q| q.barrier.is_some()).collect();
    sort::sort_by_key(&mut tagged, SortDirection::Ascending, |q| q.order);

    let mut out: BTreeMap<Barrier, BarrierAnswer<'_>> = BTreeMap::new();
    for question in tagged {
        let Some(barrier) = question.barrier else {
            continue;
        };
        let candidate = BarrierAnswer {
            barrier,
            question,
            answer: select_answer(question, step),
        };
        match out.get(&barrier) {
            Some(current) if current.weight() >= candidate.weight() => {}
            _ => {
                out.insert(barrier, candidate);
            }
        }
    }
    out
}
