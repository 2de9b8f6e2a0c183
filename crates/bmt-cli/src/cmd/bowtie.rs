use super::Session;
use crate::output::{or_dash, print_json, print_table};
use bmt_core::barrier::{assign, bowtie_visible, snapshot_step};
use bmt_core::Progression;

pub fn run(
    session: &Session,
    evaluation_id: &str,
    step: Option<Progression>,
    json: bool,
) -> anyhow::Result<()> {
    let ev = session.evaluation(evaluation_id)?;
    let step = step.unwrap_or(ev.progression);
    if !bowtie_visible(ev.progression) {
        tracing::warn!(
            evaluation = %ev.id,
            progression = %ev.progression,
            "bowtie is not shown before the workshop"
        );
    }

    let assigned = assign(&ev.questions, step);
    let snapshot = snapshot_step(step);

    if json {
        let entries: Vec<_> = assigned
            .values()
            .map(|entry| {
                serde_json::json!({
                    "barrier": entry.barrier,
                    "question_id": entry.question.id,
                    "answer_id": entry.answer.map(|a| a.id.as_str()),
                    "severity": entry.severity(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "evaluation": ev.id,
            "step": step,
            "snapshot": snapshot,
            "barriers": entries,
        }));
    }

    println!("Evaluation:  {} ({})", ev.name, ev.id);
    println!("Snapshot:    {}", snapshot.label());
    println!();
    let rows: Vec<Vec<String>> = assigned
        .values()
        .map(|entry| {
            vec![
                entry.barrier.to_string(),
                entry.question.order.to_string(),
                entry.question.id.clone(),
                or_dash(entry.severity()),
            ]
        })
        .collect();
    print_table(&["BARRIER", "ORDER", "QUESTION", "SEVERITY"], rows);
    Ok(())
}
