use super::Session;
use crate::output::{print_json, print_table};
use bmt_core::progression::{count_by_status, statuses, tracked_steps};
use bmt_core::ProgressionStatus;

pub fn run(session: &Session, evaluation_id: &str, json: bool) -> anyhow::Result<()> {
    let ev = session.evaluation(evaluation_id)?;
    let total = tracked_steps().len();

    if json {
        let participants: Vec<_> = ev
            .participants
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "azure_unique_id": p.azure_unique_id,
                    "role": p.role,
                    "organization": p.organization,
                    "progression": p.progression,
                    "completed_steps": count_by_status(ProgressionStatus::Completed, p.progression),
                    "steps": statuses(p.progression),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "evaluation": {
                "id": ev.id,
                "name": ev.name,
                "progression": ev.progression,
                "completed_steps": count_by_status(ProgressionStatus::Completed, ev.progression),
                "tracked_steps": total,
                "steps": statuses(ev.progression),
            },
            "participants": participants,
        }));
    }

    println!("Evaluation:  {} ({})", ev.name, ev.id);
    println!("Step:        {}", ev.progression.label());
    println!(
        "Completed:   {}/{}",
        count_by_status(ProgressionStatus::Completed, ev.progression),
        total
    );
    println!();
    let step_rows: Vec<Vec<String>> = statuses(ev.progression)
        .into_iter()
        .map(|s| vec![s.step.label().to_string(), s.status.to_string()])
        .collect();
    print_table(&["STEP", "STATUS"], step_rows);

    println!();
    let participant_rows: Vec<Vec<String>> = ev
        .participants
        .iter()
        .map(|p| {
            vec![
                p.azure_unique_id.clone(),
                p.role.to_string(),
                p.organization.to_string(),
                p.progression.to_string(),
                format!(
                    "{}/{}",
                    count_by_status(ProgressionStatus::Completed, p.progression),
                    total
                ),
            ]
        })
        .collect();
    print_table(
        &["PARTICIPANT", "ROLE", "ORGANIZATION", "STEP", "DONE"],
        participant_rows,
    );
    Ok(())
}
