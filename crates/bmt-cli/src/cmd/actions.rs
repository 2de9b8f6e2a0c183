use super::Session;
use crate::output::{format_date, or_dash, print_json, print_table, yes_no};
use bmt_core::action::{aggregate, ActionState};
use bmt_core::policy::can_edit_actions;

const BUCKETS: [ActionState; 3] = [ActionState::Overdue, ActionState::Open, ActionState::Closed];

pub fn run(session: &Session, evaluation_id: &str, json: bool) -> anyhow::Result<()> {
    let ev = session.evaluation(evaluation_id)?;
    let by_state = aggregate(ev, session.now);
    let counts = by_state.counts();
    let editable = can_edit_actions(session.participant(ev), session.is_admin());

    if json {
        return print_json(&serde_json::json!({
            "evaluation": ev.id,
            "now": session.now,
            "counts": counts,
            "editable": editable,
            "overdue": by_state.overdue,
            "open": by_state.open,
            "closed": by_state.closed,
        }));
    }

    println!("Evaluation:  {} ({})", ev.name, ev.id);
    println!(
        "Actions:     {} overdue, {} open, {} closed",
        counts.overdue, counts.open, counts.closed
    );
    println!("Editable:    {}", yes_no(editable));
    println!();

    let rows: Vec<Vec<String>> = BUCKETS
        .iter()
        .flat_map(|state| {
            by_state.bucket(*state).iter().map(move |a| {
                vec![
                    state.to_string(),
                    a.priority.to_string(),
                    a.title.clone(),
                    or_dash(a.due_date.map(format_date)),
                    or_dash(a.assigned_to.as_deref()),
                    format_date(a.create_date),
                ]
            })
        })
        .collect();
    print_table(
        &["STATE", "PRIORITY", "TITLE", "DUE", "ASSIGNED", "CREATED"],
        rows,
    );
    Ok(())
}
