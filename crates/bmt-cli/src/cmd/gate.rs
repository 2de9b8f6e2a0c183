use super::Session;
use crate::output::print_json;
use bmt_core::gate::{decide, decide_from_view, decide_participant, readiness, GateDecision};
use bmt_core::Progression;

fn describe(decision: &GateDecision) -> String {
    match (decision.allowed, decision.to, decision.reason) {
        (true, Some(to), _) => format!("allowed ({} -> {})", decision.from, to),
        (_, _, Some(reason)) => format!("denied: {reason}"),
        _ => "denied".to_string(),
    }
}

pub fn run(
    session: &Session,
    evaluation_id: &str,
    view: Option<Progression>,
    json: bool,
) -> anyhow::Result<()> {
    let ev = session.evaluation(evaluation_id)?;
    let participant = session.participant(ev);
    let is_admin = session.is_admin();

    let decision = match view {
        Some(step) => decide_from_view(ev, participant, is_admin, step),
        None => decide(ev, participant, is_admin),
    };
    let own = decide_participant(ev, participant);
    let ready = readiness(ev);

    if let Some(reason) = decision.reason {
        tracing::info!(evaluation = %ev.id, viewer = ?session.viewer, %reason, "advance denied");
    }

    if json {
        return print_json(&serde_json::json!({
            "evaluation": ev.id,
            "viewer": session.viewer,
            "is_admin": is_admin,
            "decision": decision,
            "participant_decision": own,
            "readiness": ready,
        }));
    }

    println!("Evaluation:  {} ({})", ev.name, ev.id);
    println!("Step:        {}", ev.progression.label());
    println!("Advance:     {}", describe(&decision));
    println!("Own step:    {}", describe(&own));
    println!(
        "Readiness:   {}/{} participants past {}{}",
        ready.ready,
        ready.total,
        ev.progression.label(),
        if ready.all_ready() { " (all ready)" } else { "" }
    );
    Ok(())
}
