use super::Session;
use crate::output::{or_dash, print_json, print_table, yes_no};
use bmt_core::policy::{
    can_hide_evaluation, can_remove_participant, capabilities, platform_capabilities, Capability,
};

pub fn run(session: &Session, evaluation_id: &str, json: bool) -> anyhow::Result<()> {
    let ev = session.evaluation(evaluation_id)?;
    let participant = session.participant(ev);
    let is_admin = session.is_admin();
    let is_facilitator = session.is_platform_facilitator();
    let granted = capabilities(participant, is_admin).union(platform_capabilities(is_facilitator));

    let removable: Vec<&str> = ev
        .participants
        .iter()
        .filter(|target| can_remove_participant(participant, target, is_admin))
        .map(|target| target.azure_unique_id.as_str())
        .collect();
    let toggle_to = can_hide_evaluation(participant, is_admin).then(|| ev.status.toggled());

    if json {
        return print_json(&serde_json::json!({
            "evaluation": ev.id,
            "viewer": session.viewer,
            "is_admin": is_admin,
            "is_platform_facilitator": is_facilitator,
            "role": participant.map(|p| p.role),
            "organization": participant.map(|p| p.organization),
            "capabilities": granted,
            "removable_participants": removable,
            "visibility_toggle": toggle_to,
        }));
    }

    println!("Evaluation:  {} ({})", ev.name, ev.id);
    println!("Viewer:      {}", or_dash(session.viewer.as_deref()));
    println!("Role:        {}", or_dash(participant.map(|p| p.role)));
    println!("Admin:       {}", yes_no(is_admin));
    println!("Facilitator: {}", yes_no(is_facilitator));
    if let Some(status) = toggle_to {
        println!("Visibility:  {} -> {}", ev.status, status);
    }
    println!();

    let rows: Vec<Vec<String>> = Capability::all()
        .iter()
        .map(|c| vec![c.to_string(), yes_no(granted.contains(*c)).to_string()])
        .collect();
    print_table(&["CAPABILITY", "GRANTED"], rows);

    if !removable.is_empty() {
        println!();
        println!("May remove:  {}", removable.join(", "));
    }
    Ok(())
}
