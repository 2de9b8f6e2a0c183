use super::Session;
use crate::output::{format_date, print_json, print_table};
use bmt_core::dashboard::{
    group_by_portfolio, sort_summaries, summarize, EvaluationSummary, SortColumn,
};
use bmt_core::sort::SortDirection;
use bmt_core::ProgressionStatus;

pub struct DashboardOptions {
    pub sort: Option<SortColumn>,
    pub direction: Option<SortDirection>,
    pub include_hidden: bool,
    pub grouped: bool,
}

fn workflow_cell(summary: &EvaluationSummary) -> String {
    let glyphs: String = summary
        .steps
        .iter()
        .map(|s| match s.status {
            ProgressionStatus::Completed => '●',
            ProgressionStatus::Current => '◐',
            ProgressionStatus::NotStarted => '○',
        })
        .collect();
    format!("{glyphs} {}/{}", summary.completed_steps, summary.tracked_steps)
}

fn bowtie_cell(summary: &EvaluationSummary) -> String {
    if summary.bowtie.is_empty() {
        return "-".to_string();
    }
    summary
        .bowtie
        .iter()
        .map(|c| match c.severity {
            Some(s) => format!("{}:{}", c.barrier, s),
            None => format!("{}:?", c.barrier),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn rows(summaries: &[EvaluationSummary]) -> Vec<Vec<String>> {
    summaries
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                s.progression.to_string(),
                workflow_cell(s),
                s.actions.overdue.to_string(),
                s.actions.open.to_string(),
                s.actions.closed.to_string(),
                format_date(s.create_date),
                if s.is_indicator { "*" } else { "" }.to_string(),
                if s.is_hidden() { "hidden" } else { "" }.to_string(),
                bowtie_cell(s),
            ]
        })
        .collect()
}

const HEADERS: &[&str] = &[
    "ID", "NAME", "STEP", "WORKFLOW", "OVERDUE", "OPEN", "CLOSED", "CREATED", "IND", "STATUS",
    "BOWTIE",
];

/// An explicit `--direction` wins over the configured default.
fn resolve_direction(flag: Option<SortDirection>, descending: bool) -> SortDirection {
    flag.unwrap_or(if descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    })
}

pub fn run(session: &Session, opts: DashboardOptions, json: bool) -> anyhow::Result<()> {
    let defaults = &session.config.dashboard;
    let column = opts.sort.unwrap_or(defaults.default_sort);
    let direction = resolve_direction(opts.direction, defaults.descending);
    let include_hidden = opts.include_hidden || defaults.include_hidden;

    let mut summaries = summarize(&session.snapshot.evaluations, session.now, include_hidden);
    sort_summaries(&mut summaries, column, direction);
    tracing::debug!(rows = summaries.len(), %column, %direction, include_hidden, "dashboard");

    if opts.grouped {
        let groups = group_by_portfolio(summaries);
        if json {
            return print_json(&groups);
        }
        for group in &groups {
            println!("== {} ==", group.portfolio);
            for project in &group.projects {
                println!("-- {} --", project.title);
                print_table(HEADERS, rows(&project.evaluations));
            }
            println!();
        }
        return Ok(());
    }

    if json {
        return print_json(&summaries);
    }
    print_table(HEADERS, rows(&summaries));
    Ok(())
}
