mod cmd;
mod config;
mod locate;
mod output;
mod snapshot;

use anyhow::Context;
use bmt_core::dashboard::SortColumn;
use bmt_core::sort::SortDirection;
use bmt_core::Progression;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use cmd::dashboard::DashboardOptions;
use cmd::Session;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "bmt",
    about = "Barrier management workshop evaluations: step progression, actions and bowtie status",
    version,
    propagate_version = true
)]
struct Cli {
    /// Evaluation snapshot, JSON or YAML, with a top-level `evaluations` list
    #[arg(long, global = true, env = "BMT_DATA", value_name = "FILE")]
    data: Option<PathBuf>,

    /// Config file (default: nearest .bmt/config.yaml)
    #[arg(long, global = true, env = "BMT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// azureUniqueId of the acting user
    #[arg(long = "as", global = true, env = "BMT_USER", value_name = "AZURE_ID")]
    viewer: Option<String>,

    /// Evaluation time, RFC 3339 (default: now)
    #[arg(long, global = true, value_name = "RFC3339", value_parser = parse_time)]
    now: Option<DateTime<Utc>>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Data(DataCommand),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Commands that read the evaluation snapshot.
#[derive(Subcommand)]
enum DataCommand {
    /// List evaluations with workflow, action and bowtie summaries
    Dashboard {
        /// Sort column: name, workflow, overdue, open, closed, created
        #[arg(long)]
        sort: Option<SortColumn>,
        /// Sort direction: asc or desc (default: from config, else asc)
        #[arg(long)]
        direction: Option<SortDirection>,
        /// Include voided evaluations
        #[arg(long)]
        include_hidden: bool,
        /// Group by portfolio and project
        #[arg(long)]
        grouped: bool,
    },

    /// Per-step status of an evaluation and its participants
    Steps {
        evaluation: String,
    },

    /// Follow-up actions bucketed into overdue, open and closed
    Actions {
        evaluation: String,
    },

    /// Barrier answers for a step (default: the evaluation's step)
    Bowtie {
        evaluation: String,
        #[arg(long)]
        step: Option<Progression>,
    },

    /// Whether the acting user may advance the evaluation
    Gate {
        evaluation: String,
        /// Step whose "finish" control is being viewed
        #[arg(long)]
        view: Option<Progression>,
    },

    /// Capabilities of the acting user in an evaluation
    Access {
        evaluation: String,
    },
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time '{s}': {e}"))
}

fn open_session(
    data: Option<&Path>,
    config: config::Config,
    viewer: Option<String>,
    now: Option<DateTime<Utc>>,
) -> anyhow::Result<Session> {
    let path = data.context("no snapshot given: pass --data or set BMT_DATA")?;
    tracing::debug!(path = %path.display(), "loading snapshot");
    let snapshot = snapshot::Snapshot::load(path)?;
    Ok(Session {
        snapshot,
        config,
        viewer,
        now: now.unwrap_or_else(Utc::now),
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        data,
        config: config_flag,
        viewer,
        now,
        json,
        command,
    } = cli;

    let config_path = locate::resolve_config(config_flag.as_deref());
    if let Some(p) = &config_path {
        tracing::debug!(path = %p.display(), "loading config");
    }
    let config = config::Config::load_or_default(config_path.as_deref())?;

    match command {
        Commands::Config { subcommand } => {
            cmd::config::run(&config, config_path.as_deref(), subcommand, json)
        }
        Commands::Data(command) => {
            let session = open_session(data.as_deref(), config, viewer, now)?;
            dispatch(&session, command, json)
        }
    }
}

fn dispatch(session: &Session, command: DataCommand, json: bool) -> anyhow::Result<()> {
    match command {
        DataCommand::Dashboard {
            sort,
            direction,
            include_hidden,
            grouped,
        } => cmd::dashboard::run(
            session,
            DashboardOptions {
                sort,
                direction,
                include_hidden,
                grouped,
            },
            json,
        ),
        DataCommand::Steps { evaluation } => cmd::steps::run(session, &evaluation, json),
        DataCommand::Actions { evaluation } => cmd::actions::run(session, &evaluation, json),
        DataCommand::Bowtie { evaluation, step } => {
            cmd::bowtie::run(session, &evaluation, step, json)
        }
        DataCommand::Gate { evaluation, view } => cmd::gate::run(session, &evaluation, view, json),
        DataCommand::Access { evaluation } => cmd::access::run(session, &evaluation, json),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
