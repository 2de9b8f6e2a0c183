use crate::config::{Config, WarnLevel};
use crate::output::print_json;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Check the configuration for problems
    Validate,
    /// Print the effective configuration
    Show,
}

pub fn run(
    config: &Config,
    source: Option<&Path>,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Validate => validate(config, source, json),
        ConfigSubcommand::Show => show(config, json),
    }
}

fn validate(config: &Config, source: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();
    for w in &warnings {
        tracing::warn!(level = ?w.level, "{}", w.message);
    }

    if json {
        return print_json(&serde_json::json!({
            "source": source.map(|p| p.display().to_string()),
            "warnings": warnings,
        }));
    }

    match source {
        Some(p) => println!("Config:  {}", p.display()),
        None => println!("Config:  (defaults)"),
    }
    if warnings.is_empty() {
        println!("ok");
        return Ok(());
    }
    for w in &warnings {
        let tag = match w.level {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        };
        println!("{tag}: {}", w.message);
    }
    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("configuration has errors");
    }
    Ok(())
}

fn show(config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(config);
    }
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
