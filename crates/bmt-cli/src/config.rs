use anyhow::Context;
use bmt_core::dashboard::SortColumn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default)]
    pub default_sort: SortColumn,
    #[serde(default)]
    pub descending: bool,
    /// Show voided evaluations alongside active ones.
    #[serde(default)]
    pub include_hidden: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// azureUniqueIds that carry the platform admin flag.
    #[serde(default)]
    pub admins: Vec<String>,
    /// azureUniqueIds that hold the platform facilitator role and may create
    /// evaluations.
    #[serde(default)]
    pub facilitators: Vec<String>,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Config = serde_yaml::from_str(&data)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    /// Defaults when no config file was located.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn is_admin(&self, azure_unique_id: &str) -> bool {
        self.admins.iter().any(|a| a == azure_unique_id)
    }

    pub fn is_facilitator(&self, azure_unique_id: &str) -> bool {
        self.facilitators.iter().any(|f| f == azure_unique_id)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        check_ids("admins", "admin", &self.admins, &mut warnings);
        check_ids("facilitators", "facilitator", &self.facilitators, &mut warnings);
        warnings
    }
}

/// Empty ids are errors, repeated ids are warnings.
fn check_ids(key: &str, noun: &str, ids: &[String], warnings: &mut Vec<ConfigWarning>) {
    let mut seen = HashSet::new();
    for (i, id) in ids.iter().enumerate() {
        if id.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("{key}[{i}] is empty"),
            });
            continue;
        }
        if !seen.insert(id.as_str()) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("{noun} '{id}' is listed more than once"),
            });
        }
    }
}
