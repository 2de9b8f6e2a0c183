//! The evaluation snapshot the CLI reads its records from.

use anyhow::{anyhow, Context};
use bmt_core::Evaluation;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

impl Snapshot {
    /// JSON unless the extension is `.yaml`/`.yml`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot: Snapshot = if is_yaml(path) {
            serde_yaml::from_str(&data)
                .with_context(|| format!("invalid YAML snapshot {}", path.display()))?
        } else {
            serde_json::from_str(&data)
                .with_context(|| format!("invalid JSON snapshot {}", path.display()))?
        };
        Ok(snapshot)
    }

    pub fn evaluation(&self, id: &str) -> anyhow::Result<&Evaluation> {
        self.evaluations
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| anyhow!("evaluation '{id}' not found"))
    }
}
