use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".bmt";
pub const CONFIG_FILE: &str = "config.yaml";

/// Resolve the configuration file.
///
/// Priority:
/// 1. `--config` flag / `BMT_CONFIG` env var (passed in as `explicit`)
/// 2. Walk upward from the working directory looking for `.bmt/config.yaml`
/// 3. None, meaning built-in defaults
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let cwd = std::env::current_dir().ok()?;
    find_upward(&cwd)
}

pub fn find_upward(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join(CONFIG_DIR).join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}
