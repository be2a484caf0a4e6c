use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tasker_core::TaskOrganizer;

/// Resolve the persisted-store location once at startup: `TASKS_PATH`
/// wins, otherwise `~/.tasker/tasks.json` with the directory created on
/// demand.
pub fn tasks_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("TASKS_PATH") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let home = std::env::var("HOME").context("HOME is not set")?;
    let dir = PathBuf::from(home).join(".tasker");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.join("tasks.json"))
}

/// Load the store from `path`. A missing or empty file yields an empty
/// store; that is the normal first run, not an error.
pub fn load_tasks(path: &Path) -> Result<TaskOrganizer> {
    let mut organizer = TaskOrganizer::new();

    if !path.exists() {
        return Ok(organizer);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if data.trim().is_empty() {
        return Ok(organizer);
    }

    organizer.loads(&data)?;
    Ok(organizer)
}

/// Write the whole store back. Last writer wins; concurrent invocations
/// are not coordinated.
pub fn save_tasks(path: &Path, organizer: &TaskOrganizer) -> Result<()> {
    fs::write(path, organizer.dumps()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
