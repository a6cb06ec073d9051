use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and in the home directory
pub const FLOW_DIR_NAME: &str = ".flow";

/// Get the flow directory - checks for local .flow first, then falls back to global ~/.flow
pub fn get_flow_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_flow(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(FLOW_DIR_NAME))
}

/// Find local .flow directory by walking up the directory tree
fn find_local_flow(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let flow_dir = current.join(FLOW_DIR_NAME);
        if flow_dir.is_dir() {
            return Some(flow_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the flow directory exists
pub fn ensure_flow_dir() -> Result<PathBuf> {
    let dir = get_flow_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .flow directory in the current directory
pub fn init_local_flow() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    init_flow_in(&current_dir)
}

fn init_flow_in(parent: &Path) -> Result<PathBuf> {
    let flow_dir = parent.join(FLOW_DIR_NAME);
    if flow_dir.exists() {
        anyhow::bail!("Flow directory already exists: {}", flow_dir.display());
    }
    fs::create_dir_all(&flow_dir)
        .with_context(|| format!("Failed to create directory: {}", flow_dir.display()))?;
    Ok(flow_dir)
}

/// Key-value store file inside a flow directory
pub fn store_file(dir: &Path) -> PathBuf {
    dir.join("store.json")
}

/// Config file inside a flow directory
pub fn config_file(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
