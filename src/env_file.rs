use crate::flags::FlagList;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment file sourced by the agent's startup unit
pub const DEFAULT_FLAGS_FILE_PATH: &str = "/etc/byoh-agent/byoh-agent-flags.env";

/// Name of the variable the agent startup expands into its command line
pub const FLAGS_VARIABLE: &str = "BYOH_AGENT_FLAGS";

/// Render the flags as a single `BYOH_AGENT_FLAGS="..."` assignment (no trailing newline)
pub fn render(flags: &FlagList) -> String {
    format!("{}=\"{}\"", FLAGS_VARIABLE, flags.tokens().join(" "))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replace `path` with `contents` so readers only ever see a complete file.
///
/// The parent directory is created if needed. Data goes to `<path>.tmp` in
/// the same directory first and is then renamed over `path`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        debug!("Ensuring directory exists: {}", dir.display());
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let tmp = temp_path(path);
    debug!("Writing temporary file: {}", tmp.display());

    if let Err(err) = write_and_rename(&tmp, path, contents) {
        if tmp.exists() {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
        }
        return Err(err);
    }

    info!("Wrote {}", path.display());
    Ok(())
}

fn write_and_rename(tmp: &Path, path: &Path, contents: &str) -> Result<()> {
    let mut file = fs::File::create(tmp)
        .with_context(|| format!("Failed to create file: {}", tmp.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync file: {}", tmp.display()))?;

    fs::rename(tmp, path).with_context(|| {
        format!("Failed to rename {} to {}", tmp.display(), path.display())
    })
}
