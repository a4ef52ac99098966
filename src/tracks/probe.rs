//! Local container inspection through the `mediainfo` tool
//!
//! Only the head of the file is inspected: MediaInfo reads the container
//! headers from the first chunk, which keeps probing cheap for large files.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{parse_tree, MediaInfoTree};

/// Bytes copied from the start of the file before probing
pub const CHUNK_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const MEDIAINFO_BIN: &str = "mediainfo";

/// Probe a local file, returning `None` when no technical data can be
/// obtained (tool missing, unreadable file, unparseable output).
pub async fn probe_file(path: PathBuf) -> Option<MediaInfoTree> {
    let shown = path.display().to_string();

    match tokio::task::spawn_blocking(move || probe_blocking(&path)).await {
        Ok(Ok(tree)) => {
            debug!(file = %shown, tracks = tree.tracks().len(), "mediainfo probe complete");
            Some(tree)
        }
        Ok(Err(e)) => {
            warn!(file = %shown, error = %format!("{:#}", e), "mediainfo probe failed, continuing without technical data");
            None
        }
        Err(e) => {
            warn!(file = %shown, error = %e, "mediainfo probe task aborted");
            None
        }
    }
}

fn probe_blocking(path: &Path) -> Result<MediaInfoTree> {
    let chunk = copy_head(path, CHUNK_SIZE_BYTES)?;

    let output = Command::new(MEDIAINFO_BIN)
        .arg("--Output=JSON")
        .arg(chunk.path())
        .output()
        .with_context(|| format!("Failed to run {}", MEDIAINFO_BIN))?;

    if !output.status.success() {
        bail!(
            "{} exited with {}: {}",
            MEDIAINFO_BIN,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    parse_tree(&output.stdout)
}

/// Copy at most `limit` bytes of `path` into a temp file that keeps the
/// original extension (MediaInfo uses it as a format hint).
fn copy_head(path: &Path, limit: u64) -> Result<NamedTempFile> {
    let source = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut chunk = tempfile::Builder::new()
        .prefix("releasepost-")
        .suffix(&suffix)
        .tempfile()
        .context("Failed to create temp file for probing")?;

    io::copy(&mut source.take(limit), chunk.as_file_mut())
        .with_context(|| format!("Failed to copy head of {}", path.display()))?;

    Ok(chunk)
}
