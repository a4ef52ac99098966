pub mod fields;
pub mod identify;
pub mod init;
pub mod post;
pub mod post_all;
pub mod tracks;

use anyhow::{Context, Result};
use std::path::Path;

use crate::tracks::probe::probe_file;
use crate::tracks::{read_tree, MediaInfoTree};

/// Commands are synchronous; async work runs on a per-command runtime
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to create tokio runtime")
}

/// Final path component, or the whole argument when there is none
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Where a command's container data comes from
enum TrackSource<'a> {
    Dump(&'a Path),
    Probe(&'a Path),
    None,
}

impl<'a> TrackSource<'a> {
    /// A MediaInfo dump wins; otherwise probe files that exist locally
    fn choose(file: &'a Path, mediainfo: Option<&'a Path>, no_probe: bool) -> Self {
        match mediainfo {
            Some(dump) => TrackSource::Dump(dump),
            None if !no_probe && file.is_file() => TrackSource::Probe(file),
            None => TrackSource::None,
        }
    }

    /// Read the dump up front; it is a user error when it is unreadable
    fn preload(&self) -> Result<Option<MediaInfoTree>> {
        match self {
            TrackSource::Dump(path) => read_tree(path).map(Some),
            _ => Ok(None),
        }
    }

    async fn probe(&self) -> Option<MediaInfoTree> {
        match self {
            TrackSource::Probe(path) => probe_file(path.to_path_buf()).await,
            _ => None,
        }
    }
}
