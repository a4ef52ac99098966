use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{file_name, runtime, TrackSource};
use crate::config::Config;
use crate::pipeline::{Pipeline, RawInput};

/// Flags of the post command
pub struct PostOptions {
    pub caption: Option<String>,
    pub size: Option<u64>,
    pub mediainfo: Option<PathBuf>,
    pub no_probe: bool,
    pub synopsis_url: Option<String>,
    pub json: bool,
}

/// Run the post command - full pipeline for one file
pub fn run(config: &Config, file: &Path, options: PostOptions) -> Result<()> {
    let source = TrackSource::choose(file, options.mediainfo.as_deref(), options.no_probe);
    let dump = source.preload()?;

    let input = RawInput {
        filename: file_name(file),
        caption: options.caption,
        size_bytes: options.size.or_else(|| size_on_disk(file)),
        synopsis_url: options.synopsis_url,
    };

    let pipeline = Pipeline::from_config(config)?;
    let rt = runtime()?;

    let post = rt.block_on(pipeline.run_with_probe(&input, async {
        match dump {
            Some(tree) => Some(tree),
            None => source.probe().await,
        }
    }))?;

    if options.json {
        let json =
            serde_json::to_string_pretty(&post.record).context("Failed to serialize post")?;
        println!("{}", json);
    } else {
        println!("{}", post.text);
    }

    Ok(())
}

pub(super) fn size_on_disk(path: &Path) -> Option<u64> {
    std::fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.len())
}
