use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

use super::{runtime, TrackSource};
use crate::config::Config;
use crate::tags::LanguageTable;
use crate::tracks::extract_tracks;

/// Run the tracks command - show technical facts of one file
pub fn run(config: &Config, file: &Path, mediainfo: Option<&Path>, json: bool) -> Result<()> {
    let source = TrackSource::choose(file, mediainfo, false);
    let tree = match source {
        TrackSource::Dump(_) => source.preload()?,
        TrackSource::Probe(_) => runtime()?.block_on(source.probe()),
        TrackSource::None => bail!("File not found: {}", file.display()),
    };

    let languages = LanguageTable::with_extra(&config.languages);
    let facts = extract_tracks(tree.as_ref(), &languages);

    if json {
        let json = serde_json::to_string_pretty(&facts).context("Failed to serialize tracks")?;
        println!("{}", json);
        return Ok(());
    }

    let none: &[&str] = &[];
    println!("{} {}", "Resolution:".cyan(), facts.resolution);
    println!(
        "{} {}",
        "Audio:     ".cyan(),
        languages.merge_tracks(&facts.audio_languages, none)
    );
    println!(
        "{} {}",
        "Subtitles: ".cyan(),
        languages.merge_tracks(&facts.subtitle_languages, none)
    );

    Ok(())
}
