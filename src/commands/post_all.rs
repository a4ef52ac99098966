//! Post-all command - run the pipeline for every video under a directory

use anyhow::{bail, Result};
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::post::size_on_disk;
use super::{file_name, runtime, TrackSource};
use crate::config::Config;
use crate::pipeline::{Pipeline, RawInput};

/// Extensions treated as video files
const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "m4v", "avi", "mov", "webm", "wmv", "ts"];

/// Run batch post assembly on a directory
pub fn run(
    config: &Config,
    dir: &Path,
    caption: Option<&str>,
    no_probe: bool,
    quiet: bool,
) -> Result<()> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    println!("Scanning {}...", dir.display());
    let files = scan_videos(dir);

    if files.is_empty() {
        println!("No video files found.");
        return Ok(());
    }

    println!("Found {} video files.", files.len());
    println!();

    let pipeline = Pipeline::from_config(config)?;
    let rt = runtime()?;

    let mut posted = 0;
    let mut failures: BTreeMap<&'static str, usize> = BTreeMap::new();

    for (i, path) in files.iter().enumerate() {
        let filename = file_name(path);
        print!("[{}/{}] {}... ", i + 1, files.len(), filename);
        io::stdout().flush()?;

        let input = RawInput {
            filename,
            caption: caption.map(str::to_string),
            size_bytes: size_on_disk(path),
            synopsis_url: None,
        };
        let source = TrackSource::choose(path, None, no_probe);

        match rt.block_on(pipeline.run_with_probe(&input, source.probe())) {
            Ok(post) => {
                posted += 1;
                println!(
                    "{} {} ({})",
                    "ok".green(),
                    post.record.title,
                    post.variant.as_str()
                );
                if !quiet {
                    println!();
                    println!("{}", post.text);
                    println!();
                }
            }
            Err(e) => {
                *failures.entry(e.kind()).or_default() += 1;
                println!("{}: {}", e.kind().red(), e);
            }
        }
    }

    let failed: usize = failures.values().sum();
    println!();
    println!(
        "{} files: {} posted, {} failed",
        files.len(),
        posted.to_string().green(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().normal()
        }
    );
    for (kind, count) in &failures {
        println!("  {}: {}", kind, count);
    }

    Ok(())
}

/// Recursively collect video files, sorted by path
fn scan_videos(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_video_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}

fn is_video_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
