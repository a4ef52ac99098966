use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use super::{file_name, runtime};
use crate::config::Config;
use crate::identity::{GeminiOracle, IdentityExtractor};

/// Run the identify command - print the oracle's identity guess as JSON
pub fn run(config: &Config, file: &Path, caption: Option<&str>) -> Result<()> {
    let oracle = GeminiOracle::new(&config.oracle)?;
    let extractor = IdentityExtractor::new(Arc::new(oracle));

    let rt = runtime()?;
    let identification = rt.block_on(extractor.extract(&file_name(file), caption))?;

    let json = serde_json::to_string_pretty(&identification)
        .context("Failed to serialize identification")?;
    println!("{}", json);

    Ok(())
}
