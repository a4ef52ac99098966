use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

use crate::config::{Config, TmdbConfig};

/// Run the init command - interactively create a config file
pub fn run(config_override: Option<&Path>, force: bool) -> Result<()> {
    let config_path = match config_override {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };

    // Check if config already exists
    if config_path.exists() && !force {
        eprintln!(
            "{}: Config already exists at {}",
            "Error".red().bold(),
            config_path.display()
        );
        eprintln!();
        eprintln!("Use {} to overwrite.", "--force".cyan());
        bail!("Config file already exists");
    }

    println!("{}", "releasepost configuration".bold());
    println!();
    println!(
        "This will create a config file at: {}",
        config_path.display().to_string().cyan()
    );
    println!();

    let defaults = TmdbConfig::default();

    println!("{}", "Step 1: API keys".bold());
    println!();
    println!("Leave a key empty to read it from the environment instead");
    println!(
        "({} / {}).",
        "TMDB_API_KEY".cyan(),
        "GEMINI_API_KEY".cyan()
    );
    println!();
    let tmdb_key = prompt("TMDb API key", "")?;
    let gemini_key = prompt("Gemini API key", "")?;
    println!();

    println!("{}", "Step 2: Catalog languages".bold());
    println!();
    println!("Titles are searched in the primary language first, then the secondary one.");
    println!();
    let primary = prompt("Primary language", &defaults.primary_language)?;
    let secondary = prompt("Secondary language", &defaults.secondary_language)?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let config_content = render_config(&tmdb_key, &gemini_key, &primary, &secondary);

    // Refuse to write something the loader would reject
    toml::from_str::<Config>(&config_content).context("Generated config is invalid")?;

    std::fs::write(&config_path, &config_content)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!();
    println!(
        "{} Config written to {}",
        "✓".green(),
        config_path.display()
    );
    println!();
    println!("You can now use:");
    println!(
        "  {} - build a post for one file",
        "releasepost post <file> --caption <text>".cyan()
    );
    println!(
        "  {} - list placeholders for custom templates",
        "releasepost fields".cyan()
    );

    Ok(())
}

fn prompt(label: &str, default: &str) -> Result<String> {
    if default.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, default.green());
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(if input.is_empty() {
        default.to_string()
    } else {
        input.to_string()
    })
}

/// Quoted TOML string
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// Key line, commented out when the value is empty
fn key_line(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("# {} = \"\"", key)
    } else {
        format!("{} = {}", key, quoted(value))
    }
}

fn render_config(tmdb_key: &str, gemini_key: &str, primary: &str, secondary: &str) -> String {
    format!(
        r#"# releasepost configuration
# See 'releasepost fields' for available template placeholders

[tmdb]
{}
primary_language = {}
secondary_language = {}

[oracle]
{}

[matching]
threshold = 0.75

[post]
default_quality = "WEB-DL"
# movie_template = "/path/to/movie.html"
# season_template = "/path/to/season.html"
# episode_template = "/path/to/episode.html"

[languages]
# "castellano" = "esp"
"#,
        key_line("api_key", tmdb_key),
        quoted(primary),
        quoted(secondary),
        key_line("api_key", gemini_key),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_config_round_trips() {
        let content = render_config("tmdb-\"key\"", "", "es-MX", "en-US");
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.tmdb.api_key.as_deref(), Some("tmdb-\"key\""));
        assert!(config.oracle.api_key.is_none());
        assert_eq!(config.tmdb.primary_language, "es-MX");
        assert_eq!(config.threshold(), 0.75);
    }
}
