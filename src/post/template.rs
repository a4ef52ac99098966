use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::config::PostConfig;
use crate::identity::MediaKind;

use super::{PostRecord, PLACEHOLDERS};

pub const MOVIE_TEMPLATE: &str = "\
🎬 <b>{title}</b> ({year})
{hashtags}

📝 <b>Sinopsis:</b> <a href=\"{synopsis_url}\">Leer aquí</a>
⏱ <b>Duración:</b> {runtime}
🎭 <b>Géneros:</b> {genres}
🎬 <b>Dirección:</b> {director}

⚙️ <b>Calidad:</b> {quality} | {resolution}
🔊 <b>Audio:</b> {audio_tracks}
💬 <b>Subtítulos:</b> {subtitle_tracks}
📦 <b>Formato:</b> {format} | <b>Peso:</b> {file_size}";

pub const SEASON_TEMPLATE: &str = "\
📺 <b>{series_title}</b> ({year})
🗂 <b>Temporada {season} completa</b> · {episodes_count} episodios
{hashtags}

📝 <b>Sinopsis:</b> <a href=\"{synopsis_url}\">Leer aquí</a>
🎭 <b>Géneros:</b> {genres}

⚙️ <b>Calidad:</b> {quality} | {resolution}
🔊 <b>Audio:</b> {audio_tracks}
💬 <b>Subtítulos:</b> {subtitle_tracks}
📦 <b>Formato:</b> {format}";

pub const EPISODE_TEMPLATE: &str = "\
📺 <b>{series_title}</b> ({year})
🎞 <b>T{season:02} · E{episode:02}</b> {episode_title}
{hashtags}

📝 <b>Sinopsis:</b> <a href=\"{synopsis_url}\">Leer aquí</a>
⏱ <b>Duración:</b> {runtime}

⚙️ <b>Calidad:</b> {quality} | {resolution}
🔊 <b>Audio:</b> {audio_tracks}
💬 <b>Subtítulos:</b> {subtitle_tracks}
📦 <b>Formato:</b> {format} | <b>Peso:</b> {file_size}";

/// Which of the three post layouts applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    Movie,
    Season,
    Episode,
}

impl TemplateVariant {
    /// Season packs always use the season layout
    pub fn select(kind: MediaKind, season_pack: bool) -> Self {
        if season_pack {
            TemplateVariant::Season
        } else if kind == MediaKind::Movie {
            TemplateVariant::Movie
        } else {
            TemplateVariant::Episode
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateVariant::Movie => "movie",
            TemplateVariant::Season => "season",
            TemplateVariant::Episode => "episode",
        }
    }
}

/// A parsed post template with placeholder segments
#[derive(Debug, Clone)]
pub struct PostTemplate {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder {
        name: String,
        padding: Option<usize>,
    },
}

impl PostTemplate {
    /// Parse a template like "<b>{title}</b> ({year})".
    ///
    /// Fails on unclosed braces and unknown placeholder names, so a parsed
    /// template always renders completely.
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut chars = template.chars();
        let mut literal = String::new();

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }

            let mut placeholder = String::new();
            let mut found_close = false;
            for inner in chars.by_ref() {
                if inner == '}' {
                    found_close = true;
                    break;
                }
                placeholder.push(inner);
            }

            if !found_close {
                bail!("Unclosed placeholder '{{' in template");
            }

            // "season:02" zero-pads to two digits
            let (name, padding) = match placeholder.split_once(':') {
                Some((name, pad)) => (name.trim().to_string(), pad.trim().parse::<usize>().ok()),
                None => (placeholder.trim().to_string(), None),
            };

            if !PLACEHOLDERS.iter().any(|(n, _)| *n == name) {
                let valid: Vec<&str> = PLACEHOLDERS.iter().map(|(n, _)| *n).collect();
                bail!(
                    "Unknown placeholder '{}'. Valid placeholders: {}",
                    name,
                    valid.join(", ")
                );
            }

            segments.push(Segment::Placeholder { name, padding });
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Names of the placeholders this template uses, in order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute record values verbatim
    pub fn render(&self, record: &PostRecord) -> Result<String> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Placeholder { name, padding } => {
                    let value = record
                        .value(name)
                        .with_context(|| format!("Placeholder '{}' has no value", name))?;
                    match padding {
                        Some(width) if value.chars().all(|c| c.is_ascii_digit()) => {
                            out.push_str(&format!("{:0>width$}", value, width = *width));
                        }
                        _ => out.push_str(value),
                    }
                }
            }
        }

        Ok(out)
    }
}

/// The three parsed layouts
#[derive(Debug, Clone)]
pub struct TemplateSet {
    movie: PostTemplate,
    season: PostTemplate,
    episode: PostTemplate,
}

impl TemplateSet {
    /// Built-in layouts
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            movie: PostTemplate::parse(MOVIE_TEMPLATE)?,
            season: PostTemplate::parse(SEASON_TEMPLATE)?,
            episode: PostTemplate::parse(EPISODE_TEMPLATE)?,
        })
    }

    /// Built-in layouts with any template files named in the config
    pub fn from_config(config: &PostConfig) -> Result<Self> {
        let mut set = Self::builtin()?;
        if let Some(path) = &config.movie_template {
            set.movie = load_template(path)?;
        }
        if let Some(path) = &config.season_template {
            set.season = load_template(path)?;
        }
        if let Some(path) = &config.episode_template {
            set.episode = load_template(path)?;
        }
        Ok(set)
    }

    pub fn get(&self, variant: TemplateVariant) -> &PostTemplate {
        match variant {
            TemplateVariant::Movie => &self.movie,
            TemplateVariant::Season => &self.season,
            TemplateVariant::Episode => &self.episode,
        }
    }
}

fn load_template(path: &Path) -> Result<PostTemplate> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {:?}", path))?;
    PostTemplate::parse(content.trim_end())
        .with_context(|| format!("Invalid template {:?}", path))
}
