//! Validation and coercion of the oracle's JSON answer

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use super::{IdentityGuess, MediaKind};

const MIN_YEAR: i64 = 1870;
const MAX_YEAR: i64 = 2100;

/// Everything usable in one oracle answer
#[derive(Debug, Clone, PartialEq)]
pub struct OracleAnswer {
    pub guess: IdentityGuess,
    pub audio: Vec<String>,
    pub subtitles: Vec<String>,
    pub genres: Vec<String>,
}

/// Parse the oracle's raw text into a typed answer.
///
/// Accepts the nested `details` / `language_details` / `content_analysis`
/// shape as well as a flat `{type, title, year, season, episode}` object,
/// optionally wrapped in Markdown code fences.
pub fn interpret(raw: &str) -> Result<OracleAnswer> {
    let json = extract_json_object(raw).context("Oracle answer contains no JSON object")?;
    let root: Value = serde_json::from_str(json).context("Oracle answer is not valid JSON")?;
    let Value::Object(root) = root else {
        bail!("Oracle answer is not a JSON object");
    };

    let details = match root.get("details") {
        Some(Value::Object(details)) => details,
        _ => &root,
    };

    let title = details
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .context("Oracle answer has no title")?
        .to_string();

    let year = details
        .get("year")
        .and_then(integer)
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .map(|y| y as u16);
    let season = details.get("season").and_then(positive);
    let episode = details.get("episode").and_then(positive);

    let kind = details
        .get("type")
        .and_then(Value::as_str)
        .and_then(kind_from_str)
        .unwrap_or(if season.is_some() || episode.is_some() {
            MediaKind::Series
        } else {
            MediaKind::Movie
        });

    let languages = object(&root, "language_details");
    let analysis = object(&root, "content_analysis");

    Ok(OracleAnswer {
        guess: IdentityGuess {
            kind,
            title,
            year,
            season,
            episode,
        },
        audio: languages.map(|l| string_list(l.get("audio"))).unwrap_or_default(),
        subtitles: languages
            .map(|l| string_list(l.get("subtitles")))
            .unwrap_or_default(),
        genres: analysis
            .map(|a| string_list(a.get("probable_genres")))
            .unwrap_or_default(),
    })
}

/// Slice from the first `{` to the last `}`; tolerates fences and chatter
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn object<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    root.get(key).and_then(Value::as_object)
}

fn kind_from_str(s: &str) -> Option<MediaKind> {
    match s.trim().to_lowercase().as_str() {
        "movie" | "film" | "película" | "pelicula" => Some(MediaKind::Movie),
        "series" | "serie" | "tv" | "show" | "tv_show" | "anime" | "episode" => {
            Some(MediaKind::Series)
        }
        _ => None,
    }
}

/// Integers, integral floats and numeric strings ("01", "2025")
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn positive(value: &Value) -> Option<u32> {
    integer(value)
        .filter(|&n| n > 0)
        .and_then(|n| u32::try_from(n).ok())
}

/// Array of strings, or a single comma-separated string
fn string_list(value: Option<&Value>) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s.split(',').map(String::from).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
