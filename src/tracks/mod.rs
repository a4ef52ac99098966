//! Technical facts (resolution, audio and subtitle languages) from MediaInfo JSON

pub mod probe;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

use crate::tags::LanguageTable;

/// Placeholder for facts the container did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Fields consulted for a track's language, most specific first
const LANGUAGE_FIELDS: &[&str] = &[
    "Language_String3",
    "Language_String",
    "Language",
    "Language_String2",
    "Title",
];

/// Root of `mediainfo --Output=JSON`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfoTree {
    #[serde(default)]
    pub media: Option<MediaInfoMedia>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfoMedia {
    #[serde(default)]
    pub track: Vec<MediaInfoTrack>,
}

/// A single track. MediaInfo emits most values as strings but some builds
/// emit numbers, so fields are kept as raw JSON values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfoTrack {
    #[serde(rename = "@type", default)]
    pub track_type: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl MediaInfoTrack {
    /// Field value as trimmed, non-empty text
    pub fn text(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Field value as a pixel count ("1920", 1920 or "1 920 pixels")
    fn dimension(&self, name: &str) -> Option<u32> {
        let raw = self.text(name)?;
        let digits: String = raw
            .split('.')
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok().filter(|&n| n > 0)
    }

    /// First language-bearing field present on this track
    fn language_candidate(&self) -> Option<String> {
        LANGUAGE_FIELDS.iter().find_map(|field| self.text(field))
    }
}

impl MediaInfoTree {
    pub fn tracks(&self) -> &[MediaInfoTrack] {
        self.media
            .as_ref()
            .map(|m| m.track.as_slice())
            .unwrap_or_default()
    }
}

/// Parse MediaInfo JSON output
pub fn parse_tree(json: &[u8]) -> Result<MediaInfoTree> {
    serde_json::from_slice(json).context("Failed to parse MediaInfo JSON")
}

/// Read a MediaInfo JSON document from disk
pub fn read_tree(path: &Path) -> Result<MediaInfoTree> {
    let content =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_tree(&content).with_context(|| format!("Invalid MediaInfo JSON in {}", path.display()))
}

/// Technical facts of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackFacts {
    pub resolution: String,
    pub audio_languages: BTreeSet<String>,
    pub subtitle_languages: BTreeSet<String>,
}

impl Default for TrackFacts {
    fn default() -> Self {
        Self {
            resolution: NOT_AVAILABLE.to_string(),
            audio_languages: BTreeSet::new(),
            subtitle_languages: BTreeSet::new(),
        }
    }
}

/// Walk the track list and collect resolution and language codes.
///
/// A missing tree is a valid input and yields empty sets and "N/A".
pub fn extract_tracks(tree: Option<&MediaInfoTree>, languages: &LanguageTable) -> TrackFacts {
    let mut facts = TrackFacts::default();

    let Some(tree) = tree else {
        return facts;
    };

    if let Some(video) = tree.tracks().iter().find(|t| t.track_type == "Video") {
        if let (Some(width), Some(height)) = (video.dimension("Width"), video.dimension("Height")) {
            facts.resolution = format!("{}x{}", width, height);
        }
    }

    for track in tree.tracks() {
        let target = match track.track_type.as_str() {
            "Audio" => &mut facts.audio_languages,
            "Text" => &mut facts.subtitle_languages,
            _ => continue,
        };

        if let Some(code) = track
            .language_candidate()
            .and_then(|candidate| languages.accept(&candidate))
        {
            target.insert(code);
        }
    }

    facts
}
