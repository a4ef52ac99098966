//! Reconcile catalog data, container facts and oracle hints into a PostRecord

use crate::catalog::CatalogCandidate;
use crate::identity::{Identification, MediaKind};
use crate::tags::{create_hashtags, LanguageTable, QualityTable};
use crate::tracks::{TrackFacts, NOT_AVAILABLE};

use super::format::{
    file_format, format_file_size, format_runtime, number_or_na, text_or_na, year_from_dates,
};
use super::PostRecord;

/// Leading cast members listed in a post
const MAX_CAST: usize = 5;

/// Facts about the uploaded file itself
#[derive(Debug, Clone, Default)]
pub struct FileFacts {
    pub filename: String,
    pub caption: Option<String>,
    pub size_bytes: Option<u64>,
    /// Link to an already published synopsis article
    pub synopsis_url: Option<String>,
}

/// Immutable lookup data and labels used during assembly
#[derive(Debug, Clone, Copy)]
pub struct AssemblySettings<'a> {
    pub languages: &'a LanguageTable,
    pub qualities: &'a QualityTable,
    pub default_quality: &'a str,
    pub image_base_url: &'a str,
    pub synopsis_fallback_url: &'a str,
    pub movie_label: &'a str,
    pub series_label: &'a str,
}

/// Build the template record.
///
/// Catalog data wins for everything it describes and container facts win
/// for resolution and track languages. Oracle hints are only unioned into
/// the track lists, and their genres are used when the catalog has none.
pub fn assemble(
    candidate: &CatalogCandidate,
    tracks: &TrackFacts,
    identification: &Identification,
    file: &FileFacts,
    settings: &AssemblySettings<'_>,
) -> PostRecord {
    let guess = &identification.guess;
    let episode = candidate.episode.as_ref();
    let season = candidate.season.as_ref();

    let kind_label = match candidate.kind {
        MediaKind::Movie => settings.movie_label,
        MediaKind::Series => settings.series_label,
    };

    let genres = if candidate.genres.is_empty() {
        &identification.genre_hints
    } else {
        &candidate.genres
    };

    let year = year_from_dates(&[
        candidate.release_date.as_deref(),
        episode.and_then(|e| e.air_date.as_deref()),
        season.and_then(|s| s.air_date.as_deref()),
        candidate.first_air_date.as_deref(),
    ]);

    let credits = candidate.credits.as_ref();
    let cast: Vec<String> = credits
        .map(|c| c.top_cast(MAX_CAST))
        .unwrap_or_default()
        .iter()
        .map(|member| match member.character.as_deref() {
            Some(character) if !character.trim().is_empty() => {
                format!("{} ({})", member.name, character)
            }
            _ => member.name.clone(),
        })
        .collect();

    let poster_url = season
        .and_then(|s| s.poster_path.as_deref())
        .or(candidate.poster_path.as_deref())
        .map(|path| format!("{}{}", settings.image_base_url.trim_end_matches('/'), path))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let synopsis_url = file
        .synopsis_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(settings.synopsis_fallback_url)
        .to_string();

    PostRecord {
        title: candidate.display_title.clone(),
        original_title: text_or_na(candidate.original_title.as_deref()),
        year,
        overview: text_or_na(Some(candidate.overview.as_str())),
        genres: if genres.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            genres.join(", ")
        },
        hashtags: create_hashtags(kind_label, &candidate.genres, &identification.genre_hints),
        synopsis_url,
        runtime: format_runtime(candidate.runtime_minutes),
        quality: settings.qualities.detect(
            file.caption.as_deref(),
            &file.filename,
            settings.default_quality,
        ),
        file_size: format_file_size(file.size_bytes),
        format: file_format(&file.filename),
        resolution: tracks.resolution.clone(),
        audio_tracks: settings
            .languages
            .merge_tracks(&tracks.audio_languages, &identification.audio_hints),
        subtitle_tracks: settings
            .languages
            .merge_tracks(&tracks.subtitle_languages, &identification.subtitle_hints),
        series_title: candidate.display_title.clone(),
        season: number_or_na(guess.season),
        episode: number_or_na(guess.episode),
        episode_title: text_or_na(episode.map(|e| e.title.as_str())),
        episode_overview: text_or_na(episode.map(|e| e.overview.as_str())),
        episodes_count: number_or_na(season.map(|s| s.episode_count)),
        director: text_or_na(credits.and_then(|c| c.director())),
        cast: if cast.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            cast.join(", ")
        },
        poster_url,
    }
}
