use serde::Serialize;

/// Available template placeholders with descriptions
pub const PLACEHOLDERS: &[(&str, &str)] = &[
    ("title", "Catalog title (localised)"),
    ("original_title", "Original-language title"),
    ("year", "Release / air year"),
    ("overview", "Catalog synopsis"),
    ("genres", "Comma-separated genres"),
    ("hashtags", "Type hashtag and up to three genre hashtags"),
    ("synopsis_url", "Link to the full synopsis article"),
    ("runtime", "Runtime as \"Xh Ym\""),
    ("quality", "Release quality (WEB-DL, BDRip, ...)"),
    ("file_size", "File size in GB"),
    ("format", "Container extension (MKV, MP4, ...)"),
    ("resolution", "Video resolution as WxH"),
    ("audio_tracks", "Audio language codes"),
    ("subtitle_tracks", "Subtitle language codes"),
    ("series_title", "Series title"),
    ("season", "Season number"),
    ("episode", "Episode number"),
    ("episode_title", "Episode title"),
    ("episode_overview", "Episode synopsis"),
    ("episodes_count", "Episodes in the season"),
    ("director", "Director"),
    ("cast", "Leading cast"),
    ("poster_url", "Poster image URL"),
];

/// Template-ready post data. Every field is always set; missing facts are
/// carried as "N/A" (or "N/D" for track lists).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub title: String,
    pub original_title: String,
    pub year: String,
    pub overview: String,
    pub genres: String,
    pub hashtags: String,
    pub synopsis_url: String,
    pub runtime: String,
    pub quality: String,
    pub file_size: String,
    pub format: String,
    pub resolution: String,
    pub audio_tracks: String,
    pub subtitle_tracks: String,
    pub series_title: String,
    pub season: String,
    pub episode: String,
    pub episode_title: String,
    pub episode_overview: String,
    pub episodes_count: String,
    pub director: String,
    pub cast: String,
    pub poster_url: String,
}

impl PostRecord {
    /// Value of a placeholder by name
    pub fn value(&self, name: &str) -> Option<&str> {
        let value = match name {
            "title" => &self.title,
            "original_title" => &self.original_title,
            "year" => &self.year,
            "overview" => &self.overview,
            "genres" => &self.genres,
            "hashtags" => &self.hashtags,
            "synopsis_url" => &self.synopsis_url,
            "runtime" => &self.runtime,
            "quality" => &self.quality,
            "file_size" => &self.file_size,
            "format" => &self.format,
            "resolution" => &self.resolution,
            "audio_tracks" => &self.audio_tracks,
            "subtitle_tracks" => &self.subtitle_tracks,
            "series_title" => &self.series_title,
            "season" => &self.season,
            "episode" => &self.episode,
            "episode_title" => &self.episode_title,
            "episode_overview" => &self.episode_overview,
            "episodes_count" => &self.episodes_count,
            "director" => &self.director,
            "cast" => &self.cast,
            "poster_url" => &self.poster_url,
            _ => return None,
        };
        Some(value.as_str())
    }
}
