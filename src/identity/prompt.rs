//! Oracle request construction and season-pack detection

/// Caption terms that mark a whole-season announcement
const SEASON_TERMS: &[&str] = &["temporada", "season"];

/// True when the caption announces a complete season
pub fn is_season_pack(caption: Option<&str>) -> bool {
    caption
        .map(|c| c.to_lowercase())
        .is_some_and(|c| SEASON_TERMS.iter().any(|term| c.contains(term)))
}

/// Season number written after a season term ("Temporada 4 Completa" → 4)
pub fn season_from_caption(caption: &str) -> Option<u32> {
    let lower = caption.to_lowercase();

    SEASON_TERMS.iter().find_map(|term| {
        let start = lower.find(term)? + term.len();
        let digits: String = lower[start..]
            .chars()
            .skip_while(|c| c.is_whitespace() || matches!(c, ':' | '#' | '-' | '.'))
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok().filter(|&n| n > 0)
    })
}

/// Build the oracle prompt. The output depends only on the arguments.
pub fn build_prompt(filename: &str, caption: Option<&str>, season_pack: bool) -> String {
    let caption = caption
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("not provided");

    let scope = if season_pack {
        "This file is a sample of a COMPLETE SEASON pack. Set \"type\" to \"series\", \
         put the season number in \"season\" and set \"episode\" to null."
    } else {
        "If the name refers to a single episode, fill \"season\" and \"episode\" \
         (patterns like \"S01E04\", \"1x04\" or \"- 04 -\"). For a movie both are null."
    };

    format!(
        r#"You identify media releases from their file names. Reply with ONE JSON object and nothing else.

File name: "{filename}"
Caption: "{caption}"

{scope}

{{
  "details": {{
    "type": "movie" | "series",
    "title": "main title without quality, codec or group tags",
    "year": number | null,
    "season": number | null,
    "episode": number | null
  }},
  "language_details": {{
    "audio": ["language", ...],
    "subtitles": ["language", ...]
  }},
  "content_analysis": {{
    "probable_genres": ["genre", ...]
  }}
}}

Rules:
- "title": ignore tokens such as 1080p, WEB-DL, x265 or release group names.
- "year": only when it is written in the name or caption, otherwise null.
- "language_details": prefer the caption; otherwise infer from the name (e.g. "Latino", "Cast", "Subs"); use [] when unknown.
"#
    )
}
