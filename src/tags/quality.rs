//! Release quality labels inferred from captions and filenames

/// Built-in label → keyword table. Order is the tie-break.
const BUILTIN_QUALITIES: &[(&str, &[&str])] = &[
    ("WEB-DL", &["web-dl", "webdl"]),
    ("WEBRip", &["web-rip", "webrip"]),
    ("BDRip", &["bdrip", "bluray", "bd-rip"]),
    ("HDRip", &["hdrip"]),
    ("HDTV", &["hdtv"]),
    ("DVDRip", &["dvdrip"]),
    ("CAM", &["cam", "camrip"]),
    ("TS", &["ts", "telesync"]),
];

/// Ordered quality table, immutable after construction
#[derive(Debug, Clone)]
pub struct QualityTable {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for QualityTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_QUALITIES
                .iter()
                .map(|(label, keywords)| {
                    (
                        label.to_string(),
                        keywords.iter().map(|k| prepare(k)).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Keywords this short only match a whole word, so "ts" never hits "Beasts"
const WHOLE_WORD_MAX_LEN: usize = 3;

/// Lower-case and turn `.`/`-` separators into spaces
fn prepare(text: &str) -> String {
    text.to_lowercase().replace(['.', '-'], " ")
}

impl QualityTable {
    /// Return the first label whose keyword appears in `text`
    pub fn parse(&self, text: &str) -> Option<&str> {
        if text.is_empty() {
            return None;
        }

        let haystack = prepare(text);
        let words: Vec<&str> = haystack
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let hit = |keyword: &str| {
            if keyword.chars().count() <= WHOLE_WORD_MAX_LEN {
                words.contains(&keyword)
            } else {
                haystack.contains(keyword)
            }
        };

        self.entries
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| hit(k.as_str())))
            .map(|(label, _)| label.as_str())
    }

    /// Caption first, then filename, then the caller's default
    pub fn detect(&self, caption: Option<&str>, filename: &str, default: &str) -> String {
        caption
            .and_then(|c| self.parse(c))
            .or_else(|| self.parse(filename))
            .unwrap_or(default)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_labels() {
        let table = QualityTable::default();
        assert_eq!(table.parse("Movie.2024.1080p.WEBRip.x264"), Some("WEBRip"));
        assert_eq!(table.parse("Movie 2024 BluRay"), Some("BDRip"));
        assert_eq!(table.parse("Show.S01E01.HDTV"), Some("HDTV"));
        assert_eq!(table.parse("Movie.1080p.x265"), None);
        assert_eq!(table.parse(""), None);
    }

    #[test]
    fn test_parse_ignores_case_and_separators() {
        let table = QualityTable::default();
        for text in ["Movie.WEB-DL.mkv", "movie.web.dl.mkv", "MOVIE WEB DL", "movie-webdl"] {
            assert_eq!(table.parse(text), Some("WEB-DL"), "failed for {:?}", text);
        }
    }

    #[test]
    fn test_table_order_breaks_ties() {
        let table = QualityTable::default();
        // both "webdl" and "hdtv" present; WEB-DL comes first
        assert_eq!(table.parse("hdtv webdl"), Some("WEB-DL"));
    }

    #[test]
    fn test_short_keywords_need_whole_words() {
        let table = QualityTable::default();
        assert_eq!(table.parse("Campeones.2018.1080p.mkv"), None);
        assert_eq!(table.parse("Fantastic.Beasts.2016.mkv"), None);
        assert_eq!(table.parse("Movie.2024.TS.x264"), Some("TS"));
        assert_eq!(table.parse("Movie 2024 CAM"), Some("CAM"));
        assert_eq!(table.parse("movie-hd-ts"), Some("TS"));
        assert_eq!(table.parse("Movie.CAMRip.avi"), Some("CAM"));
    }

    #[test]
    fn test_caption_words_do_not_mask_filename() {
        let table = QualityTable::default();
        assert_eq!(
            table.detect(Some("Shorts de Campeones"), "Movie.2024.WEB-DL.mkv", "HDTV"),
            "WEB-DL"
        );
    }

    #[test]
    fn test_detect_prefers_caption() {
        let table = QualityTable::default();
        assert_eq!(
            table.detect(Some("Calidad: HDRip"), "Movie.WEBRip.mkv", "WEB-DL"),
            "HDRip"
        );
        assert_eq!(table.detect(Some("sin datos"), "Movie.WEBRip.mkv", "WEB-DL"), "WEBRip");
        assert_eq!(table.detect(None, "Movie.1080p.mkv", "WEB-DL"), "WEB-DL");
    }
}
