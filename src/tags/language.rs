//! Language synonym table and track-list merging

use std::collections::{BTreeSet, HashMap};

/// Display value used when no language survives the merge
pub const NO_DATA: &str = "N/D";

/// Codes longer than this are treated as mis-parsed garbage
pub const MAX_CODE_LEN: usize = 4;

/// Built-in synonym → short code pairs. Covers language names as written in
/// captions plus the ISO 639-1/639-2 and BCP-47 tags MediaInfo emits.
const BUILTIN_SYNONYMS: &[(&str, &str)] = &[
    ("es", "esp"),
    ("es-es", "esp"),
    ("español", "esp"),
    ("espanol", "esp"),
    ("spanish", "esp"),
    ("spa", "esp"),
    ("castellano", "esp"),
    ("en", "eng"),
    ("en-us", "eng"),
    ("en-gb", "eng"),
    ("ingles", "eng"),
    ("inglés", "eng"),
    ("english", "eng"),
    ("eng", "eng"),
    ("es-419", "lat"),
    ("es-mx", "lat"),
    ("es-us", "lat"),
    ("latino", "lat"),
    ("latin", "lat"),
    ("lat", "lat"),
    ("ja", "jap"),
    ("ja-jp", "jap"),
    ("japones", "jap"),
    ("japonés", "jap"),
    ("japanese", "jap"),
    ("jap", "jap"),
    ("jpn", "jap"),
    ("fr", "fra"),
    ("fr-fr", "fra"),
    ("frances", "fra"),
    ("francés", "fra"),
    ("french", "fra"),
    ("fra", "fra"),
    ("fre", "fra"),
    ("de", "ger"),
    ("de-de", "ger"),
    ("aleman", "ger"),
    ("alemán", "ger"),
    ("german", "ger"),
    ("ger", "ger"),
    ("deu", "ger"),
    ("it", "ita"),
    ("it-it", "ita"),
    ("italiano", "ita"),
    ("italian", "ita"),
    ("ita", "ita"),
    ("pt", "por"),
    ("pt-br", "por"),
    ("pt-pt", "por"),
    ("portugues", "por"),
    ("portugués", "por"),
    ("português", "por"),
    ("portuguese", "por"),
    ("por", "por"),
];

/// Immutable language lookup table, built once at startup and shared
#[derive(Debug, Clone)]
pub struct LanguageTable {
    synonyms: HashMap<String, String>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<(String, String)>())
    }
}

impl LanguageTable {
    /// Build the built-in table plus extra synonym → code pairs.
    /// Extra pairs win over built-in ones.
    pub fn with_extra<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut synonyms: HashMap<String, String> = BUILTIN_SYNONYMS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        for (key, code) in extra {
            synonyms.insert(
                key.as_ref().trim().to_lowercase(),
                code.as_ref().trim().to_lowercase(),
            );
        }

        Self { synonyms }
    }

    /// Map a free-text language name to its short code.
    /// Unknown input passes through trimmed and lower-cased.
    pub fn normalize(&self, input: &str) -> String {
        let clean = input.trim().to_lowercase();
        match self.synonyms.get(&clean) {
            Some(code) => code.clone(),
            None => clean,
        }
    }

    /// Normalize a candidate and keep it only if it looks like a code
    pub fn accept(&self, input: &str) -> Option<String> {
        let code = self.normalize(input);
        if code.is_empty() || code.chars().count() > MAX_CODE_LEN {
            None
        } else {
            Some(code)
        }
    }

    /// Union container-derived codes with suggested names and render them
    /// as a sorted, comma-separated list (or [`NO_DATA`]).
    pub fn merge_tracks<S: AsRef<str>>(&self, base: &BTreeSet<String>, suggested: &[S]) -> String {
        let mut merged: BTreeSet<String> = base
            .iter()
            .filter(|code| !code.is_empty() && code.chars().count() <= MAX_CODE_LEN)
            .cloned()
            .collect();

        merged.extend(suggested.iter().filter_map(|s| self.accept(s.as_ref())));

        if merged.is_empty() {
            NO_DATA.to_string()
        } else {
            merged.into_iter().collect::<Vec<_>>().join(", ")
        }
    }
}
