//! Fuzzy title matching with language and title-variant retries

use std::sync::Arc;
use tracing::{info, warn};

use super::{Catalog, CatalogCandidate, SearchHit};
use crate::error::PipelineError;
use crate::identity::{IdentityGuess, MediaKind};
use crate::tags::normalize;

/// Pick the hit most similar to `query`, comparing normalized titles by
/// normalized Levenshtein similarity in [0, 1].
///
/// The first hit reaching the maximum wins, and it is only returned when its
/// ratio is strictly greater than `threshold`.
pub fn find_best_match<'a>(
    query: &str,
    hits: &'a [SearchHit],
    threshold: f64,
) -> Option<(&'a SearchHit, f64)> {
    let query_key = normalize(query);
    if query_key.is_empty() {
        return None;
    }

    let mut best: Option<(&SearchHit, f64)> = None;
    for hit in hits {
        let hit_key = normalize(&hit.title);
        if hit_key.is_empty() {
            continue;
        }
        let ratio = strsim::normalized_levenshtein(&query_key, &hit_key);
        if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
            best = Some((hit, ratio));
        }
    }

    match best {
        Some((hit, ratio)) if ratio > threshold => Some((hit, ratio)),
        Some((hit, ratio)) => {
            info!(
                query,
                best = %hit.title,
                ratio = %format!("{:.2}", ratio),
                "best candidate below threshold"
            );
            None
        }
        None => None,
    }
}

/// The full title, then its first two words when it has more than two
pub fn title_variants(title: &str) -> Vec<String> {
    let words: Vec<&str> = title.split_whitespace().collect();
    let mut variants = vec![words.join(" ")];
    if words.len() > 2 {
        variants.push(words[..2].join(" "));
    }
    variants
}

/// One search the matcher will try
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub language: String,
    pub query: String,
}

/// Languages and acceptance policy
#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub primary_language: String,
    pub secondary_language: String,
    pub threshold: f64,
}

/// Resolves an [`IdentityGuess`] to a catalog record
#[derive(Clone)]
pub struct CatalogMatcher {
    catalog: Arc<dyn Catalog>,
    settings: MatchSettings,
}

impl CatalogMatcher {
    pub fn new(catalog: Arc<dyn Catalog>, settings: MatchSettings) -> Self {
        Self { catalog, settings }
    }

    /// Attempt order: each language in turn, full title before truncated
    pub fn attempts(&self, title: &str) -> Vec<Attempt> {
        let mut attempts: Vec<Attempt> = Vec::new();
        for language in [
            &self.settings.primary_language,
            &self.settings.secondary_language,
        ] {
            for query in title_variants(title) {
                let attempt = Attempt {
                    language: language.clone(),
                    query,
                };
                if !attempts.contains(&attempt) {
                    attempts.push(attempt);
                }
            }
        }
        attempts
    }

    /// Find the catalog record for `guess`, attaching episode or season
    /// detail for series.
    ///
    /// Catalog faults count as failed attempts, so both "unreachable" and
    /// "unknown title" end in [`PipelineError::NotFound`].
    pub async fn search_title(
        &self,
        guess: &IdentityGuess,
        season_pack: bool,
    ) -> Result<CatalogCandidate, PipelineError> {
        let hit = self
            .find_hit(guess)
            .await
            .ok_or_else(|| PipelineError::not_found(&guess.title))?;

        let mut candidate = match self
            .catalog
            .details(guess.kind, hit.id, &self.settings.primary_language)
            .await
        {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(id = hit.id, error = %format!("{:#}", e), "catalog details fetch failed");
                return Err(PipelineError::not_found(&guess.title));
            }
        };

        if guess.kind == MediaKind::Series {
            self.attach_facets(&mut candidate, guess, season_pack).await;
        }

        Ok(candidate)
    }

    async fn find_hit(&self, guess: &IdentityGuess) -> Option<SearchHit> {
        for attempt in self.attempts(&guess.title) {
            let hits = match self
                .catalog
                .search(guess.kind, &attempt.query, guess.year, &attempt.language)
                .await
            {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(
                        catalog = self.catalog.name(),
                        language = %attempt.language,
                        query = %attempt.query,
                        error = %format!("{:#}", e),
                        "catalog search failed"
                    );
                    continue;
                }
            };

            match find_best_match(&attempt.query, &hits, self.settings.threshold) {
                Some((hit, ratio)) => {
                    info!(
                        language = %attempt.language,
                        query = %attempt.query,
                        matched = %hit.title,
                        id = hit.id,
                        ratio = %format!("{:.2}", ratio),
                        "catalog match accepted"
                    );
                    return Some(hit.clone());
                }
                None => {
                    info!(
                        language = %attempt.language,
                        query = %attempt.query,
                        results = hits.len(),
                        "no confident catalog match"
                    );
                }
            }
        }
        None
    }

    /// Episode or season detail; failures degrade to series-level data
    async fn attach_facets(
        &self,
        candidate: &mut CatalogCandidate,
        guess: &IdentityGuess,
        season_pack: bool,
    ) {
        let language = &self.settings.primary_language;

        if season_pack {
            let Some(season) = guess.season else {
                warn!(title = %candidate.display_title, "season pack without a season number");
                return;
            };
            match self.catalog.season(candidate.id, season, language).await {
                Ok(facet) => candidate.season = Some(facet),
                Err(e) => warn!(
                    season,
                    error = %format!("{:#}", e),
                    "season lookup failed, using series data only"
                ),
            }
        } else if let (Some(season), Some(episode)) = (guess.season, guess.episode) {
            match self
                .catalog
                .episode(candidate.id, season, episode, language)
                .await
            {
                Ok(facet) => candidate.episode = Some(facet),
                Err(e) => warn!(
                    season,
                    episode,
                    error = %format!("{:#}", e),
                    "episode lookup failed, using series data only"
                ),
            }
        }
    }
}
