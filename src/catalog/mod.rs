//! Metadata catalog access and title matching

pub mod matcher;
pub mod tmdb;
mod types;

use anyhow::Result;
use async_trait::async_trait;

use crate::identity::MediaKind;

pub use matcher::{CatalogMatcher, MatchSettings};
pub use tmdb::TmdbClient;
pub use types::{
    CastMember, CatalogCandidate, Credits, CrewMember, EpisodeFacet, SearchHit, SeasonFacet,
};

/// A searchable metadata catalog.
///
/// Implementations return `Err` for transport and status failures; deciding
/// what a failure means is left to [`CatalogMatcher`].
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Title search; `year` narrows movie searches only
    async fn search(
        &self,
        kind: MediaKind,
        query: &str,
        year: Option<u16>,
        language: &str,
    ) -> Result<Vec<SearchHit>>;

    /// Full record including genres, runtime and credits
    async fn details(&self, kind: MediaKind, id: u64, language: &str) -> Result<CatalogCandidate>;

    async fn season(&self, series_id: u64, season: u32, language: &str) -> Result<SeasonFacet>;

    async fn episode(
        &self,
        series_id: u64,
        season: u32,
        episode: u32,
        language: &str,
    ) -> Result<EpisodeFacet>;
}
