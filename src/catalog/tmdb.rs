//! TMDb (The Movie Database) v3 client

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{
    CastMember, Catalog, CatalogCandidate, Credits, CrewMember, EpisodeFacet, SearchHit,
    SeasonFacet,
};
use crate::config::TmdbConfig;
use crate::identity::MediaKind;

const USER_AGENT: &str = concat!("releasepost/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// TMDb API Response Structs
// ============================================================================

/// Search response, shared by /search/movie and /search/tv
#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchItem>,
}

/// Movies carry title/release_date, series carry name/first_air_date
#[derive(Debug, Deserialize)]
struct TmdbSearchItem {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    original_title: Option<String>,
    original_name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbDetail {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    original_title: Option<String>,
    original_name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    poster_path: Option<String>,
    credits: Option<TmdbCredits>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbCast>,
    #[serde(default)]
    crew: Vec<TmdbCrew>,
}

#[derive(Debug, Deserialize)]
struct TmdbCast {
    name: String,
    character: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbCrew {
    name: String,
    job: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbSeason {
    name: Option<String>,
    air_date: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    /// Only counted
    episodes: Vec<serde::de::IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct TmdbEpisode {
    name: Option<String>,
    overview: Option<String>,
    air_date: Option<String>,
    still_path: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// TMDb-backed [`Catalog`]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Build a client; fails when no API key is configured
    pub fn new(config: &TmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("No TMDb API key configured (set TMDB_API_KEY or [tmdb] api_key)")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client for TMDb")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// GET `path` with the API key and extra query parameters
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, params = ?params, "TMDb request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .with_context(|| format!("Failed to send request to TMDb {}", path))?;

        if !response.status().is_success() {
            bail!("TMDb {} returned status {}", path, response.status());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse TMDb {} response", path))
    }
}

fn kind_segment(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Series => "tv",
    }
}

/// TMDb uses "" for unknown dates and paths
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn search_item_to_hit(item: TmdbSearchItem) -> SearchHit {
    SearchHit {
        id: item.id,
        title: item.title.or(item.name).unwrap_or_default(),
        original_title: non_empty(item.original_title.or(item.original_name)),
        date: non_empty(item.release_date).or(non_empty(item.first_air_date)),
    }
}

fn detail_to_candidate(kind: MediaKind, detail: TmdbDetail) -> CatalogCandidate {
    let runtime_minutes = detail
        .runtime
        .or_else(|| detail.episode_run_time.first().copied())
        .filter(|&m| m > 0);

    let credits = detail.credits.map(|c| Credits {
        cast: c
            .cast
            .into_iter()
            .map(|p| CastMember {
                name: p.name,
                character: non_empty(p.character),
            })
            .collect(),
        crew: c
            .crew
            .into_iter()
            .map(|p| CrewMember {
                name: p.name,
                job: p.job,
            })
            .collect(),
    });

    CatalogCandidate {
        id: detail.id,
        kind,
        display_title: detail.title.or(detail.name).unwrap_or_default(),
        original_title: non_empty(detail.original_title.or(detail.original_name)),
        release_date: non_empty(detail.release_date),
        first_air_date: non_empty(detail.first_air_date),
        genres: detail.genres.into_iter().map(|g| g.name).collect(),
        overview: detail.overview.unwrap_or_default(),
        runtime_minutes,
        poster_path: non_empty(detail.poster_path),
        credits,
        episode: None,
        season: None,
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    async fn search(
        &self,
        kind: MediaKind,
        query: &str,
        year: Option<u16>,
        language: &str,
    ) -> Result<Vec<SearchHit>> {
        let mut params = vec![
            ("query", query.to_string()),
            ("language", language.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let (MediaKind::Movie, Some(year)) = (kind, year) {
            params.push(("primary_release_year", year.to_string()));
        }

        let path = format!("/search/{}", kind_segment(kind));
        let response: TmdbSearchResponse = self.get_json(&path, &params).await?;

        Ok(response.results.into_iter().map(search_item_to_hit).collect())
    }

    async fn details(&self, kind: MediaKind, id: u64, language: &str) -> Result<CatalogCandidate> {
        let path = format!("/{}/{}", kind_segment(kind), id);
        let params = [
            ("language", language.to_string()),
            ("append_to_response", "credits".to_string()),
        ];
        let detail: TmdbDetail = self.get_json(&path, &params).await?;
        Ok(detail_to_candidate(kind, detail))
    }

    async fn season(&self, series_id: u64, season: u32, language: &str) -> Result<SeasonFacet> {
        let path = format!("/tv/{}/season/{}", series_id, season);
        let params = [("language", language.to_string())];
        let detail: TmdbSeason = self.get_json(&path, &params).await?;

        Ok(SeasonFacet {
            name: detail.name.unwrap_or_else(|| format!("Season {}", season)),
            episode_count: detail.episodes.len(),
            air_date: non_empty(detail.air_date),
            poster_path: non_empty(detail.poster_path),
        })
    }

    async fn episode(
        &self,
        series_id: u64,
        season: u32,
        episode: u32,
        language: &str,
    ) -> Result<EpisodeFacet> {
        let path = format!("/tv/{}/season/{}/episode/{}", series_id, season, episode);
        let params = [("language", language.to_string())];
        let detail: TmdbEpisode = self.get_json(&path, &params).await?;

        Ok(EpisodeFacet {
            title: detail.name.unwrap_or_default(),
            overview: detail.overview.unwrap_or_default(),
            air_date: non_empty(detail.air_date),
            still_path: non_empty(detail.still_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> TmdbClient {
        TmdbClient::new(&TmdbConfig {
            api_key: Some("key".to_string()),
            base_url: server.uri(),
            ..TmdbConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(TmdbClient::new(&TmdbConfig::default()).is_err());
    }

    #[tokio::test]
    async fn test_search_movie_passes_year_and_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "key"))
            .and(query_param("query", "The Accountant 2"))
            .and(query_param("language", "es-ES"))
            .and(query_param("primary_release_year", "2025"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [
                    {"id": 870028, "title": "El contable 2", "original_title": "The Accountant 2", "release_date": "2025-04-23"},
                    {"id": 1, "title": "Otro", "release_date": ""}
                ]
            })))
            .mount(&server)
            .await;

        let hits = client(&server)
            .await
            .search(MediaKind::Movie, "The Accountant 2", Some(2025), "es-ES")
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 870028);
        assert_eq!(hits[0].title, "El contable 2");
        assert_eq!(hits[0].original_title.as_deref(), Some("The Accountant 2"));
        assert_eq!(hits[0].date.as_deref(), Some("2025-04-23"));
        assert_eq!(hits[1].date, None);
    }

    #[tokio::test]
    async fn test_search_tv_uses_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/tv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 76479, "name": "The Boys", "original_name": "The Boys", "first_air_date": "2019-07-25"}]
            })))
            .mount(&server)
            .await;

        let hits = client(&server)
            .await
            .search(MediaKind::Series, "The Boys", Some(2024), "es-ES")
            .await
            .unwrap();
        assert_eq!(hits[0].title, "The Boys");
        assert_eq!(hits[0].date.as_deref(), Some("2019-07-25"));
    }

    #[tokio::test]
    async fn test_details_with_credits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/76479"))
            .and(query_param("append_to_response", "credits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 76479,
                "name": "The Boys",
                "original_name": "The Boys",
                "first_air_date": "2019-07-25",
                "overview": "Superhéroes corruptos.",
                "episode_run_time": [60],
                "genres": [{"id": 10765, "name": "Sci-Fi & Fantasy"}, {"id": 18, "name": "Drama"}],
                "poster_path": "/boys.jpg",
                "credits": {
                    "cast": [{"name": "Karl Urban", "character": "Billy Butcher"}],
                    "crew": [{"name": "Eric Kripke", "job": "Executive Producer"}]
                }
            })))
            .mount(&server)
            .await;

        let candidate = client(&server)
            .await
            .details(MediaKind::Series, 76479, "es-ES")
            .await
            .unwrap();

        assert_eq!(candidate.display_title, "The Boys");
        assert_eq!(candidate.kind, MediaKind::Series);
        assert_eq!(candidate.release_date, None);
        assert_eq!(candidate.first_air_date.as_deref(), Some("2019-07-25"));
        assert_eq!(candidate.genres, vec!["Sci-Fi & Fantasy", "Drama"]);
        assert_eq!(candidate.runtime_minutes, Some(60));
        assert_eq!(candidate.poster_path.as_deref(), Some("/boys.jpg"));
        let credits = candidate.credits.unwrap();
        assert_eq!(credits.cast[0].character.as_deref(), Some("Billy Butcher"));
        assert_eq!(credits.director(), None);
    }

    #[tokio::test]
    async fn test_season_counts_episodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/76479/season/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Temporada 4",
                "air_date": "2024-06-13",
                "poster_path": "/s4.jpg",
                "episodes": (1..=8).map(|n| json!({"episode_number": n})).collect::<Vec<_>>()
            })))
            .mount(&server)
            .await;

        let season = client(&server).await.season(76479, 4, "es-ES").await.unwrap();
        assert_eq!(season.episode_count, 8);
        assert_eq!(season.name, "Temporada 4");
        assert_eq!(season.poster_path.as_deref(), Some("/s4.jpg"));
    }

    #[tokio::test]
    async fn test_episode_not_found_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/1/season/1/episode/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .episode(1, 1, 99, "es-ES")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
