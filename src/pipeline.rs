//! One request per file: identity → catalog, joined with the container probe,
//! then assembly and rendering.

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::catalog::{Catalog, CatalogCandidate, CatalogMatcher, MatchSettings, TmdbClient};
use crate::config::Config;
use crate::error::PipelineError;
use crate::identity::{GeminiOracle, Identification, IdentityExtractor, TextOracle};
use crate::post::{assemble, AssemblySettings, FileFacts, Post, TemplateSet, TemplateVariant};
use crate::tags::{LanguageTable, QualityTable};
use crate::tracks::{extract_tracks, MediaInfoTree};

/// Labels and URLs copied out of the config at startup
#[derive(Debug, Clone)]
struct PostLabels {
    default_quality: String,
    image_base_url: String,
    synopsis_fallback_url: String,
    movie_label: String,
    series_label: String,
}

/// Everything the pipeline knows about an input before any lookups
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub filename: String,
    pub caption: Option<String>,
    pub size_bytes: Option<u64>,
    pub synopsis_url: Option<String>,
}

impl RawInput {
    fn file_facts(&self) -> FileFacts {
        FileFacts {
            filename: self.filename.clone(),
            caption: self.caption.clone(),
            size_bytes: self.size_bytes,
            synopsis_url: self.synopsis_url.clone(),
        }
    }
}

/// The release-post pipeline. All shared state is read-only, so one
/// instance can serve many files concurrently.
#[derive(Clone)]
pub struct Pipeline {
    extractor: IdentityExtractor,
    matcher: CatalogMatcher,
    languages: Arc<LanguageTable>,
    qualities: Arc<QualityTable>,
    templates: Arc<TemplateSet>,
    labels: Arc<PostLabels>,
}

impl Pipeline {
    /// Wire the pipeline to the given oracle and catalog
    pub fn new(
        oracle: Arc<dyn TextOracle>,
        catalog: Arc<dyn Catalog>,
        config: &Config,
    ) -> Result<Self> {
        let settings = MatchSettings {
            primary_language: config.tmdb.primary_language.clone(),
            secondary_language: config.tmdb.secondary_language.clone(),
            threshold: config.threshold(),
        };

        Ok(Self {
            extractor: IdentityExtractor::new(oracle),
            matcher: CatalogMatcher::new(catalog, settings),
            languages: Arc::new(LanguageTable::with_extra(&config.languages)),
            qualities: Arc::new(QualityTable::default()),
            templates: Arc::new(
                TemplateSet::from_config(&config.post).context("Failed to load post templates")?,
            ),
            labels: Arc::new(PostLabels {
                default_quality: config.post.default_quality.clone(),
                image_base_url: config.tmdb.image_base_url.clone(),
                synopsis_fallback_url: config.post.synopsis_fallback_url.clone(),
                movie_label: config.post.movie_label.clone(),
                series_label: config.post.series_label.clone(),
            }),
        })
    }

    /// Pipeline backed by Gemini and TMDb
    pub fn from_config(config: &Config) -> Result<Self> {
        let oracle = GeminiOracle::new(&config.oracle)?;
        let catalog = TmdbClient::new(&config.tmdb)?;
        Self::new(Arc::new(oracle), Arc::new(catalog), config)
    }

    /// Run with container data that is already known (or absent)
    pub async fn run(
        &self,
        input: &RawInput,
        container: Option<MediaInfoTree>,
    ) -> Result<Post, PipelineError> {
        self.run_with_probe(input, std::future::ready(container)).await
    }

    /// Run the probe concurrently with identity extraction and catalog
    /// matching, then assemble and render.
    pub async fn run_with_probe<F>(&self, input: &RawInput, probe: F) -> Result<Post, PipelineError>
    where
        F: Future<Output = Option<MediaInfoTree>>,
    {
        let lookup = async {
            let identification = self
                .extractor
                .extract(&input.filename, input.caption.as_deref())
                .await?;
            let candidate = self
                .matcher
                .search_title(&identification.guess, identification.season_pack)
                .await?;
            Ok::<_, PipelineError>((identification, candidate))
        };

        let (container, lookup) = tokio::join!(probe, lookup);

        let result = lookup.and_then(|(identification, candidate)| {
            self.finish(input, container.as_ref(), &identification, &candidate)
        });

        match &result {
            Ok(post) => info!(
                file = %input.filename,
                variant = post.variant.as_str(),
                title = %post.record.title,
                "post assembled"
            ),
            Err(e @ PipelineError::Unexpected(_)) => {
                error!(file = %input.filename, outcome = e.kind(), error = %e, "pipeline failed")
            }
            Err(e) => warn!(file = %input.filename, outcome = e.kind(), error = %e, "no post produced"),
        }

        result
    }

    fn finish(
        &self,
        input: &RawInput,
        container: Option<&MediaInfoTree>,
        identification: &Identification,
        candidate: &CatalogCandidate,
    ) -> Result<Post, PipelineError> {
        let tracks = extract_tracks(container, &self.languages);

        let settings = AssemblySettings {
            languages: &self.languages,
            qualities: &self.qualities,
            default_quality: &self.labels.default_quality,
            image_base_url: &self.labels.image_base_url,
            synopsis_fallback_url: &self.labels.synopsis_fallback_url,
            movie_label: &self.labels.movie_label,
            series_label: &self.labels.series_label,
        };
        let record = assemble(
            candidate,
            &tracks,
            identification,
            &input.file_facts(),
            &settings,
        );

        let variant =
            TemplateVariant::select(identification.guess.kind, identification.season_pack);
        let text = self
            .templates
            .get(variant)
            .render(&record)
            .with_context(|| format!("Failed to render {} template", variant.as_str()))?;

        Ok(Post {
            record,
            variant,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{candidate, hit, FakeCatalog};
    use crate::identity::tests::FakeOracle;
    use crate::identity::MediaKind;
    use crate::tracks::parse_tree;

    fn pipeline(oracle: FakeOracle, catalog: Arc<FakeCatalog>) -> Pipeline {
        Pipeline::new(Arc::new(oracle), catalog, &Config::default()).unwrap()
    }

    fn input(filename: &str, caption: Option<&str>) -> RawInput {
        RawInput {
            filename: filename.to_string(),
            caption: caption.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_movie_from_filename_only() {
        let oracle = FakeOracle::answering(
            r#"{"details": {"type": "movie", "title": "El Contador 2", "year": 2025}}"#,
        );
        let mut movie = candidate(1, "El Contador 2");
        movie.release_date = Some("2025-04-23".to_string());
        let catalog = Arc::new(
            FakeCatalog::default()
                .with_search("es-ES", "El Contador 2", vec![hit(1, "El Contador 2")])
                .with_candidate(movie),
        );

        let post = pipeline(oracle, catalog)
            .run(&input("El.Contador.2.(2025).1080p.mkv", None), None)
            .await
            .unwrap();

        assert_eq!(post.variant, TemplateVariant::Movie);
        assert_eq!(post.record.year, "2025");
        assert!(post.text.contains("<b>El Contador 2</b> (2025)"));
        assert!(post.text.contains("MKV"));
    }

    #[tokio::test]
    async fn test_episode_without_confident_match_is_not_found() {
        let oracle = FakeOracle::answering(
            r#"{"details": {"type": "series", "title": "Show Name", "season": 1, "episode": 4}}"#,
        );
        let catalog = Arc::new(
            FakeCatalog::default()
                .with_search("es-ES", "Show Name", vec![hit(5, "A Completely Different Show")])
                .with_details(5, "A Completely Different Show"),
        );

        let err = pipeline(oracle, catalog)
            .run(&input("Show.Name.S01E04.mkv", None), None)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NotFound { ref title } if title == "Show Name"));
    }

    #[tokio::test]
    async fn test_oracle_failure_is_no_identity() {
        let catalog = Arc::new(FakeCatalog::default());
        let err = pipeline(FakeOracle::failing(), catalog.clone())
            .run(&input("whatever.mkv", None), None)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoIdentity));
        assert!(catalog.searches().is_empty());
    }

    #[tokio::test]
    async fn test_season_pack_uses_season_template() {
        let oracle = FakeOracle::answering(r#"{"details": {"type": "series", "title": "The Boys"}}"#);
        let mut series = candidate(76479, "The Boys");
        series.kind = MediaKind::Series;
        let catalog = Arc::new(
            FakeCatalog::default()
                .with_search("es-ES", "The Boys", vec![hit(76479, "The Boys")])
                .with_candidate(series)
                .with_season(76479, 4, 8),
        );

        let post = pipeline(oracle, catalog)
            .run(&input("The.Boys.S04.mkv", Some("Temporada 4 Completa")), None)
            .await
            .unwrap();

        assert_eq!(post.variant, TemplateVariant::Season);
        assert_eq!(post.record.season, "4");
        assert_eq!(post.record.episodes_count, "8");
        assert!(post.text.contains("Temporada 4 completa"));
        assert!(post.text.contains("8 episodios"));
    }

    #[tokio::test]
    async fn test_probe_joins_container_languages_with_hints() {
        let oracle = FakeOracle::answering(
            r#"{"details": {"type": "movie", "title": "El Contador 2"},
                "language_details": {"audio": ["Inglés"], "subtitles": []}}"#,
        );
        let catalog = Arc::new(
            FakeCatalog::default()
                .with_search("es-ES", "El Contador 2", vec![hit(1, "El Contador 2")])
                .with_details(1, "El Contador 2"),
        );
        let tree = parse_tree(
            br#"{"media": {"track": [
                {"@type": "Video", "Width": "1920", "Height": "1080"},
                {"@type": "Audio", "Language": "spa"}
            ]}}"#,
        )
        .unwrap();

        let post = pipeline(oracle, catalog)
            .run_with_probe(&input("El.Contador.2.mkv", None), async move { Some(tree) })
            .await
            .unwrap();

        assert_eq!(post.record.audio_tracks, "eng, esp");
        assert_eq!(post.record.subtitle_tracks, "N/D");
        assert_eq!(post.record.resolution, "1920x1080");
    }

    #[tokio::test]
    async fn test_secondary_language_fallback() {
        let oracle = FakeOracle::answering(
            r#"{"details": {"type": "movie", "title": "The Accountant 2", "year": 2025}}"#,
        );
        let catalog = Arc::new(
            FakeCatalog::default()
                .with_search("en-US", "The Accountant 2", vec![hit(2, "The Accountant 2")])
                .with_details(2, "El Contador 2"),
        );

        let post = pipeline(oracle, catalog.clone())
            .run(&input("The.Accountant.2.2025.mkv", None), None)
            .await
            .unwrap();

        assert_eq!(post.record.title, "El Contador 2");
        let searches = catalog.searches();
        assert_eq!(searches[0], ("es-ES".to_string(), "The Accountant 2".to_string()));
        assert_eq!(
            searches.last().unwrap(),
            &("en-US".to_string(), "The Accountant 2".to_string())
        );
    }
}
