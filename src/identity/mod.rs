//! Identity extraction: filename + caption → structured guess
//!
//! The language understanding itself is delegated to a [`TextOracle`]; this
//! module builds the request, validates the answer and decides between the
//! season-level and episode-level flavours of the question.

pub mod gemini;
mod prompt;
mod response;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::PipelineError;

pub use gemini::GeminiOracle;
use prompt::{build_prompt, is_season_pack, season_from_caption};
use response::interpret;

/// A free-text understanding backend (LLM or otherwise)
#[async_trait]
pub trait TextOracle: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Answer a prompt with raw text
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

/// Structured identity inferred from free text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityGuess {
    pub kind: MediaKind,
    pub title: String,
    pub year: Option<u16>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

/// An identity guess plus the oracle's supplementary hints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identification {
    pub guess: IdentityGuess,
    /// Caption announced a complete season
    pub season_pack: bool,
    pub audio_hints: Vec<String>,
    pub subtitle_hints: Vec<String>,
    pub genre_hints: Vec<String>,
}

/// Turns filename + caption into an [`Identification`]
#[derive(Clone)]
pub struct IdentityExtractor {
    oracle: Arc<dyn TextOracle>,
}

impl IdentityExtractor {
    pub fn new(oracle: Arc<dyn TextOracle>) -> Self {
        Self { oracle }
    }

    /// Ask the oracle and validate its answer.
    ///
    /// Oracle failures (transport, timeout, malformed or title-less answers)
    /// all end in [`PipelineError::NoIdentity`].
    pub async fn extract(
        &self,
        filename: &str,
        caption: Option<&str>,
    ) -> Result<Identification, PipelineError> {
        let season_pack = is_season_pack(caption);
        let prompt = build_prompt(filename, caption, season_pack);

        info!(
            file = filename,
            oracle = self.oracle.name(),
            season_pack,
            "requesting identity"
        );

        let raw = match self.oracle.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(file = filename, error = %format!("{:#}", e), "oracle request failed");
                return Err(PipelineError::NoIdentity);
            }
        };

        let answer = match interpret(&raw) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(file = filename, error = %format!("{:#}", e), answer = %raw, "unusable oracle answer");
                return Err(PipelineError::NoIdentity);
            }
        };

        let mut guess = answer.guess;
        if season_pack {
            guess.kind = MediaKind::Series;
            if guess.season.is_none() {
                guess.season = caption.and_then(season_from_caption);
            }
        }

        debug!(
            kind = guess.kind.as_str(),
            title = %guess.title,
            year = ?guess.year,
            season = ?guess.season,
            episode = ?guess.episode,
            "identity extracted"
        );

        Ok(Identification {
            guess,
            season_pack,
            audio_hints: answer.audio,
            subtitle_hints: answer.subtitles,
            genre_hints: answer.genres,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Oracle returning a canned answer and recording prompts
    pub(crate) struct FakeOracle {
        answer: anyhow::Result<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeOracle {
        pub(crate) fn answering(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                answer: Err(anyhow::anyhow!("deadline exceeded")),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextOracle for FakeOracle {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.answer {
                Ok(answer) => Ok(answer.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    #[tokio::test]
    async fn test_extract_movie() {
        let oracle = Arc::new(FakeOracle::answering(
            r#"{"details": {"type": "movie", "title": "The Accountant 2", "year": 2025}}"#,
        ));
        let extractor = IdentityExtractor::new(oracle.clone());

        let id = extractor
            .extract("El.Contador.2.(2025).1080p.mkv", None)
            .await
            .unwrap();
        assert_eq!(id.guess.kind, MediaKind::Movie);
        assert_eq!(id.guess.year, Some(2025));
        assert!(!id.season_pack);
        assert!(oracle.prompts.lock().unwrap()[0].contains("El.Contador.2.(2025).1080p.mkv"));
    }

    #[tokio::test]
    async fn test_season_pack_forces_series_and_reads_caption() {
        let oracle = Arc::new(FakeOracle::answering(r#"{"type": "movie", "title": "The Boys"}"#));
        let extractor = IdentityExtractor::new(oracle.clone());

        let id = extractor
            .extract("The.Boys.S04E01.mkv", Some("The Boys Temporada 4 Completa"))
            .await
            .unwrap();
        assert!(id.season_pack);
        assert_eq!(id.guess.kind, MediaKind::Series);
        assert_eq!(id.guess.season, Some(4));
        assert!(oracle.prompts.lock().unwrap()[0].contains("COMPLETE SEASON"));
    }

    #[tokio::test]
    async fn test_oracle_failure_is_no_identity() {
        let extractor = IdentityExtractor::new(Arc::new(FakeOracle::failing()));
        let err = extractor.extract("x.mkv", None).await.unwrap_err();
        assert!(matches!(err, PipelineError::NoIdentity));
    }

    #[tokio::test]
    async fn test_malformed_answer_is_no_identity() {
        let extractor = IdentityExtractor::new(Arc::new(FakeOracle::answering("Sorry!")));
        let err = extractor.extract("x.mkv", None).await.unwrap_err();
        assert!(matches!(err, PipelineError::NoIdentity));
    }
}
