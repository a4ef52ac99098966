//! Pipeline outcome taxonomy

/// Why a file did not produce a post.
///
/// `NoIdentity` and `NotFound` are the two expected terminal outcomes;
/// everything else is carried as `Unexpected` with its full context chain.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The text oracle could not produce a usable identity guess
    #[error("could not identify the release from its filename or caption")]
    NoIdentity,

    /// No catalog candidate cleared the confidence threshold
    #[error("no catalog match found for '{title}'")]
    NotFound { title: String },

    /// Any other collaborator fault
    #[error("unexpected failure: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl PipelineError {
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
        }
    }

    /// Short machine-friendly outcome name, used in logs and batch summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoIdentity => "no-identity",
            Self::NotFound { .. } => "not-found",
            Self::Unexpected(_) => "unexpected",
        }
    }
}
