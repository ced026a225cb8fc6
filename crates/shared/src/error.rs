use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    /// The fetch step produced no articles at all.
    #[error("no articles found")]
    NoCandidates,

    /// Articles were found but selection kept none of them.
    #[error("no relevant stories selected from {found} articles")]
    NoSelection { found: usize },

    #[error("{0} is not configured")]
    MissingCredentials(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },
}

impl DigestError {
    /// Whether the run has to stop here.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoCandidates | Self::NoSelection { .. })
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
