// Public modules
pub mod config;
pub mod digest;
pub mod error;
pub mod insights;
pub mod io;
pub mod mailer;
pub mod models;
pub mod newsapi;
pub mod pipeline;
pub mod scoring;
pub mod selection;

// Re-export commonly used types
pub use config::{Config, Rubric};
pub use digest::DigestRenderer;
pub use error::DigestError;
pub use insights::classify;
pub use io::{digest_filename, save_digest};
pub use mailer::{deliver, EmailMessage, SendGridMailer};
pub use models::{ArticleRecord, Digest, DigestEntry, DigestTemplate, Insight, ScoredArticle, Story};
pub use newsapi::{fallback_articles, NewsApiClient};
pub use pipeline::{build_digest, run, RunSummary};
pub use scoring::Scorer;
pub use selection::select;
