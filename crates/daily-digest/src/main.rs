use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use shared::{fallback_articles, run, Config, NewsApiClient};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daily-digest")]
#[command(about = "Build, save and e-mail the daily OpenAI Frontier news digest")]
struct Args {
    /// Number of days to look back for articles
    #[arg(short, long, default_value = "2")]
    days: i64,

    /// Directory to save the digest in (defaults to DIGEST_FOLDER)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Send the digest to this address instead of RECIPIENT_EMAIL
    #[arg(short, long)]
    recipient: Option<String>,

    /// Save the digest without e-mailing it
    #[arg(long)]
    no_email: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(recipient) = args.recipient {
        config.recipient_email = Some(recipient);
    }
    let digest_dir = args.output_dir.unwrap_or_else(|| config.digest_dir.clone());

    let now = Utc::now();
    let today = now.date_naive();
    info!(date = %today, "OpenAI Frontier Daily Digest starting");

    println!("\n🔎 Searching for {} news...", config.rubric.topic);
    let articles = match &config.newsapi_key {
        Some(key) => {
            let client = NewsApiClient::new(key.clone()).context("Failed to create NewsAPI client")?;
            client
                .search(&config.search_queries, now - Duration::days(args.days), now)
                .await
        }
        None => {
            warn!("NEWSAPI_KEY not set, using the setup notice as the only article");
            fallback_articles(now)
        }
    };
    println!("✓ Found {} articles", articles.len());

    println!("\n📝 Building, saving and sending the digest...");
    let summary = run(articles, &config, &digest_dir, !args.no_email, now)
        .await
        .context("Digest run aborted")?;

    println!("\n{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    println!("{}", summary);
    println!();

    if summary.delivered {
        if let Some(recipient) = &config.recipient_email {
            println!("✅ Digest successfully sent to {}", recipient);
        }
    } else {
        println!("⚠️  Digest was not e-mailed");
        if let Some(path) = &summary.saved_path {
            println!("   View digest at: {}", path.display());
        }
    }
    println!("{}", "=".repeat(60));

    Ok(())
}
