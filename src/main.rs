//! Course-Scout main entry point
//!
//! This is the command-line interface for crawling the course catalog,
//! indexing it, and serving keyword search.

use anyhow::Context;
use clap::{Parser, Subcommand};
use course_scout::config::{load_config_with_hash, Config};
use course_scout::crawler::crawl;
use course_scout::index::{Ingestor, SqliteVectorStore, VectorStore};
use course_scout::llm::GeminiClient;
use course_scout::output::{
    format_course_report, format_crawl_summary, format_index_stats, read_json, write_json,
};
use course_scout::query::{is_blank, CourseSearch, BLANK_KEYWORD_MESSAGE};
use course_scout::server::{serve, AppState};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Course-Scout: course catalog crawler and keyword search
///
/// Crawls a paginated course catalog, indexes every course into a local
/// vector store, and answers keyword queries with a language model.
#[derive(Parser, Debug)]
#[command(name = "course-scout")]
#[command(version = "1.0.0")]
#[command(about = "Course catalog crawler and keyword search", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "course-scout.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the catalog and print every course
    Crawl {
        /// Also write the courses to a JSON file
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },

    /// Crawl the catalog and rebuild the search index
    Ingest {
        /// Leave the index alone if the crawl did not reach the last page
        #[arg(long)]
        require_complete: bool,

        /// Index courses from a JSON export instead of crawling
        #[arg(long, value_name = "PATH", conflicts_with = "require_complete")]
        from_json: Option<PathBuf>,
    },

    /// Serve the search API and web page
    Serve,

    /// Answer a single keyword query
    Ask {
        /// Keyword to search for
        keyword: String,
    },

    /// Validate config and show what would run
    Check,

    /// Show index statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context(format!("loading {}", cli.config.display()));
        }
    };

    match cli.command {
        Command::Crawl { json } => handle_crawl(&config, json.as_deref()).await,
        Command::Ingest {
            require_complete,
            from_json,
        } => handle_ingest(&config, &config_hash, require_complete, from_json.as_deref()).await,
        Command::Serve => handle_serve(&config).await,
        Command::Ask { keyword } => handle_ask(&config, &keyword).await,
        Command::Check => handle_check(&config, &config_hash),
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("course_scout=info,warn"),
            1 => EnvFilter::new("course_scout=debug,info"),
            2 => EnvFilter::new("course_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn open_store(config: &Config) -> anyhow::Result<Arc<SqliteVectorStore>> {
    let path = Path::new(&config.index.database_path);
    let store = SqliteVectorStore::new(path)
        .with_context(|| format!("opening index at {}", path.display()))?;
    Ok(Arc::new(store))
}

fn build_search(config: &Config) -> anyhow::Result<CourseSearch> {
    let client = Arc::new(GeminiClient::from_config(&config.llm)?);
    let store = open_store(config)?;
    Ok(CourseSearch::new(client.clone(), store, client).with_top_k(config.index.top_k))
}

/// Handles `crawl`: prints the course report and optionally exports JSON
async fn handle_crawl(config: &Config, json: Option<&Path>) -> anyhow::Result<()> {
    tracing::info!("Starting crawl of {}", config.crawler.base_url);
    let outcome = crawl(config).await?;

    print!("{}", format_course_report(&outcome.records));
    println!("{}", format_crawl_summary(&outcome));

    if let Some(path) = json {
        write_json(&outcome.records, path)?;
        println!("✓ Courses written to: {}", path.display());
    }

    Ok(())
}

/// Handles `ingest`: crawls (or reads an export) and rebuilds the index
async fn handle_ingest(
    config: &Config,
    config_hash: &str,
    require_complete: bool,
    from_json: Option<&Path>,
) -> anyhow::Result<()> {
    let records = match from_json {
        Some(path) => {
            tracing::info!("Reading courses from {}", path.display());
            read_json(path)?
        }
        None => {
            let outcome = crawl(config).await?;
            println!("{}", format_crawl_summary(&outcome));
            if require_complete && !outcome.is_complete() {
                anyhow::bail!("crawl did not reach the end of the catalog; index left unchanged");
            }
            outcome.into_records()
        }
    };

    let embedder = Arc::new(GeminiClient::from_config(&config.llm)?);
    let ingestor = Ingestor::new(embedder, open_store(config)?)
        .with_batch_size(config.index.embed_batch_size)
        .with_config_hash(config_hash);

    let report = ingestor.reindex(&records).await?;
    if report.run_id.is_none() {
        println!("No courses found; index left unchanged");
    } else {
        println!(
            "✓ Indexed {} courses in {} batches ({} duplicates dropped)",
            report.documents, report.batches, report.duplicates
        );
    }

    Ok(())
}

/// Handles `serve`: runs the HTTP API until Ctrl-C
async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;

    let search = build_search(config)?;
    serve(bind, AppState::new(search)).await?;
    Ok(())
}

/// Handles `ask`: answers one keyword on stdout
async fn handle_ask(config: &Config, keyword: &str) -> anyhow::Result<()> {
    if is_blank(keyword) {
        println!("{}", BLANK_KEYWORD_MESSAGE);
        return Ok(());
    }

    let search = build_search(config)?;
    println!("{}", search.answer(keyword).await);
    Ok(())
}

/// Handles `check`: validates config and shows what would run
fn handle_check(config: &Config, config_hash: &str) -> anyhow::Result<()> {
    println!("=== Course-Scout Configuration ===\n");

    println!("Crawler:");
    println!("  Catalog: {}", config.crawler.base_url);
    println!("  Site origin: {}", config.crawler.site_origin);
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    println!("  Detail concurrency: {}", config.crawler.detail_concurrency);
    println!("  On detail error: {:?}", config.crawler.on_detail_error);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nIndex:");
    println!("  Database: {}", config.index.database_path);
    println!("  Top k: {}", config.index.top_k);
    println!("  Embed batch size: {}", config.index.embed_batch_size);

    println!("\nLanguage Model:");
    println!("  Endpoint: {}", config.llm.base_url);
    println!("  Embedding model: {}", config.llm.embedding_model);
    println!("  Generation model: {}", config.llm.generation_model);
    let key_state = match std::env::var(&config.llm.api_key_env) {
        Ok(key) if !key.trim().is_empty() => "set",
        _ => "NOT SET",
    };
    println!("  API key (${}): {}", config.llm.api_key_env, key_state);

    println!("\nServer:");
    println!("  Bind: {}", config.server.bind);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!("✓ Would start crawling at {} (page 1)", config.crawler.base_url);

    Ok(())
}

/// Handles `stats`: shows document count and the last ingest
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.index.database_path);

    let store = open_store(config)?;
    let latest = store.latest_ingest()?;
    print!("{}", format_index_stats(store.count()?, latest.as_ref()));

    Ok(())
}
