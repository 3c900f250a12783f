//! theoneapi - command-line front end for The One API client.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use theoneapi_api::{Movie, Quote, RequestParams, TheOneApiClient};

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "THE_ONE_API_KEY";

/// Header row for movie listings.
const MOVIE_HEADER: &str = "ID\t\t\t\tRuntime\tAwards\tName";

/// Header row for quote listings.
const QUOTE_HEADER: &str = "ID\t\t\t\tMovie\t\t\t\tDialog";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// API key (default: $THE_ONE_API_KEY, then config file).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Override the API base URL.
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query movies.
    Movie(MovieCommand),
    /// Query quotes.
    Quote(QuoteCommand),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieCommand {
    /// Movie subcommand to run.
    #[command(subcommand)]
    command: MovieSubcommands,
}

/// Available movie subcommands.
#[derive(Subcommand)]
enum MovieSubcommands {
    /// List movies.
    List(ListArgs),
    /// Find one movie by id.
    Find(IdArgs),
}

/// Arguments for the `quote` subcommand.
#[derive(clap::Args)]
struct QuoteCommand {
    /// Quote subcommand to run.
    #[command(subcommand)]
    command: QuoteSubcommands,
}

/// Available quote subcommands.
#[derive(Subcommand)]
enum QuoteSubcommands {
    /// List quotes.
    List(ListArgs),
    /// Find one quote by id.
    Find(IdArgs),
    /// List the quotes of one movie.
    ListForMovie(IdArgs),
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store the API key in the config file.
    SetKey(SetKeyArgs),
    /// Show the resolved config file path and settings.
    Show,
}

/// Arguments for `list` subcommands.
#[derive(clap::Args)]
struct ListArgs {
    /// Maximum number of items per page.
    #[arg(long)]
    limit: Option<u32>,
    /// Page number (1-based).
    #[arg(long)]
    page: Option<u32>,
    /// Sort expression (e.g. "name:asc").
    #[arg(long)]
    sort: Option<String>,
}

impl ListArgs {
    /// Converts the flags into query parameters.
    fn to_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        if let Some(limit) = self.limit {
            params.insert(String::from("limit"), limit.to_string());
        }
        if let Some(page) = self.page {
            params.insert(String::from("page"), page.to_string());
        }
        if let Some(ref sort) = self.sort {
            params.insert(String::from("sort"), sort.clone());
        }
        params
    }
}

/// Arguments for commands addressing one resource.
#[derive(clap::Args)]
struct IdArgs {
    /// Resource id (e.g. "5cd95395de30eff6ebccde57").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// API key to store.
    key: String,
}

/// Picks the API key: CLI flag, then environment, then config file.
///
/// # Errors
///
/// Returns an error if no source provides a key.
fn resolve_api_key(
    cli_key: Option<&str>,
    env_key: Option<String>,
    config: &AppConfig,
) -> Result<String> {
    if let Some(key) = cli_key {
        return Ok(String::from(key));
    }
    if let Some(key) = env_key {
        return Ok(key);
    }
    if let Some(ref key) = config.api.key {
        return Ok(key.clone());
    }
    bail!(
        "no API key: pass --api-key, set {API_KEY_ENV}, or run `theoneapi config set-key <KEY>`"
    );
}

/// Builds the API client from CLI flags and config.
///
/// # Errors
///
/// Returns an error if config loading fails, no key is available,
/// the configured base URL is invalid, or the client fails to build.
fn build_client(cli: &Cli) -> Result<TheOneApiClient> {
    let config_path =
        resolve_config_path(cli.dir.as_deref()).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let api_key = resolve_api_key(
        cli.api_key.as_deref(),
        std::env::var(API_KEY_ENV).ok(),
        &config,
    )?;

    let mut builder = TheOneApiClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(ref url) = cli.base_url {
        builder = builder.base_url(url.clone());
    } else if let Some(ref url) = config.api.base_url {
        let url = Url::parse(url).with_context(|| format!("invalid base_url in config: {url}"))?;
        builder = builder.base_url(url);
    }

    if let Some(secs) = config.api.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().context("failed to build One API client")
}

/// Logs a table of movies.
fn print_movies(movies: &[Movie]) {
    tracing::info!("{}", MOVIE_HEADER);
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}/{}\t{}",
            movie.id,
            movie.runtime_in_minutes,
            movie.academy_award_wins,
            movie.academy_award_nominations,
            movie.name,
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

/// Logs a table of quotes.
fn print_quotes(quotes: &[Quote]) {
    tracing::info!("{}", QUOTE_HEADER);
    for quote in quotes {
        tracing::info!("{}\t{}\t{}", quote.id, quote.movie, quote.dialog.trim());
    }
    tracing::info!("Total: {} quotes", quotes.len());
}

/// Runs `movie list`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_movie_list(cli: &Cli, args: &ListArgs) -> Result<()> {
    let client = build_client(cli)?;
    let movies = client
        .movie()
        .list_with(args.to_params())
        .await
        .context("movie list request failed")?;
    print_movies(&movies);
    Ok(())
}

/// Runs `movie find`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_movie_find(cli: &Cli, args: &IdArgs) -> Result<()> {
    let client = build_client(cli)?;
    let movie = client
        .movie()
        .find(&args.id)
        .await
        .context("movie find request failed")?;
    match movie {
        Some(movie) => print_movies(&[movie]),
        None => tracing::info!("No movie found with id {}", args.id),
    }
    Ok(())
}

/// Runs `quote list`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_quote_list(cli: &Cli, args: &ListArgs) -> Result<()> {
    let client = build_client(cli)?;
    let quotes = client
        .quote()
        .list_with(args.to_params())
        .await
        .context("quote list request failed")?;
    print_quotes(&quotes);
    Ok(())
}

/// Runs `quote find`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_quote_find(cli: &Cli, args: &IdArgs) -> Result<()> {
    let client = build_client(cli)?;
    let quote = client
        .quote()
        .find(&args.id)
        .await
        .context("quote find request failed")?;
    match quote {
        Some(quote) => print_quotes(&[quote]),
        None => tracing::info!("No quote found with id {}", args.id),
    }
    Ok(())
}

/// Runs `quote list-for-movie`.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_quote_list_for_movie(cli: &Cli, args: &IdArgs) -> Result<()> {
    let client = build_client(cli)?;
    let quotes = client
        .quote()
        .list_for_movie(&args.id)
        .await
        .context("quote list-for-movie request failed")?;
    print_quotes(&quotes);
    Ok(())
}

/// Runs `config set-key`.
///
/// # Errors
///
/// Returns an error if the config cannot be read or written.
fn run_config_set_key(dir: Option<&Path>, args: &SetKeyArgs) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    config.api.key = Some(args.key.clone());
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("API key saved to {}", config_path.display());
    Ok(())
}

/// Runs `config show`. The key itself is never printed.
///
/// # Errors
///
/// Returns an error if the config cannot be read.
fn run_config_show(dir: Option<&Path>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    tracing::info!("Config file: {}", config_path.display());
    tracing::info!(
        "API key: {}",
        if config.api.key.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    tracing::info!(
        "Base URL: {}",
        config.api.base_url.as_deref().unwrap_or("(default)")
    );
    tracing::info!(
        "Timeout: {}",
        config
            .api
            .timeout_secs
            .map_or_else(|| String::from("-"), |s| format!("{s}s"))
    );
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Movie(ref movie) => match movie.command {
            MovieSubcommands::List(ref args) => run_movie_list(&cli, args).await,
            MovieSubcommands::Find(ref args) => run_movie_find(&cli, args).await,
        },
        Commands::Quote(ref quote) => match quote.command {
            QuoteSubcommands::List(ref args) => run_quote_list(&cli, args).await,
            QuoteSubcommands::Find(ref args) => run_quote_find(&cli, args).await,
            QuoteSubcommands::ListForMovie(ref args) => {
                run_quote_list_for_movie(&cli, args).await
            }
        },
        Commands::Config(ref config) => match config.command {
            ConfigSubcommands::SetKey(ref args) => run_config_set_key(cli.dir.as_deref(), args),
            ConfigSubcommands::Show => run_config_show(cli.dir.as_deref()),
        },
    }
}
