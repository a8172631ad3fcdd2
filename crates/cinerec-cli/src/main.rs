//! cinerec - terminal client for a movie-recommendation backend.

/// Application configuration (TOML).
mod config;

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use cinerec_api::backend::{GENRES, RecommendClient, SearchMode, is_known_genre};
use cinerec_tui::marquee::PosterMarquee;
use cinerec_tui::search_panel::{RequestState, SearchPanel, mode_label};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the backend base URL from config.
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive terminal client.
    Tui,
    /// Run a single recommendation query.
    Recommend(RecommendArgs),
    /// Show the popular-movies banner contents.
    Popular,
    /// List the genres accepted in genre mode.
    Genres,
    /// Inspect or create the config file.
    Config(ConfigCommand),
}

/// Search mode argument.
#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Similar movies to a title.
    Movie,
    /// Movies featuring an actor.
    Actor,
    /// Top movies in a genre.
    Genre,
    /// Collaborative recommendations for a user ID.
    User,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Movie => Self::Movie,
            ModeArg::Actor => Self::Actor,
            ModeArg::Genre => Self::Genre,
            ModeArg::User => Self::User,
        }
    }
}

/// Arguments for the `recommend` subcommand.
#[derive(clap::Args)]
struct RecommendArgs {
    /// Search mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Movie)]
    mode: ModeArg,

    /// Title, actor name, genre, or user ID depending on --mode.
    #[arg(long, default_value = "")]
    query: String,
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
    /// Print the effective configuration.
    Show,
    /// Write a default config file if none exists.
    Init,
}

/// Resolves the backend URL: `--base-url` first, then config.
///
/// # Errors
///
/// Returns an error if the configured URL is not a valid URL.
fn resolve_base_url(flag: Option<&Url>, config: &AppConfig) -> Result<Url> {
    if let Some(url) = flag {
        return Ok(url.clone());
    }
    Url::parse(&config.backend.base_url)
        .with_context(|| format!("invalid backend.base_url: {}", config.backend.base_url))
}

/// Builds a `RecommendClient` against `base_url`.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
fn build_client(base_url: Url) -> Result<RecommendClient> {
    RecommendClient::builder()
        .base_url(base_url)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build backend client")
}

/// Runs the `recommend` subcommand.
///
/// # Errors
///
/// Returns an error with the user-visible message if validation or the
/// request fails.
#[allow(clippy::future_not_send)]
#[instrument(skip_all)]
async fn run_recommend(args: &RecommendArgs, client: &RecommendClient) -> Result<()> {
    let mode = SearchMode::from(args.mode);
    if mode == SearchMode::Genre && !args.query.is_empty() && !is_known_genre(&args.query) {
        bail!(
            "unknown genre '{}'. Run `cinerec genres` for the accepted names",
            args.query
        );
    }

    let mut panel = SearchPanel::new();
    panel.set_search_mode(mode);
    panel.set_query(args.query.as_str());
    panel.submit(client).await;

    match panel.request_state() {
        RequestState::Idle => {
            tracing::info!("Nothing to search: query is blank");
            Ok(())
        }
        RequestState::Failed(message) => bail!("{message}"),
        RequestState::Loading => bail!("request did not complete"),
        RequestState::Success(_) => {
            let cards = panel.cards();
            tracing::info!("{} ({}): {}", mode_label(mode), mode, panel.query());
            if cards.is_empty() {
                tracing::info!("No recommendations");
            } else {
                tracing::info!("Results:");
            }
            for (i, card) in cards.iter().enumerate() {
                tracing::info!(
                    "{:>2}. {}  [{}]",
                    i.saturating_add(1),
                    card.title,
                    card.poster.text()
                );
            }
            tracing::info!("Total: {} recommendations", cards.len());
            Ok(())
        }
    }
}

/// Runs the `popular` subcommand.
///
/// Fetch failures are logged by the marquee and yield an empty strip.
#[allow(clippy::future_not_send)]
#[instrument(skip_all)]
async fn run_popular(client: &RecommendClient) {
    let mut marquee = PosterMarquee::new();
    marquee.on_mount(client).await;

    for movie in marquee.popular_movies() {
        tracing::info!("{}\t{}", movie.title, movie.poster_path);
    }
    tracing::info!("Total: {} posters in strip", marquee.popular_movies().len());
}

/// Runs the `genres` subcommand.
fn run_genres() {
    for genre in GENRES {
        tracing::info!("{genre}");
    }
}

/// Runs the `config show` / `config init` subcommands.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or written.
#[instrument(skip_all)]
fn run_config(command: &ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    match command {
        ConfigSubcommands::Show => {
            let config = AppConfig::load(&config_path).context("failed to load config")?;
            tracing::info!("# {}", config_path.display());
            for line in config.to_toml()?.lines() {
                tracing::info!("{line}");
            }
        }
        ConfigSubcommands::Init => {
            if config_path.exists() {
                tracing::info!("Config already exists: {}", config_path.display());
            } else {
                AppConfig::default()
                    .save(&config_path)
                    .context("failed to save config")?;
                tracing::info!("Wrote default config to {}", config_path.display());
            }
        }
    }
    Ok(())
}

/// Runs the `tui` subcommand.
///
/// # Errors
///
/// Returns an error if the terminal UI fails.
#[instrument(skip_all)]
async fn run_tui(client: RecommendClient, config: &AppConfig) -> Result<()> {
    tracing::info!(base_url = %client.base_url(), "Launching TUI");
    cinerec_tui::run_app(Arc::new(client), config.ui.marquee_tick())
        .await
        .context("terminal client failed")
}

/// Opens the TUI log file in append mode, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_log_file(dir: Option<&PathBuf>) -> Result<File> {
    let path = resolve_log_path(dir).context("failed to resolve log path")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Initializes tracing. Logs go to `log_file` when given (TUI mode), stdout otherwise.
fn init_tracing(log_file: Option<File>) {
    let (writer, ansi) = match log_file {
        Some(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false);

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
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_ref();

    let log_file = match cli.command {
        Commands::Tui => Some(open_log_file(dir)?),
        _ => None,
    };
    init_tracing(log_file);

    let load_config = || -> Result<AppConfig> {
        let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
        AppConfig::load(&config_path).context("failed to load config")
    };

    match &cli.command {
        Commands::Genres => {
            run_genres();
            Ok(())
        }
        Commands::Config(cmd) => run_config(&cmd.command, dir),
        Commands::Recommend(args) => {
            let config = load_config()?;
            let client = build_client(resolve_base_url(cli.base_url.as_ref(), &config)?)?;
            run_recommend(args, &client).await
        }
        Commands::Popular => {
            let config = load_config()?;
            let client = build_client(resolve_base_url(cli.base_url.as_ref(), &config)?)?;
            run_popular(&client).await;
            Ok(())
        }
        Commands::Tui => {
            let config = load_config()?;
            let client = build_client(resolve_base_url(cli.base_url.as_ref(), &config)?)?;
            run_tui(client, &config).await
        }
    }
}
