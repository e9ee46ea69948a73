//! # Marquee
//!
//! Terminal front end for the movie home screen: the now-playing hero,
//! the weekly trending rail and the infinitely paged popular grid.
//!
//! Configuration comes from `MARQUEE_*` environment variables, an optional
//! `.env` file and an optional TOML file. Logs go to stderr and honour
//! `RUST_LOG`.

mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use marquee_config::{CatalogConfig, ConfigLoad, ConfigLoader};
use marquee_core::{
    CatalogClient, Feed, FeedSource, FetchOutcome, HomeOptions, HomeScreen,
    PageSource, PaginatedFeed,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(about = "Browse now playing, trending and popular movies")]
struct Cli {
    /// Env file to load before reading MARQUEE_* variables
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// TOML config file (defaults to MARQUEE_CONFIG or ./marquee.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load every home screen section and print it
    Home,
    /// Page through popular movies
    Popular {
        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print this week's trending movies
    Trending,
    /// Follow the hero carousel as it autoplays (Ctrl-C stops)
    Watch {
        /// Stop after this many slides
        #[arg(long, default_value_t = 5)]
        ticks: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,marquee_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Arc::new(load_config(&cli)?);
    let client = Arc::new(
        CatalogClient::new(Arc::clone(&config))
            .context("failed to build catalog client")?,
    );

    match cli.command {
        Command::Home => run_home(client, &config).await,
        Command::Popular { pages } => {
            run_popular(client, &config, pages).await
        }
        Command::Trending => run_trending(client, &config).await,
        Command::Watch { ticks } => run_watch(client, &config, ticks).await,
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CatalogConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }

    let ConfigLoad {
        config,
        config_path,
        ..
    } = loader.load().context("failed to load configuration")?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "loaded config file");
    }
    Ok(config)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

async fn run_home(
    client: Arc<CatalogClient>,
    config: &CatalogConfig,
) -> anyhow::Result<()> {
    let mut screen = HomeScreen::new(client, HomeOptions::from_config(config));
    screen.load().await;

    let images = config.image_base.as_str();
    print_lines(render::hero_section(screen.hero(), images));
    println!();
    print_lines(render::trending_section(screen.trending(), images));
    println!();
    print_lines(render::popular_section(
        &screen.popular(),
        images,
        screen.popular_cache().next_page(),
        screen.popular_error(),
    ));

    screen.unmount();
    Ok(())
}

async fn run_popular(
    client: Arc<CatalogClient>,
    config: &CatalogConfig,
    pages: u32,
) -> anyhow::Result<()> {
    let feed = PaginatedFeed::new(FeedSource::new(client, Feed::Popular));

    for _ in 0..pages {
        match feed.fetch_next().await {
            FetchOutcome::Appended { page, items } => {
                debug!(page, items, "popular page appended");
            }
            FetchOutcome::Exhausted => {
                info!("no more popular pages");
                break;
            }
            FetchOutcome::Failed(err) => {
                anyhow::bail!("failed to load popular movies: {err}");
            }
            FetchOutcome::Busy | FetchOutcome::Discarded => break,
        }
    }

    let movies = feed.snapshot().await;
    if movies.is_empty() {
        println!("No popular movies found");
        return Ok(());
    }
    print_lines(render::numbered(&movies, config.image_base.as_str()));
    Ok(())
}

async fn run_trending(
    client: Arc<CatalogClient>,
    config: &CatalogConfig,
) -> anyhow::Result<()> {
    let source = FeedSource::new(client, Feed::TrendingWeek);
    let page = source
        .fetch_page(1)
        .await
        .context("Failed to load trending movies...")?;

    let mut movies = page.into_items();
    movies.truncate(config.trending_limit);
    if movies.is_empty() {
        println!("No trending movies found");
        return Ok(());
    }
    print_lines(render::numbered(&movies, config.image_base.as_str()));
    Ok(())
}

async fn run_watch(
    client: Arc<CatalogClient>,
    config: &CatalogConfig,
    ticks: u32,
) -> anyhow::Result<()> {
    let mut screen = HomeScreen::new(client, HomeOptions::from_config(config));
    screen.load().await;

    let images = config.image_base.as_str();
    let Some(hero) = screen.hero().ready() else {
        print_lines(render::hero_section(screen.hero(), images));
        return Ok(());
    };
    print_lines(render::hero_slide(hero, images));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut shown = 0;
    while shown < ticks {
        let tick = tokio::select! {
            biased;
            _ = &mut ctrl_c => None,
            tick = screen.next_autoplay_tick() => tick,
        };
        let Some(tick) = tick else {
            break;
        };
        if !screen.handle_carousel(tick) {
            continue;
        }
        if let Some(hero) = screen.hero().ready() {
            print_lines(render::hero_slide(hero, images));
        }
        shown += 1;
    }

    if shown < ticks {
        warn!(shown, "watch interrupted");
    }
    screen.unmount();
    Ok(())
}
