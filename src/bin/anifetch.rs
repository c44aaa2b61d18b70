//! anifetch - media mapping and magnet lookup CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use anifetch::config::Config;
use anifetch::{
    AniZipClient, BatchFetcher, CachedResolver, Namespace, NyaaClient, download_torrent_files,
    resolve_magnets,
};

/// Anime mapping and torrent lookup client
#[derive(Parser)]
#[command(name = "anifetch")]
#[command(version)]
#[command(about = "Look up anime id mappings and resolve torrent magnets")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "ANIFETCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the media record for an id as JSON
    Mappings {
        /// Id namespace (anilist, mal, kitsu, ...)
        namespace: Namespace,
        /// Id within the namespace
        id: i64,
    },

    /// Resolve torrent pages into magnet links, one per line
    Magnets {
        /// Torrent page URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Download .torrent files into a directory
    Torrents {
        /// Destination directory
        #[arg(short, long)]
        dest: PathBuf,
        /// Torrent file URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Mappings { namespace, id } => {
            let client = AniZipClient::from_config(&config.anizip_config())?;
            let resolver = CachedResolver::new(client, &config.cache_config());
            let media = resolver.resolve_cached(&namespace, id).await?;
            println!("{}", serde_json::to_string_pretty(media.as_ref())?);
        }

        Command::Magnets { urls } => {
            let client = NyaaClient::with_timeout(config.nyaa_timeout())?;
            let fetcher = BatchFetcher::new(config.batch_config());
            let magnets = resolve_magnets(&client, &fetcher, &urls).await?;
            for magnet in magnets {
                println!("{magnet}");
            }
        }

        Command::Torrents { dest, urls } => {
            let client = NyaaClient::with_timeout(config.nyaa_timeout())?;
            let paths = download_torrent_files(&client, &urls, &dest).await?;
            info!(count = paths.len(), dest = %dest.display(), "torrent files saved");
            for path in paths {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
