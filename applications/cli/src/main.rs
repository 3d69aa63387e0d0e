/// Melodia - command-line client for the music streaming backend
use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use melodia_client::{ClientConfig, FileTokenStore, MusicClient, SessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod format;

/// Filter used when neither `RUST_LOG` nor `--log-level` is given
const DEFAULT_LOG_FILTER: &str = "melodia=info,melodia_client=info";

#[derive(Parser)]
#[command(name = "melodia")]
#[command(about = "Melodia music streaming client", version, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MELODIA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides configuration)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log filter, e.g. "debug" or "melodia_client=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Username or email
        identifier: String,
        #[arg(short, long, env = "MELODIA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Register {
        username: String,
        email: String,
        #[arg(short, long, env = "MELODIA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Create an administrator account instead
        #[arg(long)]
        admin: bool,
    },
    /// End the session and forget the stored token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show the profile of the logged-in user
    Profile,
    /// Check backend health
    Health,
    /// Build a play queue from the catalogue and show its play order
    Queue {
        /// Queue search results instead of the whole catalogue
        #[arg(short, long)]
        query: Option<String>,
        /// Shuffle the play order
        #[arg(short, long)]
        shuffle: bool,
        /// Song to start from (defaults to the first)
        #[arg(long)]
        start: Option<String>,
    },
    /// Browse and manage songs
    #[command(subcommand)]
    Songs(SongsCommand),
    /// Manage favorites
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Administrator tools
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
pub enum SongsCommand {
    /// List all songs
    List,
    /// Search by title, artist or album
    Search { query: String },
    /// Recently added songs
    Recent,
    /// Most played songs
    Popular,
    /// Create song metadata without uploading media
    Create {
        #[command(flatten)]
        track: TrackArgs,
    },
    /// Delete a song
    Delete { id: String },
    /// Upload a media file
    Upload {
        path: PathBuf,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        artist: String,
    },
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List favorite songs
    List,
    /// Mark a song
    Add { id: String },
    /// Unmark a song
    Remove { id: String },
    /// Flip the mark on a song
    Toggle { id: String },
    /// Show whether a song is marked
    Check { id: String },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// User and song totals
    Dashboard,
    /// List all users
    Users,
    /// Enable or disable an account
    SetStatus {
        id: String,
        #[arg(action = ArgAction::Set)]
        active: bool,
    },
    /// Delete an account
    DeleteUser { id: String },
    /// Replace a song's metadata
    UpdateSong {
        id: String,
        #[command(flatten)]
        track: TrackArgs,
    },
    /// Cache statistics
    CacheStats,
    /// Clear the rate limit of a user or address
    ResetRateLimit { identifier: String },
}

/// Song metadata flags
#[derive(clap::Args)]
pub struct TrackArgs {
    #[arg(short, long)]
    title: String,
    #[arg(short, long)]
    artist: String,
    /// Media URL
    #[arg(long)]
    file_url: String,
    #[arg(long)]
    album: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    /// Duration in seconds
    #[arg(long)]
    duration: Option<f64>,
    #[arg(long)]
    cover_image_url: Option<String>,
}

impl From<TrackArgs> for melodia_core::NewTrack {
    fn from(args: TrackArgs) -> Self {
        Self {
            title: args.title,
            artist: args.artist,
            album: args.album,
            genre: args.genre,
            duration: args.duration,
            file_url: args.file_url,
            cover_image_url: args.cover_image_url,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| match cli.log_level.as_deref() {
            Some(level) => tracing_subscriber::EnvFilter::try_new(level),
            None => tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER),
        })
        .context("Invalid log filter")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config =
        ClientConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    tracing::debug!(api = %config.api_base_url, "Configuration loaded");

    let tokens = Arc::new(FileTokenStore::new(config.resolved_token_path()));
    let client = MusicClient::new(&config, tokens).context("Failed to create client")?;
    let session = SessionStore::new(client);

    commands::run(cli.command, &session, cli.json).await
}
