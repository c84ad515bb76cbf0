// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tubesync CLI
//!
//! Resolves YouTube video/channel references, browses a channel's recent
//! uploads, and mirrors user/channel metadata into Firestore.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubesync::{
    auth::AuthSession,
    config::Config,
    db::{MetadataStore, RECENT_CHANNELS_LIMIT},
    error::AppError,
    extract::{self, Identifier},
    player,
    services::{ChannelLibrary, YouTubeClient},
    time_utils,
};

#[derive(Parser)]
#[command(name = "tubesync", about = "Mirror YouTube channel metadata into Firestore")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a video URL or id and print the canonical watch URL
    Play {
        input: String,
        /// Start offset in seconds
        #[arg(long, default_value_t = 0)]
        start: u32,
    },
    /// Look up a channel, store its summary and print it
    Channel { input: String },
    /// List a channel's most recent uploads
    Videos {
        input: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// List recently added channels from the store
    Channels,
    /// Write the current session profile to the store
    SyncProfile,
    /// Follow profile and channel changes until ctrl-c
    Watch,
}

/// Wired collaborators for the commands that reach the network.
struct App {
    store: MetadataStore,
    library: ChannelLibrary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    match Cli::parse().command {
        // Playback hand-off is pure resolution; no collaborators needed.
        Command::Play { input, start } => match extract::extract(&input) {
            Identifier::Video(id) => {
                println!("{}", player::watch_url(&id, start));
            }
            _ => return Err(AppError::Unrecognized(input).into()),
        },
        Command::Channel { input } => {
            let app = App::connect().await?;
            let summary = app.library.add_channel(&input).await?;
            println!("{} ({})", summary.channel_name, summary.channel_id);
            println!("  subscribers: {}", summary.subscriber_count);
            if !summary.description.is_empty() {
                println!("  {}", summary.description);
            }
        }
        Command::Videos { input, limit } => {
            let app = App::connect().await?;
            let videos = app.library.recent_videos(&input, limit).await?;
            if videos.is_empty() {
                println!("No videos found");
            }
            for video in videos {
                println!("{}  {}  {}", video.published_at, video.video_id, video.title);
            }
        }
        Command::Channels => {
            let app = App::connect().await?;
            for channel in app.store.list_recent_channels(RECENT_CHANNELS_LIMIT).await? {
                println!(
                    "{}  {} ({})",
                    time_utils::millis_to_rfc3339(channel.created_at_millis),
                    channel.channel_name,
                    channel.channel_id
                );
            }
        }
        Command::SyncProfile => {
            let app = App::connect().await?;
            let profile = app.store.sync_session_profile().await?;
            println!("Synced profile for {}", profile.user_id);
        }
        Command::Watch => {
            let app = App::connect().await?;
            watch(&app.store).await?;
        }
    }

    Ok(())
}

impl App {
    /// Load configuration and wire the store and catalog clients once.
    async fn connect() -> anyhow::Result<App> {
        let config = Config::from_env()?;
        let session = AuthSession::from_env();

        let store = MetadataStore::new(&config.gcp_project_id, session).await?;
        let youtube = YouTubeClient::new(config.youtube_api_key.clone())?;
        let library = ChannelLibrary::new(
            youtube,
            store.clone(),
            config.fallback_channel_id.clone(),
        );

        Ok(App { store, library })
    }
}

/// Hold both change subscriptions until ctrl-c, then release them.
async fn watch(store: &MetadataStore) -> anyhow::Result<()> {
    // Mirror the session profile first so the listener has a document to
    // report immediately.
    let profile = store.sync_session_profile().await?;
    tracing::info!(user_id = %profile.user_id, "Session profile synced");

    let profile_sub = store
        .subscribe_user_profile(
            |profile| {
                println!(
                    "[profile] {} last login {}",
                    profile.user_id,
                    time_utils::millis_to_rfc3339(profile.last_login_millis)
                );
            },
            |e| tracing::warn!(error = %e, "Profile subscription failed"),
        )
        .await?;

    let channels_sub = store
        .subscribe_recent_channels(
            RECENT_CHANNELS_LIMIT,
            |channels| {
                println!("[channels] {} tracked", channels.len());
                for channel in channels {
                    println!("  {} ({})", channel.channel_name, channel.channel_id);
                }
            },
            |e| tracing::warn!(error = %e, "Channel subscription failed"),
        )
        .await?;

    tracing::info!("Watching for changes, press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    // Both registrations end with this command's scope.
    profile_sub.cancel().await?;
    channels_sub.cancel().await?;
    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tubesync=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
