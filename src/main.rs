use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use herald::course::audience::AudienceProvider;
use herald::course::sqlite::SqliteCourseStore;
use herald::forum::client::HttpForumClient;
use herald::forum::subscriptions;
use herald::notify::dispatch::{EventBus, HttpEventBus};
use herald::notify::engine::NotificationEngine;
use herald::notify::event::DiscussionEvent;
use herald::notify::types::UserNotification;

mod config;

/// Herald: notification fan-out for course discussion forums.
///
/// Resolves who should hear about new threads, responses, and comments,
/// and hands the resulting notifications to the event bus.
#[derive(Parser)]
#[command(name = "herald", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the course mirror database
    Init,

    /// Re-run the fan-out for a recorded discussion event
    Replay {
        /// Path to the recorded event JSON
        event_file: PathBuf,

        /// Resolve audiences and print envelopes without touching the bus
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute the new-thread audience for a recorded thread_created event
    Audience {
        /// Path to the recorded event JSON
        event_file: PathBuf,
    },

    /// List the deduplicated subscriber set for a thread
    Subscribers {
        /// The thread id to walk
        thread_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("herald=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing course mirror...");
            let config = config::Config::load()?;
            let conn = herald::course::initialize(&config.course_db_path)?;
            let table_count = herald::course::schema::table_count(&conn)?;
            println!("Course mirror initialized at: {}", config.course_db_path);
            println!("Tables created: {table_count}");
            println!("\nHerald is ready. Next step: set up your .env file");
            println!("  (see .env.example for required variables)");
        }

        Commands::Replay {
            event_file,
            dry_run,
        } => {
            let config = config::Config::load()?;
            config.require_forum()?;
            if !dry_run {
                config.require_dispatch()?;
            }

            let event = load_event(&event_file)?;
            println!(
                "Replaying {} event on thread {} ({})",
                event.kind_name().cyan(),
                event.thread().id,
                event
                    .occurred_at()
                    .map(|ts| ts.to_rfc3339())
                    .unwrap_or_else(|| "no timestamp".to_string()),
            );

            let forum = Arc::new(HttpForumClient::new(&config.forum_api_url)?);
            let courses = Arc::new(SqliteCourseStore::new(herald::course::open(
                &config.course_db_path,
            )?));
            let bus: Arc<dyn EventBus> = if dry_run {
                Arc::new(DryRunBus)
            } else {
                Arc::new(HttpEventBus::new(&config.event_bus_url)?)
            };

            let engine = NotificationEngine::new(forum, courses, bus, &config.frontend_url);
            engine.process(event).await?;

            println!("\n{}", "Fan-out complete.".bold());
        }

        Commands::Audience { event_file } => {
            let config = config::Config::load()?;
            let event = load_event(&event_file)?;

            let store = SqliteCourseStore::new(herald::course::open(&config.course_db_path)?);
            let provider = AudienceProvider::new(&store);
            let audience = provider
                .audience_for(event.thread(), event.course(), event.creator())
                .await?;

            let mut ids: Vec<i64> = audience.into_iter().collect();
            ids.sort_unstable();
            println!(
                "Audience for thread {} in {}: {} user(s)",
                event.thread().id,
                event.course().display_name,
                ids.len(),
            );
            for id in ids {
                println!("  {id}");
            }
        }

        Commands::Subscribers { thread_id } => {
            let config = config::Config::load()?;
            config.require_forum()?;

            let forum = HttpForumClient::new(&config.forum_api_url)?;
            let subscribers = subscriptions::fetch_subscribers(&forum, &thread_id).await?;

            let mut ids: Vec<i64> = subscribers.into_iter().collect();
            ids.sort_unstable();
            println!("Thread {} has {} subscriber(s)", thread_id, ids.len());
            for id in ids {
                println!("  {id}");
            }
        }
    }

    Ok(())
}

fn load_event(path: &PathBuf) -> Result<DiscussionEvent> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Malformed event JSON in {}", path.display()))
}

/// Prints envelopes instead of handing them to the bus — the operator's
/// "what would be sent" view for `replay --dry-run`.
struct DryRunBus;

#[async_trait]
impl EventBus for DryRunBus {
    async fn publish(&self, notification: &UserNotification) -> Result<()> {
        println!(
            "{} {} -> {} recipient(s): {:?}",
            "DRY-RUN".yellow().bold(),
            notification.notification_type.as_str().cyan(),
            notification.user_ids.len(),
            notification.user_ids,
        );
        println!("  context: {}", serde_json::to_string(&notification.context)?);
        println!("  url: {}", notification.content_url);
        Ok(())
    }
}
