/// MotiFy - daily quote, focus timer and music player
use chrono::Local;
use clap::{Parser, Subcommand};
use motify_cli::{App, AppConfig, CliError};
use motify_core::{Activity, Time, Track};
use motify_playback::{now_playing::timeline, SessionHandle};
use motify_timer::{CountdownTimer, Tick};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "motify")]
#[command(about = "Daily quote, focus timer and music player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MOTIFY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the quote of the day
    Quote,
    /// Show the next widget timeline entry
    Widget,
    /// List tracks, favorites first
    Tracks {
        /// Fetch the catalog even if a cached copy exists
        #[arg(long)]
        refresh: bool,
    },
    /// Mark a track as favorite
    Favorite {
        /// Track id
        id: String,
        /// Remove from favorites instead
        #[arg(long)]
        off: bool,
    },
    /// Play a track
    Play {
        /// Track id
        id: String,
        /// Turn autoplay on before playing
        #[arg(long)]
        autoplay: bool,
    },
    /// List or edit activities
    Activities {
        #[command(subcommand)]
        action: Option<ActivityAction>,
    },
    /// Run a countdown
    Timer {
        /// Duration as HH:MM:SS, MM:SS or SS
        duration: String,
    },
}

#[derive(Subcommand)]
enum ActivityAction {
    /// Add an activity
    Add {
        /// Activity name
        name: String,
        /// Preset duration (HH:MM:SS)
        #[arg(short, long, default_value = "00:25:00")]
        time: String,
    },
    /// Select an activity by id
    Select { id: String },
    /// Delete an activity by position
    Delete { index: usize },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "motify=info,motify_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // The timer needs no services
    if let Commands::Timer { duration } = &cli.command {
        return run_timer(duration).await;
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    let app = App::init(config).await?;

    match cli.command {
        Commands::Quote => show_quote(&app).await?,
        Commands::Widget => show_widget(&app).await,
        Commands::Activities { action } => activities(&app, action).await?,
        Commands::Timer { .. } => {}
        command => {
            let (session, task) = app.start_session().await;
            let result = match command {
                Commands::Tracks { refresh } => list_tracks(&app, &session, refresh).await,
                Commands::Favorite { id, off } => set_favorite(&app, &session, &id, !off).await,
                Commands::Play { id, autoplay } => play(&app, &session, &id, autoplay).await,
                _ => Ok(()),
            };
            // Shut down before reporting so state is persisted either way
            session.shutdown().await?;
            task.await?;
            result?;
        }
    }

    Ok(())
}

async fn show_quote(app: &App) -> anyhow::Result<()> {
    match app.daily_quote().current(Local::now()).await? {
        Some(holder) => {
            println!("\"{}\"", holder.quote.text);
            println!("  - {}", holder.quote.author);
        }
        None => println!("No quote available"),
    }
    Ok(())
}

async fn show_widget(app: &App) {
    let entry = app.daily_quote().widget_entry(Local::now()).await;
    println!("{}", entry.date.format("%Y-%m-%d %H:%M"));
    println!("\"{}\"", entry.quote.text);
    println!("  - {}", entry.quote.author);
}

async fn list_tracks(app: &App, session: &SessionHandle, refresh: bool) -> Result<(), CliError> {
    let tracks = app.tracks(session, refresh).await?;
    let state = session.snapshot().await?;

    if tracks.is_empty() {
        println!("No tracks");
    }
    for track in &tracks {
        let marker = if state.favorites.contains(&track.id) { "*" } else { " " };
        println!("{marker} {:<24} {:<32} {}", track.id, track.title, track.genre);
    }
    Ok(())
}

async fn set_favorite(
    app: &App,
    session: &SessionHandle,
    id: &str,
    value: bool,
) -> Result<(), CliError> {
    let track = app.find_track(session, id).await?;
    session.set_favorite(value, track.clone()).await?;
    if value {
        println!("Added \"{}\" to favorites", track.title);
    } else {
        println!("Removed \"{}\" from favorites", track.title);
    }
    Ok(())
}

async fn play(
    app: &App,
    session: &SessionHandle,
    id: &str,
    autoplay: bool,
) -> Result<(), CliError> {
    let track = app.find_track(session, id).await?;

    if autoplay && !session.snapshot().await?.autoplay {
        session.toggle_autoplay().await?;
    }
    session.play(track.clone()).await?;

    let state = session.snapshot().await?;
    print_now_playing(&track, &state.current_time);
    if !state.queue.is_empty() {
        println!("Up next:");
        for element in &state.queue {
            let origin = if element.autoplay { " (autoplay)" } else { "" };
            println!("  {}{origin}", element.track.title);
        }
    }
    Ok(())
}

fn print_now_playing(track: &Track, current: &motify_core::MediaTime) {
    let (elapsed, remaining) = timeline(Some(track), *current);
    println!("Now playing: {} [{}]", track.title, track.genre);
    println!("  {elapsed} / {remaining}");
}

async fn activities(app: &App, action: Option<ActivityAction>) -> anyhow::Result<()> {
    let mut book = app.activities().await?;

    match action {
        None => {}
        Some(ActivityAction::Add { name, time }) => {
            let time = parse_time(&time)?;
            book.push(Activity::new(&name, &name, time)).await?;
        }
        Some(ActivityAction::Select { id }) => {
            book.select(&id).await?;
        }
        Some(ActivityAction::Delete { index }) => {
            book.delete(&[index]).await?;
        }
    }

    if book.is_empty() {
        println!("No activities");
    }
    for (index, activity) in book.activities().iter().enumerate() {
        let marker = if book.selected_id() == Some(activity.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {index:>2} {} {:<20} {}",
            activity.default_time.formatted(),
            activity.name,
            activity.id
        );
    }
    Ok(())
}

async fn run_timer(duration: &str) -> anyhow::Result<()> {
    let mut timer = CountdownTimer::new();
    timer.set_selected_time(parse_time(duration)?);
    if !timer.start() {
        anyhow::bail!("Timer duration must be greater than zero");
    }

    let print = |tick: Tick| {
        if let Tick::Counting(remaining) = tick {
            print!("\r{}", remaining.formatted());
            // Progress output only
            let _ = std::io::stdout().flush();
        }
    };

    print!("{}", timer.remaining_time().formatted());
    tokio::select! {
        _ = timer.run(print) => println!("\nDone"),
        _ = tokio::signal::ctrl_c() => println!("\nCancelled"),
    }
    Ok(())
}

fn parse_time(value: &str) -> Result<Time, CliError> {
    Time::parse(value)
        .ok_or_else(|| CliError::InvalidArgument(format!("invalid duration: {value}")))
}
