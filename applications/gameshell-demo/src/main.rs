/// Game Shell Demo - headless game shell session
use clap::{Parser, Subcommand, ValueEnum};
use gameshell_demo::{config::DemoConfig, run_session};
use gameshell_settings::{JsonFileStore, PlayerProgress, SettingsController};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gameshell-demo")]
#[command(about = "Game Shell audio and settings demo", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "GAMESHELL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session and print its report
    Session,
    /// Show stored settings and progress
    ShowSettings,
    /// Flip one of the audio switches
    Toggle {
        /// Switch to flip
        #[arg(value_enum)]
        setting: Switch,
    },
    /// Rename the player
    SetName {
        /// New player name
        name: String,
    },
    /// Forget all level progress
    ResetProgress,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    Muted,
    Music,
    Sounds,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameshell=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = DemoConfig::load(cli.config.as_deref())?;
    let store = Arc::new(JsonFileStore::new(config.storage.path.clone()));
    tracing::debug!(path = %store.path().display(), "Using settings file");

    match cli.command {
        Commands::Session => {
            let report = run_session(&config, store).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::ShowSettings => {
            let settings = loaded_settings(&config, store.clone()).await;
            let progress = PlayerProgress::new(store);
            progress.load().await?;

            println!("player:  {}", settings.player_name().get());
            println!("muted:   {}", settings.audio().muted.get());
            println!("music:   {}", settings.audio().music_on.get());
            println!("sounds:  {}", settings.audio().sounds_on.get());
            println!("level:   {}", progress.highest_level_reached());
        }
        Commands::Toggle { setting } => {
            let settings = loaded_settings(&config, store).await;
            let (name, value) = match setting {
                Switch::Muted => ("muted", settings.toggle_muted().await),
                Switch::Music => ("music", settings.toggle_music_on().await),
                Switch::Sounds => ("sounds", settings.toggle_sounds_on().await),
            };
            println!("{name}: {value}");
        }
        Commands::SetName { name } => {
            let settings = loaded_settings(&config, store).await;
            settings.set_player_name(&name).await?;
            println!("player: {}", settings.player_name().get());
        }
        Commands::ResetProgress => {
            PlayerProgress::new(store).reset().await?;
            println!("progress reset");
        }
    }

    Ok(())
}

async fn loaded_settings(config: &DemoConfig, store: Arc<JsonFileStore>) -> SettingsController {
    let settings = SettingsController::with_config(store, config.settings.clone());
    if !settings.load_state_from_persistence().await {
        tracing::warn!("Using default settings");
    }
    settings
}
