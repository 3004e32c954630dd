use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use kokosky_core::{
    ClientConfig, DailyForecast, FullWeatherUpdate, HookState, HourlyForecast, KokoSkyClient,
    Location, Phase, RealtimeUpdate, ResourceKind, Settings, config::DEFAULT_BASE_URL,
};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "kokosky", version, about = "KokoSky weather CLI")]
pub struct Cli {
    /// API base address for this run; overrides KOKOSKY_API_URL and saved settings.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log requests and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the base address and default location.
    Configure,

    /// Manage the location registry.
    Locations {
        #[command(subcommand)]
        action: LocationsAction,
    },

    /// Show weather for a location, or for your IP if none is given or configured.
    Show {
        /// Resource name: "realtime", "hourly", "daily" or "full".
        resource: String,

        /// Location code; defaults to the configured default location.
        code: Option<String>,
    },

    /// Replace a location's weather with the JSON payload in a file.
    Push {
        /// Resource name: "realtime", "hourly", "daily" or "full".
        resource: String,

        /// Location code.
        code: String,

        /// JSON file holding the update payload.
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum LocationsAction {
    /// List all locations.
    List,

    /// Show one location.
    Get { code: String },

    /// Add the location described in a JSON file.
    Add { file: PathBuf },

    /// Replace a location with the one described in a JSON file (matched by code).
    Update { file: PathBuf },

    /// Delete a location.
    Delete { code: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut settings = Settings::load()?;

        match self.command {
            Command::Configure => configure(&mut settings),
            Command::Locations { action } => {
                let client = client_for(self.base_url.as_deref(), &settings);
                run_locations(&client, action).await
            }
            Command::Show { resource, code } => {
                let kind = ResourceKind::try_from(resource.as_str())?;
                let client = client_for(self.base_url.as_deref(), &settings);
                let code = code.or(settings.default_location);
                show(&client, kind, code).await
            }
            Command::Push { resource, code, file } => {
                let kind = ResourceKind::try_from(resource.as_str())?;
                let client = client_for(self.base_url.as_deref(), &settings);
                push(&client, kind, &code, &file).await
            }
        }
    }
}

fn client_for(base_url: Option<&str>, settings: &Settings) -> KokoSkyClient {
    let config = ClientConfig::resolve(base_url, settings);
    tracing::debug!(base_url = %config.base_url, "using API base address");
    KokoSkyClient::new(&config)
}

fn configure(settings: &mut Settings) -> anyhow::Result<()> {
    let base_url = inquire::Text::new("API base URL:")
        .with_default(settings.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .prompt()?;

    let location = inquire::Text::new("Default location code (leave blank to look up by IP):")
        .with_initial_value(settings.default_location.as_deref().unwrap_or(""))
        .prompt()?;

    settings.set_base_url(&base_url);
    settings.set_default_location(&location);
    settings.save()?;

    println!("Saved settings to {}", Settings::settings_file_path()?.display());
    Ok(())
}

async fn run_locations(client: &KokoSkyClient, action: LocationsAction) -> anyhow::Result<()> {
    if let LocationsAction::Get { code } = &action {
        let location = client.locations().get(code).await?;
        render::location(&location);
        return Ok(());
    }

    let hook = client.locations_hook();
    let state = settle(hook.subscribe()).await?;
    if let Some(error) = state.error() {
        bail!("{error}");
    }

    match action {
        LocationsAction::List | LocationsAction::Get { .. } => {}
        LocationsAction::Add { file } => {
            let location: Location = read_json(&file)?;
            let created = hook.add(&location).await?;
            println!("Added {}", created.code);
        }
        LocationsAction::Update { file } => {
            let location: Location = read_json(&file)?;
            let updated = hook.update(&location).await?;
            println!("Updated {}", updated.code);
        }
        LocationsAction::Delete { code } => {
            hook.delete(&code).await?;
            println!("Deleted {code}");
        }
    }

    render::location_list(&hook.locations());
    Ok(())
}

async fn show(
    client: &KokoSkyClient,
    kind: ResourceKind,
    code: Option<String>,
) -> anyhow::Result<()> {
    match kind {
        ResourceKind::Realtime => {
            let hook = client.realtime_hook(code);
            print_settled(settle(hook.subscribe()).await?, render::realtime)
        }
        ResourceKind::Hourly => {
            let hook = client.hourly_hook(code);
            print_settled(settle(hook.subscribe()).await?, render::hourly)
        }
        ResourceKind::Daily => {
            let hook = client.daily_hook(code);
            print_settled(settle(hook.subscribe()).await?, render::daily)
        }
        ResourceKind::Full => {
            let hook = client.full_hook(code);
            print_settled(settle(hook.subscribe()).await?, render::full)
        }
    }
}

async fn push(
    client: &KokoSkyClient,
    kind: ResourceKind,
    code: &str,
    file: &Path,
) -> anyhow::Result<()> {
    match kind {
        ResourceKind::Realtime => {
            let payload: RealtimeUpdate = read_json(file)?;
            render::realtime(&client.realtime().update(code, &payload).await?);
        }
        ResourceKind::Hourly => {
            let payload: Vec<HourlyForecast> = read_json(file)?;
            render::hourly(&client.hourly().update(code, &payload).await?);
        }
        ResourceKind::Daily => {
            let payload: Vec<DailyForecast> = read_json(file)?;
            render::daily(&client.daily().update(code, &payload).await?);
        }
        ResourceKind::Full => {
            let payload: FullWeatherUpdate = read_json(file)?;
            render::full(&client.full().update(code, &payload).await?);
        }
    }
    Ok(())
}

/// Wait until a hook has nothing in flight.
async fn settle<T: Clone>(mut rx: watch::Receiver<HookState<T>>) -> anyhow::Result<HookState<T>> {
    let state = rx
        .wait_for(|state| !state.is_loading())
        .await
        .context("Hook closed before the request finished")?;
    Ok(state.clone())
}

fn print_settled<T>(state: HookState<T>, print: fn(&T)) -> anyhow::Result<()> {
    match state.phase() {
        Phase::Ready(data) => {
            print(data);
            Ok(())
        }
        Phase::Errored(message) => Err(anyhow!("{message}")),
        Phase::Idle | Phase::Loading => Err(anyhow!("No data received")),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON in file: {}", path.display()))
}
