use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roost_core::config::ClientConfig;
use roost_core::navigation::AuthenticatedScreen;
use roost_infrastructure::{ConfigService, RoostPaths};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "roost")]
#[command(about = "Roost CLI - drive the hostel/tiffin client session from a terminal", long_about = None)]
struct Cli {
    /// Directory holding storage.json and logs (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current session
    Status,
    /// Print where the app would land on launch
    Route,
    /// Try to open a screen of the authenticated section
    Open {
        /// Screen name, e.g. `bookings` or `hostel-detail`
        screen: AuthenticatedScreen,
    },
    /// Mark onboarding as seen
    Onboard,
    /// Store a user returned by the backend's login endpoint
    Login {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the current user
    Logout,
    /// Change fields of the current user
    UpdateUser {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Choose a location
    Location {
        /// Free-text label, e.g. "Pune, Maharashtra"
        label: String,
    },
    /// GET a backend path and print the envelope's data
    Fetch {
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match ConfigService::new(&RoostPaths::default()) {
        Ok(service) => service.get_config().await.context("Failed to load config")?,
        // No platform config dir; run on defaults.
        Err(_) => ClientConfig::default(),
    };

    let data_dir = cli.data_dir.clone().or_else(|| config.data_dir.clone());
    let paths = RoostPaths::new(data_dir);

    let _log_guard = logging::init(&config.log_level, &paths)?;
    tracing::debug!("[Main] Loaded config: {:?}", config);

    let app = match roost_application::open_file_backed(&paths).await {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!("[Main] No usable storage ({}), session will not persist", e);
            roost_application::open_ephemeral().await
        }
    };
    let store = &app.store;

    let outcome = match cli.command {
        Commands::Status => commands::navigation::status(store),
        Commands::Route => commands::navigation::route(store),
        Commands::Open { screen } => commands::navigation::open(store, screen),
        Commands::Onboard => commands::session::onboard(store),
        Commands::Login {
            id,
            name,
            phone,
            email,
        } => commands::session::login(store, id, name, phone, email),
        Commands::Logout => commands::session::logout(store),
        Commands::UpdateUser { name, phone, email } => {
            commands::session::update_user(store, name, phone, email)
        }
        Commands::Location { label } => commands::session::location(store, label),
        Commands::Fetch { path } => commands::fetch::run(&config, &path).await,
    };

    app.shutdown().await;
    outcome
}
