//! Latchkey CLI - local account registration and login.
//!
//! # Usage
//!
//! ```bash
//! # Register an account in the default profile (.latchkey)
//! latchkey register -n "Test user" -e testuser1@gmail.com -p password123 -c password123
//!
//! # Log in, then look at the protected dashboard
//! latchkey login -e testuser1@gmail.com -p password123
//! latchkey dashboard
//!
//! # Use a different profile directory
//! latchkey --profile /tmp/profile status
//! ```
//!
//! # Commands
//!
//! - `register` - Create an account
//! - `login` - Start a session
//! - `logout` - End the session
//! - `status` - Show the current session
//! - `dashboard` - Open the protected dashboard (guarded)
//! - `accounts` - List registered accounts
//!
//! Every command loads the profile, runs one action, and reports the last
//! navigation the action requested.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use latchkey_app::AppError;
use latchkey_app::config::AppConfig;
use latchkey_app::navigation::HistoryNavigator;
use latchkey_app::services::auth::{CredentialHasher, SessionManager};
use latchkey_app::storage::FileStore;
use latchkey_core::Route;

mod commands;

#[derive(Parser)]
#[command(name = "latchkey")]
#[command(author, version, about = "Local account registration and login")]
struct Cli {
    /// Profile directory (overrides `LATCHKEY_PROFILE_DIR`)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address (login key)
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm_password: String,
    },
    /// Start a session
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the current session
    Status,
    /// Open the protected dashboard
    Dashboard,
    /// List registered accounts
    Accounts,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let result = AppConfig::from_env()
        .map_err(AppError::from)
        .and_then(|config| run(cli, config));

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
        commands::report_failure(e);
    }
    std::process::exit(exit_code(&result));
}

/// Process exit status for a finished command.
const fn exit_code<T>(result: &Result<T, AppError>) -> i32 {
    if result.is_ok() { 0 } else { 1 }
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "latchkey_app=info,latchkey_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

/// Run one command against the profile and report where it navigated.
///
/// Returns the last route the command requested, if any.
fn run(cli: Cli, mut config: AppConfig) -> Result<Option<Route>, AppError> {
    if let Some(profile) = cli.profile {
        config.profile_dir = profile;
    }
    tracing::debug!(profile = %config.profile_dir.display(), "Opening profile");

    let store = FileStore::open(config.profile_dir.clone())?;
    let hasher = CredentialHasher::new(&config.hashing)?;
    let navigator = HistoryNavigator::new();
    let manager = SessionManager::new(&store, &navigator, hasher);

    let result = match cli.command {
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => commands::auth::register(&manager, name, email, password, confirm_password),
        Commands::Login { email, password } => commands::auth::login(&manager, email, password),
        Commands::Logout => {
            commands::auth::logout(&manager);
            Ok(())
        }
        Commands::Status => {
            commands::session::status(&manager);
            Ok(())
        }
        Commands::Dashboard => {
            commands::session::dashboard(&manager, &navigator);
            Ok(())
        }
        Commands::Accounts => commands::session::accounts(&manager),
    };

    commands::report_navigation(&navigator);
    result.map(|()| navigator.current())
}
