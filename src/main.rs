use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use zerowaste::api::{admin, challenges, events, goals, profile, waste};
use zerowaste::client::{AuthClient, ClientError};
use zerowaste::config::{config_schema, load_config};
use zerowaste::store::create_store;
use zerowaste::utils::logger::init_logging;

/// Command line access to the Zero Waste API.
#[derive(Parser, Debug)]
#[command(name = "zerowaste", version)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(long, short, default_value = "./config.yaml", env = "ZEROWASTE_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON schema of the configuration file.
    Schema,
    #[command(flatten)]
    Api(ApiCommand),
}

/// Commands that talk to the API and need a loaded configuration.
#[derive(Subcommand, Debug)]
enum ApiCommand {
    /// Log in and store the token pair.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ZEROWASTE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token pair.
    Logout,
    /// Check whether the stored session is still usable.
    Status,
    /// Total score of the current user.
    Score,
    /// All waste logs of the current user.
    Logs,
    /// All goals of the current user.
    Goals,
    /// First page of challenges.
    Challenges,
    /// All events.
    Events,
    /// Profile of the current user.
    Profile,
    /// All user accounts (admins only).
    Users,
    /// Category requests awaiting review (admins only).
    CategoryRequests,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error(transparent)]
    Logging(#[from] zerowaste::utils::logger::LoggingError),
    #[error(transparent)]
    Store(#[from] zerowaste::store::StoreError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Schema => {
            println!("{}", config_schema()?);
            Ok(())
        }
        Command::Api(command) => run_api(&args.config, command).await,
    }
}

async fn run_api(config_path: &Path, command: ApiCommand) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    init_logging(&config.logging)?;
    info!(
        "Loaded configuration from '{}' for {}",
        config_path.display(),
        config.api.base_url
    );

    let store = create_store(&config.credentials).await?;
    let client = AuthClient::new(config.api, store);

    match command {
        ApiCommand::Login { email, password } => {
            client.login(&email, &password).await?;
            print_json(&json!({ "logged_in": true }))
        }
        ApiCommand::Logout => {
            client.logout().await?;
            print_json(&json!({ "logged_in": false }))
        }
        ApiCommand::Status => {
            let claims = client.token_claims().await?;
            print_json(&json!({
                "logged_in": client.auto_login().await,
                "role": claims.as_ref().and_then(|c| c.role.clone()),
                "user_id": claims.as_ref().and_then(|c| c.user_id.clone()),
            }))
        }
        ApiCommand::Score => print_json(&json!({ "total_score": waste::my_score(&client).await? })),
        ApiCommand::Logs => print_json(&waste::waste_logs(&client).await?),
        ApiCommand::Goals => print_json(&goals::goals(&client).await?),
        ApiCommand::Challenges => print_json(&challenges::challenges(&client).await?),
        ApiCommand::Events => print_json(&events::events(&client).await?),
        ApiCommand::Profile => print_json(&profile::profile(&client).await?),
        ApiCommand::Users => print_json(&admin::users(&client).await?),
        ApiCommand::CategoryRequests => {
            print_json(&admin::pending_category_requests(&client).await?)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            if let CliError::Client(client_error) = &e {
                if client_error.requires_login() {
                    eprintln!("hint: run `zerowaste login --email <EMAIL>` first");
                }
            }
            ExitCode::FAILURE
        }
    }
}
