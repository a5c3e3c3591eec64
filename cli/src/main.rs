use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use client::routes::{HOME_PATH, LOGIN_PATH};
use client::{ApiClient, AuthStore, ClientConfig};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::platform::{CliNavigator, FileStorage, ReqwestTransport};

mod commands;
mod platform;

/// Administration client for the road traffic survey backend.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[clap(flatten)]
    connection: ConnectionParams,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Args)]
struct ConnectionParams {
    #[arg(long, env = "API_BASE_URL", default_value = client::DEFAULT_API_BASE_URL, global = true)]
    api_base_url: Url,

    #[arg(long, env = "CLIENT_ID", default_value = client::DEFAULT_CLIENT_ID, global = true)]
    client_id: String,

    #[arg(long, help = "Request timeout in seconds", env = "API_TIMEOUT_SECS", default_value_t = 15, global = true)]
    timeout_secs: u64,

    #[arg(long, help = "Where the session is kept between runs", env = "SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session.
    Login(commands::LoginArgs),
    /// Drop the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Change the password of the signed-in user.
    ChangePassword(commands::ChangePasswordArgs),
    /// Reset a forgotten password with an emailed code.
    #[command(subcommand)]
    ResetPassword(commands::ResetPasswordCommand),
    /// Manage users (admin).
    #[command(subcommand)]
    Users(commands::UsersCommand),
    /// Manage and run surveys.
    #[command(subcommand)]
    Surveys(commands::SurveysCommand),
    /// Report counts for the survey being counted (agent).
    #[command(subcommand)]
    Count(commands::CountCommand),
}

fn build_client(connection: &ConnectionParams) -> Result<(ApiClient, Rc<FileStorage>)> {
    let config = ClientConfig::new(connection.api_base_url.clone())
        .with_client_id(Some(connection.client_id.clone()))
        .with_timeout(Duration::from_secs(connection.timeout_secs));
    let session_file = match &connection.session_file {
        Some(path) => path.clone(),
        None => FileStorage::default_path()?,
    };
    debug!(session_file = %session_file.display(), api_base_url = %config.api_base_url, "Client settings");

    let storage = Rc::new(FileStorage::new(session_file));
    let store = AuthStore::load(storage.clone());
    let location = if store.is_authorized() { HOME_PATH } else { LOGIN_PATH };
    let transport = ReqwestTransport::new(config.timeout)?;
    let client = ApiClient::new(config, store, Rc::new(transport), Rc::new(CliNavigator::new(location)));
    Ok((client, storage))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let (client, storage) = build_client(&cli.connection)?;
    match cli.command {
        Command::Login(args) => commands::login(&client, args).await,
        Command::Logout => commands::logout(&client, storage.as_ref()),
        Command::Whoami => commands::whoami(&client),
        Command::ChangePassword(args) => commands::change_password(&client, args).await,
        Command::ResetPassword(command) => commands::reset_password(&client, command).await,
        Command::Users(command) => commands::users(&client, command).await,
        Command::Surveys(command) => commands::surveys(&client, storage.as_ref(), command).await,
        Command::Count(command) => commands::count(&client, storage.as_ref(), command).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_defaults() -> Result<()> {
        let cli = Cli::try_parse_from(["traffic-survey", "whoami"])?;
        assert_eq!(cli.connection.api_base_url.as_str(), "http://localhost:5000/api");
        assert_eq!(cli.connection.client_id, "road-traffic-survey-ui");
        assert_eq!(cli.connection.timeout_secs, 15);
        assert!(matches!(cli.command, Command::Whoami));
        Ok(())
    }

    #[test]
    fn nested_commands_parse() -> Result<()> {
        let cli = Cli::try_parse_from([
            "traffic-survey",
            "surveys",
            "list",
            "--status",
            "active",
            "--page",
            "2",
            "--api-base-url",
            "https://surveys.example.org/api",
        ])?;
        assert_eq!(cli.connection.api_base_url.host_str(), Some("surveys.example.org"));
        let Command::Surveys(commands::SurveysCommand::List(list)) = cli.command else {
            anyhow::bail!("expected surveys list");
        };
        assert_eq!(list.paging.page, 2);
        assert_eq!(list.status, Some(shared::SurveyStatus::Active));
        Ok(())
    }
}
