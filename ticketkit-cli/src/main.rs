//! `ticketkit` developer CLI.

mod dev_platform;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::{eyre, WrapErr};
use ticketkit_core::http_request::ReqwestHttpClient;
use ticketkit_core::merchants::{AccessTokenProvider, MerchantDirectoryClient};
use ticketkit_core::vault::CredentialVault;
use ticketkit_core::{Environment, ErrorResponse};

use dev_platform::{ConsoleAuthenticator, ConsoleMode, FileSecureStore};

#[derive(Parser)]
#[command(name = "ticketkit", version, about = "TicketKit developer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the merchant list for a session token.
    Merchants(MerchantsArgs),
    /// Exercise the credential vault against a file-backed dev store.
    Vault {
        /// Directory holding the dev store. Defaults to the user data directory.
        #[arg(long, env = "TICKETKIT_STORE_DIR")]
        store_dir: Option<PathBuf>,
        #[command(subcommand)]
        action: VaultAction,
    },
}

#[derive(clap::Args)]
struct MerchantsArgs {
    /// Backend environment.
    #[arg(long, env = "TICKETKIT_ENV", value_enum, default_value_t = EnvArg::Staging)]
    env: EnvArg,
    /// Overrides the environment's base URL.
    #[arg(long, env = "TICKETKIT_BASE_URL")]
    base_url: Option<String>,
    /// Session access token.
    #[arg(long, env = "TICKETKIT_TOKEN")]
    token: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EnvArg {
    Staging,
    Production,
}

impl From<EnvArg> for Environment {
    fn from(env: EnvArg) -> Self {
        match env {
            EnvArg::Staging => Self::Staging,
            EnvArg::Production => Self::Production,
        }
    }
}

#[derive(Subcommand)]
enum VaultAction {
    /// Replace the stored credential.
    Save {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Authenticate and print the stored credential.
    Read {
        /// Fail the authentication challenge.
        #[arg(long, conflicts_with = "unavailable")]
        deny: bool,
        /// Pretend the device has no authentication policy.
        #[arg(long)]
        unavailable: bool,
    },
    /// Delete the stored credential.
    Clear,
}

struct CliToken(Option<String>);

impl AccessTokenProvider for CliToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_error_response(err: &ErrorResponse) -> eyre::Result<ExitCode> {
    eprintln!("{}", serde_json::to_string_pretty(err)?);
    Ok(ExitCode::FAILURE)
}

async fn run_merchants(args: MerchantsArgs) -> eyre::Result<ExitCode> {
    let timeout = args.timeout_secs.map(Duration::from_secs);
    let http = match args.base_url {
        Some(base_url) => ReqwestHttpClient::with_base_url(base_url, timeout),
        None => ReqwestHttpClient::new(args.env.into(), timeout),
    };
    tracing::info!(base_url = http.base_url(), "fetching merchants");

    let client = MerchantDirectoryClient::new(Arc::new(CliToken(args.token)), Arc::new(http));
    match client.fetch_merchants().await {
        Ok(merchants) => {
            println!("{}", serde_json::to_string_pretty(&merchants)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => print_error_response(&err),
    }
}

fn default_store_dir() -> eyre::Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("ticketkit").join("dev-vault"))
        .ok_or_else(|| eyre!("no user data directory; pass --store-dir"))
}

fn run_vault(store_dir: Option<PathBuf>, action: VaultAction) -> eyre::Result<ExitCode> {
    let store_dir = match store_dir {
        Some(dir) => dir,
        None => default_store_dir()?,
    };
    let mode = match action {
        VaultAction::Read { deny: true, .. } => ConsoleMode::Deny,
        VaultAction::Read {
            unavailable: true, ..
        } => ConsoleMode::Unavailable,
        _ => ConsoleMode::Prompt,
    };
    tracing::debug!(store = %store_dir.display(), "opening dev vault");
    let vault = CredentialVault::new(
        Arc::new(FileSecureStore::new(store_dir)),
        Arc::new(ConsoleAuthenticator::new(mode)),
    );

    match action {
        VaultAction::Save { email, password } => {
            if vault.save(&email, &password) {
                println!("saved credential for {email}");
                Ok(ExitCode::SUCCESS)
            } else {
                Err(eyre!("secure store rejected the credential"))
            }
        }
        VaultAction::Read { .. } => match vault.authenticated_read() {
            Ok(credential) => {
                println!("{}", serde_json::to_string_pretty(&credential)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => print_error_response(&err),
        },
        VaultAction::Clear => {
            if vault.clear() {
                println!("cleared");
                Ok(ExitCode::SUCCESS)
            } else {
                Err(eyre!("secure store failed to delete the credential"))
            }
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Merchants(args) => run_merchants(args)
            .await
            .wrap_err("merchant fetch failed"),
        Command::Vault { store_dir, action } => run_vault(store_dir, action),
    }
}
