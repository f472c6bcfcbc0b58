use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{self, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gitfolio::config::{ServerConfig, Transport};
use gitfolio::github::GithubClient;
use gitfolio::showcase::ShowcaseService;
use gitfolio::transport::http::HttpProxyApp;
use gitfolio::transport::stdio::run_stdio_server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// GitHub account to expose (overrides GITFOLIO_ACCOUNT)
    #[arg(short = 'a', long, global = true)]
    account: Option<String>,

    /// GitHub API token (overrides GITFOLIO_GITHUB_TOKEN / GITHUB_TOKEN)
    #[arg(short = 't', long, global = true)]
    github_token: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// With no subcommand, the environment decides: HTTP when a listen port
    /// is configured or a cloud platform is detected, stdio otherwise.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server in stdin/stdout mode
    Stdio,
    /// Run the JSON HTTP proxy
    Http {
        /// Address to bind the HTTP server to
        #[arg(short = 'l', long, default_value = "0.0.0.0:8080")]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if let Some(account) = cli.account {
        config.account = account;
    }
    if let Some(token) = cli.github_token {
        config.github_token = Some(token);
    }

    match cli.command {
        Some(Commands::Stdio) => run_stdio(config, cli.debug).await,
        Some(Commands::Http { address }) => {
            let addr: SocketAddr = address.parse()?;
            run_http(config, addr, cli.debug).await
        }
        None => match config.transport() {
            Transport::Stdio => run_stdio(config, cli.debug).await,
            Transport::Http(port) => {
                let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
                run_http(config, addr, cli.debug).await
            }
        },
    }
}

fn build_service(config: &ServerConfig) -> ShowcaseService {
    let client = GithubClient::new(config.github_token.clone());
    ShowcaseService::new(client, config.account.clone())
}

async fn run_stdio(config: ServerConfig, debug: bool) -> Result<()> {
    // Stdout carries the protocol; logs must go to stderr only.
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();

    tracing::info!(account = %config.account, "starting MCP server in STDIN/STDOUT mode");
    if config.github_token.is_some() {
        tracing::info!("using GitHub token for authentication");
    }

    let service = build_service(&config);
    run_stdio_server(service)
        .await
        .map_err(|e| anyhow::anyhow!("error running STDIO server: {}", e))
}

async fn run_http(config: ServerConfig, addr: SocketAddr, debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},{}", level, env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();

    tracing::info!(account = %config.account, "starting HTTP proxy on {}", addr);
    if config.github_token.is_some() {
        tracing::info!("using GitHub token for authentication");
    }

    let service = build_service(&config);
    let app = HttpProxyApp::new(addr, service);
    app.serve().await
}
