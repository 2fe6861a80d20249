use std::io::Read;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chatrelay::connector::api::{serve, Container, ContainerConfig};
use chatrelay::{interpret, Commands, UpstreamConfig};

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Upstream site base URL (overrides RELAY_UPSTREAM_URL)
    #[arg(long, global = true)]
    upstream_url: Option<String>,

    /// Upstream request timeout in seconds (overrides RELAY_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn upstream_config(&self) -> UpstreamConfig {
        let mut config = UpstreamConfig::from_env();
        if let Some(url) = &self.upstream_url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let upstream = cli.upstream_config();

    match cli.command {
        Commands::Serve { port, public } => {
            let host = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            info!("Relaying to {}", upstream.endpoint());
            let container = Arc::new(Container::new(ContainerConfig { upstream })?);
            serve(container, SocketAddr::new(host, port)).await?;
        }

        Commands::Send { message, session } => {
            let container = Container::new(ContainerConfig { upstream })?;
            let reply = container
                .send_use_case()
                .execute(session.as_deref(), &message)
                .await?;
            println!("{}", reply.answer);
            info!("Session: {}", reply.session_id);
        }

        Commands::Interpret { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            println!("{}", interpret(&raw));
        }
    }

    Ok(())
}
