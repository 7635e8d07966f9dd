use clap::Parser;
use dotproxy_infrastructure::dns::DnsProxy;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "dotproxy")]
#[command(version)]
#[command(about = "Forwards plain DNS over UDP/TCP to a DNS-over-TLS upstream")]
struct Cli {
    /// Path to the .env configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref())?;

    bootstrap::init_logging(&config.logging);

    info!("Starting dotproxy v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config);
    let proxy = DnsProxy::bind(&config.server, dns_services.handler)?;

    info!(
        bind_address = %config.server.bind_address(),
        upstream = %config.upstream.target,
        udp_enabled = config.server.udp_enabled,
        "Proxy listening"
    );

    tokio::select! {
        _ = proxy.run() => {
            error!("TCP listener stopped");
        }
        _ = bootstrap::shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Proxy shutdown complete");
    Ok(())
}
