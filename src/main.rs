use anyhow::Result;
use clap::Parser;
use rbd_mirror_exporter::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Ceph pools to monitor (repeatable; overrides config)
    #[arg(long = "pool")]
    pools: Vec<String>,

    /// Path to the rbd binary (overrides config)
    #[arg(long, env = "RBD_PROGRAM")]
    rbd_program: Option<String>,

    /// Port to listen on for metrics (overrides config)
    #[arg(short, long, env = "EXPORTER_PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,
}

impl Args {
    /// Overlay CLI arguments onto the loaded configuration. Only flags the
    /// user actually gave take effect, so config-file and environment values
    /// survive when a flag is absent.
    fn apply(self, config: &mut Config) {
        if !self.pools.is_empty() {
            config.rbd.pools = self.pools;
        }
        if let Some(program) = self.rbd_program {
            config.rbd.program = program;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(addr) = self.addr {
            config.server.addr = addr;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting RBD Mirror Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    args.apply(&mut config);

    info!("Configuration loaded successfully");
    info!("Monitoring pools: {:?}", config.rbd.pools);
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    // Start the metrics server
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
