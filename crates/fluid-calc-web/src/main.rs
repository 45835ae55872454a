use anyhow::Context;
use clap::Parser;
use fluid_calc_core::FluidCalcCore;
use fluid_calc_web::{create_router, AppState, Config};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "fluid-calc-web")]
#[command(about = "Daily fluid volume calculator web server")]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = Config::default_config_path())]
    config: PathBuf,

    /// Listen host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database path (overrides config)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load(&args.config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database_path = database;
    }

    info!("rule variant: {:?}", config.profile.variant);
    info!("date window: {:?}", config.profile.date_window);
    info!("database: {}", config.database_path.display());

    let core = FluidCalcCore::open(&config.database_path, config.profile)
        .with_context(|| format!("failed to open database: {}", config.database_path.display()))?;
    info!("{} stored records", core.record_count()?);

    let state = AppState::new(core).context("failed to register page templates")?;
    let app = create_router(state);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
