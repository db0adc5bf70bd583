//! Domain Suggest Server
//!
//! Serves keyword-driven domain suggestions over a small JSON API, backed by
//! domain-suggest-lib. Configuration follows the usual precedence: CLI flags
//! override DS_* environment variables, which override discovered (or
//! explicitly named) TOML config files.

use clap::Parser;
use domain_suggest_lib::{
    build_check_config, load_env_config, shared_budget, shared_cache, AvailabilityChecker,
    ConfigManager, FileConfig, ProviderMode,
};
use domain_suggest_server::{routes, state::AppState};
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI arguments for domain-suggest-server
#[derive(Parser, Debug)]
#[command(name = "domain-suggest-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve keyword-driven domain suggestions with availability checks")]
pub struct Args {
    /// Address to bind
    #[arg(long = "bind", default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on (DS_PORT is used when omitted)
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Force demo mode: fabricate all availability data, no external calls
    #[arg(long = "demo")]
    pub demo: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Resolve configuration: flags > environment > files > defaults
    let env_config = load_env_config(args.verbose);
    let manager = ConfigManager::new(args.verbose);
    let file_config: FileConfig = match args.config.as_ref().or(env_config.config.as_ref()) {
        Some(path) => manager.load_file(path)?,
        None => manager.discover_and_load()?,
    };

    let mut check_config = build_check_config(&file_config, &env_config);
    if args.demo {
        check_config.default_mode = ProviderMode::Simulated;
    }
    let port = args.port.or(env_config.port).unwrap_or(3000);

    info!(
        mode = %check_config.default_mode,
        max_api_calls = check_config.max_api_calls,
        page_size = check_config.page_size,
        "configuration loaded"
    );

    // Shared state: one budget, one cache, one checker for all requests
    let budget = shared_budget(check_config.max_api_calls, check_config.budget_window);
    let cache = shared_cache();
    let window = check_config.budget_window;
    let checker = AvailabilityChecker::new(check_config, budget.clone(), cache)?;

    // Budget-reset task: refills on a fixed wall-clock period regardless of
    // request activity. The first interval tick completes immediately.
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(window);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Ok(mut budget) = budget.lock() {
                budget.reset();
                debug!("lookup budget refilled for new window");
            }
        }
    });

    let app = routes::router(AppState::new(checker));

    let addr = format!("{}:{}", args.bind, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
