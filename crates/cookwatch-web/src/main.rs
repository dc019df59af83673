use std::sync::Arc;

use cookwatch_web::app::{AppState, build_router};
use cookwatch_web::config::{Config, ConfigOverrides};
use cookwatch_web::db::{Db, ensure_schema};
use cookwatch_web::images::DirectoryListing;
use facet::Facet;
use figue as args;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Facet, Debug)]
struct Cli {
    #[facet(flatten)]
    builtins: args::FigueBuiltins,
    #[facet(args::named, default)]
    http: Option<String>,
    #[facet(args::named, default)]
    db: Option<String>,
    #[facet(args::named, default)]
    image_server_url: Option<String>,
    #[facet(args::named, default)]
    static_dir: Option<String>,
    #[facet(args::named, default)]
    scrape_timeout_ms: Option<u64>,
}

fn main() {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(async {
            if let Err(err) = run().await {
                eprintln!("{err}");
                std::process::exit(1);
            }
        });
}

async fn run() -> Result<(), String> {
    let cli = parse_cli()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env(ConfigOverrides {
        http: cli.http,
        db: cli.db,
        image_server_url: cli.image_server_url,
        static_dir: cli.static_dir,
        scrape_timeout_ms: cli.scrape_timeout_ms,
    })?;

    let db = Db::new(config.db_path.clone());
    // The dashboard still renders (empty) when the tables cannot be created.
    if let Err(e) = ensure_schema(&db) {
        warn!(%e, db = ?db.path(), "failed to ensure sqlite schema");
    }

    let images = DirectoryListing::new(config.image_server_url.clone(), config.scrape_timeout);
    info!(
        image_server = images.base_url(),
        scrape_timeout_ms = config.scrape_timeout.as_millis() as u64,
        "image listing source configured"
    );

    let state = AppState::new(db, Arc::new(images));
    let app = build_router(state, &config.static_dir);

    let listener = TcpListener::bind(&config.http_addr)
        .await
        .map_err(|e| format!("failed to bind HTTP on {}: {e}", config.http_addr))?;
    info!(http_addr = %config.http_addr, db = ?config.db_path, "cookwatch-web ready");
    println!();
    println!("  \x1b[32mOpen in browser: http://{}/dashboard\x1b[0m", config.http_addr);
    println!();

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("HTTP server error: {e}"))
}

fn parse_cli() -> Result<Cli, String> {
    let figue_config = args::builder::<Cli>()
        .map_err(|e| format!("failed to build CLI schema: {e}"))?
        .cli(|cli| cli.strict())
        .help(|h| {
            h.program_name("cookwatch-web")
                .description("Cooking-session monitoring dashboard")
                .version(option_env!("CARGO_PKG_VERSION").unwrap_or("dev"))
        })
        .build();
    let cli = args::Driver::new(figue_config)
        .run()
        .into_result()
        .map_err(|e| e.to_string())?;
    Ok(cli.value)
}
