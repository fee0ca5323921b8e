//! VoltBin - Inventory API with JWT authentication and role-based access

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voltbin_backend::{
    db::Database,
    server::{build_router, AppState},
};

#[derive(Parser, Debug)]
#[command(name = "voltbin", about = "Inventory API server with JWT auth and RBAC")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// SQLite database path
    #[arg(long, env = "DATABASE_PATH")]
    db: Option<String>,

    /// Insert the demo inventory when the item table is empty
    #[arg(long, default_value_t = false)]
    seed_demo_items: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let args = Args::parse();

    info!("🚀 VoltBin Inventory API starting");

    let db_path = resolve_data_path(args.db, "voltbin.db");
    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("⚠️  JWT_SECRET not set - using insecure development default");
        "dev-secret-change-in-production-minimum-32-characters".to_string()
    });

    let db = Database::open(&db_path)?;
    info!("📊 Database initialized at: {}", db_path);

    let state = AppState::new(db, jwt_secret);

    if args.seed_demo_items {
        state.item_store.seed_demo_items().await?;
    }

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter overrides
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voltbin_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_data_path(filename: &str) -> String {
    // Anchor defaults to the crate directory so running from elsewhere doesn't
    // accidentally create a new empty DB in a different working directory.
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    base.join(filename).to_string_lossy().to_string()
}

fn resolve_data_path(arg_value: Option<String>, default_filename: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(raw) = arg_value.filter(|v| !v.trim().is_empty()) else {
        return default_data_path(default_filename);
    };

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    // Treat relative paths as relative to the crate directory, not the caller's cwd.
    base.join(p).to_string_lossy().to_string()
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try crate-local and repo-root .env (common when running with
    //    --manifest-path from elsewhere)
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let candidates = [manifest_dir.join(".env"), manifest_dir.join("../.env")];

    for p in candidates {
        if p.exists() {
            let _ = dotenv::from_path(&p);
        }
    }
}
