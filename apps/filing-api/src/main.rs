//! Filing API server - compile and readiness backend
//!
//! Provides REST endpoints for:
//! - Compiling a draft to a court-ready PDF (optional Bates stamping)
//! - Readiness analysis of a draft against its case data
//! - Filing-settings patches and the issue ignore list

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use filing_api::{router, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("filing_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing filing API...");
    let state = AppState::new().await?;
    let app = router(Arc::new(state));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3002);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting filing API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
