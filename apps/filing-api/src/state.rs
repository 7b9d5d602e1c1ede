//! Application state for the filing API.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;

use crate::stamp::LopdfBatesStamper;
use filing_compiler::BatesStamper;

pub struct AppState {
    pub db: SqlitePool,
    pub stamper: Arc<dyn BatesStamper>,
    pub api_token: String,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        let db_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:filing.db?mode=rwc".to_string());
        let api_token = std::env::var("API_TOKEN").context("API_TOKEN must be set")?;

        tracing::info!("Connecting to database: {}", db_url);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        Self::with_pool(pool, Arc::new(LopdfBatesStamper), api_token).await
    }

    /// Build state around an existing pool; used by tests with an in-memory
    /// database and a substitute stamper.
    pub async fn with_pool(
        pool: SqlitePool,
        stamper: Arc<dyn BatesStamper>,
        api_token: String,
    ) -> Result<Self> {
        Self::run_migrations(&pool).await?;
        Ok(Self {
            db: pool,
            stamper,
            api_token,
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cases (
                id TEXT PRIMARY KEY,
                intake_json TEXT,
                parties_json TEXT,
                exhibits_json TEXT,
                authorities_json TEXT,
                filing_json TEXT,
                signer_name TEXT,
                signer_title TEXT,
                signature_image BLOB,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS drafts (
                id TEXT PRIMARY KEY,
                case_id TEXT NOT NULL REFERENCES cases(id),
                title TEXT,
                content_json TEXT,
                plain_text TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_drafts_case ON drafts(case_id)
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }
}
