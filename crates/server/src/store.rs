//! Optional persistence of processed pages.
//!
//! A [`Store`] receives every successful pipeline run. Failures are the
//! caller's to log; they never reach the HTTP response.

use std::future::Future;

use anyhow::Context;
use deadpool_postgres::{Config, Pool, Runtime};
use precis_core::PipelineOutput;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use tokio_postgres::NoTls;
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS summaries (
    id                 UUID PRIMARY KEY,
    url                TEXT NOT NULL,
    url_hash           TEXT NOT NULL,
    title              TEXT NOT NULL,
    summary            TEXT NOT NULL,
    translated_summary TEXT NOT NULL,
    word_count         BIGINT NOT NULL,
    read_time          BIGINT NOT NULL,
    created_at         TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS summaries_url_hash_idx ON summaries (url_hash);

CREATE TABLE IF NOT EXISTS documents (
    summary_id UUID PRIMARY KEY REFERENCES summaries (id) ON DELETE CASCADE,
    content    TEXT NOT NULL,
    selector   TEXT
);
"#;

/// Sink for processed pages.
pub trait Store: Send + Sync + 'static {
    /// Persists one run and returns the new record id.
    fn save(&self, output: &PipelineOutput) -> impl Future<Output = anyhow::Result<Uuid>> + Send;
}

/// Row written to `summaries`, plus the full text for `documents`.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    pub id: Uuid,
    pub url: String,
    pub url_hash: String,
    pub title: String,
    pub summary: String,
    pub translated_summary: String,
    pub word_count: i64,
    pub read_time: i64,
    pub created_at: OffsetDateTime,
    pub content: String,
    pub selector: Option<String>,
}

impl SummaryRecord {
    pub fn from_output(output: &PipelineOutput) -> Self {
        let blog = &output.blog;
        Self {
            id: Uuid::new_v4(),
            url: blog.url.clone(),
            url_hash: url_hash(&blog.url),
            title: blog.title.clone(),
            summary: blog.summary.clone(),
            translated_summary: blog.translated_summary.clone(),
            word_count: i64::try_from(blog.word_count).unwrap_or(i64::MAX),
            read_time: i64::try_from(blog.read_time).unwrap_or(i64::MAX),
            created_at: OffsetDateTime::now_utc(),
            content: output.document.content.clone(),
            selector: output.document.selector.clone(),
        }
    }
}

/// Lowercase hex SHA-256 of the URL as submitted.
pub fn url_hash(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}

/// Postgres-backed store using a deadpool connection pool.
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    /// Builds the pool and creates the schema if it is missing.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let mut config = Config::new();
        config.url = Some(database_url.to_string());
        let pool = config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .context("create postgres pool")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        let client = self.pool.get().await.context("get postgres connection")?;
        client.batch_execute(SCHEMA).await.context("create schema")?;
        tracing::info!("database schema ready");
        Ok(())
    }
}

impl Store for PgStore {
    async fn save(&self, output: &PipelineOutput) -> anyhow::Result<Uuid> {
        let record = SummaryRecord::from_output(output);

        let mut client = self.pool.get().await.context("get postgres connection")?;
        let tx = client.transaction().await.context("begin transaction")?;

        tx.execute(
            "INSERT INTO summaries \
             (id, url, url_hash, title, summary, translated_summary, word_count, read_time, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            &[
                &record.id,
                &record.url,
                &record.url_hash,
                &record.title,
                &record.summary,
                &record.translated_summary,
                &record.word_count,
                &record.read_time,
                &record.created_at,
            ],
        )
        .await
        .context("insert summary")?;

        tx.execute(
            "INSERT INTO documents (summary_id, content, selector) VALUES ($1, $2, $3)",
            &[&record.id, &record.content, &record.selector],
        )
        .await
        .context("insert document")?;

        tx.commit().await.context("commit")?;

        tracing::debug!(id = %record.id, url = %record.url, "stored summary");
        Ok(record.id)
    }
}
