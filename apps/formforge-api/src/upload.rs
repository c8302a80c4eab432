//! Storage for uploaded PDFs

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

pub const PDF_MIME: &str = "application/pdf";

/// Unique on-disk name for an upload received at `millis`
pub fn stored_name(millis: i64) -> String {
    format!("pdf-{}-{}.pdf", millis, Uuid::new_v4())
}

/// Write an upload into `dir`, returning the stored file name
pub async fn store(dir: &Path, bytes: &[u8]) -> std::io::Result<String> {
    tokio::fs::create_dir_all(dir).await?;
    let name = stored_name(Utc::now().timestamp_millis());
    tokio::fs::write(dir.join(&name), bytes).await?;
    tracing::debug!(file = %name, size = bytes.len(), "Stored upload");
    Ok(name)
}
