use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Read all of stdin to a `String`.
pub(crate) async fn read_stdin() -> Result<String> {
    let mut s = String::new();
    tokio::io::stdin()
        .read_to_string(&mut s)
        .await
        .context("Failed to read from stdin")?;
    Ok(s)
}

/// Deserialize a JSON file into type `T`.
pub(crate) async fn deserialize<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}
