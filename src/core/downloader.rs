use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use serde::de::DeserializeOwned;
use sha1::{Digest, Sha1};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http;

/// Number of attempts before a download is reported as failed.
const MAX_ATTEMPTS: u32 = 3;

/// Retrying, SHA-1 validated downloader around a shared HTTP client.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new() -> LauncherResult<Self> {
        Ok(Self {
            client: http::build_http_client()?,
        })
    }

    /// The underlying HTTP client, for callers that need plain requests.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Download a single file to `dest`, optionally validating its SHA-1.
    ///
    /// Creates parent directories as needed and retries transient failures.
    /// The body is streamed to disk so large pack archives never sit fully
    /// in memory.
    pub async fn download_file(
        &self,
        url: &str,
        dest: &Path,
        sha1_expected: Option<&str>,
    ) -> LauncherResult<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LauncherError::io(parent, e))?;
        }

        let mut last_error = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_download(url, dest, sha1_expected).await {
                Ok(()) => {
                    debug!("Downloaded: {} -> {:?}", url, dest);
                    return Ok(());
                }
                Err(e) => {
                    if attempt < MAX_ATTEMPTS {
                        warn!("Download attempt {}/{} failed for {}: {}", attempt, MAX_ATTEMPTS, url, e);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LauncherError::Other(format!("download failed: {url}"))))
    }

    async fn try_download(
        &self,
        url: &str,
        dest: &Path,
        sha1_expected: Option<&str>,
    ) -> LauncherResult<()> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut hasher = sha1_expected.map(|_| Sha1::new());
        let mut stream = response.bytes_stream();

        // Scoped so the handle is dropped before any hash-mismatch cleanup.
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|e| LauncherError::io(dest, e))?;

            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                if let Some(hasher) = hasher.as_mut() {
                    hasher.update(&chunk);
                }
                file.write_all(&chunk)
                    .await
                    .map_err(|e| LauncherError::io(dest, e))?;
            }

            file.flush().await.map_err(|e| LauncherError::io(dest, e))?;
        }

        if let (Some(hasher), Some(expected)) = (hasher, sha1_expected) {
            let actual = hex::encode(hasher.finalize());
            if actual != expected {
                let _ = tokio::fs::remove_file(dest).await;
                return Err(LauncherError::Sha1Mismatch {
                    path: dest.to_path_buf(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        Ok(())
    }

    /// Fetch a JSON document and decode it into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> LauncherResult<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}
