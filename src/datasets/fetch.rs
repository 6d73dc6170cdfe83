//! Whole-file HTTP downloads with retry and progress reporting.

use crate::error::{PaleoError, Result};
use crate::utils::progress::ProgressReporter;
use crate::utils::settings::Settings;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

/// Transport used by the loader to pull a remote file onto disk.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download `url` into `dest`, truncating anything already there.
    /// Returns the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

enum AttemptError {
    Retryable(PaleoError),
    Fatal(PaleoError),
}

pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    initial_retry_delay: Duration,
    max_retry_delay: Duration,
    silent: bool,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .connect_timeout(settings.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            max_retries: settings.max_retries,
            initial_retry_delay: settings.initial_retry_delay(),
            max_retry_delay: settings.max_retry_delay(),
            silent: false,
        })
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    async fn fetch_once(&self, url: &str, dest: &Path) -> std::result::Result<u64, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(PaleoError::fetch(url, e.to_string())))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(AttemptError::Fatal(PaleoError::fetch(
                url,
                format!("HTTP error: {}", status),
            )));
        }
        if !status.is_success() {
            return Err(AttemptError::Retryable(PaleoError::fetch(
                url,
                format!("HTTP error: {}", status),
            )));
        }

        let total_bytes = response.content_length();
        let progress = match total_bytes {
            Some(total) => ProgressReporter::new_download(total, url, self.silent),
            None => ProgressReporter::new_spinner(url, self.silent),
        };

        let mut file = File::create(dest)
            .await
            .map_err(|e| AttemptError::Fatal(e.into()))?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| AttemptError::Retryable(PaleoError::fetch(url, e.to_string())))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AttemptError::Fatal(e.into()))?;
            written += chunk.len() as u64;
            progress.update(written);
        }

        file.flush().await.map_err(|e| AttemptError::Fatal(e.into()))?;
        file.sync_all()
            .await
            .map_err(|e| AttemptError::Fatal(e.into()))?;

        check_length(url, total_bytes, written).map_err(AttemptError::Retryable)?;

        progress.finish_with_message(&format!("Downloaded {} bytes", written));
        Ok(written)
    }
}

// A body shorter than its Content-Length means the connection dropped.
fn check_length(url: &str, expected: Option<u64>, written: u64) -> Result<()> {
    match expected {
        Some(expected) if written != expected => Err(PaleoError::fetch(
            url,
            format!(
                "download size mismatch: expected {} bytes, got {}",
                expected, written
            ),
        )),
        _ => Ok(()),
    }
}

fn next_delay(delay: Duration, max: Duration) -> Duration {
    std::cmp::min(delay.saturating_mul(2), max)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self, dest), fields(url = %url))]
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut retry_count = 0;
        let mut delay = self.initial_retry_delay;

        loop {
            match self.fetch_once(url, dest).await {
                Ok(bytes) => {
                    info!(bytes, path = %dest.display(), "Download completed");
                    return Ok(bytes);
                }
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Retryable(e)) => {
                    retry_count += 1;
                    if retry_count > self.max_retries {
                        debug!(retries = self.max_retries, "Giving up on download");
                        return Err(e);
                    }

                    warn!(
                        error = %e,
                        retry = retry_count,
                        max_retries = self.max_retries,
                        delay_secs = delay.as_secs(),
                        "Download failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, self.max_retry_delay);
                }
            }
        }
    }
}
