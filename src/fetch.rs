use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resource::{Identifier, Resource};
use crate::unpack::unpack;

/// Fetches one issue and leaves its PGN file in the output directory.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, id: Identifier) -> Result<PathBuf>;
}

/// Downloads archives over one pooled HTTP client shared by all workers.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
    output_dir: PathBuf,
    request_timeout: Duration,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(Error::from_request)?;

        Ok(Fetcher {
            client,
            base_url: config.base_url.clone(),
            output_dir: config.output_dir.clone(),
            request_timeout: config.request_timeout,
        })
    }

    async fn download(&self, resource: &Resource, archive_path: &Path) -> Result<()> {
        debug!(url = %resource.url, "requesting archive");

        let response = self
            .client
            .get(&resource.url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(Error::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(Error::from_request)?;
        tokio::fs::write(archive_path, &body).await?;
        debug!(path = ?archive_path, bytes = body.len(), "archive stored");
        Ok(())
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn fetch(&self, id: Identifier) -> Result<PathBuf> {
        let resource = Resource::new(id, &self.base_url);
        let archive_path = self.output_dir.join(&resource.archive_name);

        let result = match self.download(&resource, &archive_path).await {
            Ok(()) => {
                let path = archive_path.clone();
                let dest = self.output_dir.clone();
                match tokio::task::spawn_blocking(move || unpack(&path, &dest)).await {
                    Ok(unpacked) => unpacked,
                    Err(e) => Err(Error::Task(e.to_string())),
                }
            }
            Err(e) => Err(e),
        };

        remove_archive(&archive_path).await;
        result
    }
}

/// Best-effort removal; a failed write may never have created the file.
async fn remove_archive(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(?path, "could not remove archive: {}", e),
    }
}
