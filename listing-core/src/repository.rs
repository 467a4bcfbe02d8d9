use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SourceConfig;
use crate::error::LoadError;
use crate::listing::Listing;

/// Where the static listing dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    Remote(Url),
    File(PathBuf),
}

impl ListingSource {
    /// `http(s)://` locations are fetched over the network, everything else is
    /// read as a local path.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::File(path),
                Err(()) => Self::File(PathBuf::from(location)),
            },
            _ => Self::File(PathBuf::from(location)),
        }
    }
}

impl fmt::Display for ListingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// In-memory collection of every listing, loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct ListingRepository {
    listings: Vec<Listing>,
    loaded: bool,
}

impl ListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the dataset and swaps it in. A failed load leaves the current
    /// collection untouched.
    pub async fn load(&mut self, client: &Client, config: &SourceConfig) -> Result<usize, LoadError> {
        let source = config.source();
        let listings = fetch_listings(client, &source, config.request_timeout()).await?;
        let count = listings.len();
        self.listings = listings;
        self.loaded = true;
        info!(%source, count, "listings loaded");
        Ok(count)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl From<Vec<Listing>> for ListingRepository {
    fn from(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            loaded: true,
        }
    }
}

/// Single fetch of a JSON array of listings. No retry.
pub async fn fetch_listings(
    client: &Client,
    source: &ListingSource,
    timeout: Duration,
) -> Result<Vec<Listing>, LoadError> {
    let bytes = match source {
        ListingSource::Remote(url) => {
            let response = client.get(url.clone()).timeout(timeout).send().await?;
            let status = response.status();
            if !status.is_success() {
                warn!(%url, status = status.as_u16(), "listing fetch rejected");
                return Err(LoadError::Status(status.as_u16()));
            }
            response.bytes().await?.to_vec()
        }
        ListingSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
    };
    debug!(bytes = bytes.len(), "parsing listing payload");
    let listings = serde_json::from_slice::<Vec<Listing>>(&bytes)?;
    Ok(listings)
}
