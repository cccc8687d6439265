use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use signage_model::{ScreenConfig, ScreenId};

use crate::error::{PlayerError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the poller gets screen configurations from.
///
/// `Ok(None)` means the server knows nothing to play for this screen right
/// now; the rotation should go idle.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<Option<ScreenConfig>>;
}

/// HTTP client for `GET /api/screens/{id}/config`.
#[derive(Debug, Clone)]
pub struct ConfigClient {
    client: Client,
    base_url: String,
    config_url: String,
}

impl ConfigClient {
    pub fn new(base_url: &str, screen_id: ScreenId) -> Result<Self> {
        let base_url = normalize_base_url(base_url);
        Url::parse(&base_url).map_err(|source| PlayerError::InvalidServerUrl {
            url: base_url.clone(),
            source,
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PlayerError::Client)?;
        let config_url = format!("{base_url}/api/screens/{screen_id}/config");

        info!(%config_url, "config client ready");
        Ok(Self {
            client,
            base_url,
            config_url,
        })
    }

    /// Server origin without a trailing slash; media paths resolve against it.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ConfigSource for ConfigClient {
    async fn fetch(&self) -> Result<Option<ScreenConfig>> {
        let response = self
            .client
            .get(&self.config_url)
            .send()
            .await
            .map_err(|source| PlayerError::Request {
                url: self.config_url.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(url = %self.config_url, "no playlist for this screen");
                Ok(None)
            }
            status if status.is_success() => {
                let config = response.json::<ScreenConfig>().await.map_err(|source| {
                    PlayerError::Decode {
                        url: self.config_url.clone(),
                        source,
                    }
                })?;
                Ok(Some(config))
            }
            status => Err(PlayerError::Status {
                status,
                url: self.config_url.clone(),
            }),
        }
    }
}

/// Adds `http://` when no scheme was given and trims trailing slashes.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    if normalized != raw {
        warn!(from = %raw, to = %normalized, "normalized server URL");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_scheme_and_loses_trailing_slash() {
        assert_eq!(normalize_base_url("localhost:5000/"), "http://localhost:5000");
        assert_eq!(
            normalize_base_url("https://signage.hospital.org"),
            "https://signage.hospital.org"
        );
    }

    #[test]
    fn config_url_targets_the_screen() {
        let id: ScreenId = "0190b5a4-0000-7000-8000-00000000abcd".parse().unwrap();
        let client = ConfigClient::new("http://localhost:5000/", id).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.config_url,
            "http://localhost:5000/api/screens/0190b5a4-0000-7000-8000-00000000abcd/config"
        );
    }
}
