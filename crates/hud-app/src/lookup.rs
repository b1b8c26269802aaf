//! Feature lookup backends for the host.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hud_config::schema::{HostConfig, LookupKind};
use hud_router::{FeatureRegistry, FeatureSource, LookupError, LookupService};
use tracing::{debug, warn};

/// Lookup over HTTP: `GET {base}/api/getfeature?feature_url=...`.
pub struct HttpLookup {
    base: String,
    http: reqwest::Client,
}

impl HttpLookup {
    pub fn new(base: &str) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/api/getfeature", self.base)
    }
}

#[async_trait]
impl LookupService for HttpLookup {
    async fn resolve(&self, location: &str) -> Result<FeatureSource, LookupError> {
        let location = location.trim();
        if !(location.starts_with("http://") || location.starts_with("https://")) {
            return Err(LookupError::InvalidLocation(location.to_string()));
        }

        debug!(location, "feature lookup request");

        let response = self
            .http
            .get(self.endpoint())
            .query(&[("feature_url", location)])
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json::<FeatureSource>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

/// Build the lookup service the config asks for.
///
/// Falls back to the in-process registry if the HTTP client can't be built.
pub fn build_lookup(host: &HostConfig) -> Arc<dyn LookupService> {
    match host.lookup {
        LookupKind::Http => match HttpLookup::new(&host.lookup_url) {
            Ok(lookup) => Arc::new(lookup),
            Err(e) => {
                warn!(error = %e, "HTTP lookup unavailable, using local registry");
                Arc::new(FeatureRegistry::new(&host.lookup_url))
            }
        },
        LookupKind::Local => Arc::new(FeatureRegistry::new(&host.lookup_url)),
    }
}
