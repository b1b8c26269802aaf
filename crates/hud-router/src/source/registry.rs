use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use hud_common::new_id;
use tracing::debug;

use super::{FeatureSource, LookupError, LookupService};

/// Marker text telling the host to load from `src` rather than inline.
const USE_SRC: &str = "use src";

/// In-process lookup service.
///
/// Every resolved location gets a fresh feature id and is served back
/// under `{base}/api/routing/{id}/`, so surfaces load through the host's
/// own origin.
pub struct FeatureRegistry {
    base: String,
    targets: Mutex<HashMap<String, String>>,
}

impl FeatureRegistry {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            targets: Mutex::new(HashMap::new()),
        }
    }

    /// The location a feature id was registered for.
    pub fn target(&self, feature_id: &str) -> Option<String> {
        self.targets.lock().ok()?.get(feature_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.targets.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LookupService for FeatureRegistry {
    async fn resolve(&self, location: &str) -> Result<FeatureSource, LookupError> {
        let location = location.trim();
        if !(location.starts_with("http://") || location.starts_with("https://")) {
            return Err(LookupError::InvalidLocation(location.to_string()));
        }

        let feature_id = new_id();
        self.targets
            .lock()
            .map_err(|_| LookupError::Transport("feature registry lock poisoned".into()))?
            .insert(feature_id.clone(), location.to_string());

        debug!(feature = %feature_id, location, "feature registered");
        Ok(FeatureSource {
            src: format!("{}/api/routing/{}/", self.base, feature_id),
            text: Some(USE_SRC.to_string()),
        })
    }
}
