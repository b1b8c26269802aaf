//! Embedded surface configuration.

use hud_common::PointerKind;
use serde::{Deserialize, Serialize};

/// Surfaces to embed, in z-order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfacesConfig {
    /// Source locations. Element 0 is hit-tested first; the background
    /// feature goes last.
    pub sources: Vec<String>,
    /// Pointer event kinds the router subscribes to.
    pub pointer_kinds: Vec<PointerKind>,
}

impl Default for SurfacesConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                "http://0.0.0.0:9011".to_string(),
                "http://0.0.0.0:9010".to_string(),
            ],
            pointer_kinds: vec![PointerKind::Click],
        }
    }
}
