//! Host configuration types.

use serde::{Deserialize, Serialize};

/// How surface sources are resolved into loadable addresses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LookupKind {
    /// Ask the lookup service over HTTP (`/api/getfeature`).
    #[default]
    Http,
    /// Resolve in-process with a feature registry.
    Local,
}

/// Host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Origin of the host page; the only origin trusted in release builds.
    pub origin: String,
    pub lookup: LookupKind,
    /// Base URL of the lookup service. For `local` lookup it is the base
    /// of the routing addresses handed out.
    pub lookup_url: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:9000".to_string(),
            lookup: LookupKind::Http,
            lookup_url: "http://localhost:9000".to_string(),
        }
    }
}
