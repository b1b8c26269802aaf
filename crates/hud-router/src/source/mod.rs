//! Resolving surface source locations into loadable resources.
//!
//! The lookup service itself is an external collaborator; this module
//! defines its contract, an in-process implementation, and the loader
//! that builds the surface list at startup.

mod loader;
mod registry;

pub use loader::load_surfaces;
pub use registry::FeatureRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the lookup service returns for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSource {
    /// Concrete loadable address.
    pub src: String,
    /// Optional inline source text.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP error, status = {status}")]
    Http { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid location: {0}")]
    InvalidLocation(String),
}

/// Resolves a surface location to a loadable resource.
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn resolve(&self, location: &str) -> Result<FeatureSource, LookupError>;
}
