//! Hud configuration system.
//!
//! TOML-based configuration for the host process: where the host lives,
//! how surface sources are resolved, which surfaces to embed and which
//! pointer kinds to route. All sections use defaults so partial configs
//! work out of the box.
//!
//! Trusted development hostnames are compiled into `hud-bus` and are not
//! part of this schema.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hud_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("serving {}", config.host.origin);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HudConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use hud_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default file is created if it does not exist yet. The result is
/// validated; validation failures are returned as errors.
pub fn load_config(path: Option<&Path>) -> Result<HudConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}
