//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod host;
mod surfaces;

#[cfg(test)]
mod tests;

use crate::schema::HudConfig;
use hud_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HudConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    host::validate_host(&mut errors, config);
    surfaces::validate_surfaces(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
