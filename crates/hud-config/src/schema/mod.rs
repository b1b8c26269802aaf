//! Configuration schema types for the hud host.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod host;
mod surfaces;
mod system;

pub use host::*;
pub use surfaces::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct HudConfig {
    pub host: HostConfig,
    pub surfaces: SurfacesConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hud_common::PointerKind;

    #[test]
    fn default_host() {
        let config = HudConfig::default();
        assert_eq!(config.host.origin, "http://localhost:9000");
        assert_eq!(config.host.lookup, LookupKind::Http);
        assert_eq!(config.host.lookup_url, "http://localhost:9000");
    }

    #[test]
    fn default_surfaces_put_background_last() {
        let config = HudConfig::default();
        assert_eq!(
            config.surfaces.sources,
            vec!["http://0.0.0.0:9011", "http://0.0.0.0:9010"]
        );
        assert_eq!(config.surfaces.pointer_kinds, vec![PointerKind::Click]);
    }

    #[test]
    fn default_logging() {
        let config = HudConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.level.directive(), "hud=info");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: HudConfig = toml::from_str(
            r#"
[surfaces]
sources = ["http://127.0.0.1:9012"]
"#,
        )
        .unwrap();
        assert_eq!(config.surfaces.sources, vec!["http://127.0.0.1:9012"]);
        assert_eq!(config.surfaces.pointer_kinds, vec![PointerKind::Click]);
        assert_eq!(config.host.origin, "http://localhost:9000");
    }

    #[test]
    fn lookup_kind_parses_lowercase() {
        let config: HudConfig = toml::from_str(
            r#"
[host]
lookup = "local"
"#,
        )
        .unwrap();
        assert_eq!(config.host.lookup, LookupKind::Local);
    }

    #[test]
    fn pointer_kinds_parse() {
        let config: HudConfig = toml::from_str(
            r#"
[surfaces]
pointer_kinds = ["click", "pointerdown"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.surfaces.pointer_kinds,
            vec![PointerKind::Click, PointerKind::PointerDown]
        );
    }
}
