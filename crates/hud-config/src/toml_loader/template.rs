//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Hud Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[host]
# origin = "http://localhost:9000"
# lookup = "http"                       # "http" or "local"
# lookup_url = "http://localhost:9000"

[surfaces]
# Checked front to back; the background feature goes last.
# sources = ["http://0.0.0.0:9011", "http://0.0.0.0:9010"]
# pointer_kinds = ["click"]             # click, pointerdown, pointerup, mouseover

[logging]
# level = "info"                        # trace, debug, info, warn, error
"##
}
