//! Validation for the `[host]` section.

use crate::schema::HudConfig;

use super::helpers::{validate_origin, validate_url};

pub(crate) fn validate_host(errors: &mut Vec<String>, config: &HudConfig) {
    validate_origin(errors, "host.origin", &config.host.origin);
    validate_url(errors, "host.lookup_url", &config.host.lookup_url);
}
