//! Validation for the `[surfaces]` section.

use std::collections::HashSet;

use crate::schema::HudConfig;

use super::helpers::validate_url;

pub(crate) fn validate_surfaces(errors: &mut Vec<String>, config: &HudConfig) {
    let mut seen = HashSet::new();
    for (i, source) in config.surfaces.sources.iter().enumerate() {
        validate_url(errors, &format!("surfaces.sources[{i}]"), source);
        if !seen.insert(source.as_str()) {
            errors.push(format!("surfaces.sources[{i}] = {source:?} is listed twice"));
        }
    }

    if config.surfaces.pointer_kinds.is_empty() {
        errors.push("surfaces.pointer_kinds must not be empty".to_string());
    }
}
