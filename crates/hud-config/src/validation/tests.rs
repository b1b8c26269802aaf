//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = HudConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_origin_with_path() {
    let mut config = HudConfig::default();
    config.host.origin = "http://localhost:9000/index.html".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("host.origin"));
}

#[test]
fn catches_non_http_lookup_url() {
    let mut config = HudConfig::default();
    config.host.lookup_url = "ftp://files.example.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("host.lookup_url"));
}

#[test]
fn catches_bad_source() {
    let mut config = HudConfig::default();
    config.surfaces.sources = vec!["javascript:alert(1)".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("surfaces.sources[0]"));
}

#[test]
fn catches_duplicate_source() {
    let mut config = HudConfig::default();
    config.surfaces.sources = vec![
        "http://0.0.0.0:9010".into(),
        "http://0.0.0.0:9010".into(),
    ];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("listed twice"));
}

#[test]
fn empty_sources_are_valid() {
    // Only the backplane remains.
    let mut config = HudConfig::default();
    config.surfaces.sources.clear();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_pointer_kinds() {
    let mut config = HudConfig::default();
    config.surfaces.pointer_kinds.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("surfaces.pointer_kinds"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = HudConfig::default();
    config.host.origin = String::new();
    config.surfaces.pointer_kinds.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("host.origin"));
    assert!(err.contains("surfaces.pointer_kinds"));
    assert!(err.contains("; "));
}

#[test]
fn accepts_dev_hosts_and_ports() {
    let mut config = HudConfig::default();
    config.host.origin = "http://hud.localhost".into();
    config.surfaces.sources = vec!["http://127.0.0.1:9012/".into()];
    assert!(validate(&config).is_ok());
}
