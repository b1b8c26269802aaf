//! Which origins the bus accepts messages from.

// =============================================================================
// DEV HOSTNAMES
// =============================================================================

/// Local hostnames trusted in debug builds regardless of the host origin.
///
/// Fixed at compile time; release builds trust only the host origin.
pub const DEV_HOSTNAMES: &[&str] = &["hud.localhost", "127.0.0.1", "0.0.0.0"];

/// Hostname part of an origin such as `http://127.0.0.1:9010`.
pub fn origin_host(origin: &str) -> Option<&str> {
    let (_, rest) = origin.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

// =============================================================================
// POLICY
// =============================================================================

#[derive(Debug, Clone)]
pub struct OriginPolicy {
    host_origin: String,
    dev_hosts: &'static [&'static str],
}

impl OriginPolicy {
    /// Trust `host_origin`, plus `DEV_HOSTNAMES` in debug builds.
    pub fn new(host_origin: impl Into<String>) -> Self {
        Self {
            host_origin: host_origin.into(),
            dev_hosts: if cfg!(debug_assertions) {
                DEV_HOSTNAMES
            } else {
                &[]
            },
        }
    }

    /// Trust `host_origin` only.
    pub fn strict(host_origin: impl Into<String>) -> Self {
        Self {
            host_origin: host_origin.into(),
            dev_hosts: &[],
        }
    }

    pub fn host_origin(&self) -> &str {
        &self.host_origin
    }

    pub fn is_trusted(&self, origin: &str) -> bool {
        if origin == self.host_origin {
            return true;
        }
        origin_host(origin).is_some_and(|host| self.dev_hosts.contains(&host))
    }
}

// =============================================================================
// TESTS
// =============================================================================
