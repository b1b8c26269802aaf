use tracing::{debug, warn};

use super::{FeatureSource, LookupService};

/// Resolve every source location in order and build a surface for each.
///
/// A location that fails to resolve is logged and omitted; the rest keep
/// their relative order. `make` receives the location's index in
/// `sources`, the location, and what it resolved to.
pub async fn load_surfaces<S, F>(sources: &[String], lookup: &dyn LookupService, mut make: F) -> Vec<S>
where
    F: FnMut(usize, &str, FeatureSource) -> S,
{
    let mut surfaces = Vec::with_capacity(sources.len());
    for (index, location) in sources.iter().enumerate() {
        match lookup.resolve(location).await {
            Ok(source) => {
                debug!(location = %location, src = %source.src, "surface source resolved");
                surfaces.push(make(index, location, source));
            }
            Err(e) => {
                warn!(location = %location, error = %e, "surface omitted: source lookup failed");
            }
        }
    }
    surfaces
}
