//! Geographic lookup: Brazilian states and their municipalities.

mod ibge;
mod selection;

pub use ibge::IbgeClient;
pub use selection::{LocationSelection, SelectionError};

use abstracts_core::models::{Municipality, Region};
use async_trait::async_trait;

/// Read-only source of regions and municipalities.
///
/// Lookups never fail: an unreachable or misbehaving upstream yields an empty
/// list so the form stays usable.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    async fn list_regions(&self) -> Vec<Region>;

    /// Municipalities of `region_id`. `None` or `0` returns nothing without
    /// touching the upstream.
    async fn list_municipalities(&self, region_id: Option<u32>) -> Vec<Municipality>;
}
