//! Zone name → Netlify zone resolution with a per-provider cache

use dnsrec_core::names::normalize_zone;
use dnsrec_core::{Error, Result};
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::Mutex;

use crate::model::NetlifyZone;

/// Cache of resolved zones, keyed by normalized zone name
///
/// The lock is held across the whole check-lookup-store sequence, so
/// concurrent resolutions (of any name) run one at a time and a name is
/// looked up at most once. Entries are never evicted; use [`ZoneCache::clear`]
/// to force fresh lookups.
#[derive(Debug, Default)]
pub struct ZoneCache {
    zones: Mutex<HashMap<String, NetlifyZone>>,
}

impl ZoneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `zone_name`, calling `lookup` with the normalized name on a miss
    ///
    /// `lookup` returns every zone the provider reports for the name; exactly
    /// one is required.
    pub async fn resolve<F, Fut>(&self, zone_name: &str, lookup: F) -> Result<NetlifyZone>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Vec<NetlifyZone>>>,
    {
        let name = normalize_zone(zone_name).to_string();
        let mut zones = self.zones.lock().await;

        if let Some(zone) = zones.get(&name) {
            return Ok(zone.clone());
        }

        tracing::debug!("Looking up zone: {}", name);
        let mut found = lookup(name.clone()).await?;

        let zone = match found.len() {
            0 => return Err(Error::zone_not_found(name)),
            1 => found.remove(0),
            n => return Err(Error::ambiguous_zone(name, n)),
        };

        tracing::debug!("Resolved zone {} to id {}", name, zone.id);
        zones.insert(name, zone.clone());
        Ok(zone)
    }

    /// Drop every cached zone
    pub async fn clear(&self) {
        self.zones.lock().await.clear();
    }

    /// Number of cached zones
    pub async fn len(&self) -> usize {
        self.zones.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.zones.lock().await.is_empty()
    }
}
