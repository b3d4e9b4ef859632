// # Netlify DNS Provider
//
// This crate implements `dnsrec_core::RecordProvider` against the Netlify
// DNS API.
//
// ## Behavior
//
// - Zone names resolve to Netlify zone ids once per provider instance and
//   are cached (`zones`)
// - Candidate records are matched against remote records by absolute name
//   and type (`records`)
// - Every request is authenticated with the personal access token and
//   decoded according to a declared response shape (`dispatch`)
// - Netlify has no update verb: "set" deletes the matching records and
//   creates the new one. This is NOT atomic; if the create fails after the
//   delete, the name is left without a record until set again.
// - NO retry, backoff or rate limiting; errors go straight to the caller
//
// ## Security Requirements
//
// - Token NEVER appears in logs or Debug output
// - Provider MUST fail fast if the token is empty
//
// ## API Reference
//
// - Netlify API: https://open-api.netlify.com/
// - List zones: GET `/dns_zones?name=...`
// - List records: GET `/dns_zones/:zone_id/dns_records`
// - Create record: POST `/dns_zones/:zone_id/dns_records`
// - Delete record: DELETE `/dns_zones/:zone_id/dns_records/:record_id`

pub mod dispatch;
pub mod model;
mod records;
pub mod zones;

use async_trait::async_trait;
use dnsrec_core::config::ProviderConfig;
use dnsrec_core::traits::{Record, RecordProvider, RecordProviderFactory};
use dnsrec_core::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;

use crate::dispatch::{Dispatcher, HttpTransport, Transport};
use crate::model::NetlifyDnsRecord;
use crate::records::Batch;
use crate::zones::ZoneCache;

/// Netlify DNS provider
///
/// Cheap to share behind an `Arc`; all methods take `&self`. Each instance
/// owns its own zone cache.
pub struct NetlifyProvider {
    dispatcher: Dispatcher,
    zones: ZoneCache,
}

// Custom Debug implementation that hides the token
impl std::fmt::Debug for NetlifyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlifyProvider")
            .field("personal_access_token", &"<REDACTED>")
            .field("zones", &self.zones)
            .finish()
    }
}

impl NetlifyProvider {
    /// Create a provider talking to the public Netlify API
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the token is empty or the HTTP client cannot be
    /// built.
    pub fn new(personal_access_token: impl Into<String>) -> Result<Self> {
        Self::with_transport(personal_access_token, Arc::new(HttpTransport::new()?))
    }

    /// Create a provider over a caller-supplied transport
    pub fn with_transport(
        personal_access_token: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let token = personal_access_token.into();
        if token.trim().is_empty() {
            return Err(Error::config("Netlify personal access token cannot be empty"));
        }

        Ok(Self {
            dispatcher: Dispatcher::new(token, transport),
            zones: ZoneCache::new(),
        })
    }

    /// Forget every resolved zone; the next operation looks zones up again
    pub async fn clear_zone_cache(&self) {
        self.zones.clear().await;
    }

    /// Remote records matching the candidate's name and type
    ///
    /// With `match_by_value`, the value must match too. Returns an empty
    /// vector when nothing matches.
    pub async fn find_records(
        &self,
        zone: &str,
        candidate: &Record,
        match_by_value: bool,
    ) -> Result<Vec<NetlifyDnsRecord>> {
        let zone = self.zone(zone).await?;
        self.find_in_zone(&zone, candidate, match_by_value).await
    }
}

#[async_trait]
impl RecordProvider for NetlifyProvider {
    async fn list_records(&self, zone: &str) -> Result<Vec<Record>> {
        let zone = self.zone(zone).await?;
        let remote = self.fetch_all(&zone).await?;

        tracing::debug!("Listed {} record(s) in {}", remote.len(), zone.name);
        Ok(remote.iter().map(|r| r.to_record(&zone.name)).collect())
    }

    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let zone = self.zone(zone).await?;
        let mut batch = Batch::new("append", records.len());

        for (index, record) in records.iter().enumerate() {
            match self.create_record(&zone, record).await {
                Ok(created) => batch.push(created.to_record(&zone.name)),
                Err(e) => return Err(batch.fail(index, e)),
            }
        }

        Ok(batch.finish())
    }

    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let zone = self.zone(zone).await?;
        let mut batch = Batch::new("set", records.len());
        // Ids created earlier in this call are never stale
        let mut created_ids: HashSet<String> = HashSet::new();

        for (index, record) in records.iter().enumerate() {
            let mut existing = match self.find_in_zone(&zone, record, false).await {
                Ok(existing) => existing,
                Err(e) => return Err(batch.fail(index, e)),
            };
            existing.retain(|r| r.id.as_ref().is_none_or(|id| !created_ids.contains(id)));

            for stale in &existing {
                if let Err(e) = self.delete_record(&zone, stale).await {
                    return Err(batch.fail(index, e));
                }
                batch.mark_committed();
            }

            match self.create_record(&zone, record).await {
                Ok(created) => {
                    if let Some(id) = &created.id {
                        created_ids.insert(id.clone());
                    }
                    batch.push(created.to_record(&zone.name));
                }
                Err(e) => {
                    if !existing.is_empty() {
                        tracing::warn!(
                            "Deleted {} record(s) for {} (type: {}) but could not create the replacement",
                            existing.len(),
                            record.absolute_name(&zone.name),
                            record.record_type
                        );
                    }
                    return Err(batch.fail(index, e));
                }
            }
        }

        Ok(batch.finish())
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let zone = self.zone(zone).await?;
        let mut batch = Batch::new("delete", records.len());

        for (index, record) in records.iter().enumerate() {
            let matches = match self.find_in_zone(&zone, record, false).await {
                Ok(matches) => matches,
                Err(e) => return Err(batch.fail(index, e)),
            };

            if matches.is_empty() {
                tracing::debug!(
                    "Nothing to delete for {} (type: {})",
                    record.absolute_name(&zone.name),
                    record.record_type
                );
            }

            for remote in &matches {
                if let Err(e) = self.delete_record(&zone, remote).await {
                    return Err(batch.fail(index, e));
                }
                batch.push(remote.to_record(&zone.name));
            }
        }

        Ok(batch.finish())
    }

    fn provider_name(&self) -> &'static str {
        "netlify"
    }
}

/// Factory for creating Netlify providers
pub struct NetlifyFactory;

impl RecordProviderFactory for NetlifyFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn RecordProvider>> {
        match config {
            ProviderConfig::Netlify {
                personal_access_token,
            } => Ok(Box::new(NetlifyProvider::new(
                personal_access_token.clone(),
            )?)),
            _ => Err(Error::config("Invalid config for Netlify provider")),
        }
    }
}

/// Register the Netlify provider with a registry
///
/// # Example
///
/// ```rust
/// use dnsrec_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// dnsrec_provider_netlify::register(&registry);
/// assert!(registry.has_provider("netlify"));
/// ```
pub fn register(registry: &dnsrec_core::ProviderRegistry) {
    registry.register_provider("netlify", Box::new(NetlifyFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creation() {
        let factory = NetlifyFactory;
        let provider = factory.create(&ProviderConfig::netlify("nfp_test_token"));
        assert!(provider.is_ok());
    }

    #[test]
    fn test_factory_rejects_other_config() {
        let factory = NetlifyFactory;
        let config = ProviderConfig::Custom {
            factory: "netlify".to_string(),
            config: serde_json::json!({}),
        };
        assert!(matches!(factory.create(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(NetlifyProvider::new(""), Err(Error::Config(_))));
        assert!(matches!(NetlifyProvider::new("  "), Err(Error::Config(_))));
    }

    #[test]
    fn test_provider_name() {
        let provider = NetlifyProvider::new("token").unwrap();
        assert_eq!(provider.provider_name(), "netlify");
    }

    #[test]
    fn test_token_not_exposed_in_debug() {
        let provider = NetlifyProvider::new("nfp_secret_token_12345").unwrap();

        let debug_str = format!("{:?}", provider);
        assert!(!debug_str.contains("nfp_secret_token_12345"));
        assert!(debug_str.contains("NetlifyProvider"));
    }

    #[test]
    fn test_register() {
        let registry = dnsrec_core::ProviderRegistry::new();
        register(&registry);

        assert!(registry.has_provider("netlify"));
        let provider = registry
            .create_provider(&ProviderConfig::netlify("nfp_test_token"))
            .unwrap();
        assert_eq!(provider.provider_name(), "netlify");
    }
}
