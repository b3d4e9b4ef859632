//! Test doubles for record provider contract tests
//!
//! The mock keeps records in memory and counts calls, which is enough to
//! exercise the trait surface and the registry without a provider API.

use dnsrec_core::config::ProviderConfig;
use dnsrec_core::error::Result;
use dnsrec_core::names;
use dnsrec_core::traits::{Record, RecordProvider, RecordProviderFactory};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A mock RecordProvider that stores records in memory and tracks calls
pub struct MockRecordProvider {
    /// Stored records, names relative to the zone
    records: Arc<Mutex<Vec<Record>>>,
    /// Number of trait calls of any kind
    call_count: Arc<AtomicUsize>,
    /// Next id to hand out
    next_id: Arc<AtomicUsize>,
}

impl MockRecordProvider {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
            next_id: Arc::new(AtomicUsize::new(1)),
        }
    }

    /// Get the number of trait calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new MockRecordProvider that shares state with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            records: Arc::clone(&other.records),
            call_count: Arc::clone(&other.call_count),
            next_id: Arc::clone(&other.next_id),
        }
    }

    fn store(&self, zone: &str, record: &Record) -> Record {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Record {
            id: Some(format!("rec-{id}")),
            name: names::relative_name(&record.absolute_name(zone), zone),
            ..record.clone()
        };
        self.records.lock().unwrap().push(stored.clone());
        stored
    }
}

#[async_trait::async_trait]
impl RecordProvider for MockRecordProvider {
    async fn list_records(&self, _zone: &str) -> Result<Vec<Record>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().clone())
    }

    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(records.iter().map(|r| self.store(zone, r)).collect())
    }

    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .retain(|existing| !records.iter().any(|r| r.same_rrset(existing, zone)));
        Ok(records.iter().map(|r| self.store(zone, r)).collect())
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let mut stored = self.records.lock().unwrap();
        let (deleted, kept): (Vec<Record>, Vec<Record>) = stored
            .drain(..)
            .partition(|existing| records.iter().any(|r| r.same_rrset(existing, zone)));
        *stored = kept;
        Ok(deleted)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Factory that hands out providers sharing one backing store
pub struct MockRecordProviderFactory {
    pub shared: MockRecordProvider,
}

impl MockRecordProviderFactory {
    /// Factory whose providers share state with `backing`
    pub fn backed_by(backing: &MockRecordProvider) -> Self {
        Self {
            shared: MockRecordProvider::sharing_state_with(backing),
        }
    }
}

impl RecordProviderFactory for MockRecordProviderFactory {
    fn create(&self, _config: &ProviderConfig) -> Result<Box<dyn RecordProvider>> {
        Ok(Box::new(MockRecordProvider::sharing_state_with(
            &self.shared,
        )))
    }
}

/// Helper to create a custom provider config routed to the mock factory
pub fn mock_config() -> ProviderConfig {
    ProviderConfig::Custom {
        factory: "mock".to_string(),
        config: serde_json::json!({ "zone": "example.com" }),
    }
}
