// # Record Provider Trait
//
// Defines the interface for managing DNS records via provider APIs.
//
// ## Implementations
//
// - Netlify: `dnsrec-provider-netlify` crate
//
// ## Usage
//
// ```rust,ignore
// use dnsrec_core::{Record, RecordProvider};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* RecordProvider implementation */;
//
//     // Upsert an ACME challenge record
//     provider.set_records(
//         "example.com",
//         &[Record::new("_acme-challenge.home", "TXT", "abc123")],
//     ).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::names;

/// A DNS record as seen by callers
///
/// `name` may be relative to the zone (`"www"`, `"@"`) or absolute. Records
/// returned by a provider always carry a zone-relative name and the
/// provider-assigned `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier, `None` until the record exists remotely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record name, relative or absolute
    pub name: String,
    /// Record type (`A`, `TXT`, `CNAME`, ...), compared case-insensitively
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record data
    pub value: String,
    /// Time-to-live; zero means "provider default"
    #[serde(default)]
    pub ttl: Duration,
}

impl Record {
    /// Create a record with the provider default TTL
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
            ttl: Duration::ZERO,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Absolute name of this record within `zone` (no trailing dot)
    pub fn absolute_name(&self, zone: &str) -> String {
        names::absolute_name(&self.name, zone)
    }

    /// Whether this record and `other` identify the same RRset in `zone`
    pub fn same_rrset(&self, other: &Record, zone: &str) -> bool {
        self.record_type.eq_ignore_ascii_case(&other.record_type)
            && self.absolute_name(zone) == other.absolute_name(zone)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name,
            self.ttl.as_secs(),
            self.record_type,
            self.value
        )
    }
}

/// Trait for DNS record provider implementations
///
/// Each operation takes a zone name (with or without a trailing dot) and
/// plain record data. Records in a batch are processed one after another,
/// in input order.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Partial Effects
///
/// Batch operations are not transactional. When a batch fails after some
/// records were already written, the error is [`crate::Error::Incomplete`]
/// and carries the committed records. Nothing is rolled back.
///
/// # Cancellation
///
/// Dropping the returned future (for example through
/// `tokio::time::timeout`) abandons the in-flight request. Remote changes
/// made before that point stay applied.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// List every record in the zone
    ///
    /// An empty zone yields an empty vector, not an error.
    async fn list_records(&self, zone: &str) -> Result<Vec<Record>, crate::Error>;

    /// Create the given records without checking for existing ones
    ///
    /// Returns the created records, in input order.
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;

    /// Make each record's RRset hold exactly the given value
    ///
    /// Existing records with the same name and type are replaced; records
    /// without a match are created. Several inputs for one name and type
    /// leave all of their values in place.
    async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;

    /// Delete every remote record matching each input's name and type
    ///
    /// Inputs without a remote match are skipped silently. Returns the
    /// records that were actually deleted.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing record providers from configuration
pub trait RecordProviderFactory: Send + Sync {
    /// Create a RecordProvider instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn RecordProvider>, crate::Error>;
}
