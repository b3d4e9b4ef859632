//! Netlify wire types and their mapping to [`Record`]

use dnsrec_core::names::relative_name;
use dnsrec_core::{Error, Record, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A DNS zone as returned by `GET /dns_zones`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlifyZone {
    pub id: String,
    /// Zone name, no trailing dot
    pub name: String,
}

/// A DNS record on the wire
///
/// `id` and `dns_zone_id` are only present on records the provider has
/// created; request bodies leave them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlifyDnsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_zone_id: Option<String>,
    /// Absolute on responses; requests may send a zone-relative name
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    /// Seconds; omitted to get the provider default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Body the delete endpoint sends instead of an empty response on failure
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteErrorEnvelope {
    pub message: String,
}

impl NetlifyDnsRecord {
    /// Build a create-request body from a caller record
    ///
    /// The name is sent as given; Netlify resolves relative names against
    /// the zone itself.
    pub fn from_record(record: &Record) -> Result<Self> {
        if record.record_type.trim().is_empty() {
            return Err(Error::invalid_input(format!(
                "record {:?} has no type",
                record.name
            )));
        }

        let ttl = match record.ttl.as_secs() {
            0 => None,
            secs => Some(u32::try_from(secs).unwrap_or(u32::MAX)),
        };

        Ok(Self {
            id: None,
            dns_zone_id: None,
            hostname: record.name.clone(),
            record_type: record.record_type.to_ascii_uppercase(),
            value: record.value.clone(),
            ttl,
        })
    }

    /// Convert to a caller record with a name relative to `zone`
    pub fn to_record(&self, zone: &str) -> Record {
        Record {
            id: self.id.clone(),
            name: relative_name(&self.hostname, zone),
            record_type: self.record_type.clone(),
            value: self.value.clone(),
            ttl: Duration::from_secs(u64::from(self.ttl.unwrap_or(0))),
        }
    }
}
