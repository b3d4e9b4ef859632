//! Remote record lookup and single-record mutations
//!
//! ```http
//! GET    /dns_zones?name=example.com
//! GET    /dns_zones/:zone_id/dns_records?type=TXT&name=www.example.com
//! POST   /dns_zones/:zone_id/dns_records
//! DELETE /dns_zones/:zone_id/dns_records/:record_id
//! ```

use dnsrec_core::{Error, Record, Result};

use crate::NetlifyProvider;
use crate::dispatch::{Method, ResponseShape};
use crate::model::{NetlifyDnsRecord, NetlifyZone};

impl NetlifyProvider {
    /// Resolve a zone name through the cache
    pub(crate) async fn zone(&self, zone_name: &str) -> Result<NetlifyZone> {
        self.zones
            .resolve(zone_name, |name| async move {
                self.dispatcher
                    .dispatch(
                        Method::Get,
                        "/dns_zones",
                        vec![("name", name)],
                        None,
                        ResponseShape::ZoneList,
                    )
                    .await?
                    .into_zones()
            })
            .await
    }

    /// Every record in the zone, unfiltered
    pub(crate) async fn fetch_all(&self, zone: &NetlifyZone) -> Result<Vec<NetlifyDnsRecord>> {
        self.dispatcher
            .dispatch(
                Method::Get,
                records_path(zone),
                Vec::new(),
                None,
                ResponseShape::RecordList,
            )
            .await?
            .into_records()
    }

    /// Remote records with the candidate's absolute name and type
    ///
    /// The query filters are only a hint to the API; results are filtered
    /// again here on exact hostname, type ignoring case, and value when
    /// `match_by_value` is set.
    pub(crate) async fn find_in_zone(
        &self,
        zone: &NetlifyZone,
        candidate: &Record,
        match_by_value: bool,
    ) -> Result<Vec<NetlifyDnsRecord>> {
        let hostname = candidate.absolute_name(&zone.name);
        let record_type = candidate.record_type.to_ascii_uppercase();

        let mut query = vec![("type", record_type.clone()), ("name", hostname.clone())];
        if match_by_value {
            query.push(("content", candidate.value.clone()));
        }

        let remote = self
            .dispatcher
            .dispatch(
                Method::Get,
                records_path(zone),
                query,
                None,
                ResponseShape::RecordList,
            )
            .await?
            .into_records()?;

        let matches: Vec<NetlifyDnsRecord> = remote
            .into_iter()
            .filter(|r| {
                // Trailing dot keeps the remote hostname absolute as-is
                let absolute = format!("{}.", r.hostname.trim_end_matches('.'));
                Record::new(absolute, &r.record_type, "").same_rrset(candidate, &zone.name)
            })
            .filter(|r| !match_by_value || r.value == candidate.value)
            .collect();

        tracing::debug!(
            "Found {} remote record(s) for {} (type: {})",
            matches.len(),
            hostname,
            record_type
        );
        Ok(matches)
    }

    /// Create one record; no existence check
    pub(crate) async fn create_record(
        &self,
        zone: &NetlifyZone,
        record: &Record,
    ) -> Result<NetlifyDnsRecord> {
        let body = serde_json::to_value(NetlifyDnsRecord::from_record(record)?)?;

        let created = self
            .dispatcher
            .dispatch(
                Method::Post,
                records_path(zone),
                Vec::new(),
                Some(body),
                ResponseShape::SingleRecord,
            )
            .await?
            .into_record()?;

        tracing::info!(
            "Created DNS record: {} {} (id: {})",
            created.hostname,
            created.record_type,
            created.id.as_deref().unwrap_or("-")
        );
        Ok(created)
    }

    /// Delete one remote record by id
    pub(crate) async fn delete_record(
        &self,
        zone: &NetlifyZone,
        remote: &NetlifyDnsRecord,
    ) -> Result<()> {
        let record_id = remote.id.as_deref().ok_or_else(|| {
            Error::decode(format!("remote record {} has no id", remote.hostname))
        })?;
        let zone_id = remote.dns_zone_id.as_deref().unwrap_or(&zone.id);

        self.dispatcher
            .dispatch(
                Method::Delete,
                format!("/dns_zones/{}/dns_records/{}", zone_id, record_id),
                Vec::new(),
                None,
                ResponseShape::DeleteResult,
            )
            .await?
            .into_deleted()?;

        tracing::info!(
            "Deleted DNS record: {} {} (id: {})",
            remote.hostname,
            remote.record_type,
            record_id
        );
        Ok(())
    }
}

fn records_path(zone: &NetlifyZone) -> String {
    format!("/dns_zones/{}/dns_records", zone.id)
}

/// Progress of one batch call
///
/// Tracks the records produced so far and whether any remote mutation has
/// been committed, so a failure can report what is already live.
pub(crate) struct Batch {
    operation: &'static str,
    completed: Vec<Record>,
    committed: bool,
}

impl Batch {
    pub(crate) fn new(operation: &'static str, capacity: usize) -> Self {
        Self {
            operation,
            completed: Vec::with_capacity(capacity),
            committed: false,
        }
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.committed = true;
        self.completed.push(record);
    }

    /// A remote mutation succeeded without producing an output record yet
    pub(crate) fn mark_committed(&mut self) {
        self.committed = true;
    }

    pub(crate) fn finish(self) -> Vec<Record> {
        self.completed
    }

    /// Turn a failure at input `index` into the error returned to the caller
    ///
    /// Failures before anything was committed surface unchanged.
    pub(crate) fn fail(self, index: usize, error: Error) -> Error {
        if !self.committed {
            return error;
        }
        tracing::warn!(
            "{} stopped at record {} with {} record(s) already applied: {}",
            self.operation,
            index,
            self.completed.len(),
            error
        );
        Error::incomplete(self.operation, index, self.completed, error)
    }
}
