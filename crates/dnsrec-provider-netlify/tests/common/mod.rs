//! Test doubles for Netlify provider contract tests
//!
//! `FakeNetlify` is an in-memory stand-in for the Netlify DNS API behind the
//! `Transport` seam. It records every request so tests can count calls, and
//! it ignores record query filters the way a lax API would, so the
//! provider's own post-filtering is exercised.

#![allow(dead_code)]

use dnsrec_core::names::absolute_name;
use dnsrec_core::{Error, Result};
use dnsrec_provider_netlify::NetlifyProvider;
use dnsrec_provider_netlify::dispatch::{ApiRequest, ApiResponse, Method, Transport};
use dnsrec_provider_netlify::model::{NetlifyDnsRecord, NetlifyZone};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "nfp_test_token";
pub const ZONE: &str = "example.com";
pub const ZONE_ID: &str = "zone-1";

/// One request as seen by the fake
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub authorization: String,
}

/// A canned failure for the next request with a given method
#[derive(Debug, Clone)]
pub enum Injected {
    Response(ApiResponse),
    Transport,
}

/// In-memory Netlify DNS API
pub struct FakeNetlify {
    zones: Vec<NetlifyZone>,
    records: Mutex<Vec<NetlifyDnsRecord>>,
    calls: Mutex<Vec<RecordedCall>>,
    injected: Mutex<VecDeque<(Method, Injected)>>,
    next_id: AtomicUsize,
}

impl FakeNetlify {
    /// Fake account holding only `example.com`
    pub fn new() -> Arc<Self> {
        Self::with_zones(vec![zone(ZONE_ID, ZONE)])
    }

    pub fn with_zones(zones: Vec<NetlifyZone>) -> Arc<Self> {
        Arc::new(Self {
            zones,
            records: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            injected: Mutex::new(VecDeque::new()),
            next_id: AtomicUsize::new(1),
        })
    }

    /// Insert an existing record into `example.com`
    pub fn seed(&self, hostname: &str, record_type: &str, value: &str) -> NetlifyDnsRecord {
        self.seed_in(ZONE_ID, hostname, record_type, value)
    }

    pub fn seed_in(
        &self,
        zone_id: &str,
        hostname: &str,
        record_type: &str,
        value: &str,
    ) -> NetlifyDnsRecord {
        let record = NetlifyDnsRecord {
            id: Some(self.new_id()),
            dns_zone_id: Some(zone_id.to_string()),
            hostname: hostname.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            ttl: Some(3600),
        };
        self.records.lock().unwrap().push(record.clone());
        record
    }

    /// Make the next request with `method` fail
    pub fn inject(&self, method: Method, failure: Injected) {
        self.injected.lock().unwrap().push_back((method, failure));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests with this method
    pub fn count(&self, method: Method) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }

    /// Number of zone lookups (`GET /dns_zones`)
    pub fn zone_lookups(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == Method::Get && c.path == "/dns_zones")
            .count()
    }

    /// Methods of all requests, in order
    pub fn methods(&self) -> Vec<Method> {
        self.calls().iter().map(|c| c.method).collect()
    }

    /// Current remote records
    pub fn records(&self) -> Vec<NetlifyDnsRecord> {
        self.records.lock().unwrap().clone()
    }

    fn new_id(&self) -> String {
        format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn take_injected(&self, method: Method) -> Option<Injected> {
        let mut injected = self.injected.lock().unwrap();
        let position = injected.iter().position(|(m, _)| *m == method)?;
        injected.remove(position).map(|(_, failure)| failure)
    }

    fn zone_by_id(&self, zone_id: &str) -> Option<&NetlifyZone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["dns_zones"]) => {
                let name = request
                    .query
                    .iter()
                    .find(|(k, _)| *k == "name")
                    .map(|(_, v)| v.as_str());
                let zones: Vec<&NetlifyZone> = self
                    .zones
                    .iter()
                    .filter(|z| name.is_none_or(|n| z.name == n))
                    .collect();
                json_response(200, &zones)
            }
            (Method::Get, ["dns_zones", zone_id, "dns_records"]) => {
                if self.zone_by_id(zone_id).is_none() {
                    return not_found();
                }
                let records: Vec<NetlifyDnsRecord> = self
                    .records()
                    .into_iter()
                    .filter(|r| r.dns_zone_id.as_deref() == Some(*zone_id))
                    .collect();
                json_response(200, &records)
            }
            (Method::Post, ["dns_zones", zone_id, "dns_records"]) => {
                let Some(zone) = self.zone_by_id(zone_id) else {
                    return not_found();
                };
                let body = request.body.clone().unwrap_or_default();
                let Ok(mut record) = serde_json::from_value::<NetlifyDnsRecord>(body) else {
                    return ApiResponse::new(422, r#"{"message":"Invalid record"}"#);
                };
                record.id = Some(self.new_id());
                record.dns_zone_id = Some(zone.id.clone());
                record.hostname = absolute_name(&record.hostname, &zone.name);
                record.ttl = record.ttl.or(Some(3600));
                self.records.lock().unwrap().push(record.clone());
                json_response(201, &record)
            }
            (Method::Delete, ["dns_zones", zone_id, "dns_records", record_id]) => {
                let mut records = self.records.lock().unwrap();
                let before = records.len();
                records.retain(|r| {
                    !(r.id.as_deref() == Some(*record_id)
                        && r.dns_zone_id.as_deref() == Some(*zone_id))
                });
                if records.len() == before {
                    return not_found();
                }
                ApiResponse::new(204, "")
            }
            _ => not_found(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeNetlify {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: request.method,
            path: request.path.clone(),
            query: request.query.clone(),
            authorization: request.authorization.clone(),
        });

        match self.take_injected(request.method) {
            Some(Injected::Response(response)) => Ok(response),
            Some(Injected::Transport) => Err(Error::transport("connection reset by peer")),
            None => Ok(self.handle(&request)),
        }
    }
}

pub fn zone(id: &str, name: &str) -> NetlifyZone {
    NetlifyZone {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Provider wired to `fake`
pub fn provider(fake: &Arc<FakeNetlify>) -> NetlifyProvider {
    NetlifyProvider::with_transport(TOKEN, fake.clone()).expect("token is not empty")
}

fn json_response<T: serde::Serialize>(status: u16, value: &T) -> ApiResponse {
    ApiResponse::new(status, serde_json::to_string(value).unwrap())
}

fn not_found() -> ApiResponse {
    ApiResponse::new(404, r#"{"message":"Not Found"}"#)
}
