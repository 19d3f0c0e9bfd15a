//! Test doubles and common utilities for behavior tests
//!
//! `MockZoneClient` serves a fixed zone listing two entries per page (the
//! provider's sorted-listing contract in miniature) and applies submitted
//! change batches to an in-memory record table, so consecutive upserts
//! observe earlier changes.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use zoneup_core::error::{Error, Result};
use zoneup_core::traits::ZoneClient;
use zoneup_core::types::{
    ChangeBatch, ChangeInfo, HostedZone, RecordType, ResourceRecordSet, ZonePage,
    normalize_dns_name,
};

/// Zones served per listing page
const PAGE_SIZE: usize = 2;

pub fn zone(id: &str, name: &str, private: bool) -> HostedZone {
    HostedZone {
        id: id.to_string(),
        name: name.to_string(),
        private,
    }
}

/// The zone listing used across most tests, in provider (ascending-name)
/// order: two unrelated apex zones, a public/private pair at `jcore.io.`,
/// and public/private pairs at two subdomains of it.
pub fn jcore_fixture() -> Vec<HostedZone> {
    vec![
        zone("/hostedzone/AAAAAAAAAAAAA", "bar.io.", false),
        zone("/hostedzone/BBBBBBBBBBBBB", "foo.io.", true),
        zone("/hostedzone/CCCCCCCCCCCCC", "jcore.io.", false),
        zone("/hostedzone/DDDDDDDDDDDDD", "jcore.io.", true),
        zone("/hostedzone/EEEEEEEEEEEEE", "foo.jcore.io.", false),
        zone("/hostedzone/FFFFFFFFFFFFF", "foo.jcore.io.", true),
        zone("/hostedzone/GGGGGGGGGGGGG", "bar.jcore.io.", false),
        zone("/hostedzone/HHHHHHHHHHHHH", "bar.jcore.io.", true),
    ]
}

/// A mock ZoneClient that tracks calls
pub struct MockZoneClient {
    zones: Vec<HostedZone>,
    /// Record table keyed by zone id; change batches write into it
    records: Mutex<HashMap<String, Vec<ResourceRecordSet>>>,
    /// Whether wait_for_change should report a propagation timeout
    fail_wait: bool,
    list_zones_calls: AtomicUsize,
    change_calls: AtomicUsize,
    wait_calls: AtomicUsize,
    /// Recorded (zone id, batch) pairs from change submissions
    submitted: Mutex<Vec<(String, ChangeBatch)>>,
}

impl MockZoneClient {
    pub fn new(zones: Vec<HostedZone>) -> Self {
        Self {
            zones,
            records: Mutex::new(HashMap::new()),
            fail_wait: false,
            list_zones_calls: AtomicUsize::new(0),
            change_calls: AtomicUsize::new(0),
            wait_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Seed the record table with a pre-existing record set
    pub fn with_existing_record(self, zone_id: &str, record_set: ResourceRecordSet) -> Self {
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(record_set);
        self
    }

    /// Make wait_for_change report a propagation timeout
    pub fn with_failing_wait(mut self) -> Self {
        self.fail_wait = true;
        self
    }

    /// Get the number of times list_hosted_zones_by_name() was called
    pub fn list_zones_call_count(&self) -> usize {
        self.list_zones_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times change_resource_record_sets() was called
    pub fn change_call_count(&self) -> usize {
        self.change_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times wait_for_change() was called
    pub fn wait_call_count(&self) -> usize {
        self.wait_calls.load(Ordering::SeqCst)
    }

    /// Get the recorded change submissions
    pub fn submitted_changes(&self) -> Vec<(String, ChangeBatch)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneClient for MockZoneClient {
    async fn list_hosted_zones_by_name(
        &self,
        start_dns_name: &str,
        start_zone_id: Option<&str>,
    ) -> Result<ZonePage> {
        self.list_zones_calls.fetch_add(1, Ordering::SeqCst);

        let start = self.zones.iter().position(|z| {
            start_zone_id.is_some_and(|id| z.id == id) || z.name.ends_with(start_dns_name)
        });
        let Some(start) = start else {
            return Ok(ZonePage {
                zones: Vec::new(),
                is_truncated: false,
                next_dns_name: None,
                next_zone_id: None,
            });
        };

        let end = (start + PAGE_SIZE).min(self.zones.len());
        let is_truncated = end < self.zones.len();
        Ok(ZonePage {
            zones: self.zones[start..end].to_vec(),
            is_truncated,
            next_dns_name: is_truncated.then(|| self.zones[end].name.clone()),
            next_zone_id: is_truncated.then(|| self.zones[end].id.clone()),
        })
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_name: &str,
        start_type: RecordType,
        max_items: i32,
    ) -> Result<Vec<ResourceRecordSet>> {
        let start_name = normalize_dns_name(start_name);
        let records = self.records.lock().unwrap();
        Ok(records
            .get(zone_id)
            .into_iter()
            .flatten()
            .filter(|r| normalize_dns_name(&r.name) == start_name && r.record_type == start_type)
            .take(max_items as usize)
            .cloned()
            .collect())
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change_batch: ChangeBatch,
    ) -> Result<ChangeInfo> {
        let change_number = self.change_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted
            .lock()
            .unwrap()
            .push((zone_id.to_string(), change_batch.clone()));

        // Apply the upsert so later existence probes see it
        let mut records = self.records.lock().unwrap();
        let zone_records = records.entry(zone_id.to_string()).or_default();
        for change in change_batch.changes {
            let incoming = change.record_set.normalized();
            match zone_records.iter_mut().find(|r| {
                let r = r.normalized();
                r.name == incoming.name && r.record_type == incoming.record_type
            }) {
                Some(existing) => *existing = incoming,
                None => zone_records.push(incoming),
            }
        }

        Ok(ChangeInfo {
            id: format!("change-{change_number}"),
        })
    }

    async fn wait_for_change(&self, change_id: &str, _timeout: Duration) -> Result<()> {
        self.wait_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_wait {
            return Err(Error::timeout(change_id));
        }
        Ok(())
    }
}
