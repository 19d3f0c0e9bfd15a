// # Zone Client Trait
//
// Defines the interface the core consumes to talk to a hosted-zone provider.
//
// ## Implementations
//
// - Route 53: `zoneup-provider-route53` crate
// - Test double: `tests/common/mod.rs`

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::types::{ChangeBatch, ChangeInfo, RecordType, ResourceRecordSet, ZonePage};

/// Trait for hosted-zone provider clients
///
/// Implementations are a thin, stateless capability: each method performs
/// exactly one provider exchange (plus polling for [`wait_for_change`]) and
/// surfaces failures as-is. Retry policy belongs to the caller — an
/// implementation must not retry, cache listings, or spawn background work.
///
/// # Thread Safety
///
/// Implementations must be safely invokable concurrently for independent
/// requests; the dual-zone orchestration issues two upserts at once against
/// the same client.
///
/// [`wait_for_change`]: ZoneClient::wait_for_change
#[async_trait]
pub trait ZoneClient: Send + Sync {
    /// Fetch one page of the hosted-zone listing, starting at `start_dns_name`
    ///
    /// The provider guarantees zones arrive in ascending name order, with
    /// public/private variants of the same name adjacent. `start_zone_id`
    /// disambiguates the resume point when continuing a truncated listing.
    async fn list_hosted_zones_by_name(
        &self,
        start_dns_name: &str,
        start_zone_id: Option<&str>,
    ) -> Result<ZonePage>;

    /// List record sets in a zone, starting at `start_name`/`start_type`
    ///
    /// The upserter uses this with `max_items = 1` as a single-record
    /// existence probe.
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_name: &str,
        start_type: RecordType,
        max_items: i32,
    ) -> Result<Vec<ResourceRecordSet>>;

    /// Submit a change batch to a zone, returning the change receipt
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change_batch: ChangeBatch,
    ) -> Result<ChangeInfo>;

    /// Block until the provider reports the change applied everywhere
    ///
    /// Returns [`Error::Timeout`](crate::Error::Timeout) if the change is
    /// still pending when `timeout` elapses. Poll failures propagate
    /// immediately; the caller decides whether to retry the whole wait.
    async fn wait_for_change(&self, change_id: &str, timeout: Duration) -> Result<()>;
}
