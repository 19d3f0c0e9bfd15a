// # Route 53 Zone Client
//
// This crate provides the Route 53 implementation of the `ZoneClient`
// capability consumed by `zoneup-core`.
//
// - One SDK call per trait method (plus polling for the propagation wait)
// - Full error propagation; no retry or backoff logic here — per-request
//   transport behavior is owned by the SDK's own retry configuration,
//   call-level retry policy by the caller
// - No caching: every zone listing hits the API
//
// ## API Reference
//
// - ListHostedZonesByName: paginated, lexicographically sorted by name
// - ListResourceRecordSets: used as a single-record existence probe
// - ChangeResourceRecordSets: submits the UPSERT batch
// - GetChange: polled until the change status reaches INSYNC

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_route53::Client;
use aws_sdk_route53::config::Region;
use aws_sdk_route53::error::{DisplayErrorContext, SdkError};
use aws_sdk_route53::types::ChangeStatus;
use tracing::debug;

use zoneup_core::error::{Error, Result};
use zoneup_core::traits::ZoneClient;
use zoneup_core::types::{ChangeBatch, ChangeInfo, RecordType, ResourceRecordSet, ZonePage};

mod convert;

/// Interval between GetChange polls while waiting for propagation
const CHANGE_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Route 53 zone client
///
/// Wraps an SDK client and translates between the core model and the SDK's
/// wire types. The client is stateless and safely shared across concurrent
/// upserts.
#[derive(Debug, Clone)]
pub struct Route53Zones {
    client: Client,
}

impl Route53Zones {
    /// Wrap an existing SDK client
    ///
    /// Use this when the caller already configured credentials, endpoint or
    /// retry behavior; tests inject clients built against local endpoints
    /// the same way.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration chain
    ///
    /// Credentials come from the environment, shared config files or
    /// instance metadata, exactly as the SDK resolves them. `region`
    /// overrides the chain's region when given.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config))
    }
}

/// Map an SDK failure to the opaque provider error, keeping the full
/// error context chain in the message
fn sdk_error<E, R>(err: SdkError<E, R>) -> Error
where
    SdkError<E, R>: std::error::Error + Send + Sync + 'static,
{
    Error::provider("route53", DisplayErrorContext(err).to_string())
}

#[async_trait]
impl ZoneClient for Route53Zones {
    async fn list_hosted_zones_by_name(
        &self,
        start_dns_name: &str,
        start_zone_id: Option<&str>,
    ) -> Result<ZonePage> {
        let output = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(start_dns_name)
            .set_hosted_zone_id(start_zone_id.map(str::to_string))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(ZonePage {
            zones: output
                .hosted_zones()
                .iter()
                .map(convert::zone_from_sdk)
                .collect(),
            is_truncated: output.is_truncated(),
            next_dns_name: output.next_dns_name().map(str::to_string),
            next_zone_id: output.next_hosted_zone_id().map(str::to_string),
        })
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_name: &str,
        start_type: RecordType,
        max_items: i32,
    ) -> Result<Vec<ResourceRecordSet>> {
        let output = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .start_record_name(start_name)
            .start_record_type(convert::record_type_to_sdk(start_type))
            .max_items(max_items)
            .send()
            .await
            .map_err(sdk_error)?;

        // A listing that starts at (name, type) may run into record types
        // outside the supported enumeration (e.g. DS); those can never equal
        // a record this tool upserts, so they are dropped rather than
        // failing the probe.
        let mut records = Vec::new();
        for record_set in output.resource_record_sets() {
            match convert::record_set_from_sdk(record_set) {
                Ok(record_set) => records.push(record_set),
                Err(err) => debug!(%err, "dropping record set with unsupported type"),
            }
        }
        Ok(records)
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change_batch: ChangeBatch,
    ) -> Result<ChangeInfo> {
        let batch = convert::change_batch_to_sdk(&change_batch)?;
        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(sdk_error)?;

        let info = output.change_info().ok_or_else(|| {
            Error::malformed_response("change response is missing its ChangeInfo")
        })?;
        Ok(ChangeInfo {
            id: info.id().to_string(),
        })
    }

    async fn wait_for_change(&self, change_id: &str, timeout: Duration) -> Result<()> {
        let poll = async {
            loop {
                let output = self
                    .client
                    .get_change()
                    .id(change_id)
                    .send()
                    .await
                    .map_err(sdk_error)?;
                let info = output.change_info().ok_or_else(|| {
                    Error::malformed_response("get-change response is missing its ChangeInfo")
                })?;
                if matches!(info.status(), ChangeStatus::Insync) {
                    return Ok(());
                }
                debug!(change = change_id, "change still pending");
                tokio::time::sleep(CHANGE_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| Error::timeout(change_id))?
    }
}
