//! Record upsert orchestration
//!
//! The flow per upsert: build (or validate) the record set, resolve its
//! hosted zone unless the caller supplied one, skip the change entirely if
//! an identical record already exists, otherwise submit one UPSERT and
//! optionally wait for the provider to report it propagated.
//!
//! The existence check matters because the provider charges and throttles
//! per change: periodic reconcilers re-upsert unchanged records constantly,
//! and those calls must not turn into billable change batches.
//!
//! ## Progress
//!
//! Human-readable checkpoints are delivered through an injected
//! [`ProgressSink`]; they are advisory and never affect control flow. The
//! plain [`upsert`] entry point uses a no-op sink.

use std::net::IpAddr;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result, ZoneNotFound};
use crate::resolver;
use crate::traits::ZoneClient;
use crate::types::{
    Change, ChangeAction, ChangeBatch, HostedZone, RecordType, ResourceRecord, ResourceRecordSet,
};

/// Default bound on the propagation wait: 60 polls at 30 s, the provider
/// waiter's classic schedule.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Checkpoints emitted during an upsert
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertProgress {
    /// Zone resolution is starting for `name`
    ResolvingZone { name: String },

    /// Zone resolution picked `zone`
    ZoneResolved { name: String, zone: HostedZone },

    /// An identical record already exists; no change will be submitted
    RecordUnchanged { name: String },

    /// The change batch is about to be submitted to `zone`
    SubmittingChange {
        name: String,
        zone: HostedZone,
        batch: ChangeBatch,
    },

    /// The provider accepted the change
    ChangeSubmitted { name: String, change_id: String },

    /// Blocking until the change propagates
    WaitingForChange { name: String, change_id: String },

    /// The upsert finished; the record lives in `zone`
    RecordUpserted { name: String, zone: HostedZone },
}

/// Sink for progress checkpoints
///
/// Not process-wide state: each call receives its sink explicitly, so two
/// concurrent upserts can report to different places.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, progress: &UpsertProgress);
}

/// Sink that discards all progress
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn notify(&self, _progress: &UpsertProgress) {}
}

/// What to upsert and how
///
/// Either `record_set` is given explicitly, or a record is synthesized from
/// `name` + `targets` + `ttl` (type A for IP-literal targets, CNAME for
/// hostnames). All fields are public so callers can fill exactly what they
/// have; the constructors cover the common shapes.
#[derive(Debug, Clone)]
pub struct UpsertRequest {
    /// Record name for the synthesized path
    pub name: Option<String>,

    /// Record values for the synthesized path
    pub targets: Vec<String>,

    /// TTL for the synthesized path
    pub ttl: Option<i64>,

    /// Explicit record set; skips synthesis entirely
    pub record_set: Option<ResourceRecordSet>,

    /// Target the private zone instead of the public one
    pub private: bool,

    /// Pre-resolved zone; skips resolution entirely
    pub hosted_zone: Option<HostedZone>,

    /// Optional human comment attached to the change batch
    pub comment: Option<String>,

    /// Whether to block until the change propagates (default true)
    pub wait_for_change: bool,

    /// Bound on the propagation wait
    pub wait_timeout: Duration,
}

impl UpsertRequest {
    /// Empty request; fill in either the synthesis fields or a record set
    pub fn new() -> Self {
        Self {
            name: None,
            targets: Vec::new(),
            ttl: None,
            record_set: None,
            private: false,
            hosted_zone: None,
            comment: None,
            wait_for_change: true,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Request synthesized from name, targets and ttl
    pub fn record<T: Into<String>>(
        name: impl Into<String>,
        targets: impl IntoIterator<Item = T>,
        ttl: i64,
    ) -> Self {
        Self {
            name: Some(name.into()),
            targets: targets.into_iter().map(Into::into).collect(),
            ttl: Some(ttl),
            ..Self::new()
        }
    }

    /// Request carrying an explicit record set
    pub fn record_set(record_set: ResourceRecordSet) -> Self {
        Self {
            record_set: Some(record_set),
            ..Self::new()
        }
    }

    /// Target the private zone
    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Use a pre-resolved hosted zone
    pub fn hosted_zone(mut self, zone: HostedZone) -> Self {
        self.hosted_zone = Some(zone);
        self
    }

    /// Attach a comment to the change batch
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Enable or disable the propagation wait
    pub fn wait_for_change(mut self, wait: bool) -> Self {
        self.wait_for_change = wait;
        self
    }

    /// Override the propagation wait bound
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }
}

impl Default for UpsertRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a record set from name + targets + ttl
///
/// The first target decides the classification: IP literal → type A,
/// anything else → CNAME. All targets must agree — a record set cannot mix
/// A-record addresses with CNAME hostnames.
fn synthesize_record_set(
    name: Option<&str>,
    targets: &[String],
    ttl: Option<i64>,
) -> Result<ResourceRecordSet> {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(Error::MissingField("Name")),
    };
    if targets.is_empty() {
        return Err(Error::MissingField("Target"));
    }
    let ttl = ttl.ok_or(Error::MissingField("TTL"))?;

    let target_is_ip = targets[0].parse::<IpAddr>().is_ok();
    if targets
        .iter()
        .any(|t| t.parse::<IpAddr>().is_ok() != target_is_ip)
    {
        return Err(Error::MixedTargetTypes);
    }

    let record_type = if target_is_ip {
        RecordType::A
    } else {
        RecordType::Cname
    };
    let mut record_set = ResourceRecordSet::new(name, record_type);
    record_set.ttl = Some(ttl);
    record_set.resource_records = targets
        .iter()
        .map(|value| ResourceRecord::new(value.as_str()))
        .collect();
    Ok(record_set)
}

/// Single-record existence probe: is an identical record already live?
///
/// Both sides are compared in normalized (trailing-dot) form, so the check
/// is insensitive to how the caller spelled the name.
async fn already_exists(
    client: &dyn ZoneClient,
    zone_id: &str,
    record_set: &ResourceRecordSet,
) -> Result<bool> {
    let existing = client
        .list_resource_record_sets(zone_id, &record_set.name, record_set.record_type, 1)
        .await?;
    let desired = record_set.normalized();
    Ok(existing
        .first()
        .is_some_and(|found| found.normalized() == desired))
}

/// Upsert a record set, discarding progress
pub async fn upsert(client: &dyn ZoneClient, request: UpsertRequest) -> Result<()> {
    upsert_with_progress(client, request, &NoopProgress).await
}

/// Upsert a record set, reporting checkpoints to `progress`
///
/// Each provider call happens exactly once; failures surface immediately
/// and retry policy stays with the caller.
pub async fn upsert_with_progress(
    client: &dyn ZoneClient,
    request: UpsertRequest,
    progress: &dyn ProgressSink,
) -> Result<()> {
    let record_set = match request.record_set {
        Some(record_set) => {
            record_set.validate()?;
            record_set
        }
        None => synthesize_record_set(request.name.as_deref(), &request.targets, request.ttl)?,
    };
    let name = record_set.name.clone();

    let zone = match request.hosted_zone {
        Some(zone) => zone,
        None => {
            progress.notify(&UpsertProgress::ResolvingZone { name: name.clone() });
            let zone = resolver::resolve_zone(client, &name, request.private)
                .await?
                .ok_or_else(|| {
                    Error::from(if request.private {
                        ZoneNotFound::Private {
                            domain: name.clone(),
                        }
                    } else {
                        ZoneNotFound::Public {
                            domain: name.clone(),
                        }
                    })
                })?;
            progress.notify(&UpsertProgress::ZoneResolved {
                name: name.clone(),
                zone: zone.clone(),
            });
            zone
        }
    };

    if already_exists(client, &zone.id, &record_set).await? {
        debug!(record = %name, zone = %zone.id, "identical record already exists, skipping change");
        progress.notify(&UpsertProgress::RecordUnchanged { name });
        return Ok(());
    }

    let batch = ChangeBatch {
        changes: vec![Change {
            action: ChangeAction::Upsert,
            record_set: record_set.clone(),
        }],
        comment: request.comment,
    };
    progress.notify(&UpsertProgress::SubmittingChange {
        name: name.clone(),
        zone: zone.clone(),
        batch: batch.clone(),
    });

    let change_info = client.change_resource_record_sets(&zone.id, batch).await?;
    debug!(record = %name, change = %change_info.id, "change submitted");
    progress.notify(&UpsertProgress::ChangeSubmitted {
        name: name.clone(),
        change_id: change_info.id.clone(),
    });

    if request.wait_for_change {
        progress.notify(&UpsertProgress::WaitingForChange {
            name: name.clone(),
            change_id: change_info.id.clone(),
        });
        client
            .wait_for_change(&change_info.id, request.wait_timeout)
            .await?;
    }

    progress.notify(&UpsertProgress::RecordUpserted { name, zone });
    Ok(())
}

/// One record name, two zones: what to upsert on each side
///
/// A side with no targets is skipped. When either zone is missing, both are
/// resolved in one pass and the error distinguishes which side of the setup
/// is incomplete.
#[derive(Debug, Clone)]
pub struct DualUpsertRequest {
    /// Record name, shared by both sides
    pub name: String,

    /// TTL for both synthesized records
    pub ttl: Option<i64>,

    /// Targets for the private-zone record; empty skips that side
    pub private_targets: Vec<String>,

    /// Targets for the public-zone record; empty skips that side
    pub public_targets: Vec<String>,

    /// Pre-resolved public zone
    pub public_zone: Option<HostedZone>,

    /// Pre-resolved private zone
    pub private_zone: Option<HostedZone>,

    /// Optional comment attached to both change batches
    pub comment: Option<String>,

    /// Whether to block until each change propagates
    pub wait_for_change: bool,

    /// Bound on each propagation wait
    pub wait_timeout: Duration,
}

impl DualUpsertRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ttl: None,
            private_targets: Vec::new(),
            public_targets: Vec::new(),
            public_zone: None,
            private_zone: None,
            comment: None,
            wait_for_change: true,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// Upsert a record into both the public and the private zone concurrently
///
/// The two per-visibility upserts run as independent tasks sharing no
/// mutable state; the first failure aborts the pending other and is
/// surfaced to the caller.
pub async fn upsert_public_and_private(
    client: &dyn ZoneClient,
    request: DualUpsertRequest,
    progress: &dyn ProgressSink,
) -> Result<()> {
    let DualUpsertRequest {
        name,
        ttl,
        private_targets,
        public_targets,
        public_zone,
        private_zone,
        comment,
        wait_for_change,
        wait_timeout,
    } = request;

    let (public_zone, private_zone) = match (public_zone, private_zone) {
        (Some(public_zone), Some(private_zone)) => (public_zone, private_zone),
        _ => {
            let matches = resolver::resolve_zones(client, &name).await?;
            match (matches.public_zone, matches.private_zone) {
                (None, None) => return Err(ZoneNotFound::NoZones { domain: name }.into()),
                (None, Some(_)) => return Err(ZoneNotFound::Public { domain: name }.into()),
                (Some(_), None) => return Err(ZoneNotFound::Private { domain: name }.into()),
                (Some(public_zone), Some(private_zone)) => (public_zone, private_zone),
            }
        }
    };

    let side = |targets: Vec<String>, zone: HostedZone, private: bool| UpsertRequest {
        name: Some(name.clone()),
        targets,
        ttl,
        record_set: None,
        private,
        hosted_zone: Some(zone),
        comment: comment.clone(),
        wait_for_change,
        wait_timeout,
    };
    let public_request = side(public_targets, public_zone, false);
    let private_request = side(private_targets, private_zone, true);

    tokio::try_join!(
        async {
            if public_request.targets.is_empty() {
                return Ok(());
            }
            upsert_with_progress(client, public_request, progress).await
        },
        async {
            if private_request.targets.is_empty() {
                return Ok(());
            }
            upsert_with_progress(client, private_request, progress).await
        },
    )?;
    Ok(())
}
