// # zoneup-core
//
// Core library for hosted-zone resolution and DNS record upserts.
//
// ## Architecture Overview
//
// - **ZoneClient**: trait for the hosted-zone provider capability
//   (paginated zone listing, record listing, change submission, waits)
// - **resolver**: longest-suffix match of a domain name against the
//   provider's zone listing, partitioned public/private
// - **upsert**: record synthesis, pre-existence check, change submission,
//   propagation wait, and the concurrent dual-zone orchestration
//
// ## Design Principles
//
// 1. **Separation of Concerns**: core logic is separate from the provider SDK
// 2. **Library-First**: every operation is a plain async function over an
//    injected `ZoneClient`, deterministic under a substitute implementation
// 3. **Single-Shot**: each provider call happens exactly once per operation;
//    retry policy belongs to callers

pub mod error;
pub mod resolver;
pub mod traits;
pub mod types;
pub mod upsert;

// Re-export core types for convenience
pub use error::{Error, Result, ZoneNotFound};
pub use resolver::{ZoneMatches, resolve_zone, resolve_zone_id, resolve_zones};
pub use traits::ZoneClient;
pub use types::{
    Change, ChangeAction, ChangeBatch, ChangeInfo, HostedZone, RecordType, ResourceRecord,
    ResourceRecordSet, ZonePage, normalize_dns_name,
};
pub use upsert::{
    DEFAULT_WAIT_TIMEOUT, DualUpsertRequest, NoopProgress, ProgressSink, UpsertProgress,
    UpsertRequest, upsert, upsert_public_and_private, upsert_with_progress,
};
