//! Data model for hosted zones and resource record sets
//!
//! These types mirror the provider's wire shapes closely enough to convert
//! losslessly, while staying free of any SDK dependency so the core can be
//! tested against a substitute client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalize a DNS name to end with exactly one trailing dot
///
/// Names that already end with a dot are returned unchanged, so a name with
/// a stray empty label (`"a.b.."`) stays malformed and is rejected later by
/// probe derivation rather than silently repaired.
pub fn normalize_dns_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// A provider-managed authoritative namespace for a DNS suffix
///
/// Fetched transiently during resolution; never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Opaque provider-assigned identifier (e.g. "/hostedzone/ABC123")
    pub id: String,

    /// Zone name, always carrying the provider's trailing dot
    pub name: String,

    /// Whether the zone is private (VPC-scoped) rather than public
    pub private: bool,
}

/// One page of a hosted-zone listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePage {
    /// Zones on this page, in the provider's ascending-name order
    pub zones: Vec<HostedZone>,

    /// Whether more pages follow
    pub is_truncated: bool,

    /// Continuation cursor: name to start the next page at
    pub next_dns_name: Option<String>,

    /// Continuation cursor: zone id to start the next page at
    pub next_zone_id: Option<String>,
}

/// The closed set of record types the provider accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    Soa,
    A,
    Txt,
    Ns,
    Cname,
    Mx,
    Naptr,
    Ptr,
    Srv,
    Spf,
    Aaaa,
    Caa,
}

impl RecordType {
    /// The wire spelling of this record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Soa => "SOA",
            RecordType::A => "A",
            RecordType::Txt => "TXT",
            RecordType::Ns => "NS",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Ptr => "PTR",
            RecordType::Srv => "SRV",
            RecordType::Spf => "SPF",
            RecordType::Aaaa => "AAAA",
            RecordType::Caa => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOA" => Ok(RecordType::Soa),
            "A" => Ok(RecordType::A),
            "TXT" => Ok(RecordType::Txt),
            "NS" => Ok(RecordType::Ns),
            "CNAME" => Ok(RecordType::Cname),
            "MX" => Ok(RecordType::Mx),
            "NAPTR" => Ok(RecordType::Naptr),
            "PTR" => Ok(RecordType::Ptr),
            "SRV" => Ok(RecordType::Srv),
            "SPF" => Ok(RecordType::Spf),
            "AAAA" => Ok(RecordType::Aaaa),
            "CAA" => Ok(RecordType::Caa),
            other => Err(crate::Error::invalid_input(format!(
                "unknown record type: {other}"
            ))),
        }
    }
}

/// A single literal record value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The record data (an IP address, a hostname, quoted TXT data, ...)
    pub value: String,
}

impl ResourceRecord {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Alias target referencing another provider resource instead of literal values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    /// Hosted zone id of the aliased resource
    pub hosted_zone_id: String,

    /// DNS name of the aliased resource
    pub dns_name: String,

    /// Whether the provider should health-check the alias target
    pub evaluate_target_health: bool,
}

/// Geolocation routing constraint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub continent_code: Option<String>,
    pub country_code: Option<String>,
    pub subdivision_code: Option<String>,
}

/// The record set to upsert
///
/// Invariant: a record set has either `ttl` plus at least one resource
/// record, or an `alias_target` — never neither. [`ResourceRecordSet::validate`]
/// enforces this before any change is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    /// Record name; normalized to a trailing dot before comparison
    pub name: String,

    /// Record type
    pub record_type: RecordType,

    /// Time-to-live in seconds; required unless aliasing
    pub ttl: Option<i64>,

    /// Literal record values; empty when aliasing
    pub resource_records: Vec<ResourceRecord>,

    /// Alias target, mutually exclusive with ttl + resource_records
    pub alias_target: Option<AliasTarget>,

    /// Distinguishes records sharing a name/type under routing policies
    pub set_identifier: Option<String>,

    /// Weighted-routing weight
    pub weight: Option<i64>,

    /// Latency-routing region
    pub region: Option<String>,

    /// Failover role ("PRIMARY" or "SECONDARY")
    pub failover: Option<String>,

    /// Geolocation routing constraint
    pub geo_location: Option<GeoLocation>,

    /// Associated health check id
    pub health_check_id: Option<String>,

    /// Multivalue-answer routing flag
    pub multi_value_answer: Option<bool>,
}

impl ResourceRecordSet {
    /// Create a record set with just a name and type; remaining fields empty
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl: None,
            resource_records: Vec::new(),
            alias_target: None,
            set_identifier: None,
            weight: None,
            region: None,
            failover: None,
            geo_location: None,
            health_check_id: None,
            multi_value_answer: None,
        }
    }

    /// The comparison form used by the idempotence check
    ///
    /// Returns a copy with `name` (and the alias target's `dns_name`, when
    /// present) trailing-dot normalized. The provider always returns names
    /// in this form, so comparing normalized copies makes a caller-supplied
    /// `"foo.example.com"` equal to the stored `"foo.example.com."`.
    pub fn normalized(&self) -> Self {
        let mut result = self.clone();
        result.name = normalize_dns_name(&self.name);
        if let Some(alias) = &self.alias_target {
            result.alias_target = Some(AliasTarget {
                hosted_zone_id: alias.hosted_zone_id.clone(),
                dns_name: normalize_dns_name(&alias.dns_name),
                evaluate_target_health: alias.evaluate_target_health,
            });
        }
        result
    }

    /// Enforce the ttl+records / alias-target invariant
    pub fn validate(&self) -> crate::Result<()> {
        if self.alias_target.is_some() {
            return Ok(());
        }
        if self.ttl.is_none() {
            return Err(crate::Error::invalid_input(format!(
                "record set {} has neither a TTL nor an alias target",
                self.name
            )));
        }
        if self.resource_records.is_empty() {
            return Err(crate::Error::invalid_input(format!(
                "record set {} has neither resource records nor an alias target",
                self.name
            )));
        }
        Ok(())
    }
}

/// Change action; this tool only ever submits upserts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Upsert,
}

/// One change within a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub action: ChangeAction,
    pub record_set: ResourceRecordSet,
}

/// A change batch targeting one hosted zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeBatch {
    pub changes: Vec<Change>,
    pub comment: Option<String>,
}

/// Receipt for a submitted change, used to poll propagation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeInfo {
    /// Opaque provider-assigned change id
    pub id: String,
}
