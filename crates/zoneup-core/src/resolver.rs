//! Hosted-zone resolution by longest suffix match
//!
//! Given a fully-qualified domain name, finds the most specific hosted zone
//! whose name is a suffix of it — independently for public and private
//! visibility, since a name may live in one zone of each.
//!
//! The listing API pages zones in ascending name order starting from a seed
//! name. Matching zones therefore form a contiguous run from the probe
//! point, so the scan stops at the first zone that is no longer a suffix of
//! the input instead of draining the rest of the listing.

use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::ZoneClient;
use crate::types::{HostedZone, normalize_dns_name};

/// The best public and private matches for a domain name
///
/// Either side may be absent; the two are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMatches {
    /// Most specific matching public zone, if any
    pub public_zone: Option<HostedZone>,

    /// Most specific matching private zone, if any
    pub private_zone: Option<HostedZone>,
}

/// Derive the listing seed: the last two labels plus trailing dot
///
/// `"glob.foo.jcore.io."` probes at `"jcore.io."`. The listing API needs at
/// least this much specificity to seed pagination, so anything with fewer
/// than two non-empty labels is rejected as invalid input.
fn probe_name(dns_name: &str) -> Result<String> {
    let trimmed = dns_name.strip_suffix('.').unwrap_or(dns_name);
    let mut labels = trimmed.rsplit('.');
    let tld = labels.next().filter(|l| !l.is_empty());
    let sld = labels.next().filter(|l| !l.is_empty());
    match (sld, tld) {
        (Some(sld), Some(tld)) => Ok(format!("{sld}.{tld}.")),
        _ => Err(Error::invalid_input(dns_name.to_string())),
    }
}

/// Find the best-matching public and private hosted zones for a domain name
///
/// Paginates the provider's zone listing from the probe key, keeping the
/// longest-named suffix match per visibility. Every call re-queries the
/// provider; nothing is cached.
pub async fn resolve_zones(client: &dyn ZoneClient, domain_name: &str) -> Result<ZoneMatches> {
    let dns_name = normalize_dns_name(domain_name);
    let probe = probe_name(&dns_name)?;
    debug!(domain = %dns_name, probe = %probe, "resolving hosted zones");

    let mut matches = ZoneMatches::default();
    let mut start_name = probe;
    let mut start_id: Option<String> = None;

    'pages: loop {
        let page = client
            .list_hosted_zones_by_name(&start_name, start_id.as_deref())
            .await?;

        for zone in page.zones {
            if !dns_name.ends_with(&zone.name) {
                // Provider order is lexicographic by name; once a zone stops
                // being a suffix, no later zone can match.
                break 'pages;
            }
            let best = if zone.private {
                &mut matches.private_zone
            } else {
                &mut matches.public_zone
            };
            if best.as_ref().is_none_or(|b| zone.name.len() > b.name.len()) {
                *best = Some(zone);
            }
        }

        if !page.is_truncated {
            break;
        }
        match (page.next_dns_name, page.next_zone_id) {
            (Some(name), Some(id)) => {
                start_name = name;
                start_id = Some(id);
            }
            _ => {
                return Err(Error::malformed_response(
                    "truncated zone page is missing its continuation cursor",
                ));
            }
        }
    }

    debug!(
        public = matches.public_zone.as_ref().map(|z| z.name.as_str()),
        private = matches.private_zone.as_ref().map(|z| z.name.as_str()),
        "hosted zone resolution finished"
    );
    Ok(matches)
}

/// Find the best-matching hosted zone of one visibility
pub async fn resolve_zone(
    client: &dyn ZoneClient,
    domain_name: &str,
    private: bool,
) -> Result<Option<HostedZone>> {
    let matches = resolve_zones(client, domain_name).await?;
    Ok(if private {
        matches.private_zone
    } else {
        matches.public_zone
    })
}

/// Find the id of the best-matching hosted zone of one visibility
pub async fn resolve_zone_id(
    client: &dyn ZoneClient,
    domain_name: &str,
    private: bool,
) -> Result<Option<String>> {
    Ok(resolve_zone(client, domain_name, private)
        .await?
        .map(|zone| zone.id))
}
