//! Conversions between the core model and the Route 53 SDK types

use aws_sdk_route53::error::BuildError;
use aws_sdk_route53::types as sdk;

use zoneup_core::error::{Error, Result};
use zoneup_core::types::{
    AliasTarget, Change, ChangeAction, ChangeBatch, GeoLocation, HostedZone, RecordType,
    ResourceRecord, ResourceRecordSet,
};

fn build_error(err: BuildError) -> Error {
    Error::invalid_input(format!("unbuildable change request: {err}"))
}

pub(crate) fn zone_from_sdk(zone: &sdk::HostedZone) -> HostedZone {
    HostedZone {
        id: zone.id().to_string(),
        name: zone.name().to_string(),
        private: zone.config().is_some_and(|config| config.private_zone()),
    }
}

pub(crate) fn record_type_to_sdk(record_type: RecordType) -> sdk::RrType {
    match record_type {
        RecordType::Soa => sdk::RrType::Soa,
        RecordType::A => sdk::RrType::A,
        RecordType::Txt => sdk::RrType::Txt,
        RecordType::Ns => sdk::RrType::Ns,
        RecordType::Cname => sdk::RrType::Cname,
        RecordType::Mx => sdk::RrType::Mx,
        RecordType::Naptr => sdk::RrType::Naptr,
        RecordType::Ptr => sdk::RrType::Ptr,
        RecordType::Srv => sdk::RrType::Srv,
        RecordType::Spf => sdk::RrType::Spf,
        RecordType::Aaaa => sdk::RrType::Aaaa,
        RecordType::Caa => sdk::RrType::Caa,
    }
}

pub(crate) fn record_type_from_sdk(rr_type: &sdk::RrType) -> Result<RecordType> {
    rr_type
        .as_str()
        .parse()
        .map_err(|_| {
            Error::malformed_response(format!("unsupported record type: {}", rr_type.as_str()))
        })
}

pub(crate) fn record_set_from_sdk(record_set: &sdk::ResourceRecordSet) -> Result<ResourceRecordSet> {
    let mut result = ResourceRecordSet::new(
        record_set.name(),
        record_type_from_sdk(record_set.r#type())?,
    );
    result.ttl = record_set.ttl();
    result.resource_records = record_set
        .resource_records()
        .iter()
        .map(|record| ResourceRecord::new(record.value()))
        .collect();
    result.alias_target = record_set.alias_target().map(|alias| AliasTarget {
        hosted_zone_id: alias.hosted_zone_id().to_string(),
        dns_name: alias.dns_name().to_string(),
        evaluate_target_health: alias.evaluate_target_health(),
    });
    result.set_identifier = record_set.set_identifier().map(str::to_string);
    result.weight = record_set.weight();
    result.region = record_set.region().map(|region| region.as_str().to_string());
    result.failover = record_set
        .failover()
        .map(|failover| failover.as_str().to_string());
    result.geo_location = record_set.geo_location().map(|geo| GeoLocation {
        continent_code: geo.continent_code().map(str::to_string),
        country_code: geo.country_code().map(str::to_string),
        subdivision_code: geo.subdivision_code().map(str::to_string),
    });
    result.health_check_id = record_set.health_check_id().map(str::to_string);
    result.multi_value_answer = record_set.multi_value_answer();
    Ok(result)
}

pub(crate) fn record_set_to_sdk(record_set: &ResourceRecordSet) -> Result<sdk::ResourceRecordSet> {
    let mut builder = sdk::ResourceRecordSet::builder()
        .name(&record_set.name)
        .r#type(record_type_to_sdk(record_set.record_type))
        .set_ttl(record_set.ttl)
        .set_set_identifier(record_set.set_identifier.clone())
        .set_weight(record_set.weight)
        .set_region(
            record_set
                .region
                .as_deref()
                .map(sdk::ResourceRecordSetRegion::from),
        )
        .set_failover(
            record_set
                .failover
                .as_deref()
                .map(sdk::ResourceRecordSetFailover::from),
        )
        .set_health_check_id(record_set.health_check_id.clone())
        .set_multi_value_answer(record_set.multi_value_answer);

    if !record_set.resource_records.is_empty() {
        let records = record_set
            .resource_records
            .iter()
            .map(|record| sdk::ResourceRecord::builder().value(&record.value).build())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(build_error)?;
        builder = builder.set_resource_records(Some(records));
    }

    if let Some(alias) = &record_set.alias_target {
        builder = builder.alias_target(
            sdk::AliasTarget::builder()
                .hosted_zone_id(&alias.hosted_zone_id)
                .dns_name(&alias.dns_name)
                .evaluate_target_health(alias.evaluate_target_health)
                .build()
                .map_err(build_error)?,
        );
    }

    if let Some(geo) = &record_set.geo_location {
        builder = builder.geo_location(
            sdk::GeoLocation::builder()
                .set_continent_code(geo.continent_code.clone())
                .set_country_code(geo.country_code.clone())
                .set_subdivision_code(geo.subdivision_code.clone())
                .build(),
        );
    }

    builder.build().map_err(build_error)
}

pub(crate) fn change_batch_to_sdk(batch: &ChangeBatch) -> Result<sdk::ChangeBatch> {
    let changes = batch
        .changes
        .iter()
        .map(change_to_sdk)
        .collect::<Result<Vec<_>>>()?;
    sdk::ChangeBatch::builder()
        .set_changes(Some(changes))
        .set_comment(batch.comment.clone())
        .build()
        .map_err(build_error)
}

fn change_to_sdk(change: &Change) -> Result<sdk::Change> {
    let action = match change.action {
        ChangeAction::Upsert => sdk::ChangeAction::Upsert,
    };
    sdk::Change::builder()
        .action(action)
        .resource_record_set(record_set_to_sdk(&change.record_set)?)
        .build()
        .map_err(build_error)
}
