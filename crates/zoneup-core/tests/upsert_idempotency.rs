//! Behavior tests: upsert idempotence
//!
//! The provider charges and throttles per change, so an upsert whose record
//! already exists verbatim must not submit a change batch — and repeated
//! upserts of the same data must submit exactly one.

mod common;

use common::*;
use zoneup_core::types::{RecordType, ResourceRecord, ResourceRecordSet};
use zoneup_core::upsert::{UpsertRequest, upsert};

fn a_record(name: &str, value: &str, ttl: i64) -> ResourceRecordSet {
    let mut record_set = ResourceRecordSet::new(name, RecordType::A);
    record_set.ttl = Some(ttl);
    record_set.resource_records = vec![ResourceRecord::new(value)];
    record_set
}

#[tokio::test]
async fn identical_existing_record_short_circuits() {
    // The stored record carries the provider's trailing dot; the request
    // doesn't. The normalized comparison must still consider them equal.
    let client = MockZoneClient::new(jcore_fixture())
        .with_existing_record("/hostedzone/CCCCCCCCCCCCC", a_record("blah.jcore.io.", "1.2.3.4", 60));

    let request = UpsertRequest::record("blah.jcore.io", ["1.2.3.4"], 60);
    upsert(&client, request).await.unwrap();

    assert_eq!(client.change_call_count(), 0, "no change may be submitted");
    assert_eq!(client.wait_call_count(), 0, "no wait without a change");
}

#[tokio::test]
async fn two_identical_upserts_issue_exactly_one_change() {
    let client = MockZoneClient::new(jcore_fixture());

    let request = UpsertRequest::record("blah.jcore.io", ["1.2.3.4"], 60);
    upsert(&client, request.clone()).await.unwrap();
    upsert(&client, request).await.unwrap();

    assert_eq!(
        client.change_call_count(),
        1,
        "the second upsert must be a no-op after the existence check"
    );
}

#[tokio::test]
async fn changed_ttl_defeats_the_existence_check() {
    let client = MockZoneClient::new(jcore_fixture())
        .with_existing_record("/hostedzone/CCCCCCCCCCCCC", a_record("blah.jcore.io.", "1.2.3.4", 60));

    let request =
        UpsertRequest::record("blah.jcore.io", ["1.2.3.4"], 120).wait_for_change(false);
    upsert(&client, request).await.unwrap();

    assert_eq!(client.change_call_count(), 1);
}

#[tokio::test]
async fn changed_value_defeats_the_existence_check() {
    let client = MockZoneClient::new(jcore_fixture())
        .with_existing_record("/hostedzone/CCCCCCCCCCCCC", a_record("blah.jcore.io.", "1.2.3.4", 60));

    let request =
        UpsertRequest::record("blah.jcore.io", ["5.6.7.8"], 60).wait_for_change(false);
    upsert(&client, request).await.unwrap();

    assert_eq!(client.change_call_count(), 1);
}
