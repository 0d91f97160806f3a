use chrono::{Duration, TimeZone, Utc};
use filestorage_core::document::{Document, FileMetadata, Metadata};

fn with_file() -> FileMetadata {
    let mut meta = FileMetadata::new();
    meta.set_file(10, "some sum", "SHA-1");
    meta
}

#[test]
fn invariant_new_metadata_is_unset() {
    let meta = FileMetadata::new();

    assert_eq!(meta.id(), "");
    assert_eq!(meta.size(), 0);
    assert_eq!(meta.checksum(), "");
    assert_eq!(meta.checksum_format(), "");
    assert!(meta.stored().is_none());
    assert_eq!(meta, FileMetadata::default());
}

#[test]
fn invariant_doc_is_identity() {
    let meta = with_file();
    let doc = meta.doc();

    assert!(std::ptr::eq(doc, &meta));
    assert!(!meta.has_content());
}

#[test]
fn set_id_initial_claims() {
    let mut meta = with_file();
    assert_eq!(meta.id(), "");

    let already_set = meta.set_id("some id");
    assert!(!already_set);
    assert_eq!(meta.id(), "some id");
}

#[test]
fn set_id_same_value_reports_already_set() {
    let mut meta = with_file();
    assert!(!meta.set_id("some id"));

    let already_set = meta.set_id("some id");
    assert!(already_set);
    assert_eq!(meta.id(), "some id");
}

#[test]
fn set_id_different_value_is_ignored() {
    let mut meta = with_file();
    assert!(!meta.set_id("some id"));

    let already_set = meta.set_id("another id");
    assert!(already_set);
    assert_eq!(meta.id(), "some id");
}

#[test]
fn set_file_sets_all_facts_and_leaves_stored() {
    let mut meta = FileMetadata::new();
    meta.set_file(10, "some sum", "SHA-1");

    assert_eq!(meta.size(), 10);
    assert_eq!(meta.checksum(), "some sum");
    assert_eq!(meta.checksum_format(), "SHA-1");
    assert!(meta.stored().is_none());
    assert_eq!(meta.id(), "");
}

#[test]
fn set_file_overwrites_and_accepts_anything() {
    let mut meta = with_file();
    meta.set_file(-5, "", "");

    assert_eq!(meta.size(), -5);
    assert_eq!(meta.checksum(), "");
    assert_eq!(meta.checksum_format(), "");
}

#[test]
fn set_stored_explicit() {
    let mut meta = FileMetadata::new();
    let timestamp = Utc.with_ymd_and_hms(2014, 6, 1, 12, 30, 0).unwrap();
    meta.set_stored(Some(timestamp));

    assert_eq!(meta.stored(), Some(timestamp));
}

#[test]
fn set_stored_defaults_to_now() {
    let mut meta = FileMetadata::new();
    assert!(meta.stored().is_none());

    let before = Utc::now();
    meta.set_stored(None);
    let after = Utc::now();

    let stored = meta.stored().expect("stored should be set");
    assert!(before <= stored && stored <= after);
}

#[test]
fn set_stored_overwrites_every_time() {
    let mut meta = FileMetadata::new();
    let first = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let second = first + Duration::seconds(30);

    meta.set_stored(Some(first));
    meta.set_stored(Some(second));
    assert_eq!(meta.stored(), Some(second));
}

#[test]
fn set_stored_does_not_touch_file_facts_or_id() {
    let mut meta = with_file();
    meta.set_id("some id");
    meta.set_stored(None);

    assert_eq!(meta.id(), "some id");
    assert_eq!(meta.size(), 10);
    assert_eq!(meta.checksum(), "some sum");
}

#[test]
fn copy_equals_original_apart_from_id() {
    let meta = with_file();
    let copied = meta.copy("");

    assert!(!std::ptr::eq(&copied, &meta));
    assert_eq!(copied, meta);
}

#[test]
fn copy_is_independent() {
    let mut meta = with_file();
    meta.set_id("original");
    let stamp = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
    meta.set_stored(Some(stamp));

    let mut copied = meta.copy("copied");
    assert_eq!(copied.id(), "copied");
    assert_eq!(copied.stored(), Some(stamp));

    copied.set_stored(Some(stamp + Duration::hours(1)));
    copied.set_file(99, "other", "SHA-512");
    assert_eq!(meta.stored(), Some(stamp));
    assert_eq!(meta.size(), 10);
    assert_eq!(meta.checksum(), "some sum");

    meta.set_stored(Some(stamp - Duration::hours(1)));
    assert_eq!(copied.stored(), Some(stamp + Duration::hours(1)));
    assert_eq!(meta.id(), "original");
}

#[test]
fn copy_with_new_id_can_claim_again_only_when_empty() {
    let mut meta = with_file();
    meta.set_id("original");

    let mut reset = meta.copy("");
    assert!(!reset.set_id("fresh"));
    assert_eq!(reset.id(), "fresh");

    let mut renamed = meta.copy("renamed");
    assert!(renamed.set_id("fresh"));
    assert_eq!(renamed.id(), "renamed");
}

#[test]
fn set_id_empty_on_unassigned_leaves_record_claimable() {
    let mut meta = FileMetadata::new();

    assert!(!meta.set_id(""));
    assert_eq!(meta.id(), "");

    assert!(!meta.set_id("some id"));
    assert_eq!(meta.id(), "some id");
}

// Generic code bound only on `Metadata` still reaches `doc()`.
fn doc_through_metadata<M: Metadata>(meta: &M) -> &M::Meta {
    meta.doc()
}

#[test]
fn doc_is_reachable_from_metadata_bound() {
    let meta = with_file();
    let doc = doc_through_metadata(&meta);

    assert!(std::ptr::eq(doc, &meta));
    assert_eq!(doc.checksum(), "some sum");
}
