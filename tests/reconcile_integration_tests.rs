//! Integration tests for the cleanup pass
//!
//! These run `reconcile_all` against an in-memory store built from JSON rule
//! documents, the same way a rule file would be loaded from disk.

use proptest::prelude::*;
use tagsweep::core::store::{FieldStore, MemoryStore, RawFrame};
use tagsweep::core::{FieldOutcome, View};
use tagsweep::{RuleConfig, reconcile_all};

fn rules(json: &str) -> RuleConfig {
    RuleConfig::from_json_str(json).unwrap()
}

#[test]
fn test_empty_rules_change_nothing() {
    let mut store = MemoryStore::new()
        .with_field("title", ["  Song  "])
        .with_field("genre", ["Rock", "Pop"])
        .with_frame("COMM::eng", ["hello"]);
    let before = store.clone();

    let report = reconcile_all(&mut store, &RuleConfig::default());

    assert_eq!(store, before);
    assert_eq!(report.changed_count(), 0);
}

#[test]
fn test_glob_exclusion_ignores_case() {
    let config = rules(r#"{ "exclude_values": { "artist": ["*unknown*"] } }"#);
    let mut store = MemoryStore::new().with_field("artist", ["Unknown Artist"]);

    let report = reconcile_all(&mut store, &config);

    assert_eq!(store.field("artist"), None);
    assert_eq!(report.get("artist").unwrap().outcome, FieldOutcome::Removed);
}

#[test]
fn test_lowercase_wins_and_truncation_follows_case() {
    let config = rules(
        r#"{ "format_rules": { "title": {
               "strip": true, "uppercase": true, "lowercase": true, "max_length": 3
           } } }"#,
    );
    let mut store = MemoryStore::new().with_field("title", ["  Hello  "]);

    reconcile_all(&mut store, &config);

    assert_eq!(store.field("title"), Some(&["hel".to_string()][..]));
}

#[test]
fn test_integer_fields_are_normalized_and_range_checked() {
    let config = rules(
        r#"{ "fields_spec": {
               "tracknumber": { "type": "int", "min": 1, "max": 99 },
               "bpm": { "type": "int", "min": 1 }
           } }"#,
    );
    let mut store = MemoryStore::new()
        .with_field("tracknumber", [" 007 ", "100", "abc"])
        .with_field("bpm", ["0"]);

    let report = reconcile_all(&mut store, &config);

    assert_eq!(store.field("tracknumber"), Some(&["7".to_string()][..]));
    assert_eq!(store.field("bpm"), None);
    assert!(!report.survived("bpm"));
}

#[test]
fn test_integer_field_keeps_values_past_64_bits() {
    let config = rules(
        r#"{
            "fields_spec": { "barcode": { "type": "int" } },
            "dependent_removals": { "barcode": ["catalognumber"] }
        }"#,
    );
    let mut store = MemoryStore::new()
        .with_field("barcode", ["00012345678901234567890"])
        .with_field("catalognumber", ["CAT-1"]);

    reconcile_all(&mut store, &config);

    assert_eq!(
        store.field("barcode"),
        Some(&["12345678901234567890".to_string()][..])
    );
    assert_eq!(store.field("catalognumber"), Some(&["CAT-1".to_string()][..]));
}

#[test]
fn test_replacement_is_still_validated() {
    let config = rules(
        r#"{
            "exclude_values": { "action": "replace", "title": ["*demo*"] },
            "fields_spec": { "title": { "type": "str", "max_length": 5 } }
        }"#,
    );
    let mut store = MemoryStore::new().with_field("title", ["Demo take"]);

    reconcile_all(&mut store, &config);

    assert_eq!(store.field("title"), Some(&["[EXCL".to_string()][..]));
}

#[test]
fn test_custom_replacement_text() {
    let config = rules(
        r#"{ "exclude_values": {
               "action": "replace", "replace_with": "n/a", "global": ["none"]
           } }"#,
    );
    let mut store = MemoryStore::new()
        .with_field("album", ["None"])
        .with_field("artist", ["Band"]);

    reconcile_all(&mut store, &config);

    assert_eq!(store.field("album"), Some(&["n/a".to_string()][..]));
    assert_eq!(store.field("artist"), Some(&["Band".to_string()][..]));
}

#[test]
fn test_emptied_field_removes_dependents_from_both_views() {
    let config = rules(
        r#"{
            "exclude_values": { "album": ["untitled"] },
            "dependent_removals": { "album": ["album_sort"] }
        }"#,
    );
    let mut store = MemoryStore::new()
        .with_field("album", ["Untitled"])
        .with_field("album_sort", ["Sorted"])
        .with_frame("album_sort", ["Sorted"])
        .with_frame("TXXX:other", ["kept"]);

    let report = reconcile_all(&mut store, &config);

    assert_eq!(store.field("album"), None);
    assert_eq!(store.field("album_sort"), None);
    assert_eq!(store.frame("album_sort"), None);
    assert_eq!(
        store.frame("TXXX:other"),
        Some(&RawFrame::Text(vec!["kept".to_string()]))
    );
    assert_eq!(
        report.get("album_sort").unwrap().outcome,
        FieldOutcome::CascadeRemoved {
            parent: "album".to_string()
        }
    );
}

#[test]
fn test_cascade_is_single_level() {
    let config = rules(
        r#"{
            "exclude_values": { "global": ["x"] },
            "dependent_removals": { "a": ["b"], "b": ["c"] }
        }"#,
    );
    let mut store = MemoryStore::new()
        .with_field("a", ["x"])
        .with_field("b", ["keep"])
        .with_field("c", ["keep"]);

    reconcile_all(&mut store, &config);

    assert_eq!(store.field("a"), None);
    assert_eq!(store.field("b"), None);
    assert_eq!(store.field("c"), Some(&["keep".to_string()][..]));
}

#[test]
fn test_shadowed_raw_frame_is_left_to_simplified_pass() {
    let config = rules(r#"{ "exclude_values": { "global": ["bad"] } }"#);
    // The raw frame disagrees with the field that shadows it; only the
    // simplified value is judged.
    let mut store = MemoryStore::new()
        .with_field("title", ["fine"])
        .with_frame("TITLE", ["bad"])
        .with_frame("COMM::eng", ["bad"]);

    let report = reconcile_all(&mut store, &config);

    assert_eq!(
        store.frame("TITLE"),
        Some(&RawFrame::Text(vec!["bad".to_string()]))
    );
    assert_eq!(store.frame("COMM::eng"), None);
    assert_eq!(report.get("COMM::eng").unwrap().view, View::Raw);
    assert!(report.get("TITLE").is_none());
}

#[test]
fn test_binary_frames_are_never_touched() {
    let config = rules(r#"{ "exclude_values": { "global": ["*"] } }"#);
    let mut store = MemoryStore::new().with_binary_frame("APIC:Cover", vec![1, 2, 3]);

    let report = reconcile_all(&mut store, &config);

    assert!(report.is_empty());
    assert_eq!(
        store.frame("APIC:Cover"),
        Some(&RawFrame::Binary(vec![1, 2, 3]))
    );
}

#[test]
fn test_char_filter_runs_before_exclusion() {
    let config = rules(
        r#"{
            "char_filter": { "allowed_regex": "^A-Za-z $", "replace_not_allowed": "" },
            "exclude_values": { "global": ["bad word"] }
        }"#,
    );
    let mut store = MemoryStore::new().with_field("title", ["bad word!!"]);

    reconcile_all(&mut store, &config);

    assert_eq!(store.field("title"), None);
}

fn cleanup_rules() -> RuleConfig {
    rules(
        r#"{
            "exclude_values": { "global": ["*junk*"], "artist": ["unknown"] },
            "dependent_removals": { "artist": ["artistsort"] },
            "format_rules": {
                "title": { "uppercase": true, "max_length": 8 },
                "genre": { "lowercase": true }
            },
            "fields_spec": {
                "tracknumber": { "type": "int", "min": 1, "max": 50 },
                "album": { "type": "str", "max_length": 6 }
            }
        }"#,
    )
}

/// Field names no rule in [`cleanup_rules`] mentions.
fn unruled_key() -> impl Strategy<Value = String> {
    "x_[a-z]{1,8}"
}

/// Values the global `*junk*` exclusion can never hit.
fn unexcluded_value() -> impl Strategy<Value = String> {
    "[ a-iA-I0-9]{0,12}"
}

fn value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ a-zA-Z0-9]{0,12}",
        Just("junk".to_string()),
        Just("unknown".to_string()),
        "[ ]?-?[0-9]{1,3}[ ]?",
    ]
}

proptest! {
    #[test]
    fn prop_second_pass_changes_nothing(
        title in proptest::collection::vec(value(), 1..3),
        artist in proptest::collection::vec(value(), 1..3),
        genre in proptest::collection::vec(value(), 1..3),
        track in proptest::collection::vec(value(), 1..3),
        album in proptest::collection::vec(value(), 1..3),
        comment in proptest::collection::vec(value(), 1..3),
    ) {
        let config = cleanup_rules();
        let mut store = MemoryStore::new()
            .with_field("title", title)
            .with_field("artist", artist)
            .with_field("artistsort", ["Sort"])
            .with_field("genre", genre)
            .with_field("tracknumber", track)
            .with_field("album", album)
            .with_frame("COMM::eng", comment);

        reconcile_all(&mut store, &config);
        let once = store.clone();
        let report = reconcile_all(&mut store, &config);

        prop_assert_eq!(&store, &once);
        prop_assert_eq!(report.changed_count(), 0);
    }

    #[test]
    fn prop_no_matching_rule_is_identity(
        fields in proptest::collection::vec(
            (unruled_key(), proptest::collection::vec(unexcluded_value(), 1..4)),
            1..6,
        ),
        frames in proptest::collection::vec(
            (unruled_key(), proptest::collection::vec(unexcluded_value(), 1..4)),
            0..4,
        ),
    ) {
        let config = cleanup_rules();
        let mut store = MemoryStore::new();
        for (key, values) in fields {
            store = store.with_field(&key, values);
        }
        for (key, values) in frames {
            store = store.with_frame(&format!("TXXX:{key}"), values);
        }
        let before = store.clone();

        let report = reconcile_all(&mut store, &config);

        prop_assert_eq!(&store, &before);
        prop_assert_eq!(report.changed_count(), 0);
    }

    #[test]
    fn prop_surviving_fields_are_never_empty(values in proptest::collection::vec(value(), 1..5)) {
        let config = cleanup_rules();
        let mut store = MemoryStore::new().with_field("title", values);

        reconcile_all(&mut store, &config);

        if let Some(kept) = store.simplified_values("title") {
            prop_assert!(!kept.is_empty());
        }
    }
}
