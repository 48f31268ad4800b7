//! Integration tests for a full load → correct → save cycle on real files
//!
//! The files hold an ID3 tag followed by a few junk bytes instead of audio,
//! which is enough for tag IO.

use std::path::{Path, PathBuf};

use id3::frame::{Comment, ExtendedText};
use id3::{Tag, TagLike, Version};
use tagsweep::core::FieldOutcome;
use tagsweep::{Error, RuleConfig, Session};
use tempfile::TempDir;

const NOT_AUDIO: &[u8] = b"not really audio data";

const RULES: &str = r#"{
    "exclude_values": {
        "global": ["*www.*"],
        "artist": ["unknown artist"]
    },
    "dependent_removals": { "artist": ["artistsort"] },
    "format_rules": { "title": { "strip": true } },
    "fields_spec": { "tracknumber": { "type": "int", "min": 1 } }
}"#;

fn tagged_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("track.mp3");
    std::fs::write(&path, NOT_AUDIO).unwrap();

    let mut tag = Tag::new();
    tag.set_title("  Song Title  ");
    tag.set_artist("Unknown Artist");
    tag.set_album("Album");
    tag.set_text("TSOP", "Artist, Unknown");
    tag.set_text("TRCK", "03");
    tag.add_frame(ExtendedText {
        description: "Source".to_string(),
        value: "www.example.com".to_string(),
    });
    tag.add_frame(Comment {
        lang: "eng".to_string(),
        description: String::new(),
        text: "nice".to_string(),
    });
    tag.write_to_path(&path, Version::Id3v24).unwrap();

    path
}

fn session_for(path: &Path) -> Session {
    let mut session = Session::new(RuleConfig::from_json_str(RULES).unwrap());
    session.load_file(path).unwrap();
    session
}

#[test]
fn test_correct_and_save_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = tagged_file(&dir);
    let mut session = session_for(&path);

    let report = session.check_and_correct_all().unwrap();
    session.save_file().unwrap();

    assert_eq!(report.get("artist").unwrap().outcome, FieldOutcome::Removed);
    assert_eq!(
        report.get("artistsort").unwrap().outcome,
        FieldOutcome::CascadeRemoved {
            parent: "artist".to_string()
        }
    );
    assert!(!report.survived("TXXX:Source"));

    let saved = Tag::read_from_path(&path).unwrap();
    assert_eq!(saved.title(), Some("Song Title"));
    assert_eq!(saved.artist(), None);
    assert!(saved.get("TSOP").is_none());
    assert_eq!(saved.album(), Some("Album"));
    assert_eq!(saved.track(), Some(3));
    assert!(saved.extended_texts().all(|t| t.description != "Source"));
    assert_eq!(saved.comments().count(), 1);
}

#[test]
fn test_get_and_set_field() {
    let dir = TempDir::new().unwrap();
    let path = tagged_file(&dir);
    let mut session = session_for(&path);

    assert_eq!(session.get_field("album").unwrap(), Some("Album".to_string()));
    assert_eq!(session.get_field("genre").unwrap(), None);

    session.set_field("genre", "Jazz").unwrap();
    session.save_file().unwrap();

    assert_eq!(Tag::read_from_path(&path).unwrap().genre(), Some("Jazz"));
    assert!(matches!(
        session.set_field("not_a_field", "x"),
        Err(Error::UnknownField(_))
    ));
}

#[test]
fn test_listing_shows_fields_and_extra_frames() {
    let dir = TempDir::new().unwrap();
    let path = tagged_file(&dir);
    let session = session_for(&path);

    let listing = session.listing().unwrap();

    assert!(listing.fields.iter().any(|(k, v)| k == "album" && v == &["Album"]));
    assert!(listing.extra_frames.iter().any(|(k, _)| k == "COMM::eng"));
    assert!(listing.extra_frames.iter().all(|(k, _)| k != "TALB"));

    let text = listing.to_string();
    assert!(text.contains("album"));
}

#[test]
fn test_cover_art_cycle() {
    let dir = TempDir::new().unwrap();
    let path = tagged_file(&dir);
    let mut session = session_for(&path);

    assert_eq!(session.album_art().unwrap(), None);

    session
        .set_album_art(vec![0xFF, 0xD8, 0xFF], "image/jpeg")
        .unwrap();
    session.save_file().unwrap();

    let mut reloaded = session_for(&path);
    assert_eq!(
        reloaded.album_art().unwrap(),
        Some((vec![0xFF, 0xD8, 0xFF], "image/jpeg".to_string()))
    );

    assert_eq!(reloaded.remove_album_art().unwrap(), 1);
    assert_eq!(reloaded.album_art().unwrap(), None);
}

#[test]
fn test_untagged_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.mp3");
    std::fs::write(&path, NOT_AUDIO).unwrap();

    let mut session = Session::new(RuleConfig::default());
    session.load_file(&path).unwrap();

    assert!(session.is_loaded());
    assert_eq!(session.path(), Some(path.as_path()));
    assert!(session.check_and_correct_all().unwrap().is_empty());
}
