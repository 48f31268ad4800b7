//! core/store/mapping.rs
//! Simplified field names and the ID3 frames behind them.
//!
//! Same naming as the common "easy" ID3 key set, so rule files written for
//! other taggers keep working: lowercase names, MusicBrainz/AcoustID ids
//! living in TXXX frames.

/// Where a simplified field is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// A plain text frame (T***).
    Text(&'static str),
    /// A TXXX frame with this description.
    UserText(&'static str),
}

impl Backing {
    /// Raw-view identifier of the backing frame.
    pub fn frame_key(self) -> String {
        match self {
            Backing::Text(id) => id.to_string(),
            Backing::UserText(desc) => format!("TXXX:{desc}"),
        }
    }
}

pub const SIMPLIFIED_FIELDS: &[(&str, Backing)] = &[
    ("album", Backing::Text("TALB")),
    ("bpm", Backing::Text("TBPM")),
    ("compilation", Backing::Text("TCMP")),
    ("composer", Backing::Text("TCOM")),
    ("copyright", Backing::Text("TCOP")),
    ("encodedby", Backing::Text("TENC")),
    ("lyricist", Backing::Text("TEXT")),
    ("length", Backing::Text("TLEN")),
    ("media", Backing::Text("TMED")),
    ("mood", Backing::Text("TMOO")),
    ("grouping", Backing::Text("TIT1")),
    ("title", Backing::Text("TIT2")),
    ("version", Backing::Text("TIT3")),
    ("artist", Backing::Text("TPE1")),
    ("albumartist", Backing::Text("TPE2")),
    ("conductor", Backing::Text("TPE3")),
    ("arranger", Backing::Text("TPE4")),
    ("discnumber", Backing::Text("TPOS")),
    ("organization", Backing::Text("TPUB")),
    ("tracknumber", Backing::Text("TRCK")),
    ("author", Backing::Text("TOLY")),
    ("albumartistsort", Backing::Text("TSO2")),
    ("albumsort", Backing::Text("TSOA")),
    ("composersort", Backing::Text("TSOC")),
    ("artistsort", Backing::Text("TSOP")),
    ("titlesort", Backing::Text("TSOT")),
    ("isrc", Backing::Text("TSRC")),
    ("discsubtitle", Backing::Text("TSST")),
    ("language", Backing::Text("TLAN")),
    ("genre", Backing::Text("TCON")),
    ("date", Backing::Text("TDRC")),
    ("originaldate", Backing::Text("TDOR")),
    ("musicbrainz_artistid", Backing::UserText("MusicBrainz Artist Id")),
    ("musicbrainz_albumid", Backing::UserText("MusicBrainz Album Id")),
    ("musicbrainz_albumartistid", Backing::UserText("MusicBrainz Album Artist Id")),
    ("musicbrainz_trmid", Backing::UserText("MusicBrainz TRM Id")),
    ("musicip_puid", Backing::UserText("MusicIP PUID")),
    ("musicip_fingerprint", Backing::UserText("MusicMagic Fingerprint")),
    ("musicbrainz_albumstatus", Backing::UserText("MusicBrainz Album Status")),
    ("musicbrainz_albumtype", Backing::UserText("MusicBrainz Album Type")),
    ("releasecountry", Backing::UserText("MusicBrainz Album Release Country")),
    ("musicbrainz_discid", Backing::UserText("MusicBrainz Disc Id")),
    ("asin", Backing::UserText("ASIN")),
    ("barcode", Backing::UserText("BARCODE")),
    ("catalognumber", Backing::UserText("CATALOGNUMBER")),
    ("musicbrainz_releasetrackid", Backing::UserText("MusicBrainz Release Track Id")),
    ("musicbrainz_releasegroupid", Backing::UserText("MusicBrainz Release Group Id")),
    ("musicbrainz_workid", Backing::UserText("MusicBrainz Work Id")),
    ("acoustid_fingerprint", Backing::UserText("Acoustid Fingerprint")),
    ("acoustid_id", Backing::UserText("Acoustid Id")),
];

pub fn backing_for(key: &str) -> Option<Backing> {
    SIMPLIFIED_FIELDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|&(_, backing)| backing)
}

/// Reverse lookup: the simplified name stored in a given raw frame.
pub fn key_for_frame(frame_key: &str) -> Option<&'static str> {
    SIMPLIFIED_FIELDS.iter().find_map(|&(name, backing)| {
        let matches = match backing {
            Backing::Text(id) => id == frame_key,
            Backing::UserText(desc) => frame_key
                .strip_prefix("TXXX:")
                .is_some_and(|d| d.eq_ignore_ascii_case(desc)),
        };
        matches.then_some(name)
    })
}
