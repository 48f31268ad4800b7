//! core/tags/util.rs
//! Small frame helpers shared by the tag store and the listing.

use id3::Frame;
use id3::frame::{Comment, Content, ExtendedText};

/// Separator between values of a multi-valued text frame (ID3v2.4).
const VALUE_SEP: char = '\0';

/// Raw-view identifier of a frame.
///
/// Frames that may legally repeat get their distinguishing parts appended,
/// so each identifier names exactly one frame:
/// - `TXXX:<description>`, `WXXX:<description>`, `APIC:<description>`
/// - `COMM:<description>:<lang>`, `USLT:<description>:<lang>`
/// - everything else: the frame id
pub(crate) fn frame_key(frame: &Frame) -> String {
    match frame.content() {
        Content::ExtendedText(et) => format!("TXXX:{}", et.description),
        Content::ExtendedLink(el) => format!("WXXX:{}", el.description),
        Content::Comment(c) => format!("COMM:{}:{}", c.description, c.lang),
        Content::Lyrics(l) => format!("USLT:{}:{}", l.description, l.lang),
        Content::Picture(p) => format!("APIC:{}", p.description),
        _ => frame.id().to_string(),
    }
}

/// Text values of a frame, or `None` if it is not a text-bearing frame.
///
/// Lyrics (USLT) hold one free-form text, not a value list, and are left out.
pub(crate) fn text_values(content: &Content) -> Option<Vec<String>> {
    let joined = match content {
        Content::Text(s) => s,
        Content::ExtendedText(et) => &et.value,
        Content::Comment(c) => &c.text,
        _ => return None,
    };
    Some(split_values(joined))
}

/// Same frame kind, new text values. `None` for non-text content.
pub(crate) fn with_text_values(content: &Content, values: &[String]) -> Option<Content> {
    let joined = join_values(values);
    let out = match content {
        Content::Text(_) => Content::Text(joined),
        Content::ExtendedText(et) => Content::ExtendedText(ExtendedText {
            description: et.description.clone(),
            value: joined,
        }),
        Content::Comment(c) => Content::Comment(Comment {
            lang: c.lang.clone(),
            description: c.description.clone(),
            text: joined,
        }),
        _ => return None,
    };
    Some(out)
}

pub(crate) fn split_values(joined: &str) -> Vec<String> {
    let joined = joined.strip_suffix(VALUE_SEP).unwrap_or(joined);
    joined.split(VALUE_SEP).map(str::to_string).collect()
}

pub(crate) fn join_values(values: &[String]) -> String {
    values.join("\0")
}

/// One-line human rendering of a frame's payload.
pub(crate) fn describe_frame(frame: &Frame) -> String {
    if let Some(values) = text_values(frame.content()) {
        return values.join(" / ");
    }

    match frame.content() {
        Content::Lyrics(l) => l.text.clone(),
        Content::Link(url) => url.clone(),
        Content::ExtendedLink(el) => el.link.clone(),
        Content::Picture(p) => format!("{} image, {} bytes", p.mime_type, p.data.len()),
        Content::Popularimeter(p) => format!("rating {}, {} plays", p.rating, p.counter),
        Content::Unknown(unk) if frame.id() == "PCNT" => match parse_be_u64(&unk.data) {
            Some(n) => format!("{n} plays"),
            None => "empty counter".to_string(),
        },
        Content::Unknown(unk) => format!("{} bytes", unk.data.len()),
        _ => format!("<{} frame>", frame.id()),
    }
}

/// Parse a variable-length big-endian integer into u64 (ID3 PCNT format).
pub(crate) fn parse_be_u64(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }

    // If it's longer than 8 bytes, keep the least-significant 8.
    let bytes = if bytes.len() > 8 {
        &bytes[bytes.len() - 8..]
    } else {
        bytes
    };

    let mut v: u64 = 0;
    for &b in bytes {
        v = (v << 8) | (b as u64);
    }
    Some(v)
}
