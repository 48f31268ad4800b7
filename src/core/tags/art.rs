use id3::frame::{Content, Picture, PictureType};
use id3::{Tag, TagLike};

/// Description given to a cover written by [`set_front_cover`].
pub const COVER_DESCRIPTION: &str = "Cover";

/// Returns (image_bytes, mime) for the first embedded picture (APIC/PIC).
pub fn embedded_art(tag: &Tag) -> Option<(Vec<u8>, String)> {
    for f in tag.frames() {
        if f.id() != "APIC" && f.id() != "PIC" {
            continue;
        }
        if let Content::Picture(p) = f.content() {
            return Some((p.data.clone(), p.mime_type.clone()));
        }
    }

    None
}

/// Replace every picture with a single front cover.
pub fn set_front_cover(tag: &mut Tag, data: Vec<u8>, mime_type: &str) {
    tag.remove_all_pictures();
    let _ = tag.add_frame(Picture {
        mime_type: mime_type.to_string(),
        picture_type: PictureType::CoverFront,
        description: COVER_DESCRIPTION.to_string(),
        data,
    });
}

/// Drop every picture. Returns how many were removed.
pub fn remove_all_art(tag: &mut Tag) -> usize {
    let before = tag.pictures().count();
    tag.remove_all_pictures();
    before
}
