//! core/store/tag.rs
//! [`FieldStore`] over an in-memory `id3::Tag`.
//!
//! Both views read the same frames:
//! - simplified keys come from [`mapping`](super::mapping) (title -> TIT2, ...)
//! - raw ids come from [`frame_key`] (TIT2, TXXX:ASIN, COMM::eng, ...)
//!
//! A raw frame backing a simplified key is shadowed, so one frame is never
//! reconciled twice.

use id3::frame::{Content, ExtendedText};
use id3::{Frame, Tag, TagLike};

use super::FieldStore;
use super::mapping::{self, Backing};
use crate::core::tags::util::{frame_key, join_values, text_values, with_text_values};

#[derive(Debug, Clone)]
pub struct TagStore {
    tag: Tag,
}

impl Default for TagStore {
    fn default() -> Self {
        Self::new(Tag::new())
    }
}

/// What to do with one frame while rebuilding the tag.
enum Rewrite {
    Keep,
    Replace(Frame),
    Drop,
}

impl TagStore {
    pub fn new(tag: Tag) -> Self {
        Self { tag }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Tag {
        &mut self.tag
    }

    pub fn into_tag(self) -> Tag {
        self.tag
    }

    fn frame_by_key(&self, key: &str) -> Option<&Frame> {
        self.tag.frames().find(|f| frame_key(f) == key)
    }

    fn backing_frame(&self, simplified: &str) -> Option<&Frame> {
        self.tag
            .frames()
            .find(|f| mapping::key_for_frame(&frame_key(f)) == Some(simplified))
    }

    /// Rebuild the frame list in order, letting `decide` keep, swap or drop
    /// each frame. Returns how many frames were replaced or dropped.
    fn rewrite(&mut self, mut decide: impl FnMut(&Frame) -> Rewrite) -> usize {
        let frames: Vec<Frame> = self.tag.frames().cloned().collect();
        let mut rebuilt = Tag::with_version(self.tag.version());
        let mut touched = 0;

        for frame in frames {
            match decide(&frame) {
                Rewrite::Keep => {
                    let _ = rebuilt.add_frame(frame);
                }
                Rewrite::Replace(new) => {
                    touched += 1;
                    let _ = rebuilt.add_frame(new);
                }
                Rewrite::Drop => touched += 1,
            }
        }

        self.tag = rebuilt;
        touched
    }

    /// Swap the text of every frame matching `is_target`.
    fn replace_text(&mut self, values: &[String], is_target: impl Fn(&Frame) -> bool) -> usize {
        self.rewrite(|frame| {
            if !is_target(frame) {
                return Rewrite::Keep;
            }
            match with_text_values(frame.content(), values) {
                Some(content) => Rewrite::Replace(Frame::with_content(frame.id(), content)),
                None => Rewrite::Keep,
            }
        })
    }
}

impl FieldStore for TagStore {
    fn simplified_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for frame in self.tag.frames() {
            if let Some(name) = mapping::key_for_frame(&frame_key(frame)) {
                if !keys.iter().any(|k| k == name) {
                    keys.push(name.to_string());
                }
            }
        }
        keys
    }

    fn simplified_values(&self, key: &str) -> Option<Vec<String>> {
        text_values(self.backing_frame(key)?.content())
    }

    fn set_simplified_values(&mut self, key: &str, values: Vec<String>) {
        let Some(backing) = mapping::backing_for(key) else {
            tracing::warn!(field = key, "not a simplified field; value not stored");
            return;
        };

        if self.backing_frame(key).is_some() {
            self.replace_text(&values, |f| {
                mapping::key_for_frame(&frame_key(f)) == Some(key)
            });
            return;
        }

        let frame = match backing {
            Backing::Text(id) => Frame::with_content(id, Content::Text(join_values(&values))),
            Backing::UserText(desc) => Frame::with_content(
                "TXXX",
                Content::ExtendedText(ExtendedText {
                    description: desc.to_string(),
                    value: join_values(&values),
                }),
            ),
        };
        let _ = self.tag.add_frame(frame);
    }

    fn delete_simplified(&mut self, key: &str) -> bool {
        let removed = self.rewrite(|f| {
            if mapping::key_for_frame(&frame_key(f)) == Some(key) {
                Rewrite::Drop
            } else {
                Rewrite::Keep
            }
        });
        removed > 0
    }

    fn raw_frame_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for frame in self.tag.frames() {
            let id = frame_key(frame);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    fn is_shadowed_by_field(&self, frame_id: &str) -> bool {
        if mapping::key_for_frame(frame_id).is_some() {
            return true;
        }
        self.simplified_keys()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(frame_id))
    }

    fn raw_text_values(&self, frame_id: &str) -> Option<Vec<String>> {
        text_values(self.frame_by_key(frame_id)?.content())
    }

    fn set_raw_text_values(&mut self, frame_id: &str, values: Vec<String>) {
        let touched = self.replace_text(&values, |f| frame_key(f) == frame_id);
        if touched == 0 {
            tracing::warn!(frame = frame_id, "no text frame with this id; value not stored");
        }
    }

    fn delete_raw_frame(&mut self, frame_id: &str) -> bool {
        let removed = self.rewrite(|f| {
            if frame_key(f) == frame_id {
                Rewrite::Drop
            } else {
                Rewrite::Keep
            }
        });
        removed > 0
    }
}
