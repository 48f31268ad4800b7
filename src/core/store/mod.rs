//! core/store/mod.rs
//!
//! The field store boundary.
//!
//! A tagged file is seen through two overlapping views:
//! - simplified: human field names ("title", "artist", ...) -> list of values
//! - raw: every frame by its native identifier ("TIT2", "TXXX:ASIN", ...)
//!
//! The reconciliation pass only talks to [`FieldStore`], so it runs the same
//! against a real ID3 tag ([`TagStore`]) or an in-memory fake ([`MemoryStore`]).

pub mod mapping;
mod memory;
mod tag;

pub use memory::{MemoryStore, RawFrame};
pub use tag::TagStore;

/// Read/write/delete access to both views of one file's fields.
///
/// Deleting something that is not there is a no-op; the `bool` returns say
/// whether anything was removed.
pub trait FieldStore {
    // --- Simplified view ---

    fn simplified_keys(&self) -> Vec<String>;

    /// `None` if the field is absent.
    fn simplified_values(&self, key: &str) -> Option<Vec<String>>;

    fn set_simplified_values(&mut self, key: &str, values: Vec<String>);

    fn delete_simplified(&mut self, key: &str) -> bool;

    // --- Raw view ---

    fn raw_frame_ids(&self) -> Vec<String>;

    /// Whether a raw frame is covered by the simplified view and must only be
    /// processed there.
    fn is_shadowed_by_field(&self, frame_id: &str) -> bool {
        self.simplified_keys()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(frame_id))
    }

    /// `None` if the frame is absent or carries no text.
    fn raw_text_values(&self, frame_id: &str) -> Option<Vec<String>>;

    fn set_raw_text_values(&mut self, frame_id: &str, values: Vec<String>);

    fn delete_raw_frame(&mut self, frame_id: &str) -> bool;
}
