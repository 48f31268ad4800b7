//! core/store/memory.rs
//! [`FieldStore`] over two plain maps, for tests and tools with no file.

use indexmap::IndexMap;

use super::FieldStore;

/// One raw frame in a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFrame {
    Text(Vec<String>),
    /// Non-text payload (pictures, counters, ...). Never reconciled.
    Binary(Vec<u8>),
}

/// In-memory field store.
///
/// The two views are independent maps, so tests can set up any overlap
/// between them (including a raw frame that disagrees with the simplified
/// field that shadows it). Insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    simplified: IndexMap<String, Vec<String>>,
    raw: IndexMap<String, RawFrame>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.simplified
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_frame<I, S>(mut self, frame_id: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw.insert(
            frame_id.to_string(),
            RawFrame::Text(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn with_binary_frame(mut self, frame_id: &str, data: Vec<u8>) -> Self {
        self.raw.insert(frame_id.to_string(), RawFrame::Binary(data));
        self
    }

    pub fn field(&self, key: &str) -> Option<&[String]> {
        self.simplified.get(key).map(Vec::as_slice)
    }

    pub fn frame(&self, frame_id: &str) -> Option<&RawFrame> {
        self.raw.get(frame_id)
    }
}

impl FieldStore for MemoryStore {
    fn simplified_keys(&self) -> Vec<String> {
        self.simplified.keys().cloned().collect()
    }

    fn simplified_values(&self, key: &str) -> Option<Vec<String>> {
        self.simplified.get(key).cloned()
    }

    fn set_simplified_values(&mut self, key: &str, values: Vec<String>) {
        self.simplified.insert(key.to_string(), values);
    }

    fn delete_simplified(&mut self, key: &str) -> bool {
        self.simplified.shift_remove(key).is_some()
    }

    fn raw_frame_ids(&self) -> Vec<String> {
        self.raw.keys().cloned().collect()
    }

    fn raw_text_values(&self, frame_id: &str) -> Option<Vec<String>> {
        match self.raw.get(frame_id)? {
            RawFrame::Text(values) => Some(values.clone()),
            RawFrame::Binary(_) => None,
        }
    }

    fn set_raw_text_values(&mut self, frame_id: &str, values: Vec<String>) {
        self.raw.insert(frame_id.to_string(), RawFrame::Text(values));
    }

    fn delete_raw_frame(&mut self, frame_id: &str) -> bool {
        self.raw.shift_remove(frame_id).is_some()
    }
}
