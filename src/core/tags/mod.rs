//! core/tags/mod.rs
//!
//! ID3 tag file IO and frame helpers.
//! Public API:
//! - [`read_tag`] loads a file's tag (an untagged file yields an empty tag).
//! - [`write_tag`] writes a tag back to disk as ID3v2.4.
//! - cover art helpers in [`art`].

pub mod art;
pub(crate) mod util;

use std::path::Path;

use id3::{ErrorKind, Tag, Version};

use super::error::{Error, Result};

pub fn read_tag(path: &Path) -> Result<Tag> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => {
            tracing::debug!(path = %path.display(), "no ID3 tag; starting from an empty one");
            Ok(Tag::new())
        }
        Err(source) => Err(Error::TagRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// Write back to file (v2.4 consistently: multi-value text needs it).
pub fn write_tag(tag: &Tag, path: &Path) -> Result<()> {
    tag.write_to_path(path, Version::Id3v24)
        .map_err(|source| Error::TagWrite {
            path: path.to_path_buf(),
            source,
        })
}
