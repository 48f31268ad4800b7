//! tagsweep
//!
//! Rule-driven cleanup of ID3 metadata.
//!
//! A JSON rule file says how values should look (trimmed, cased, truncated,
//! integers in range, characters from an allowed set) and which values are
//! junk (glob patterns). One pass over a loaded MP3 tag reformats, replaces
//! or drops values, deletes fields left empty, and removes the fields that
//! depend on them.
//!
//! - `core` holds the engine and the tag IO
//! - `logging` sets up `tracing` output for the binary

pub mod core;
pub mod logging;

pub use crate::core::{Error, Result, RuleConfig, Session, reconcile_all};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
