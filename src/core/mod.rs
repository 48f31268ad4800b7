//! core/mod.rs
//!
//! The brain of the app:
//! - Load a rule file into a typed [`RuleConfig`](rules::RuleConfig)
//! - Expose a tagged file through two views ([`store`])
//! - Clean every value ([`pipeline`]) and decide each field's fate
//!   ([`reconcile`])
//! - Keep file IO (tags, cover art, stream info) at the edges ([`session`])
//!
//! The engine itself never touches the disk: `reconcile_all` works on any
//! [`FieldStore`](store::FieldStore) that is already in memory.

pub mod audio;
pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod rules;
pub mod session;
pub mod store;
pub mod tags;
pub mod types;

pub use error::{Error, Result};
pub use pipeline::{TransformResult, transform};
pub use reconcile::{FieldOutcome, ReconcileReport, View, cascade_remove, reconcile_all};
pub use rules::RuleConfig;
pub use session::Session;
