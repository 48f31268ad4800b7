//! core/reconcile.rs
//!
//! The cleanup pass over a whole field set.
//!
//! Order matters:
//! 1. every simplified field (a snapshot of the keys, since cascades delete
//!    fields mid-pass)
//! 2. every raw frame that is not shadowed by a simplified field
//!
//! A field whose values are all rejected is deleted, and then its configured
//! dependents are deleted from both views (one level deep, no chaining).

use indexmap::IndexMap;

use super::pipeline::transform;
use super::rules::RuleConfig;
use super::store::FieldStore;

/// Which view of the store a field was reconciled through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Simplified,
    Raw,
}

impl View {
    fn keys<S: FieldStore + ?Sized>(self, store: &S) -> Vec<String> {
        match self {
            View::Simplified => store.simplified_keys(),
            View::Raw => store.raw_frame_ids(),
        }
    }

    fn values<S: FieldStore + ?Sized>(self, store: &S, key: &str) -> Option<Vec<String>> {
        match self {
            View::Simplified => store.simplified_values(key),
            View::Raw => store
                .raw_text_values(key)
                .filter(|values| !values.is_empty()),
        }
    }

    fn set<S: FieldStore + ?Sized>(self, store: &mut S, key: &str, values: Vec<String>) {
        match self {
            View::Simplified => store.set_simplified_values(key, values),
            View::Raw => store.set_raw_text_values(key, values),
        }
    }

    fn delete<S: FieldStore + ?Sized>(self, store: &mut S, key: &str) -> bool {
        match self {
            View::Simplified => store.delete_simplified(key),
            View::Raw => store.delete_raw_frame(key),
        }
    }

    /// Raw frames covered by a simplified field are left to the simplified pass.
    fn skips<S: FieldStore + ?Sized>(self, store: &S, key: &str) -> bool {
        match self {
            View::Simplified => false,
            View::Raw => store.is_shadowed_by_field(key),
        }
    }
}

/// Fate of one field after the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Survivors were written back. `changed` is false when they equal the
    /// original values.
    Kept { values: Vec<String>, changed: bool },
    /// Every value was rejected; the field was deleted.
    Removed,
    /// Deleted because `parent` ended up empty.
    CascadeRemoved { parent: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub view: View,
    pub outcome: FieldOutcome,
}

/// Per-field results of one [`reconcile_all`] run, in visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    fields: IndexMap<String, FieldReport>,
}

impl ReconcileReport {
    pub fn get(&self, key: &str) -> Option<&FieldReport> {
        self.fields.get(key)
    }

    /// False for fields that were removed or cascade-removed; true for kept
    /// fields and for keys the pass never saw (nothing happened to them).
    pub fn survived(&self, key: &str) -> bool {
        !matches!(
            self.fields.get(key).map(|r| &r.outcome),
            Some(FieldOutcome::Removed | FieldOutcome::CascadeRemoved { .. })
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldReport)> {
        self.fields.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn changed_count(&self) -> usize {
        self.fields
            .values()
            .filter(|r| !matches!(r.outcome, FieldOutcome::Kept { changed: false, .. }))
            .count()
    }

    pub fn removed_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, r)| !matches!(r.outcome, FieldOutcome::Kept { .. }))
            .map(|(k, _)| k)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn record(&mut self, key: &str, view: View, outcome: FieldOutcome) {
        self.fields
            .insert(key.to_string(), FieldReport { view, outcome });
    }
}

/// Reconcile every field of `store` against `rules`, in place.
pub fn reconcile_all<S: FieldStore + ?Sized>(store: &mut S, rules: &RuleConfig) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    reconcile_view(store, rules, View::Simplified, &mut report);
    reconcile_view(store, rules, View::Raw, &mut report);

    tracing::info!(
        visited = report.fields.len(),
        changed = report.changed_count(),
        "reconciliation finished"
    );
    report
}

fn reconcile_view<S: FieldStore + ?Sized>(
    store: &mut S,
    rules: &RuleConfig,
    view: View,
    report: &mut ReconcileReport,
) {
    for key in view.keys(store) {
        if view.skips(store, &key) {
            continue;
        }
        // Gone already (cascade from an earlier field), or no text to check.
        let Some(original) = view.values(store, &key) else {
            continue;
        };

        let survivors: Vec<String> = original
            .iter()
            .filter_map(|value| transform(&key, value, rules).kept())
            .collect();

        if survivors.is_empty() {
            view.delete(store, &key);
            tracing::info!(field = %key, ?view, "all values rejected; field removed");
            report.record(&key, view, FieldOutcome::Removed);
            cascade(store, &key, rules, report);
        } else {
            let changed = survivors != original;
            if changed {
                view.set(store, &key, survivors.clone());
            }
            report.record(
                &key,
                view,
                FieldOutcome::Kept {
                    values: survivors,
                    changed,
                },
            );
        }
    }
}

/// Delete the configured dependents of `removed` from both views.
///
/// Single level: a dependent's own dependents are left alone.
pub fn cascade_remove<S: FieldStore + ?Sized>(store: &mut S, removed: &str, rules: &RuleConfig) {
    cascade(store, removed, rules, &mut ReconcileReport::default());
}

fn cascade<S: FieldStore + ?Sized>(
    store: &mut S,
    removed: &str,
    rules: &RuleConfig,
    report: &mut ReconcileReport,
) {
    for dependent in rules.dependents_of(removed) {
        let from_simplified = store.delete_simplified(dependent);
        let from_raw = store.delete_raw_frame(dependent);
        if !(from_simplified || from_raw) {
            continue;
        }

        let view = if from_simplified {
            View::Simplified
        } else {
            View::Raw
        };
        tracing::info!(field = %dependent, parent = removed, "dependent field removed");
        report.record(
            dependent,
            view,
            FieldOutcome::CascadeRemoved {
                parent: removed.to_string(),
            },
        );
    }
}
