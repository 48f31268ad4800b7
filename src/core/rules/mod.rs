//! core/rules/mod.rs
//!
//! The parsed rule configuration.
//!
//! The on-disk document is loose JSON (every section optional, field names as
//! map keys). At load time it is turned into the typed model below, so the
//! pipeline never re-interprets strings per value:
//! - exclusion action -> [`ExcludeAction`]
//! - glob patterns -> compiled [`GlobPattern`]
//! - field specs -> [`FieldSpec`] variants
//! - allowed character class -> compiled [`CharFilter`]
//!
//! A missing rule always means "no rule": that stage passes the value through.

mod glob;
mod load;

use indexmap::IndexMap;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub use glob::GlobPattern;

/// Replacement used by the `replace` action when `replace_with` is absent.
pub const DEFAULT_REPLACE_WITH: &str = "[EXCLUDED]";

/// Immutable rule set threaded through a reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    pub exclude: ExcludeRules,
    /// Field -> fields to delete once it ends up empty.
    pub dependent_removals: IndexMap<String, Vec<String>>,
    pub format_rules: IndexMap<String, FormatRule>,
    pub fields_spec: IndexMap<String, FieldSpec>,
    pub char_filter: Option<CharFilter>,
}

impl RuleConfig {
    pub fn format_rule(&self, field: &str) -> Option<&FormatRule> {
        self.format_rules.get(field)
    }

    pub fn field_spec(&self, field: &str) -> Option<&FieldSpec> {
        self.fields_spec.get(field)
    }

    /// Dependents of `field`, empty when none are configured.
    pub fn dependents_of(&self, field: &str) -> &[String] {
        self.dependent_removals
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcludeAction {
    /// Drop the matching value.
    #[default]
    Remove,
    /// Swap the matching value for `replace_with`.
    Replace,
}

impl ExcludeAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "remove" => Some(Self::Remove),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExcludeRules {
    pub action: ExcludeAction,
    pub replace_with: String,
    /// Checked for every field, before the per-field list.
    pub global: Vec<GlobPattern>,
    pub per_field: IndexMap<String, Vec<GlobPattern>>,
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self {
            action: ExcludeAction::Remove,
            replace_with: DEFAULT_REPLACE_WITH.to_string(),
            global: Vec::new(),
            per_field: IndexMap::new(),
        }
    }
}

impl ExcludeRules {
    /// First pattern (global first, then field-specific) matching `value`.
    pub fn find_match(&self, field: &str, value: &str) -> Option<&GlobPattern> {
        let field_patterns = self.per_field.get(field).map(Vec::as_slice).unwrap_or(&[]);
        self.global
            .iter()
            .chain(field_patterns)
            .find(|p| p.matches(value))
    }
}

/// Each key is decoded on its own: a badly typed one is logged and left at
/// its default without taking the rest of the rule down with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatRule {
    #[serde(deserialize_with = "lenient")]
    pub strip: bool,
    #[serde(deserialize_with = "lenient")]
    pub uppercase: bool,
    #[serde(deserialize_with = "lenient")]
    pub lowercase: bool,
    #[serde(deserialize_with = "lenient")]
    pub max_length: Option<usize>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "bad format rule entry; ignored");
        T::default()
    }))
}

/// Validation for one field, keyed by the `type` entry of `fields_spec`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// `"str"`: truncate past `max_length` (zero or absent = unlimited).
    Text { max_length: Option<usize> },
    /// `"int"`: must parse; optional inclusive bounds.
    Integer { min: Option<f64>, max: Option<f64> },
    /// Any other declared type: values pass untouched.
    Passthrough(String),
}

/// Global character filter built from `char_filter.allowed_regex`.
#[derive(Debug, Clone)]
pub struct CharFilter {
    allowed: String,
    not_allowed: Regex,
    pub replacement: String,
}

impl CharFilter {
    /// `allowed` is the body of a character class, e.g. `A-Za-z0-9 .,'-`.
    /// A leading `^` and a trailing `$` are stripped first.
    pub fn new(allowed: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        let body = allowed.strip_prefix('^').unwrap_or(allowed);
        let body = body.strip_suffix('$').unwrap_or(body);
        let not_allowed = Regex::new(&format!("[^{body}]"))?;

        Ok(Self {
            allowed: allowed.to_string(),
            not_allowed,
            replacement: replacement.into(),
        })
    }

    pub fn allowed_pattern(&self) -> &str {
        &self.allowed
    }

    /// Replace every character outside the allowed class.
    pub fn apply(&self, value: &str) -> String {
        self.not_allowed
            .replace_all(value, regex::NoExpand(&self.replacement))
            .into_owned()
    }
}
