//! core/rules/load.rs
//! Build a [`RuleConfig`] from the JSON rule document.
//!
//! Only two things are hard errors: unreadable/unparseable JSON, and a top
//! level that is not an object. Everything below that is lenient: a section
//! or entry with the wrong shape is logged and skipped, which leaves that
//! stage as a no-op for the affected field.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{
    CharFilter, ExcludeAction, ExcludeRules, FieldSpec, FormatRule, GlobPattern, RuleConfig,
};
use crate::core::error::{Error, Result};

const EXCLUDE_VALUES: &str = "exclude_values";
const DEPENDENT_REMOVALS: &str = "dependent_removals";
const FORMAT_RULES: &str = "format_rules";
const FIELDS_SPEC: &str = "fields_spec";
const CHAR_FILTER: &str = "char_filter";

impl RuleConfig {
    /// Read and parse a rule file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let rules = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "loaded rule configuration");
        Ok(rules)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::ConfigParse(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(root) = value.as_object() else {
            return Err(Error::ConfigParse(
                "top level must be a JSON object".to_string(),
            ));
        };

        Ok(Self {
            exclude: section(root, EXCLUDE_VALUES)
                .map(parse_exclude)
                .unwrap_or_default(),
            dependent_removals: section(root, DEPENDENT_REMOVALS)
                .map(parse_dependents)
                .unwrap_or_default(),
            format_rules: section(root, FORMAT_RULES)
                .map(parse_format_rules)
                .unwrap_or_default(),
            fields_spec: section(root, FIELDS_SPEC)
                .map(parse_fields_spec)
                .unwrap_or_default(),
            char_filter: section(root, CHAR_FILTER).and_then(parse_char_filter),
        })
    }
}

/// A top-level section, if present and shaped like an object.
fn section<'a>(root: &'a Map<String, Value>, name: &str) -> Option<&'a Map<String, Value>> {
    match root.get(name)? {
        Value::Object(map) => Some(map),
        Value::Null => None,
        _ => {
            tracing::warn!(section = name, "rule section is not an object; ignored");
            None
        }
    }
}

fn parse_exclude(map: &Map<String, Value>) -> ExcludeRules {
    let mut rules = ExcludeRules::default();

    for (key, value) in map {
        match key.as_str() {
            "action" => match value.as_str().and_then(ExcludeAction::parse) {
                Some(action) => rules.action = action,
                None => tracing::warn!(
                    action = %value,
                    "unknown exclude action; falling back to \"remove\""
                ),
            },
            "replace_with" => match value.as_str() {
                Some(s) => rules.replace_with = s.to_string(),
                None => tracing::warn!("exclude_values.replace_with is not a string; ignored"),
            },
            "global" => rules.global = parse_patterns("global", value),
            field => {
                let patterns = parse_patterns(field, value);
                if !patterns.is_empty() {
                    rules.per_field.insert(field.to_string(), patterns);
                }
            }
        }
    }

    rules
}

fn parse_patterns(field: &str, value: &Value) -> Vec<GlobPattern> {
    let Some(items) = value.as_array() else {
        tracing::warn!(field, "exclude pattern list is not an array; ignored");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let Some(raw) = item.as_str() else {
                tracing::warn!(field, pattern = %item, "exclude pattern is not a string; skipped");
                return None;
            };
            match GlobPattern::new(raw) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(field, pattern = raw, error = %e, "bad exclude pattern; skipped");
                    None
                }
            }
        })
        .collect()
}

fn parse_dependents(map: &Map<String, Value>) -> IndexMap<String, Vec<String>> {
    let mut out = IndexMap::new();

    for (field, value) in map {
        match serde_json::from_value::<Vec<String>>(value.clone()) {
            Ok(deps) => {
                out.insert(field.clone(), deps);
            }
            Err(e) => {
                tracing::warn!(field = %field, error = %e, "bad dependent_removals entry; ignored")
            }
        }
    }

    out
}

fn parse_format_rules(map: &Map<String, Value>) -> IndexMap<String, FormatRule> {
    let mut out = IndexMap::new();

    for (field, value) in map {
        match serde_json::from_value::<FormatRule>(value.clone()) {
            Ok(rule) => {
                out.insert(field.clone(), rule);
            }
            Err(e) => tracing::warn!(field = %field, error = %e, "bad format rule; ignored"),
        }
    }

    out
}

fn parse_fields_spec(map: &Map<String, Value>) -> IndexMap<String, FieldSpec> {
    let mut out = IndexMap::new();

    for (field, value) in map {
        match parse_field_spec(value) {
            Ok(spec) => {
                out.insert(field.clone(), spec);
            }
            Err(reason) => tracing::warn!(field = %field, reason, "bad field spec; ignored"),
        }
    }

    out
}

fn parse_field_spec(value: &Value) -> std::result::Result<FieldSpec, &'static str> {
    let spec = value.as_object().ok_or("not an object")?;

    let type_name = match spec.get("type") {
        None | Some(Value::Null) => "str",
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err("type is not a string"),
    };

    match type_name {
        "str" => Ok(FieldSpec::Text {
            max_length: optional_usize(spec, "max_length")?,
        }),
        "int" => Ok(FieldSpec::Integer {
            min: optional_f64(spec, "min")?,
            max: optional_f64(spec, "max")?,
        }),
        other => Ok(FieldSpec::Passthrough(other.to_string())),
    }
}

fn optional_usize(
    spec: &Map<String, Value>,
    key: &'static str,
) -> std::result::Result<Option<usize>, &'static str> {
    match spec.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or("max_length must be a non-negative integer"),
    }
}

fn optional_f64(
    spec: &Map<String, Value>,
    key: &'static str,
) -> std::result::Result<Option<f64>, &'static str> {
    match spec.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or("min/max must be numbers"),
    }
}

fn parse_char_filter(map: &Map<String, Value>) -> Option<CharFilter> {
    let allowed = match map.get("allowed_regex") {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::String(_)) | Some(Value::Null) | None => return None,
        Some(_) => {
            tracing::warn!("char_filter.allowed_regex is not a string; filter disabled");
            return None;
        }
    };

    let replacement = map
        .get("replace_not_allowed")
        .and_then(Value::as_str)
        .unwrap_or("");

    match CharFilter::new(allowed, replacement) {
        Ok(filter) => Some(filter),
        Err(e) => {
            tracing::warn!(allowed_regex = %allowed, error = %e, "bad character class; filter disabled");
            None
        }
    }
}
