//! core/pipeline.rs
//! Per-value cleanup: format -> character filter -> exclusion -> validation.
//!
//! Each stage feeds the next. Only a rejection stops the chain early.
//! Nothing here touches a store; the reconciliation pass decides what to do
//! with the results.

use super::rules::{CharFilter, ExcludeAction, FieldSpec, FormatRule, RuleConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformResult {
    Kept(String),
    Rejected,
}

impl TransformResult {
    pub fn kept(self) -> Option<String> {
        match self {
            Self::Kept(v) => Some(v),
            Self::Rejected => None,
        }
    }
}

/// Run one raw value of `field` through every stage.
pub fn transform(field: &str, raw: &str, rules: &RuleConfig) -> TransformResult {
    let mut value = match rules.format_rule(field) {
        Some(rule) => apply_format(raw, rule),
        None => raw.to_string(),
    };

    if let Some(filter) = &rules.char_filter {
        value = filter_chars(&value, filter);
    }

    if let Some(pattern) = rules.exclude.find_match(field, &value) {
        match rules.exclude.action {
            ExcludeAction::Remove => {
                tracing::debug!(field, value = %value, pattern = pattern.as_str(), "excluded value removed");
                return TransformResult::Rejected;
            }
            ExcludeAction::Replace => {
                tracing::debug!(field, value = %value, pattern = pattern.as_str(), "excluded value replaced");
                value = rules.exclude.replace_with.clone();
            }
        }
    }

    match rules.field_spec(field) {
        Some(spec) => validate(field, value, spec),
        None => TransformResult::Kept(value),
    }
}

/// strip -> uppercase -> lowercase -> truncate. With both case flags set the
/// lowercase pass runs last and wins.
pub fn apply_format(value: &str, rule: &FormatRule) -> String {
    let mut out = if rule.strip {
        value.trim().to_string()
    } else {
        value.to_string()
    };

    if rule.uppercase {
        out = out.to_uppercase();
    }
    if rule.lowercase {
        out = out.to_lowercase();
    }
    if let Some(max) = rule.max_length {
        out = truncate_chars(&out, max);
    }

    out
}

pub fn filter_chars(value: &str, filter: &CharFilter) -> String {
    filter.apply(value)
}

/// Type/range check. Integers come back in canonical decimal form.
pub fn validate(field: &str, value: String, spec: &FieldSpec) -> TransformResult {
    match spec {
        FieldSpec::Text { max_length } => match *max_length {
            Some(max) if max > 0 && value.chars().count() > max => {
                TransformResult::Kept(truncate_chars(&value, max))
            }
            _ => TransformResult::Kept(value),
        },
        FieldSpec::Integer { min, max } => {
            let Some(canonical) = canonical_integer(&value) else {
                tracing::debug!(field, value = %value, "not an integer; rejected");
                return TransformResult::Rejected;
            };

            // Digit strings always parse; past f64 range they become +/-inf,
            // which still compares correctly against finite bounds.
            let Ok(n) = canonical.parse::<f64>() else {
                return TransformResult::Rejected;
            };
            let below = min.is_some_and(|lo| n < lo);
            let above = max.is_some_and(|hi| n > hi);
            if below || above {
                tracing::debug!(field, value = %canonical, ?min, ?max, "integer out of range; rejected");
                return TransformResult::Rejected;
            }

            TransformResult::Kept(canonical)
        }
        FieldSpec::Passthrough(_) => TransformResult::Kept(value),
    }
}

/// Decimal integer of any size in canonical form: surrounding whitespace and
/// a `+` sign dropped, no leading zeros, `-0` written as `0`.
fn canonical_integer(value: &str) -> Option<String> {
    let s = value.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = digits.trim_start_matches('0');
    Some(match (digits.is_empty(), negative) {
        (true, _) => "0".to_string(),
        (false, true) => format!("-{digits}"),
        (false, false) => digits.to_string(),
    })
}

/// First `max` characters (not bytes).
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
