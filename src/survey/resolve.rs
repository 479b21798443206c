//! Column resolution against drifting header text.
//!
//! Resolution order is fixed: exact canonical-key lookup, then a normalized
//! keyword-token scan over every header in the row, else `None`. Ties go to
//! the first header in row iteration order; keyword sets are disjoint across
//! the configured columns.

use crate::survey::{ColumnSpec, SurveyRow};

/// Folds header text for fuzzy comparison: lowercase, every run of
/// non-alphanumeric characters (punctuation, quote glyphs of any flavor)
/// collapsed to a single space.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

/// Returns the row's response value for the given column, or `None` when no
/// header matches.
pub fn resolve<'a>(row: &'a SurveyRow, spec: &ColumnSpec) -> Option<&'a str> {
    if let Some(value) = row.get(spec.full_text) {
        return Some(value);
    }

    let tokens: Vec<String> = spec.keywords.iter().map(|kw| normalize(kw)).collect();
    for (key, value) in row.iter() {
        let normalized = normalize(key);
        if tokens.iter().any(|t| normalized.contains(t.as_str())) {
            return Some(value);
        }
    }

    None
}
