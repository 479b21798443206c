//! Per-question categorical counting over a filtered row set.

use crate::analyzers::types::Snapshot;
use crate::survey::resolve::resolve;
use crate::survey::sentiment::detect;
use crate::survey::{ColumnSpec, QUESTIONS, SurveyRow};

/// Percentage of `part` in `total`, 0.0 when `total` is 0.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Counts sentiment categories for one question over a row set.
///
/// Rows yielding no resolvable response or no marker glyph are silently
/// excluded from the counts but stay in the percentage denominator, which is
/// the row-set size.
pub fn count_categories(rows: &[&SurveyRow], question: &ColumnSpec) -> Snapshot {
    let mut counts = [0usize; 4];
    for row in rows {
        if let Some(category) = detect(resolve(row, question)) {
            counts[category.index()] += 1;
        }
    }

    let total_rows = rows.len();
    let percentages = counts.map(|c| pct(c, total_rows));
    Snapshot {
        counts,
        percentages,
        total_rows,
    }
}

/// One [`Snapshot`] per canonical question, in dashboard order.
pub fn aggregate_questions(rows: &[&SurveyRow]) -> Vec<Snapshot> {
    QUESTIONS.iter().map(|q| count_categories(rows, q)).collect()
}
