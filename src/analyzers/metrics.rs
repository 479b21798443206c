//! Scalar metrics over the evaluation sheet: NPS and Likert averages.

use crate::analyzers::aggregate::pct;
use crate::analyzers::types::NpsResult;
use crate::survey::resolve::resolve;
use crate::survey::{ColumnSpec, SurveyRow};

/// Parses a response as a number, accepting the comma decimal separator
/// ("7,5"). Unparseable or empty values yield `None` and are excluded from
/// every aggregate, never treated as zero.
pub fn parse_score(value: &str) -> Option<f64> {
    let text = value.trim();
    if text.is_empty() {
        return None;
    }
    text.replace(',', ".").parse::<f64>().ok()
}

fn numeric_values(rows: &[&SurveyRow], column: &ColumnSpec) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| resolve(row, column))
        .filter_map(parse_score)
        .collect()
}

/// Net Promoter Score over a 0–10 column: detractors 0–6, passives 7–8,
/// promoters 9–10; NPS = %promoters − %detractors, rounded to one decimal.
///
/// Returns `None` when no value parses, so "no data" stays distinguishable
/// from an actual score of zero.
pub fn compute_nps(rows: &[&SurveyRow], column: &ColumnSpec) -> Option<NpsResult> {
    let values = numeric_values(rows, column);
    if values.is_empty() {
        return None;
    }

    let mut detractors = 0usize;
    let mut passives = 0usize;
    let mut promoters = 0usize;
    for v in &values {
        if *v <= 6.0 {
            detractors += 1;
        } else if *v <= 8.0 {
            passives += 1;
        } else {
            promoters += 1;
        }
    }

    let total = values.len();
    let pct_detractors = pct(detractors, total);
    let pct_promoters = pct(promoters, total);
    let nps = ((pct_promoters - pct_detractors) * 10.0).round() / 10.0;

    Some(NpsResult {
        total,
        detractors,
        passives,
        promoters,
        pct_detractors,
        pct_promoters,
        nps,
    })
}

/// Arithmetic mean of a bounded Likert column, excluding unparseable values
/// and non-positive scores (0 signals a blank answer on 1–5 scales).
/// `None` when nothing usable remains.
pub fn likert_average(rows: &[&SurveyRow], column: &ColumnSpec) -> Option<f64> {
    let values: Vec<f64> = numeric_values(rows, column)
        .into_iter()
        .filter(|v| *v > 0.0)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
