//! Row filtering by cohort, topic axis, and calendar month.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::survey::{Dataset, SurveyRow};

/// Current selector state. `None` is the "all" sentinel: no constraint on
/// that field. A missing or empty row field never matches a specific value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    pub turma: Option<String>,
    pub eixo: Option<String>,
    /// ISO year-month bucket, e.g. `"2024-05"`.
    pub month: Option<String>,
}

impl FilterState {
    /// True when the row satisfies all three selectors.
    pub fn matches(&self, row: &SurveyRow) -> bool {
        if let Some(turma) = &self.turma
            && row.turma() != Some(turma.as_str())
        {
            return false;
        }
        if let Some(eixo) = &self.eixo
            && row.eixo() != Some(eixo.as_str())
        {
            return false;
        }
        if let Some(month) = &self.month {
            match row.timestamp().and_then(month_bucket) {
                Some(bucket) if &bucket == month => {}
                _ => return false,
            }
        }
        true
    }

    /// Pure subset of `rows` satisfying the current selectors.
    pub fn apply<'a>(&self, rows: &'a [SurveyRow]) -> Vec<&'a SurveyRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    /// Drops any selection whose value disappeared from the freshly fetched
    /// option lists, resetting that selector to "all".
    pub fn reconcile(&mut self, options: &FilterOptions) {
        if let Some(t) = &self.turma
            && !options.turmas.contains(t)
        {
            self.turma = None;
        }
        if let Some(e) = &self.eixo
            && !options.eixos.contains(e)
        {
            self.eixo = None;
        }
        if let Some(m) = &self.month
            && !options.months.contains(m)
        {
            self.month = None;
        }
    }
}

/// Distinct selector values, derived from the full unfiltered dataset on
/// every refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub turmas: Vec<String>,
    pub eixos: Vec<String>,
    pub months: Vec<String>,
}

/// Collects sorted distinct cohorts, axes, and month buckets across all
/// three collections.
pub fn collect_options(dataset: &Dataset) -> FilterOptions {
    let mut turmas = Vec::new();
    let mut eixos = Vec::new();
    let mut months = Vec::new();

    for row in dataset.combined() {
        if let Some(t) = row.turma() {
            push_distinct(&mut turmas, t.to_string());
        }
        if let Some(e) = row.eixo() {
            push_distinct(&mut eixos, e.to_string());
        }
        if let Some(m) = row.timestamp().and_then(month_bucket) {
            push_distinct(&mut months, m);
        }
    }

    turmas.sort();
    eixos.sort();
    months.sort();
    FilterOptions {
        turmas,
        eixos,
        months,
    }
}

fn push_distinct(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Truncates a raw timestamp to its ISO year-month, tolerating ISO and the
/// pt-BR Google Forms format. Unparseable timestamps bucket to `None` and
/// therefore never match a specific month selection.
pub fn month_bucket(timestamp: &str) -> Option<String> {
    let text = timestamp.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.format("%Y-%m").to_string());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.format("%Y-%m").to_string());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d.format("%Y-%m").to_string());
        }
    }
    None
}
