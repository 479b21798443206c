//! Data types emitted by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filters::{FilterOptions, FilterState};
use crate::survey::sentiment::Sentiment;

/// Categorical distribution of one question over one row set.
///
/// Always carries exactly four entries in worst→best category order, even at
/// zero count. Percentages use the row-set size as denominator, so rows
/// without an extractable sentiment dilute every category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub counts: [usize; 4],
    pub percentages: [f64; 4],
    pub total_rows: usize,
}

impl Snapshot {
    pub fn count(&self, category: Sentiment) -> usize {
        self.counts[category.index()]
    }

    pub fn percentage(&self, category: Sentiment) -> f64 {
        self.percentages[category.index()]
    }

    /// Rows that yielded an extractable sentiment.
    pub fn answered(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Percentage-point change per category between a pre and a post snapshot.
/// Positive means the category grew after the intervention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaRow {
    pub points: [f64; 4],
}

impl DeltaRow {
    pub fn point(&self, category: Sentiment) -> f64 {
        self.points[category.index()]
    }
}

/// Net Promoter Score over the 0–10 recommendation column.
///
/// Only produced when at least one value parsed; "no data" is expressed as
/// `Option::<NpsResult>::None`, never as a zero score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpsResult {
    pub total: usize,
    pub detractors: usize,
    pub passives: usize,
    pub promoters: usize,
    pub pct_detractors: f64,
    pub pct_promoters: f64,
    /// %promoters − %detractors, rounded to one decimal place.
    pub nps: f64,
}

/// Likert averages from the evaluation sheet; `None` means no usable values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Averages {
    pub self_assessment: Option<f64>,
    pub instructor_1: Option<f64>,
    pub instructor_2: Option<f64>,
}

/// Legend entry for the chart payload.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLegend {
    pub label: &'static str,
    pub marker: &'static str,
    pub color: &'static str,
}

impl CategoryLegend {
    pub fn all() -> Vec<CategoryLegend> {
        Sentiment::ORDER
            .into_iter()
            .map(|s| CategoryLegend {
                label: s.label(),
                marker: s.marker(),
                color: s.color(),
            })
            .collect()
    }
}

/// Check-in and check-out distributions plus their delta for one question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub short: &'static str,
    pub checkin: Snapshot,
    pub checkout: Snapshot,
    pub delta: DeltaRow,
}

/// Filtered row counts per collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RespondentCounts {
    pub checkin: usize,
    pub checkout: usize,
    pub avaliacao: usize,
}

/// Everything the presentation layer needs for one render, as plain data.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub options: FilterOptions,
    pub filters: FilterState,
    pub respondents: RespondentCounts,
    pub categories: Vec<CategoryLegend>,
    pub questions: Vec<QuestionView>,
    pub nps: Option<NpsResult>,
    pub averages: Averages,
}

/// One row of the CSV metrics history appended after each refresh.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsRecord {
    pub timestamp: DateTime<Utc>,
    pub turma: Option<String>,
    pub eixo: Option<String>,
    pub month: Option<String>,
    pub checkin_rows: usize,
    pub checkout_rows: usize,
    pub avaliacao_rows: usize,
    pub nps: Option<f64>,
    pub pct_promoters: Option<f64>,
    pub pct_detractors: Option<f64>,
    pub avg_self_assessment: Option<f64>,
    pub avg_instructor_1: Option<f64>,
    pub avg_instructor_2: Option<f64>,
}
