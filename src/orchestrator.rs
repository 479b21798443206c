//! The refresh cycle: fetch, filter, aggregate, and emit a dashboard view.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::analyzers::aggregate::count_categories;
use crate::analyzers::delta::delta;
use crate::analyzers::metrics::{compute_nps, likert_average};
use crate::analyzers::types::{
    Averages, CategoryLegend, DashboardView, QuestionView, RespondentCounts,
};
use crate::fetch::{HttpClient, fetch_bytes, with_cache_buster};
use crate::filters::{FilterState, collect_options};
use crate::parser::parse_payload;
use crate::survey::{INSTRUCTOR_1, INSTRUCTOR_2, QUESTIONS, RECOMMENDATION, SELF_ASSESSMENT};

/// Loads the payload from a local file path or fetches it over HTTP with a
/// cache-busting parameter.
pub async fn fetch_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let url = with_cache_buster(source)?;
        fetch_bytes(client, url.as_str()).await
    } else {
        Ok(std::fs::read(source)?)
    }
}

struct DashState {
    filters: FilterState,
    last_view: Option<DashboardView>,
}

/// Owns the refresh cycle state: source, selectors, and the last good view.
///
/// Refreshes may be triggered from a timer and a manual action at once; a
/// monotonic generation counter makes sure a stale fetch can never overwrite
/// a newer commit. On fetch failure the last view stays in place.
pub struct Orchestrator<C> {
    client: C,
    source: String,
    state: Mutex<DashState>,
    generation: AtomicU64,
}

impl<C: HttpClient> Orchestrator<C> {
    pub fn new(client: C, source: impl Into<String>, filters: FilterState) -> Self {
        Self {
            client,
            source: source.into(),
            state: Mutex::new(DashState {
                filters,
                last_view: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn filters(&self) -> FilterState {
        self.state.lock().await.filters.clone()
    }

    pub async fn set_filters(&self, filters: FilterState) {
        self.state.lock().await.filters = filters;
    }

    /// The most recently committed view, if any refresh has succeeded.
    pub async fn last_view(&self) -> Option<DashboardView> {
        self.state.lock().await.last_view.clone()
    }

    /// Runs one full refresh cycle and commits the resulting view.
    ///
    /// Returns `Ok(None)` when a newer refresh started while this one was
    /// fetching; the stale payload is discarded without touching state.
    #[tracing::instrument(skip(self), fields(source = %self.source))]
    pub async fn refresh(&self) -> Result<Option<DashboardView>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let bytes = fetch_source(&self.client, &self.source).await?;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding stale fetch result");
            return Ok(None);
        }

        let dataset = parse_payload(&bytes)?;

        let mut state = self.state.lock().await;

        // A newer refresh may have committed while this one waited for the
        // lock; its view must not be overwritten by this older payload.
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding stale fetch result");
            return Ok(None);
        }

        // Selector options come from the unfiltered combined dataset; a
        // previously selected value that vanished resets to "all".
        let options = collect_options(&dataset);
        state.filters.reconcile(&options);

        let checkin = state.filters.apply(&dataset.checkin);
        let checkout = state.filters.apply(&dataset.checkout);
        let avaliacao = state.filters.apply(&dataset.avaliacao);

        let questions = QUESTIONS
            .iter()
            .map(|question| {
                let pre = count_categories(&checkin, question);
                let post = count_categories(&checkout, question);
                let d = delta(&pre, &post);
                QuestionView {
                    short: question.short,
                    checkin: pre,
                    checkout: post,
                    delta: d,
                }
            })
            .collect();

        let view = DashboardView {
            generated_at: Utc::now(),
            options,
            filters: state.filters.clone(),
            respondents: RespondentCounts {
                checkin: checkin.len(),
                checkout: checkout.len(),
                avaliacao: avaliacao.len(),
            },
            categories: CategoryLegend::all(),
            questions,
            nps: compute_nps(&avaliacao, &RECOMMENDATION),
            averages: Averages {
                self_assessment: likert_average(&avaliacao, &SELF_ASSESSMENT),
                instructor_1: likert_average(&avaliacao, &INSTRUCTOR_1),
                instructor_2: likert_average(&avaliacao, &INSTRUCTOR_2),
            },
        };

        state.last_view = Some(view.clone());

        info!(
            checkin = view.respondents.checkin,
            checkout = view.respondents.checkout,
            avaliacao = view.respondents.avaliacao,
            nps = view.nps.as_ref().map(|n| n.nps),
            "Dashboard view refreshed"
        );

        Ok(Some(view))
    }
}
