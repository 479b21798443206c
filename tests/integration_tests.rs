//! Full-pipeline tests over a realistic survey payload fixture.

use ei_dashboard::analyzers::aggregate::count_categories;
use ei_dashboard::analyzers::delta::delta;
use ei_dashboard::analyzers::metrics::{compute_nps, likert_average};
use ei_dashboard::filters::{FilterState, collect_options};
use ei_dashboard::orchestrator::Orchestrator;
use ei_dashboard::parser::parse_payload;
use ei_dashboard::survey::sentiment::Sentiment;
use ei_dashboard::survey::{Dataset, QUESTIONS, RECOMMENDATION, SELF_ASSESSMENT, SurveyRow};

fn fixture() -> Dataset {
    let bytes = include_bytes!("fixtures/sample_payload.json");
    parse_payload(bytes).expect("Failed to parse fixture payload")
}

#[test]
fn test_fixture_shape() {
    let ds = fixture();
    assert_eq!(ds.checkin.len(), 4);
    assert_eq!(ds.checkout.len(), 3);
    assert_eq!(ds.avaliacao.len(), 6);
}

#[test]
fn test_filter_options_from_combined_dataset() {
    let options = collect_options(&fixture());
    assert_eq!(options.turmas, vec!["Turma A", "Turma B"]);
    assert_eq!(options.eixos, vec!["Inteligência Emocional"]);
    assert_eq!(options.months, vec!["2024-05", "2024-06"]);
}

#[test]
fn test_checkin_aggregation_with_unanswered_rows() {
    let ds = fixture();
    let rows: Vec<&SurveyRow> = ds.checkin.iter().collect();

    // One row answered with no marker, so counts stay below the row total
    // and the denominator still includes it.
    let snap = count_categories(&rows, &QUESTIONS[0]);
    assert_eq!(snap.counts, [1, 0, 1, 1]);
    assert_eq!(snap.total_rows, 4);
    assert_eq!(snap.percentages, [25.0, 0.0, 25.0, 25.0]);
}

#[test]
fn test_drifted_checkout_header_resolves_by_keyword() {
    let ds = fixture();
    let rows: Vec<&SurveyRow> = ds.checkout.iter().collect();

    // The check-out sheet renamed the question with straight quotes and a
    // suffix; keyword fallback still finds it.
    let snap = count_categories(&rows, &QUESTIONS[1]);
    assert_eq!(snap.counts, [0, 1, 1, 1]);
}

#[test]
fn test_delta_between_checkin_and_checkout() {
    let ds = fixture();
    let checkin: Vec<&SurveyRow> = ds.checkin.iter().collect();
    let checkout: Vec<&SurveyRow> = ds.checkout.iter().collect();

    let pre = count_categories(&checkin, &QUESTIONS[0]);
    let post = count_categories(&checkout, &QUESTIONS[0]);
    let d = delta(&pre, &post);

    assert!((d.point(Sentiment::Ruim) - (-25.0)).abs() < 1e-9);
    assert!((d.point(Sentiment::Otimo) - (200.0 / 3.0 - 25.0)).abs() < 1e-9);

    // Antisymmetry under swapped arguments.
    let back = delta(&post, &pre);
    for i in 0..4 {
        assert!((d.points[i] + back.points[i]).abs() < 1e-9);
    }
}

#[test]
fn test_nps_over_evaluation_sheet() {
    let ds = fixture();
    let rows: Vec<&SurveyRow> = ds.avaliacao.iter().collect();

    // Scores 10, 9, 6, 3, 8 parse; "n/a" is skipped.
    let nps = compute_nps(&rows, &RECOMMENDATION).expect("values present");
    assert_eq!(nps.total, 5);
    assert_eq!(nps.promoters, 2);
    assert_eq!(nps.passives, 1);
    assert_eq!(nps.detractors, 2);
    assert_eq!(nps.nps, 0.0);
}

#[test]
fn test_nps_respects_cohort_filter() {
    let ds = fixture();
    let state = FilterState {
        turma: Some("Turma A".to_string()),
        ..Default::default()
    };
    let rows = state.apply(&ds.avaliacao);

    let nps = compute_nps(&rows, &RECOMMENDATION).expect("values present");
    assert_eq!(nps.total, 3);
    assert_eq!(nps.nps, 33.3);
}

#[test]
fn test_likert_average_with_comma_decimal_and_blank_zero() {
    let ds = fixture();
    let rows: Vec<&SurveyRow> = ds.avaliacao.iter().collect();

    // 4 and "3,5" count; "0" is a blank answer.
    let avg = likert_average(&rows, &SELF_ASSESSMENT).expect("values present");
    assert!((avg - 3.75).abs() < 1e-9);
}

#[test]
fn test_filtering_is_idempotent_and_non_mutating() {
    let ds = fixture();
    let state = FilterState {
        month: Some("2024-05".to_string()),
        ..Default::default()
    };

    let first = state.apply(&ds.checkin);
    let second = state.apply(&ds.checkin);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(ds.checkin.len(), 4);
}

use async_trait::async_trait;
use ei_dashboard::fetch::HttpClient;

/// Stub transport; the orchestrator is pointed at the fixture file in these
/// tests, so the client is never actually used.
struct NoopClient;

#[async_trait]
impl HttpClient for NoopClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        reqwest::Client::new().execute(req).await
    }
}

fn fixture_path() -> String {
    format!(
        "{}/tests/fixtures/sample_payload.json",
        env!("CARGO_MANIFEST_DIR")
    )
}

#[tokio::test]
async fn test_orchestrator_full_cycle_over_fixture() {
    let path = fixture_path();
    let orchestrator = Orchestrator::new(NoopClient, path, FilterState::default());

    let view = orchestrator
        .refresh()
        .await
        .expect("refresh")
        .expect("fresh view");

    assert_eq!(view.questions.len(), 4);
    assert_eq!(view.respondents.checkin, 4);
    assert_eq!(view.respondents.checkout, 3);
    assert_eq!(view.respondents.avaliacao, 6);
    assert_eq!(view.nps.as_ref().unwrap().nps, 0.0);
    assert_eq!(view.averages.instructor_1, Some(4.5));
    assert_eq!(view.averages.instructor_2, Some(3.0));
    assert_eq!(view.options.months, vec!["2024-05", "2024-06"]);

    // Percentages per question sum to at most 100 of the row set, and the
    // snapshot always carries all four categories.
    for q in &view.questions {
        assert!(q.checkin.answered() <= q.checkin.total_rows);
        assert_eq!(q.checkin.counts.len(), 4);
    }
}

#[tokio::test]
async fn test_data_refresh_preserves_stored_insight() {
    use ei_dashboard::insights::{FileInsightStore, InsightStore};
    use ei_dashboard::output::{append_record, metrics_record, write_view};

    let store_path = std::env::temp_dir().join("ei_dashboard_refresh_insight.txt");
    let store = FileInsightStore::new(&store_path);
    store.save("Resumo gerado pela IA.").unwrap();

    // A full data-only refresh, including the view and history writes.
    let orchestrator = Orchestrator::new(NoopClient, fixture_path(), FilterState::default());
    let view = orchestrator
        .refresh()
        .await
        .expect("refresh")
        .expect("fresh view");

    let view_path = std::env::temp_dir().join("ei_dashboard_refresh_view.json");
    write_view(view_path.to_str().unwrap(), &view).unwrap();

    let history_path = std::env::temp_dir().join("ei_dashboard_refresh_history.csv");
    let _ = std::fs::remove_file(&history_path);
    append_record(history_path.to_str().unwrap(), &metrics_record(&view)).unwrap();

    // The stored insight text survives the whole cycle untouched.
    assert_eq!(
        store.load().unwrap().as_deref(),
        Some("Resumo gerado pela IA.")
    );

    store.clear().unwrap();
    let _ = std::fs::remove_file(&view_path);
    let _ = std::fs::remove_file(&history_path);
}
