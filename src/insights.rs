//! Generative insight requests and the persisted summary slot.
//!
//! The insight text survives data-only refreshes: the store is written only
//! by a successful insight request, never by the refresh cycle.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::analyzers::types::DashboardView;
use crate::fetch::HttpClient;
use crate::filters::FilterState;

/// Requests a free-form summary from the collaborator for the current filter
/// selection.
///
/// `Ok(None)` means the endpoint answered but carried no usable text, which
/// is "no insight available" rather than an error.
#[tracing::instrument(skip(client, filters), fields(base_url = %base_url))]
pub async fn fetch_insight<C: HttpClient>(
    client: &C,
    base_url: &str,
    filters: &FilterState,
) -> Result<Option<String>> {
    let mut url: reqwest::Url = base_url.parse()?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("action", "insights");
        if let Some(turma) = &filters.turma {
            pairs.append_pair("turma", turma);
        }
        if let Some(eixo) = &filters.eixo {
            pairs.append_pair("eixo", eixo);
        }
        if let Some(month) = &filters.month {
            pairs.append_pair("month", month);
        }
        pairs.append_pair("_ts", &Utc::now().timestamp_millis().to_string());
    }

    let req = reqwest::Request::new(reqwest::Method::GET, url);
    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        return Err(anyhow!("insight request failed with status {}", resp.status()));
    }

    let json: Value = resp.json().await?;
    Ok(extract_insight_text(&json))
}

/// Pulls the summary text out of the response, trying `ai.resumo`, then
/// `ai.text`, then top-level `text`. Any other shape is treated as "no
/// insight available".
pub fn extract_insight_text(json: &Value) -> Option<String> {
    ["/ai/resumo", "/ai/text", "/text"]
        .iter()
        .filter_map(|pointer| json.pointer(pointer))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Single-slot persistence for the last displayed insight text.
pub trait InsightStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, text: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// File-backed [`InsightStore`]: one opaque string under one fixed path.
pub struct FileInsightStore {
    path: PathBuf,
}

impl FileInsightStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl InsightStore for FileInsightStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(text))
    }

    fn save(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), "Insight text persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Minimal summary computed locally from the metrics already in hand, shown
/// when the insight endpoint is unavailable.
pub fn local_summary(view: &DashboardView) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Respostas no filtro atual: {} check-in, {} check-out, {} avaliações.",
        view.respondents.checkin, view.respondents.checkout, view.respondents.avaliacao
    ));

    match &view.nps {
        Some(nps) => lines.push(format!(
            "NPS {:.1} ({} promotores, {} detratores em {} respostas).",
            nps.nps, nps.promoters, nps.detractors, nps.total
        )),
        None => lines.push("NPS: sem dados.".to_string()),
    }

    if let Some(avg) = view.averages.self_assessment {
        lines.push(format!("Autoavaliação média: {avg:.2}."));
    }

    lines.join(" ")
}
