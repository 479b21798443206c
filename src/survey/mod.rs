//! Survey domain types and the static column configuration.
//!
//! The upstream spreadsheet is keyed by free-text headers that drift between
//! deployments, so every column of interest is described by a [`ColumnSpec`]
//! holding the canonical header text plus fallback keyword tokens. Resolution
//! order lives in [`resolve`].

pub mod resolve;
pub mod sentiment;

use std::collections::BTreeMap;

/// One survey response: header text mapped to the raw answer value.
///
/// Values are kept as strings; numeric columns are parsed on demand by the
/// metrics calculator. Rows are immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyRow {
    values: BTreeMap<String, String>,
}

impl SurveyRow {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Exact-key lookup. Empty values are returned as-is; callers treat
    /// empty strings as "no response".
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Cohort identifier ("Turma" column), if present and non-empty.
    pub fn turma(&self) -> Option<&str> {
        self.non_empty(COL_TURMA)
    }

    /// Topic axis ("Eixo" column), if present and non-empty.
    pub fn eixo(&self) -> Option<&str> {
        self.non_empty(COL_EIXO)
    }

    /// Raw timestamp, from either the English or the Google Forms pt-BR
    /// header variant.
    pub fn timestamp(&self) -> Option<&str> {
        COL_TIMESTAMPS.iter().find_map(|key| self.non_empty(key))
    }
}

impl FromIterator<(String, String)> for SurveyRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The three row collections delivered by the data source in one payload.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub checkin: Vec<SurveyRow>,
    pub checkout: Vec<SurveyRow>,
    pub avaliacao: Vec<SurveyRow>,
}

impl Dataset {
    /// All rows across the three collections, in payload order.
    pub fn combined(&self) -> impl Iterator<Item = &SurveyRow> {
        self.checkin
            .iter()
            .chain(self.checkout.iter())
            .chain(self.avaliacao.iter())
    }
}

pub const COL_TURMA: &str = "Turma";
pub const COL_EIXO: &str = "Eixo";
pub const COL_TIMESTAMPS: &[&str] = &["Timestamp", "Carimbo de data/hora"];

/// Describes one column of interest: short display label, the canonical
/// header text for exact lookup, and keyword tokens for the fuzzy fallback.
///
/// Keyword sets across specs are disjoint, so first-match resolution is
/// deterministic enough.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub short: &'static str,
    pub full_text: &'static str,
    pub keywords: &'static [&'static str],
}

/// The four canonical check-in/check-out questions, in dashboard order.
pub static QUESTIONS: [ColumnSpec; 4] = [
    ColumnSpec {
        short: "Autocontrole",
        full_text: "Hoje você consegue reconhecer situações que te desestabilizam e exigem maior autocontrole?",
        keywords: &["autocontrole", "desestabilizam"],
    },
    ColumnSpec {
        short: "Nomear emoções",
        full_text: "Hoje é “de boa” nomear, com clareza, as emoções que você está sentindo?",
        keywords: &["nomear", "de boa"],
    },
    ColumnSpec {
        short: "Autoconfiança",
        full_text: "Você consegue reconhecer características de um comportamento autoconfiante?",
        keywords: &["autoconfiante", "autoconfiança"],
    },
    ColumnSpec {
        short: "Relacionamento",
        full_text: "Hoje, como é o seu relacionamento com as pessoas e sua capacidade de trabalhar em equipe?",
        keywords: &["relacionamento", "equipe"],
    },
];

/// 0–10 recommendation score, the NPS input column.
pub static RECOMMENDATION: ColumnSpec = ColumnSpec {
    short: "Recomendação",
    full_text: "Em uma escala de 0 a 10 o quanto você recomendaria o eixo de Inteligência Emocional a um colega?",
    keywords: &["recomendaria"],
};

/// 1–5 self-assessment score.
pub static SELF_ASSESSMENT: ColumnSpec = ColumnSpec {
    short: "Autoavaliação",
    full_text: "Em uma escala de 1 a 5, como você se autoavalia em relação ao seu desempenho nas aulas deste módulo?",
    keywords: &["autoavalia"],
};

/// 1–5 rating for the first instructor.
pub static INSTRUCTOR_1: ColumnSpec = ColumnSpec {
    short: "Professor 1",
    full_text: "Em uma escala de 1 a 5, como você avalia o professor 1 na condução das aulas deste módulo?",
    keywords: &["professor 1"],
};

/// 1–5 rating for the second instructor.
pub static INSTRUCTOR_2: ColumnSpec = ColumnSpec {
    short: "Professor 2",
    full_text: "Em uma escala de 1 a 5, como você avalia o professor 2 na condução das aulas deste módulo?",
    keywords: &["professor 2"],
};
