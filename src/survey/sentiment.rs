//! The four-point emoji sentiment scale used by the questionnaire.

use serde::Serialize;

/// Sentiment categories in fixed worst→best order. The order drives chart
/// stacking, the 1..4 numeric score, and the detection tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Ruim,
    Regular,
    Bom,
    Otimo,
}

impl Sentiment {
    pub const ORDER: [Sentiment; 4] = [
        Sentiment::Ruim,
        Sentiment::Regular,
        Sentiment::Bom,
        Sentiment::Otimo,
    ];

    /// Marker glyph embedded in free-text responses.
    pub fn marker(self) -> &'static str {
        match self {
            Sentiment::Ruim => "😞",
            Sentiment::Regular => "😬",
            Sentiment::Bom => "🙂",
            Sentiment::Otimo => "😀",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Ruim => "Ruim",
            Sentiment::Regular => "Regular",
            Sentiment::Bom => "Bom",
            Sentiment::Otimo => "Ótimo",
        }
    }

    /// Chart color, worst (red) to best (teal).
    pub fn color(self) -> &'static str {
        match self {
            Sentiment::Ruim => "rgba(220,53,69,0.9)",
            Sentiment::Regular => "rgba(255,159,64,0.9)",
            Sentiment::Bom => "rgba(255,205,86,0.9)",
            Sentiment::Otimo => "rgba(75,192,192,0.9)",
        }
    }

    /// Numeric score 1 (Ruim) through 4 (Ótimo).
    pub fn score(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            Sentiment::Ruim => 0,
            Sentiment::Regular => 1,
            Sentiment::Bom => 2,
            Sentiment::Otimo => 3,
        }
    }

    /// Whether a growing share of this category reads as improvement.
    ///
    /// Ruim rising is a decline, Bom/Ótimo rising is an improvement. Regular
    /// is grouped with Ruim: it sits below the satisfactory pair, so a rise
    /// in Regular also reads as a decline.
    pub fn improves_when_rising(self) -> bool {
        matches!(self, Sentiment::Bom | Sentiment::Otimo)
    }
}

/// Extracts the sentiment category from a free-text response.
///
/// Scans for marker glyphs in fixed worst→best order; the first marker found
/// wins when a response somehow carries more than one. Empty or missing
/// responses yield `None`.
pub fn detect(response: Option<&str>) -> Option<Sentiment> {
    let text = response?.trim();
    if text.is_empty() {
        return None;
    }
    Sentiment::ORDER
        .into_iter()
        .find(|s| text.contains(s.marker()))
}
