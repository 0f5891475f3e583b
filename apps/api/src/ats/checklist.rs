//! Fixed ATS reference data, built once at startup and held by `AtsScorer`.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Section tokens checked by substring containment, in report order.
pub const SECTION_CHECKLIST: [&str; 7] = [
    "contact",
    "education",
    "skills",
    "experience",
    "project",
    "certificat",
    "about",
];

/// Issue code for double-pipe table markup.
pub const PIPE_PATTERN: &str = r"\|\|";
/// Issue code for an HTML table tag.
pub const TABLE_PATTERN: &str = "<table";
/// Issue code for curly braces (either `{` or `}`).
pub const BRACE_PATTERN: &str = "{|}";

/// Bullet glyphs that some parsers drop or glue onto adjacent keywords.
pub const BULLET_SYMBOLS: [char; 7] = ['•', '◦', '●', '○', '▪', '–', '—'];

/// Blend weights for the composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeWeights {
    pub keyword: f64,
    pub sections: f64,
    /// Subtracted once per formatting issue, uncapped before clamping.
    pub issue_penalty: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            keyword: 0.6,
            sections: 0.3,
            issue_penalty: 0.1,
        }
    }
}

/// A table-like markup pattern and the issue code it reports.
#[derive(Debug, Clone)]
pub struct FormattingRisk {
    pub code: &'static str,
    pub pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct AtsChecklist {
    pub sections: Vec<&'static str>,
    pub risks: Vec<FormattingRisk>,
    pub bullet_symbols: Vec<char>,
    pub weights: CompositeWeights,
}

impl AtsChecklist {
    pub fn standard() -> Result<Self, regex::Error> {
        let risks = vec![
            FormattingRisk {
                code: PIPE_PATTERN,
                pattern: Regex::new(PIPE_PATTERN)?,
            },
            FormattingRisk {
                code: TABLE_PATTERN,
                pattern: Regex::new(TABLE_PATTERN)?,
            },
            FormattingRisk {
                code: BRACE_PATTERN,
                pattern: Regex::new(r"[{}]")?,
            },
        ];

        Ok(Self {
            sections: SECTION_CHECKLIST.to_vec(),
            risks,
            bullet_symbols: BULLET_SYMBOLS.to_vec(),
            weights: CompositeWeights::default(),
        })
    }
}
