use serde::Serialize;

use crate::text::normalizer::TextNormalizer;
use crate::text::sections::SectionMap;

/// A resume or job description: the text as extracted plus its cleaned form.
/// Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    raw: String,
    cleaned: String,
}

impl Document {
    pub fn new(raw: impl Into<String>, normalizer: &TextNormalizer) -> Self {
        let raw = raw.into();
        let cleaned = normalizer.clean(&raw);
        Self { raw, cleaned }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    pub fn sections(&self, normalizer: &TextNormalizer) -> SectionMap {
        normalizer.extract_sections(&self.cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_keeps_raw_and_cleaned() {
        let normalizer = TextNormalizer::new().unwrap();
        let doc = Document::new("Skills\n\n\nRust,   Go", &normalizer);
        assert_eq!(doc.raw(), "Skills\n\n\nRust,   Go");
        assert_eq!(doc.cleaned(), "=== SKILLS ===\nRust, Go");
        assert_eq!(doc.sections(&normalizer).get("skills"), Some("Rust, Go"));
    }
}
