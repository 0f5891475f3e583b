//! Text Normalizer: converts raw extracted resume / JD text into a canonical,
//! section-addressable form.
//!
//! `clean` normalises CRLF, then repeats one pass until the text stops
//! changing. A pass runs, in order:
//! 1. collapse runs of 2+ newlines into one
//! 2. delete link-like substrings (`http(s)://`, `www.`, `mailto:`)
//! 3. wrap every recognised header phrase in a `=== PHRASE ===` marker line
//! 4. delete "Hours Completed: N hrs" artifacts
//! 5. re-collapse newline runs opened up by steps 2–4
//! 6. collapse runs of spaces/tabs, then trim
//!
//! Later steps can splice a new link or header phrase together
//! ("EduHours Completed: 2 hrscation"), which the next pass picks up. Every
//! pass either leaves the text alone or shrinks the unmarked part of it, so
//! the loop terminates.
//!
//! Header matching is case-insensitive and NOT anchored to line starts: a
//! phrase mid-sentence ("strong skills in Rust") becomes a marker too.

use regex::{Regex, RegexBuilder};

use crate::text::sections::SectionMap;

/// Recognised section-header phrases, in canonicalisation order.
const HEADER_PHRASES: &[&str] = &[
    "education",
    "skills",
    "project[ \\t]+experience",
    "about[ \\t]+me",
    "certificat(?:e|ion)s?",
    "contact",
];

const LINK_PATTERN: &str = r"(?i)(?:https?://|www\.|mailto:)\S*";
const ARTIFACT_PATTERN: &str = r"Hours Completed:\s*\d+\s*hrs?";
const MARKER_PATTERN: &str = r"=== ([A-Z]+(?: [A-Z]+)*) ===";

struct HeaderPattern {
    /// Unanchored, used while cleaning.
    find: Regex,
    /// Anchored, used to accept a marker's label during extraction.
    exact: Regex,
}

/// Compiled cleaning rules. Built once at startup and shared read-only.
pub struct TextNormalizer {
    blank_lines: Regex,
    links: Regex,
    headers: Vec<HeaderPattern>,
    artifacts: Regex,
    spaces: Regex,
    marker: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self, regex::Error> {
        let headers = HEADER_PHRASES
            .iter()
            .map(|phrase| {
                Ok(HeaderPattern {
                    find: ascii_case_insensitive(phrase)?,
                    exact: ascii_case_insensitive(&format!("^(?:{phrase})$"))?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            blank_lines: Regex::new(r"\n{2,}")?,
            links: Regex::new(LINK_PATTERN)?,
            headers,
            artifacts: Regex::new(ARTIFACT_PATTERN)?,
            spaces: Regex::new(r"[ \t]+")?,
            marker: Regex::new(MARKER_PATTERN)?,
        })
    }

    /// Cleans raw document text. Total over all inputs and idempotent:
    /// `clean(clean(x)) == clean(x)`.
    pub fn clean(&self, raw_text: &str) -> String {
        let mut text = raw_text.replace("\r\n", "\n");
        loop {
            let next = self.clean_pass(&text);
            if next == text {
                return next;
            }
            text = next;
        }
    }

    fn clean_pass(&self, text: &str) -> String {
        let text = self.blank_lines.replace_all(text, "\n");
        let text = self.links.replace_all(&text, "");

        let mut text = text.into_owned();
        for header in &self.headers {
            text = wrap_headers(&header.find, &text);
        }

        // Removing one artifact can splice together another.
        while self.artifacts.is_match(&text) {
            text = self.artifacts.replace_all(&text, "").into_owned();
        }

        let text = self.blank_lines.replace_all(&text, "\n");
        let text = self.spaces.replace_all(&text, " ");
        text.trim().to_string()
    }

    /// Splits cleaned text on canonical markers.
    ///
    /// Keys are lower-cased header phrases; content is the trimmed text up
    /// to the next recognised marker. A repeated header overwrites the earlier
    /// content but keeps its original position. Text before the first marker
    /// is not part of any section.
    pub fn extract_sections(&self, cleaned_text: &str) -> SectionMap {
        let markers: Vec<(usize, usize, String)> = self
            .marker
            .captures_iter(cleaned_text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = caps.get(1)?.as_str();
                self.is_header(label)
                    .then(|| (whole.start(), whole.end(), label.to_lowercase()))
            })
            .collect();

        let mut sections = SectionMap::default();
        for (i, (_, content_start, name)) in markers.iter().enumerate() {
            let content_end = markers
                .get(i + 1)
                .map(|(next_start, _, _)| *next_start)
                .unwrap_or(cleaned_text.len());
            let content = cleaned_text[*content_start..content_end].trim();
            sections.insert(name.clone(), content.to_string());
        }
        sections
    }

    fn is_header(&self, label: &str) -> bool {
        self.headers.iter().any(|h| h.exact.is_match(label))
    }
}

fn ascii_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(false)
        .build()
}

/// Replaces each match with `\n=== MATCH ===\n`, the phrase upper-cased with
/// single spaces between words. A match already sitting inside a marker is
/// only rewritten in place, which keeps `clean` idempotent.
fn wrap_headers(pattern: &Regex, text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;

    for m in pattern.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let phrase = m
            .as_str()
            .split_ascii_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        let in_marker = text[..m.start()].ends_with("=== ") && text[m.end()..].starts_with(" ===");
        if in_marker {
            out.push_str(&phrase);
        } else {
            out.push_str("\n=== ");
            out.push_str(&phrase);
            out.push_str(" ===\n");
        }
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}
