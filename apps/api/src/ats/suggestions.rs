use crate::ats::checklist::{BRACE_PATTERN, PIPE_PATTERN, TABLE_PATTERN};

pub const ATS_FRIENDLY_MESSAGE: &str =
    "No major formatting issues detected. Resume is ATS-friendly!";

const BULLET_SUGGESTION: &str = "Replace fancy bullet symbols (•, –, etc) with plain '-' or '*' for maximum ATS compatibility.";
const TABLE_SUGGESTION: &str = "Avoid tables and layout images; use simple text and bullet points.";
const BRACE_SUGGESTION: &str = "Remove curly braces and table markup from the resume text.";

/// Turns missing sections and issue codes into ordered remediation strings.
///
/// The combined missing-sections suggestion (if any) comes first, then one
/// suggestion per issue in issue order. Never empty: with nothing to fix it
/// returns the single ATS-friendly confirmation.
pub fn format_suggestions(sections_missing: &[String], format_issues: &[String]) -> Vec<String> {
    let mut suggestions = Vec::with_capacity(format_issues.len() + 1);

    if !sections_missing.is_empty() {
        suggestions.push(format!(
            "Add missing sections: {}",
            sections_missing.join(", ")
        ));
    }

    suggestions.extend(format_issues.iter().map(|issue| suggestion_for(issue)));

    if suggestions.is_empty() {
        suggestions.push(ATS_FRIENDLY_MESSAGE.to_string());
    }
    suggestions
}

fn suggestion_for(issue: &str) -> String {
    if issue.starts_with("Bullet symbol") {
        BULLET_SUGGESTION.to_string()
    } else if issue == PIPE_PATTERN || issue.contains("||") || issue.contains(TABLE_PATTERN) {
        TABLE_SUGGESTION.to_string()
    } else if issue.contains(BRACE_PATTERN) {
        BRACE_SUGGESTION.to_string()
    } else {
        format!("Check formatting: {issue}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nothing_to_fix_gives_single_confirmation() {
        let suggestions = format_suggestions(&[], &[]);
        assert_eq!(suggestions, vec![ATS_FRIENDLY_MESSAGE.to_string()]);
    }

    #[test]
    fn test_single_missing_section() {
        let suggestions = format_suggestions(&strings(&["skills"]), &[]);
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].contains("skills"));
    }

    #[test]
    fn test_missing_sections_are_combined() {
        let suggestions = format_suggestions(&strings(&["contact", "about"]), &[]);
        assert_eq!(suggestions, vec!["Add missing sections: contact, about"]);
    }

    #[test]
    fn test_issue_specific_suggestions_in_order() {
        let issues = strings(&[PIPE_PATTERN, TABLE_PATTERN, BRACE_PATTERN, "Bullet symbol: '•'"]);
        let suggestions = format_suggestions(&strings(&["contact"]), &issues);
        assert_eq!(suggestions.len(), 5);
        assert!(suggestions[0].starts_with("Add missing sections"));
        assert_eq!(suggestions[1], TABLE_SUGGESTION);
        assert_eq!(suggestions[2], TABLE_SUGGESTION);
        assert_eq!(suggestions[3], BRACE_SUGGESTION);
        assert_eq!(suggestions[4], BULLET_SUGGESTION);
    }

    #[test]
    fn test_unknown_issue_gets_generic_fallback() {
        let suggestions = format_suggestions(&[], &strings(&["tiny font"]));
        assert_eq!(suggestions, vec!["Check formatting: tiny font"]);
    }

    #[test]
    fn test_repeated_bullet_issues_each_get_a_suggestion() {
        let issues = strings(&["Bullet symbol: '•'", "Bullet symbol: '–'"]);
        assert_eq!(format_suggestions(&[], &issues).len(), 2);
    }
}
