//! Input validation and sanitization.
//!
//! Mandatory before either analysis path runs. Enforces length bounds,
//! rejects script/executable markup, then normalizes: control characters
//! and invisible Unicode stripped, HTML-significant characters escaped,
//! surrounding whitespace trimmed. Knows nothing about triage semantics.

use std::sync::LazyLock;

use regex::Regex;

use super::TriageError;

/// Minimum symptom description length in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Maximum symptom description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2_000;

/// Patterns associated with script injection or executable markup.
/// Matching any of these rejects the input outright.
static DISALLOWED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)<\s*script").expect("Invalid content-safety pattern"),
        Regex::new(r"(?i)<\s*/?\s*(?:iframe|object|embed|svg|form)").expect("Invalid content-safety pattern"),
        Regex::new(r"(?i)javascript\s*:").expect("Invalid content-safety pattern"),
        Regex::new(r"(?i)\bon(?:error|load|click|mouseover|focus|blur)\s*=").expect("Invalid content-safety pattern"),
        Regex::new(r"(?i)data\s*:\s*text/html").expect("Invalid content-safety pattern"),
        Regex::new(r"(?i)\beval\s*\(").expect("Invalid content-safety pattern"),
        Regex::new(r"(?i)\bdocument\s*\.\s*(?:cookie|write|location)").expect("Invalid content-safety pattern"),
    ]
});

/// Validate and normalize a raw symptom description.
///
/// Length bounds are checked on the trimmed text before content-pattern
/// rejection; escaping happens last so downstream keyword matching sees
/// ordinary words unchanged.
pub fn validate_symptom_text(
    raw: &str,
    min_chars: usize,
    max_chars: usize,
) -> Result<String, TriageError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TriageError::Validation(
            "symptom description is required".to_string(),
        ));
    }

    let char_count = trimmed.chars().count();
    if char_count < min_chars {
        return Err(TriageError::Validation(format!(
            "description too short ({char_count} characters, minimum {min_chars})"
        )));
    }
    if char_count > max_chars {
        return Err(TriageError::Validation(format!(
            "description too long ({char_count} characters, maximum {max_chars})"
        )));
    }

    for pattern in DISALLOWED_PATTERNS.iter() {
        if pattern.is_match(trimmed) {
            tracing::warn!(
                pattern = pattern.as_str(),
                "Symptom description rejected: disallowed content"
            );
            return Err(TriageError::ContentRejected);
        }
    }

    let cleaned = strip_control_characters(&strip_invisible_unicode(trimmed));
    Ok(escape_html(&cleaned))
}

/// Validation with the standard length bounds.
pub fn validate_description(raw: &str) -> Result<String, TriageError> {
    validate_symptom_text(raw, MIN_DESCRIPTION_CHARS, MAX_DESCRIPTION_CHARS)
}

/// Remove zero-width and invisible Unicode characters.
fn strip_invisible_unicode(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{200B}'..='\u{200F}'  // Zero-width chars
                | '\u{202A}'..='\u{202E}' // Directional formatting
                | '\u{2060}'..='\u{2064}' // Invisible operators
                | '\u{2066}'..='\u{2069}' // Directional isolates
                | '\u{FEFF}'              // BOM
                | '\u{00AD}'              // Soft hyphen
                | '\u{034F}'              // Combining grapheme joiner
                | '\u{061C}'              // Arabic letter mark
                | '\u{180E}'              // Mongolian vowel separator
            )
        })
        .collect()
}

/// Remove control characters except newline and tab.
fn strip_control_characters(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Escape HTML-significant characters.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
