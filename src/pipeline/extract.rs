//! Slot extraction from command text.
//!
//! Positional and pattern rules only, no grammar. The connective words
//! to/in/into/at split the subject from the target category; the first
//! occurrence wins, so subjects that themselves contain one of those words
//! mis-split. That behavior is pinned by tests rather than corrected here.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel category used when a command names no target location.
pub const DEFAULT_CATEGORY: &str = "General";

/// Generic placeholder callers say instead of an actual name.
const PLACEHOLDER_SUBJECT: &str = "medication";

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:to|in|into|at)\s+(.+)$").unwrap());

static CONNECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:to|in|into|at)\b").unwrap());

static RECORD_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:id|number|item)\s*(\d+)").unwrap());

/// Slice off everything up to and including the first occurrence of the
/// action keyword. Whole text when the keyword is absent or empty.
/// Keyword search is ASCII case-insensitive; byte offsets are taken from
/// the lower-cased copy, which is exact for ASCII input.
fn after_keyword<'a>(text: &'a str, action_keyword: &str) -> &'a str {
    if action_keyword.is_empty() {
        return text;
    }
    let haystack = text.to_lowercase();
    match haystack.find(&action_keyword.to_lowercase()) {
        Some(pos) => {
            let end = pos + action_keyword.len();
            if text.is_char_boundary(end) {
                &text[end..]
            } else {
                text
            }
        }
        None => text,
    }
}

/// Extract the target category phrase following a connective, if present.
pub fn find_category(text: &str, action_keyword: &str) -> Option<String> {
    let tail = after_keyword(text, action_keyword);
    CATEGORY_RE
        .captures(tail)
        .map(|caps| caps[1].trim().to_string())
}

/// Extract the target category from a command, defaulting to
/// [`DEFAULT_CATEGORY`] when the command names no location.
pub fn extract_category(text: &str, action_keyword: &str) -> String {
    find_category(text, action_keyword).unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Extract the subject name from a command: the leading run of words after
/// the action keyword, up to the first connective or end of string.
///
/// Returns `None` when nothing usable was captured — an empty run, or the
/// generic placeholder word alone.
pub fn extract_subject(text: &str, action_keyword: &str) -> Option<String> {
    let tail = after_keyword(text, action_keyword);
    let head = match CONNECTIVE_RE.find(tail) {
        Some(m) => &tail[..m.start()],
        None => tail,
    };
    let subject = head.trim();
    if subject.is_empty() || subject.eq_ignore_ascii_case(PLACEHOLDER_SUBJECT) {
        return None;
    }
    Some(subject.to_string())
}

/// Extract an explicit numeric identifier ("ID 3", "item 2", "number 12").
pub fn extract_record_id(text: &str) -> Option<usize> {
    RECORD_ID_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Category ─────────────────────────────────────────────

    #[test]
    fn category_after_to() {
        assert_eq!(extract_category("add aspirin to Cabinet A", "add"), "Cabinet A");
    }

    #[test]
    fn category_defaults_to_general() {
        assert_eq!(extract_category("add aspirin", "add"), DEFAULT_CATEGORY);
        assert!(find_category("add aspirin", "add").is_none());
    }

    #[test]
    fn category_accepts_all_connectives() {
        assert_eq!(extract_category("put aspirin in Shelf B", ""), "Shelf B");
        assert_eq!(extract_category("move aspirin into Ward 3", "move"), "Ward 3");
        assert_eq!(extract_category("file aspirin at Front Desk", ""), "Front Desk");
    }

    #[test]
    fn category_takes_everything_after_first_connective() {
        // First match wins; a second connective stays inside the capture.
        assert_eq!(
            extract_category("move aspirin to Shelf in Ward B", "move"),
            "Shelf in Ward B"
        );
    }

    // ── Subject ──────────────────────────────────────────────

    #[test]
    fn subject_before_connective() {
        assert_eq!(
            extract_subject("add aspirin to Cabinet A", "add").as_deref(),
            Some("aspirin")
        );
    }

    #[test]
    fn subject_runs_to_end_without_connective() {
        assert_eq!(
            extract_subject("delete cough syrup", "delete").as_deref(),
            Some("cough syrup")
        );
    }

    #[test]
    fn empty_subject_is_failure() {
        assert!(extract_subject("add to Cabinet A", "add").is_none());
        assert!(extract_subject("add", "add").is_none());
    }

    #[test]
    fn placeholder_subject_is_failure() {
        assert!(extract_subject("add medication to Cabinet A", "add").is_none());
        assert!(extract_subject("add Medication", "add").is_none());
    }

    #[test]
    fn subject_keyword_absent_uses_whole_text() {
        assert_eq!(
            extract_subject("paracetamol to Ward B", "").as_deref(),
            Some("paracetamol")
        );
    }

    // Known limitation: a subject containing a standalone connective word
    // splits at that word. The first connective always wins.
    #[test]
    fn subject_containing_connective_word_mis_splits() {
        assert_eq!(
            extract_subject("add time to heal balm to Cabinet A", "add").as_deref(),
            Some("time")
        );
        assert_eq!(
            extract_category("add time to heal balm to Cabinet A", "add"),
            "heal balm to Cabinet A"
        );
    }

    #[test]
    fn connective_inside_a_word_does_not_split() {
        // "into" only matches as a whole word; "tomato" is left alone.
        assert_eq!(
            extract_subject("add tomato paste", "add").as_deref(),
            Some("tomato paste")
        );
    }

    // ── Record id ────────────────────────────────────────────

    #[test]
    fn record_id_variants() {
        assert_eq!(extract_record_id("delete id 2"), Some(2));
        assert_eq!(extract_record_id("update ITEM 3 to ibuprofen"), Some(3));
        assert_eq!(extract_record_id("remove number 12"), Some(12));
        assert_eq!(extract_record_id("delete id2"), Some(2));
    }

    #[test]
    fn record_id_absent() {
        assert_eq!(extract_record_id("delete aspirin"), None);
        assert_eq!(extract_record_id("item alpha"), None);
    }
}
