//! Command normalization and intent classification.
//!
//! Dispatch is an ordered rule table: earlier rules are more specific and
//! short-circuit broader keyword matches. Identifier-qualified commands are
//! unambiguous, so they are checked first.

use std::sync::LazyLock;

use regex::Regex;

/// A received command: the raw transcript, a desugared form with spoken
/// synonyms substituted (slot extraction reads this, case preserved), and
/// the lower-cased normalized form the classifier reads.
#[derive(Debug, Clone)]
pub struct Command {
    raw: String,
    desugared: String,
    normalized: String,
}

impl Command {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let desugared = substitute_synonyms(&raw);
        let normalized = desugared.to_lowercase();
        Self {
            raw,
            desugared,
            normalized,
        }
    }

    /// Original transcript as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Synonym-substituted text with case preserved — what slot extraction
    /// operates on.
    pub fn text(&self) -> &str {
        &self.desugared
    }

    /// Lower-cased, synonym-substituted text — what classification
    /// operates on.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// Sub-action of an identifier-targeted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdAction {
    Delete,
    UpdateOrMove,
}

/// Which textual sub-form an update-or-move command used: "update X to Y"
/// may change name and/or category, "move X to Y" changes only category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Update,
    Relocate,
}

/// Classified purpose of a command. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    IdentifierTargeted { action: IdAction },
    DeleteAll,
    Add,
    Delete,
    UpdateOrMove { kind: MoveKind },
    AiFallback,
}

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:id|number|item)\s*\d+").unwrap());

/// Standalone spoken "2" is the word "to" — unless it follows an identifier
/// keyword, where the digit is the payload.
static DIGIT_SYNONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\b(id|number|item)\s+)?\b2\b").unwrap());

/// Substitute spoken synonyms, preserving case everywhere else.
fn substitute_synonyms(raw: &str) -> String {
    DIGIT_SYNONYM_RE
        .replace_all(raw, |caps: &regex::Captures<'_>| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                "to".to_string()
            }
        })
        .into_owned()
}

/// One dispatch rule. Rules are evaluated top to bottom; the first one that
/// fires decides the intent.
struct Rule {
    name: &'static str,
    matches: fn(&str) -> Option<Intent>,
}

/// Ordered rule table, decreasing specificity:
/// 1. explicit identifier phrase ("ID"/"number"/"item" + digits)
/// 2. "delete all"
/// 3. "add"
/// 4. "delete"
/// 5. "update"/"change"
/// 6. "move"
/// Anything else falls through to the AI service.
const RULES: &[Rule] = &[
    Rule {
        name: "identifier-targeted",
        matches: |text| {
            if !IDENTIFIER_RE.is_match(text) {
                return None;
            }
            let action = if text.contains("delete") || text.contains("remove") {
                IdAction::Delete
            } else {
                IdAction::UpdateOrMove
            };
            Some(Intent::IdentifierTargeted { action })
        },
    },
    Rule {
        name: "delete-all",
        matches: |text| text.contains("delete all").then_some(Intent::DeleteAll),
    },
    Rule {
        name: "add",
        matches: |text| text.contains("add").then_some(Intent::Add),
    },
    Rule {
        name: "delete",
        matches: |text| text.contains("delete").then_some(Intent::Delete),
    },
    Rule {
        name: "update",
        matches: |text| {
            (text.contains("update") || text.contains("change")).then_some(Intent::UpdateOrMove {
                kind: MoveKind::Update,
            })
        },
    },
    Rule {
        name: "move",
        matches: |text| {
            text.contains("move").then_some(Intent::UpdateOrMove {
                kind: MoveKind::Relocate,
            })
        },
    },
];

/// Classify normalized command text.
pub fn classify(text: &str) -> Intent {
    for rule in RULES {
        if let Some(intent) = (rule.matches)(text) {
            tracing::debug!(rule = rule.name, "command classified");
            return intent;
        }
    }
    Intent::AiFallback
}
