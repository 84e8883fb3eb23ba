//! Keyword-rule intent classification.
//!
//! Three rule groups in fixed precedence: open-app, close-app, then the
//! fallback table. Substring containment is the only matching primitive
//! (no tokenization, no stemming), so "word" matches inside unrelated text.
//! That ambiguity is a known property of the rule set, kept as-is.

use voxdesk_core::apps;
use voxdesk_core::{Intent, IntentKind};

struct FallbackRule {
    triggers: &'static [&'static str],
    kind: IntentKind,
}

/// Evaluated in order; first rule with any matching trigger wins.
const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        triggers: &["joke", "funny", "make me laugh"],
        kind: IntentKind::TellJoke,
    },
    FallbackRule {
        triggers: &["time"],
        kind: IntentKind::TellTime,
    },
    FallbackRule {
        triggers: &["date"],
        kind: IntentKind::TellDate,
    },
    FallbackRule {
        triggers: &["battery"],
        kind: IntentKind::BatteryStatus,
    },
    FallbackRule {
        triggers: &["wifi", "wi-fi"],
        kind: IntentKind::WifiName,
    },
    FallbackRule {
        triggers: &["system info", "specs", "specification"],
        kind: IntentKind::SystemSpecs,
    },
    FallbackRule {
        triggers: &["screenshot"],
        kind: IntentKind::TakeScreenshot,
    },
    FallbackRule {
        triggers: &["speed"],
        kind: IntentKind::CheckSpeed,
    },
];

/// Map free text to an intent. Total: no rule match is `Unknown`, never an
/// error.
///
/// A text containing "open" is claimed by the open group even when no app
/// key matches; it classifies as `Unknown` rather than falling through to
/// the close group or the fallback table. Same for "close".
pub fn classify(text: &str) -> Intent {
    let normalized = text.to_lowercase();
    let normalized = normalized.trim();

    let intent = if normalized.contains("open") {
        match apps::match_phrase(normalized) {
            Some(entry) => Intent::with_param(IntentKind::OpenApp, entry.key),
            None => Intent::unknown(),
        }
    } else if normalized.contains("close") {
        match apps::match_phrase(normalized) {
            Some(entry) => Intent::with_param(IntentKind::CloseApp, entry.key),
            None => Intent::unknown(),
        }
    } else {
        FALLBACK_RULES
            .iter()
            .find(|rule| rule.triggers.iter().any(|t| normalized.contains(t)))
            .map(|rule| Intent::new(rule.kind))
            .unwrap_or_else(Intent::unknown)
    };

    tracing::trace!(text = %normalized, kind = ?intent.kind, "classified");
    intent
}
