//! Entry accumulation over section lines.
//!
//! Multi-line records (education, work, projects) are collected by a small
//! state machine:
//!
//! - `Idle`: outside the target section, lines are ignored.
//! - `InSection`: inside it, waiting for a line that starts an entry.
//! - `InEntry(e)`: accumulating `e`; a new start line emits `e`.
//!
//! A header of the target kind moves to `InSection`, any other header to
//! `Idle`; both emit the open entry.

use crate::model::SectionKind;
use crate::parser::{ScannedLine, Segmentation};

/// Scanner state between lines.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState<E> {
    Idle,
    InSection,
    InEntry(E),
}

/// How one kind of entry is recognised and grown.
pub trait EntryRules {
    type Entry;

    /// Open an entry if `line` starts one.
    fn start(&self, line: &str) -> Option<Self::Entry>;

    /// Fold a non-starting line into the open entry.
    fn absorb(&self, entry: &mut Self::Entry, line: &str);
}

/// Advance the scanner over one line, returning the next state and any
/// entry that was completed.
pub fn transition<R: EntryRules>(
    rules: &R,
    target: SectionKind,
    state: ScanState<R::Entry>,
    line: &ScannedLine<'_>,
) -> (ScanState<R::Entry>, Option<R::Entry>) {
    let emitted = |state: ScanState<R::Entry>| match state {
        ScanState::InEntry(entry) => Some(entry),
        _ => None,
    };

    match line.header {
        Some(kind) if kind == target => (ScanState::InSection, emitted(state)),
        Some(_) => (ScanState::Idle, emitted(state)),
        None => match state {
            ScanState::Idle => (ScanState::Idle, None),
            ScanState::InSection => match rules.start(line.text) {
                Some(entry) => (ScanState::InEntry(entry), None),
                None => (ScanState::InSection, None),
            },
            ScanState::InEntry(mut entry) => match rules.start(line.text) {
                Some(next) => (ScanState::InEntry(next), Some(entry)),
                None => {
                    rules.absorb(&mut entry, line.text);
                    (ScanState::InEntry(entry), None)
                }
            },
        },
    }
}

/// Collect entries from every `target` section.
///
/// With `whole_document_fallback`, a document without such a section is
/// scanned from top to bottom as if it were one big section.
pub fn scan_entries<R: EntryRules>(
    rules: &R,
    target: SectionKind,
    segmentation: &Segmentation<'_>,
    whole_document_fallback: bool,
) -> Vec<R::Entry> {
    let (mut state, ignore_headers) = if segmentation.has(target) {
        (ScanState::Idle, false)
    } else if whole_document_fallback {
        (ScanState::InSection, true)
    } else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for line in segmentation.lines() {
        let line = if ignore_headers && line.header.is_some() {
            ScannedLine {
                header: None,
                ..line.clone()
            }
        } else {
            line.clone()
        };
        let (next, done) = transition(rules, target, state, &line);
        entries.extend(done);
        state = next;
    }
    if let ScanState::InEntry(entry) = state {
        entries.push(entry);
    }
    entries
}
