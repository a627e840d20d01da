//! Filtering, result capping, and the signal-choice menu.

use crate::types::{ProcessRecord, Signal};

/// Default cap on returned records, keeping render cost bounded.
pub const RESULT_CAP: usize = 15;

/// One entry of the signal-choice menu, carrying the originating record's
/// identity so a selection can be acted on without further lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalOption {
    pub signal: Signal,
    pub label: &'static str,
    pub pid: i32,
    pub name: String,
}

/// Keep records whose short command name contains `filter` (case-sensitive
/// substring, no fuzzy matching), preserving order, truncated to `cap`.
/// A `None` filter keeps everything up to the cap.
pub fn filter_records(
    records: Vec<ProcessRecord>,
    filter: Option<&str>,
    cap: usize,
) -> Vec<ProcessRecord> {
    records
        .into_iter()
        .filter(|r| filter.map_or(true, |f| r.name.contains(f)))
        .take(cap)
        .collect()
}

/// The alternate-action menu for one record: exactly three options, fixed
/// order, TERM marked as the default.
pub fn signal_menu(pid: i32, name: &str) -> Vec<SignalOption> {
    [
        (Signal::Term, "15 TERM (default)"),
        (Signal::Kill, "9 KILL"),
        (Signal::Hup, "1 HUP"),
    ]
    .into_iter()
    .map(|(signal, label)| SignalOption {
        signal,
        label,
        pid,
        name: name.to_string(),
    })
    .collect()
}
