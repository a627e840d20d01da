//! UI-agnostic process discovery and signaling library for Linux.
//!
//! Provides functions for listing a user's processes, filtering them by
//! command name, and sending TERM/KILL/HUP signals. Discovery prefers a
//! structured /proc walk via `procfs`, with a `top` scrape as a portability
//! fallback; both strategies produce the same record shape.

mod process_list;
mod process_signal;
mod query;
mod top_list;
mod types;

pub use process_list::list_processes;
pub use process_signal::send_signal;
pub use query::{filter_records, signal_menu, SignalOption, RESULT_CAP};
pub use top_list::{list_processes_top, TopOptions};
pub use types::{ProcError, ProcessRecord, Signal};
