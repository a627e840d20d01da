//! Process listing by scraping `top` batch output.
//!
//! Portability fallback for systems where /proc is not usable. `top` is run
//! twice: once for the utilization columns and short command, once with `-c`
//! to recover the untruncated command line, correlated by line index.

use crate::types::{ProcError, ProcessRecord};
use std::io::ErrorKind;
use std::process::Command;
use tracing::debug;

// Column positions in `top -b` output: PID USER PR NI VIRT RES SHR S %CPU %MEM TIME+ COMMAND
const COL_CPU: usize = 8;
const COL_MEM: usize = 9;
const COL_COMMAND: usize = 11;

/// Options for the `top` scrape.
#[derive(Debug, Clone)]
pub struct TopOptions {
    /// Virtual terminal width passed via COLUMNS so rows are not wrapped.
    pub columns: u32,
    /// Decimal separator used by `top`'s numeric output. Explicit rather
    /// than read from the ambient locale, so parsing is deterministic.
    pub decimal_separator: char,
}

impl Default for TopOptions {
    fn default() -> Self {
        Self {
            columns: 200,
            decimal_separator: '.',
        }
    }
}

/// List the processes owned by `user` by parsing `top -bn1` output.
/// User filtering is delegated to `top -u`; self-exclusion and column
/// parsing happen here.
pub fn list_processes_top(user: &str, opts: &TopOptions) -> Result<Vec<ProcessRecord>, ProcError> {
    // Validate the username up front so an unknown user surfaces as
    // UnknownUser here too, not as a generic non-zero exit from top.
    crate::process_list::resolve_uid(user)?;
    let short = run_top(user, false, opts.columns)?;
    let long = run_top(user, true, opts.columns)?;
    Ok(parse_top_output(&short, &long, opts.decimal_separator))
}

fn run_top(user: &str, full_cmdline: bool, columns: u32) -> Result<String, ProcError> {
    let mut cmd = Command::new("top");
    // Flags stay combined: the self-exclusion check in parse_top_output
    // matches this exact "top -bn1" spelling in the scraped command line.
    cmd.arg("-bn1");
    cmd.arg(if full_cmdline { "-cu" } else { "-u" }).arg(user);
    cmd.env("COLUMNS", columns.to_string());

    let output = cmd.output().map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            ProcError::DiscoveryUnavailable("top not found on PATH".to_string())
        }
        _ => ProcError::Other(format!("Failed to run top: {}", e)),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProcError::DiscoveryUnavailable(format!(
            "top exited with status {:?}: {}",
            output.status.code(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse the two `top` passes into records. A line is a process row iff its
/// first column parses as a PID; everything else (summary block, header) is
/// skipped. Numeric parse failures drop the field, not the row.
fn parse_top_output(short: &str, long: &str, decimal_separator: char) -> Vec<ProcessRecord> {
    let long_lines: Vec<&str> = long.lines().collect();
    let mut records = Vec::new();

    for (idx, line) in short.lines().enumerate() {
        let cols: Vec<&str> = line.split_whitespace().collect();
        let Some(pid) = cols.first().and_then(|c| c.parse::<i32>().ok()) else {
            continue;
        };
        if cols.len() <= COL_COMMAND {
            debug!(pid, "dropping truncated top row");
            continue;
        }

        let name = cols[COL_COMMAND..].join(" ");
        let cmdline = long_lines
            .get(idx)
            .map(|l| {
                l.split_whitespace()
                    .skip(COL_COMMAND)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        // Never report the snapshot tool's own invocation.
        if name.contains("top -bn") || cmdline.contains("top -bn") {
            continue;
        }

        records.push(ProcessRecord {
            pid,
            cpu_percent: parse_percent(cols[COL_CPU], decimal_separator),
            mem_percent: parse_percent(cols[COL_MEM], decimal_separator),
            name,
            cmdline,
        });
    }

    records
}

fn parse_percent(field: &str, decimal_separator: char) -> Option<f32> {
    let normalized = if decimal_separator == '.' {
        field.to_string()
    } else {
        field.replace(decimal_separator, ".")
    };
    normalized.parse::<f32>().ok().filter(|v| *v >= 0.0)
}
