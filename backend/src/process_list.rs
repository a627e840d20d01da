//! Process listing via the /proc pseudo-filesystem.

use crate::types::{ProcError, ProcessRecord};
use nix::unistd::User;
use procfs::Current;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use tracing::debug;

/// Upper bound on detail-lookup workers, even on very wide machines.
const MAX_WORKERS: usize = 16;

/// List the processes owned by `user`, in /proc enumeration order.
///
/// Per-PID detail lookups are independent and run on a bounded worker pool;
/// a lookup that races against process exit is skipped without affecting the
/// rest of the batch. The lister's own process is excluded from the result.
pub fn list_processes(user: &str) -> Result<Vec<ProcessRecord>, ProcError> {
    let uid = resolve_uid(user)?;

    let all_procs = procfs::process::all_processes()
        .map_err(|e| ProcError::DiscoveryUnavailable(format!("Failed to read /proc: {}", e)))?;

    let own_pid = std::process::id() as i32;
    let pids: Vec<i32> = all_procs
        .filter_map(|p| p.ok())
        .map(|p| p.pid())
        .filter(|&pid| pid != own_pid)
        .collect();

    // Total memory for the mem% reading; best effort, readings stay None
    // if /proc/meminfo cannot be read.
    let mem_total = procfs::Meminfo::current().ok().map(|m| m.mem_total);

    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(MAX_WORKERS)
        .min(pids.len().max(1));

    let next = AtomicUsize::new(0);
    let collected: Mutex<Vec<(usize, ProcessRecord)>> = Mutex::new(Vec::with_capacity(pids.len()));

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                let Some(&pid) = pids.get(idx) else { break };
                match inspect_pid(pid, uid, mem_total) {
                    Some(record) => collected.lock().unwrap().push((idx, record)),
                    None => debug!(pid, "skipping PID (exited, foreign user, or unreadable)"),
                }
            });
        }
    });

    let mut rows = collected.into_inner().unwrap();
    rows.sort_by_key(|(idx, _)| *idx);
    Ok(rows.into_iter().map(|(_, record)| record).collect())
}

/// Resolve a username to its uid via the passwd database.
pub(crate) fn resolve_uid(user: &str) -> Result<u32, ProcError> {
    match User::from_name(user) {
        Ok(Some(entry)) => Ok(entry.uid.as_raw()),
        Ok(None) => Err(ProcError::UnknownUser(user.to_string())),
        Err(e) => Err(ProcError::Other(format!(
            "Failed to look up user {:?}: {}",
            user, e
        ))),
    }
}

/// Collect details for a single PID. Returns None when the process is owned
/// by another user or vanished between enumeration and lookup.
fn inspect_pid(pid: i32, uid: u32, mem_total: Option<u64>) -> Option<ProcessRecord> {
    let proc = procfs::process::Process::new(pid).ok()?;
    if proc.uid().ok()? != uid {
        return None;
    }
    let stat = proc.stat().ok()?;

    // cmdline may legitimately be unreadable or empty (kernel threads,
    // permission denied); keep the record with an empty command line.
    let cmdline = proc
        .cmdline()
        .map(|parts| parts.join(" "))
        .unwrap_or_default();

    let mem_percent = match (proc.statm().ok(), mem_total) {
        (Some(statm), Some(total)) if total > 0 => {
            Some((statm.resident * 4096) as f32 / total as f32 * 100.0)
        }
        _ => None,
    };

    Some(ProcessRecord {
        pid,
        // A single /proc snapshot carries no rate information.
        cpu_percent: None,
        mem_percent,
        name: stat.comm.clone(),
        cmdline,
    })
}
