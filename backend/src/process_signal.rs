//! Signal delivery to a single process.

use crate::types::{ProcError, Signal};
use nix::errno::Errno;
use nix::sys::signal;
use nix::unistd::Pid;
use tracing::{info, warn};

/// Send `sig` to `pid` via kill(2). Exactly one attempt: the pid may have
/// been recycled by an unrelated process, so a blind retry is never safe.
///
/// The target having already exited (ESRCH) is a normal outcome of the
/// race between listing and signaling and is reported as `NotFound`.
pub fn send_signal(pid: i32, sig: Signal) -> Result<(), ProcError> {
    // kill(2) treats non-positive pids as process-group targets; this tool
    // only ever addresses a single process.
    if pid <= 0 {
        return Err(ProcError::Other(format!(
            "refusing to signal non-positive pid {}",
            pid
        )));
    }

    let nix_sig = match sig {
        Signal::Term => signal::Signal::SIGTERM,
        Signal::Kill => signal::Signal::SIGKILL,
        Signal::Hup => signal::Signal::SIGHUP,
    };

    info!(pid, signal = sig.as_str(), "sending signal");
    match signal::kill(Pid::from_raw(pid), nix_sig) {
        Ok(()) => Ok(()),
        Err(Errno::ESRCH) => Err(ProcError::NotFound(pid)),
        Err(Errno::EPERM) => Err(ProcError::PermissionDenied(pid)),
        Err(e) => {
            warn!(pid, signal = sig.as_str(), error = %e, "signal delivery failed");
            Err(ProcError::SignalError(pid, e.to_string()))
        }
    }
}
