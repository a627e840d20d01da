//! Data types and error definitions for process discovery and signaling.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A snapshot of one running process, rebuilt on every listing.
///
/// Utilization readings are optional: `None` means the discovery source did
/// not report the value, which is not the same as a genuine `Some(0.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub pid: i32,
    pub cpu_percent: Option<f32>,
    pub mem_percent: Option<f32>,
    /// Short command name, e.g. `firefox`.
    pub name: String,
    /// Full invocation including arguments; empty when the source could not
    /// recover it (permission denied, or the process exited mid-lookup).
    pub cmdline: String,
}

/// The three signals offered to the user. TERM is the default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    Term,
    Kill,
    Hup,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Term => "TERM",
            Signal::Kill => "KILL",
            Signal::Hup => "HUP",
        }
    }

    pub fn number(&self) -> i32 {
        match self {
            Signal::Term => 15,
            Signal::Kill => 9,
            Signal::Hup => 1,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = ProcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let name = upper.strip_prefix("SIG").unwrap_or(&upper);
        match name {
            "TERM" | "15" => Ok(Signal::Term),
            "KILL" | "9" => Ok(Signal::Kill),
            "HUP" | "1" => Ok(Signal::Hup),
            _ => Err(ProcError::InvalidSignal(s.to_string())),
        }
    }
}

/// Errors that can occur during process discovery and signaling.
#[derive(Error, Debug)]
pub enum ProcError {
    #[error("Process discovery unavailable: {0}")]
    DiscoveryUnavailable(String),
    #[error("Unknown user {0:?}")]
    UnknownUser(String),
    #[error("Permission denied for PID {0}")]
    PermissionDenied(i32),
    #[error("Process {0} not found")]
    NotFound(i32),
    #[error("Failed to send signal to PID {0}: {1}")]
    SignalError(i32, String),
    #[error("Invalid signal {0:?}, expected TERM, KILL or HUP")]
    InvalidSignal(String),
    #[error("Other error: {0}")]
    Other(String),
}

impl ProcError {
    /// Underlying OS error code, when one was reported. The CLI propagates
    /// this as its exit status.
    pub fn code(&self) -> Option<i32> {
        match self {
            ProcError::PermissionDenied(_) => Some(nix::errno::Errno::EPERM as i32),
            ProcError::NotFound(_) => Some(nix::errno::Errno::ESRCH as i32),
            _ => None,
        }
    }
}
