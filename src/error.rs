//! Error types for kvlib
//!
//! Every client operation fails with exactly one `KvError`. The legacy integer
//! taxonomy (`-1` open, `-2` transport, `-3` operation) is available through
//! [`KvError::code`].

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ioctl::Command;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Legacy return code: device could not be opened
pub const CODE_DEVICE_OPEN: i32 = -1;

/// Legacy return code: the control call itself failed
pub const CODE_TRANSPORT: i32 = -2;

/// Legacy return code: the driver reported that nothing happened
pub const CODE_OPERATION: i32 = -3;

/// Unified error type for kvlib operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("failed to open device {path:?}: {source}")]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{command} control call failed: {source}")]
    Transport {
        command: Command,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Driver Errors
    // -------------------------------------------------------------------------
    #[error("{command} failed: {failure}")]
    Operation { command: Command, failure: Failure },

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("value of {len} bytes exceeds the {limit} byte limit")]
    ValueTooLarge { len: usize, limit: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why the driver reported that an operation had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The key is not present in the store
    NotFound,

    /// The driver refused the request (raw status attached)
    Rejected { status: i32 },

    /// Format did not complete; the driver's erase result is attached
    EraseFailed { code: i32 },

    /// The driver's response could not be trusted
    Corrupt,

    /// The driver hit an I/O error on the backing medium
    Io,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::NotFound => write!(f, "key not found"),
            Failure::Rejected { status } => write!(f, "rejected by driver (status {})", status),
            Failure::EraseFailed { code } => write!(f, "erase failed (code {})", code),
            Failure::Corrupt => write!(f, "corrupt response from driver"),
            Failure::Io => write!(f, "driver I/O error"),
        }
    }
}

impl KvError {
    /// Map this error onto the legacy integer taxonomy
    pub fn code(&self) -> i32 {
        match self {
            KvError::DeviceOpen { .. } => CODE_DEVICE_OPEN,
            KvError::Transport { .. } => CODE_TRANSPORT,
            KvError::Operation { .. }
            | KvError::ValueTooLarge { .. }
            | KvError::InvalidArgument(_)
            | KvError::Config(_) => CODE_OPERATION,
        }
    }

    /// The driver-reported failure kind, if this is an operation failure
    pub fn failure(&self) -> Option<Failure> {
        match self {
            KvError::Operation { failure, .. } => Some(*failure),
            _ => None,
        }
    }

    /// True if the driver reported that the key does not exist
    pub fn is_not_found(&self) -> bool {
        self.failure() == Some(Failure::NotFound)
    }
}

/// Map any client result onto the legacy integer taxonomy (`0` on success)
pub fn code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}
