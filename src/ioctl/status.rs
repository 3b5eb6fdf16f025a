//! Driver status decoding
//!
//! The driver overloads one integer per call. This turns it into a
//! [`Failure`] kind the client can branch on.

use libc::c_int;

use super::Command;
use crate::error::Failure;

/// Status the driver writes when a key was not found or a write was refused
pub const STATUS_SENTINEL: c_int = -1;

/// Decode the `status` field of a SET, GET or DEL record
///
/// `-EIO` and `-EBADMSG` are a client-side convention; the driver is only
/// known to report the `-1` sentinel.
pub fn decode_status(command: Command, status: c_int) -> Result<(), Failure> {
    match status {
        STATUS_SENTINEL => match command {
            Command::Set => Err(Failure::Rejected { status }),
            _ => Err(Failure::NotFound),
        },
        s if s == -libc::EIO => Err(Failure::Io),
        s if s == -libc::EBADMSG => Err(Failure::Corrupt),
        _ => Ok(()),
    }
}

/// Decode the erase result returned by FORMAT
pub fn decode_erase(code: c_int) -> Result<(), Failure> {
    match code {
        0 => Ok(()),
        c if c == -libc::EIO => Err(Failure::Io),
        c => Err(Failure::EraseFailed { code: c }),
    }
}
