//! Command definitions
//!
//! The four control operations and their ioctl request codes.

use std::fmt;
use std::mem;

const IOC_NRBITS: u32 = 8;
const IOC_TYPEBITS: u32 = 8;
const IOC_SIZEBITS: u32 = 14;

const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = IOC_NRSHIFT + IOC_NRBITS;
const IOC_SIZESHIFT: u32 = IOC_TYPESHIFT + IOC_TYPEBITS;
const IOC_DIRSHIFT: u32 = IOC_SIZESHIFT + IOC_SIZEBITS;

const IOC_READ: u32 = 2;

/// Control operations understood by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    Set = 0,
    Get = 1,
    Del = 2,
    Format = 3,
}

impl Command {
    /// Command number (`nr` field of the request code)
    pub const fn nr(self) -> u8 {
        self as u8
    }

    /// Human-readable command name
    pub const fn name(self) -> &'static str {
        match self {
            Command::Set => "SET",
            Command::Get => "GET",
            Command::Del => "DEL",
            Command::Format => "FORMAT",
        }
    }

    /// Request code for this command under the given magic
    pub const fn code(self, magic: u8) -> u32 {
        request_code(magic, self.nr())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `_IOR(magic, nr, void *)`
///
/// Every command passes a single pointer, so the size field is always the
/// pointer width.
pub const fn request_code(magic: u8, nr: u8) -> u32 {
    let size = mem::size_of::<*mut libc::c_void>() as u32;
    (IOC_READ << IOC_DIRSHIFT)
        | (size << IOC_SIZESHIFT)
        | ((magic as u32) << IOC_TYPESHIFT)
        | ((nr as u32) << IOC_NRSHIFT)
}
