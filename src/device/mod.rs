//! Device Module
//!
//! Transport between the client and the driver.
//!
//! ## Responsibilities
//! - Open a handle for exactly one operation
//! - Issue one blocking control call per request
//! - Close on drop
//!
//! ## Implementations
//! - `CharDevice`: the driver's special file, driven with `ioctl(2)`
//! - `MemoryDevice`: in-process emulation of the driver's visible contract,
//!   for running the client without the kernel module

mod char_device;
mod memory;

pub use char_device::{CharDevice, CharDeviceHandle};
pub use memory::{MemoryDevice, MemoryHandle};

use std::io;
use std::path::Path;

use libc::c_int;

use crate::ioctl::{DelRequest, GetRequest, SetRequest};

/// Something the client can open a control channel to
pub trait Device {
    type Handle: DeviceHandle;

    /// Open a fresh handle; dropping it closes the device
    fn open(&self) -> io::Result<Self::Handle>;

    /// Path reported in open errors
    fn path(&self) -> &Path;
}

/// An open control channel
///
/// Each method is a single control call. `Err` means the call itself failed;
/// driver-level outcomes are written into the request's status.
pub trait DeviceHandle {
    /// Erase everything; returns the driver's erase result
    fn format(&mut self) -> io::Result<c_int>;

    fn set(&mut self, request: &mut SetRequest) -> io::Result<()>;

    fn get(&mut self, request: &mut GetRequest) -> io::Result<()>;

    fn del(&mut self, request: &mut DelRequest) -> io::Result<()>;
}
