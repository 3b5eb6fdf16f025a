//! Character device transport
//!
//! Opens the driver's special file per operation and issues `ioctl(2)`.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use libc::{c_int, c_void};

use super::{Device, DeviceHandle};
use crate::config::Config;
use crate::ioctl::{Command, DelRequest, GetRequest, SetRequest};

/// The driver's control device
#[derive(Debug, Clone)]
pub struct CharDevice {
    path: PathBuf,
    magic: u8,
}

impl CharDevice {
    pub fn new(path: impl Into<PathBuf>, magic: u8) -> Self {
        Self {
            path: path.into(),
            magic,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.device_path, config.ioctl_magic)
    }
}

impl Device for CharDevice {
    type Handle = CharDeviceHandle;

    fn open(&self) -> io::Result<CharDeviceHandle> {
        // Read-only, no extra flags
        let file = OpenOptions::new().read(true).open(&self.path)?;
        Ok(CharDeviceHandle {
            file,
            magic: self.magic,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Open descriptor on the control device; closed on drop
#[derive(Debug)]
pub struct CharDeviceHandle {
    file: File,
    magic: u8,
}

impl CharDeviceHandle {
    /// Issue one control call with `arg` as the payload pointer
    ///
    /// # Safety
    ///
    /// `arg` must point to the payload type the driver expects for `command`,
    /// and every buffer it references must stay valid for the call.
    unsafe fn control(&self, command: Command, arg: *mut c_void) -> io::Result<()> {
        let code = command.code(self.magic);
        tracing::trace!(command = %command, code, "ioctl");
        if libc::ioctl(self.file.as_raw_fd(), code as _, arg) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl DeviceHandle for CharDeviceHandle {
    fn format(&mut self) -> io::Result<c_int> {
        let mut erase: c_int = 0;
        // SAFETY: FORMAT takes an `int *` output slot
        unsafe { self.control(Command::Format, &mut erase as *mut c_int as *mut c_void)? };
        Ok(erase)
    }

    fn set(&mut self, request: &mut SetRequest) -> io::Result<()> {
        let mut record = request.record();
        // SAFETY: the record borrows `request`'s buffers, which outlive the call
        unsafe { self.control(Command::Set, &mut record as *mut _ as *mut c_void)? };
        request.set_status(record.status);
        Ok(())
    }

    fn get(&mut self, request: &mut GetRequest) -> io::Result<()> {
        let mut record = request.record();
        // SAFETY: the value buffer holds `val_len + 1` writable bytes
        unsafe { self.control(Command::Get, &mut record as *mut _ as *mut c_void)? };
        request.complete(&record);
        Ok(())
    }

    fn del(&mut self, request: &mut DelRequest) -> io::Result<()> {
        let mut record = request.record();
        // SAFETY: the record borrows `request`'s key, which outlives the call
        unsafe { self.control(Command::Del, &mut record as *mut _ as *mut c_void)? };
        request.set_status(record.status);
        Ok(())
    }
}
