//! In-memory device
//!
//! Emulates the driver's visible contract without the kernel module:
//! last-write-wins map, `-1` sentinel statuses, FORMAT clears everything.
//! Faults can be injected to exercise the client's error paths.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use libc::c_int;
use parking_lot::{Mutex, RwLock};

use super::{Device, DeviceHandle};
use crate::ioctl::{DelRequest, GetRequest, SetRequest, STATUS_SENTINEL};

#[derive(Debug, Default)]
struct Faults {
    open: Option<i32>,
    transport: Option<i32>,
    erase: Option<c_int>,
}

#[derive(Debug, Default)]
struct Shared {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    faults: Mutex<Faults>,
    opens: AtomicUsize,
    live: AtomicUsize,
}

/// Shared in-memory store; clones see the same data
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    path: PathBuf,
    shared: Arc<Shared>,
}

impl Default for MemoryDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("memory"),
            shared: Arc::new(Shared::default()),
        }
    }

    /// Make `open` fail with the given errno (`None` to clear)
    pub fn fail_open(&self, errno: Option<i32>) {
        self.shared.faults.lock().open = errno;
    }

    /// Make every control call fail with the given errno (`None` to clear)
    pub fn fail_transport(&self, errno: Option<i32>) {
        self.shared.faults.lock().transport = errno;
    }

    /// Make FORMAT report the given erase result (`None` to clear)
    pub fn fail_erase(&self, code: Option<c_int>) {
        self.shared.faults.lock().erase = code;
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.shared.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.data.read().is_empty()
    }

    /// Total number of successful opens
    pub fn open_count(&self) -> usize {
        self.shared.opens.load(Ordering::Relaxed)
    }

    /// Handles opened but not yet closed
    pub fn live_handles(&self) -> usize {
        self.shared.live.load(Ordering::Relaxed)
    }
}

impl Device for MemoryDevice {
    type Handle = MemoryHandle;

    fn open(&self) -> io::Result<MemoryHandle> {
        if let Some(errno) = self.shared.faults.lock().open {
            return Err(io::Error::from_raw_os_error(errno));
        }
        self.shared.opens.fetch_add(1, Ordering::Relaxed);
        self.shared.live.fetch_add(1, Ordering::Relaxed);
        Ok(MemoryHandle {
            shared: Arc::clone(&self.shared),
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Open handle on a `MemoryDevice`
#[derive(Debug)]
pub struct MemoryHandle {
    shared: Arc<Shared>,
}

impl MemoryHandle {
    fn check_transport(&self) -> io::Result<()> {
        match self.shared.faults.lock().transport {
            Some(errno) => Err(io::Error::from_raw_os_error(errno)),
            None => Ok(()),
        }
    }
}

impl Drop for MemoryHandle {
    fn drop(&mut self) {
        self.shared.live.fetch_sub(1, Ordering::Relaxed);
    }
}

impl DeviceHandle for MemoryHandle {
    fn format(&mut self) -> io::Result<c_int> {
        self.check_transport()?;
        if let Some(code) = self.shared.faults.lock().erase {
            return Ok(code);
        }
        self.shared.data.write().clear();
        Ok(0)
    }

    fn set(&mut self, request: &mut SetRequest) -> io::Result<()> {
        self.check_transport()?;
        self.shared
            .data
            .write()
            .insert(request.key().to_vec(), request.value().to_vec());
        request.set_status(0);
        Ok(())
    }

    fn get(&mut self, request: &mut GetRequest) -> io::Result<()> {
        self.check_transport()?;
        let data = self.shared.data.read();
        match data.get(request.key()) {
            Some(value) => {
                request.respond(value);
                request.set_status(0);
            }
            None => request.set_status(STATUS_SENTINEL),
        }
        Ok(())
    }

    fn del(&mut self, request: &mut DelRequest) -> io::Result<()> {
        self.check_transport()?;
        let removed = self.shared.data.write().remove(request.key());
        request.set_status(if removed.is_some() { 0 } else { STATUS_SENTINEL });
        Ok(())
    }
}
