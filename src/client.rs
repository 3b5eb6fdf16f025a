//! Client Module
//!
//! The store client: one open, one control call and one close per operation.
//!
//! ## Responsibilities
//! - Validate and copy keys/values into a request
//! - Map open, transport and driver failures to `KvError`
//! - Release the device handle and buffers on every path

use std::io;

use crate::config::Config;
use crate::device::{CharDevice, Device, DeviceHandle};
use crate::error::{KvError, Result};
use crate::ioctl::{decode_erase, decode_status, Command, DelRequest, GetRequest, SetRequest};

/// Client for the key-value driver
///
/// Holds no open descriptor between calls. Concurrent callers get no ordering
/// guarantee beyond what the driver provides.
#[derive(Debug, Clone)]
pub struct Client<D: Device = CharDevice> {
    device: D,
    config: Config,
}

impl Client<CharDevice> {
    /// Client for the character device named in `config`
    pub fn new(config: Config) -> Result<Self> {
        let device = CharDevice::from_config(&config);
        Self::with_device(device, config)
    }
}

impl<D: Device> Client<D> {
    /// Client over any device implementation
    pub fn with_device(device: D, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { device, config })
    }

    /// Erase all stored data
    pub fn format(&self) -> Result<()> {
        let mut handle = self.open()?;
        let erase = handle
            .format()
            .map_err(|source| transport(Command::Format, source))?;
        tracing::debug!(erase, "format");
        decode_erase(erase).map_err(|failure| KvError::Operation {
            command: Command::Format,
            failure,
        })
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut request = SetRequest::new(key, value, self.config.max_value_len)?;
        let mut handle = self.open()?;
        handle
            .set(&mut request)
            .map_err(|source| transport(Command::Set, source))?;
        tracing::debug!(key_len = key.len(), value_len = value.len(), status = request.status(), "set");
        check(Command::Set, request.status())
    }

    /// Fetch the value stored under `key`
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let mut request = GetRequest::new(key, self.config.max_value_len)?;
        let mut handle = self.open()?;
        handle
            .get(&mut request)
            .map_err(|source| transport(Command::Get, source))?;
        drop(handle);
        tracing::debug!(key_len = key.len(), status = request.status(), "get");
        check(Command::Get, request.status())?;
        request.into_value().map_err(|failure| KvError::Operation {
            command: Command::Get,
            failure,
        })
    }

    /// Fetch into a caller buffer
    ///
    /// `out` is replaced on success and left untouched on any error.
    pub fn get_into(&self, key: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let value = self.get(key)?;
        *out = value;
        Ok(())
    }

    /// Remove `key`
    pub fn del(&self, key: &[u8]) -> Result<()> {
        let mut request = DelRequest::new(key)?;
        let mut handle = self.open()?;
        handle
            .del(&mut request)
            .map_err(|source| transport(Command::Del, source))?;
        tracing::debug!(key_len = key.len(), status = request.status(), "del");
        check(Command::Del, request.status())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn open(&self) -> Result<D::Handle> {
        self.device.open().map_err(|source| {
            tracing::debug!(path = %self.device.path().display(), error = %source, "open failed");
            KvError::DeviceOpen {
                path: self.device.path().to_path_buf(),
                source,
            }
        })
    }
}

fn transport(command: Command, source: io::Error) -> KvError {
    KvError::Transport { command, source }
}

fn check(command: Command, status: libc::c_int) -> Result<()> {
    decode_status(command, status).map_err(|failure| KvError::Operation { command, failure })
}
