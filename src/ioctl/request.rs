//! Owned requests
//!
//! Each request owns the buffers its record points at. Buffers are released
//! when the request is dropped, on every exit path.

use std::ffi::CString;

use libc::{c_char, c_int};

use super::record::{KeyRecord, KeyValRecord};
use crate::error::{Failure, KvError, Result};

/// Copy a key or value into a NUL-terminated buffer
fn c_bytes(what: &str, bytes: &[u8]) -> Result<CString> {
    CString::new(bytes).map_err(|e| {
        KvError::InvalidArgument(format!(
            "{} contains a NUL byte at offset {}",
            what,
            e.nul_position()
        ))
    })
}

fn check_value_len(len: usize, limit: usize) -> Result<()> {
    let limit = limit.min(u32::MAX as usize - 1);
    if len > limit {
        return Err(KvError::ValueTooLarge { len, limit });
    }
    Ok(())
}

// =============================================================================
// SET
// =============================================================================

/// A key/value pair ready to be written
#[derive(Debug)]
pub struct SetRequest {
    key: CString,
    value: CString,
    status: c_int,
}

impl SetRequest {
    /// Copy `key` and `value`, enforcing the value ceiling
    pub fn new(key: &[u8], value: &[u8], max_value_len: usize) -> Result<Self> {
        check_value_len(value.len(), max_value_len)?;
        Ok(Self {
            key: c_bytes("key", key)?,
            value: c_bytes("value", value)?,
            status: 0,
        })
    }

    pub fn key(&self) -> &[u8] {
        self.key.as_bytes()
    }

    pub fn value(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn status(&self) -> c_int {
        self.status
    }

    /// Record the driver's answer
    pub fn set_status(&mut self, status: c_int) {
        self.status = status;
    }

    /// Raw record pointing into this request's buffers
    ///
    /// The driver only reads the buffers during SET.
    pub fn record(&self) -> KeyValRecord {
        KeyValRecord {
            key_len: self.key.as_bytes().len() as u32,
            key: self.key.as_ptr() as *mut c_char,
            val_len: self.value.as_bytes().len() as u32,
            val: self.value.as_ptr() as *mut c_char,
            status: self.status,
        }
    }
}

// =============================================================================
// GET
// =============================================================================

/// A lookup with an output buffer sized to the value ceiling
#[derive(Debug)]
pub struct GetRequest {
    key: CString,
    /// `capacity + 1` zeroed bytes so the value is always terminated
    buf: Vec<u8>,
    value_len: u32,
    status: c_int,
}

impl GetRequest {
    /// `max_value_len` must fit the record's `u32` length field
    pub fn new(key: &[u8], max_value_len: usize) -> Result<Self> {
        if max_value_len >= u32::MAX as usize {
            return Err(KvError::InvalidArgument(format!(
                "value buffer of {} bytes does not fit the request record",
                max_value_len
            )));
        }
        Ok(Self {
            key: c_bytes("key", key)?,
            buf: vec![0; max_value_len + 1],
            value_len: max_value_len as u32,
            status: 0,
        })
    }

    pub fn key(&self) -> &[u8] {
        self.key.as_bytes()
    }

    /// Number of value bytes the buffer can hold
    pub fn capacity(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn status(&self) -> c_int {
        self.status
    }

    pub fn set_status(&mut self, status: c_int) {
        self.status = status;
    }

    /// Answer the lookup the way the driver does: copy what fits and report
    /// the stored length
    pub fn respond(&mut self, value: &[u8]) {
        let n = value.len().min(self.capacity());
        self.buf[..n].copy_from_slice(&value[..n]);
        self.buf[n] = 0;
        self.value_len = value.len() as u32;
    }

    /// Raw record; the driver writes into the value buffer
    pub fn record(&mut self) -> KeyValRecord {
        KeyValRecord {
            key_len: self.key.as_bytes().len() as u32,
            key: self.key.as_ptr() as *mut c_char,
            val_len: self.value_len,
            val: self.buf.as_mut_ptr() as *mut c_char,
            status: self.status,
        }
    }

    /// Copy the driver-written fields back after the call
    pub fn complete(&mut self, record: &KeyValRecord) {
        self.value_len = record.val_len;
        self.status = record.status;
    }

    /// Extract the returned value
    ///
    /// A `val_len` below the capacity is taken as exact. A driver that leaves
    /// `val_len` alone returns a C string, so fall back to the first NUL.
    pub fn into_value(mut self) -> std::result::Result<Vec<u8>, Failure> {
        let capacity = self.capacity();
        let len = self.value_len as usize;
        if len > capacity {
            return Err(Failure::Corrupt);
        }
        let len = if len < capacity {
            len
        } else {
            self.buf.iter().position(|&b| b == 0).unwrap_or(capacity)
        };
        self.buf.truncate(len);
        Ok(self.buf)
    }
}

// =============================================================================
// DEL
// =============================================================================

/// A key to remove
#[derive(Debug)]
pub struct DelRequest {
    key: CString,
    status: c_int,
}

impl DelRequest {
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self {
            key: c_bytes("key", key)?,
            status: 0,
        })
    }

    pub fn key(&self) -> &[u8] {
        self.key.as_bytes()
    }

    pub fn status(&self) -> c_int {
        self.status
    }

    pub fn set_status(&mut self, status: c_int) {
        self.status = status;
    }

    pub fn record(&self) -> KeyRecord {
        KeyRecord {
            key_len: self.key.as_bytes().len() as u32,
            key: self.key.as_ptr() as *mut c_char,
            status: self.status,
        }
    }
}
