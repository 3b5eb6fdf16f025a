//! Request records
//!
//! `#[repr(C)]` layouts handed to the driver. They borrow raw pointers into
//! buffers owned by the request types in `request.rs` and never outlive a
//! single control call.

use libc::{c_char, c_int};

/// Record for SET and GET
#[repr(C)]
#[derive(Debug)]
pub struct KeyValRecord {
    /// Key length, terminator excluded
    pub key_len: u32,

    /// NUL-terminated key
    pub key: *mut c_char,

    /// Value length (SET), or output capacity on the way in (GET)
    pub val_len: u32,

    /// Value buffer
    pub val: *mut c_char,

    /// Written by the driver
    pub status: c_int,
}

/// Record for DEL
#[repr(C)]
#[derive(Debug)]
pub struct KeyRecord {
    pub key_len: u32,
    pub key: *mut c_char,
    pub status: c_int,
}
