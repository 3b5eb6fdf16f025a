//! Control-call Module
//!
//! Defines the boundary contract with the kernel driver.
//!
//! ## Request Codes
//! Linux generic `_IOR(magic, nr, pointer)` encoding:
//! ```text
//! ┌─────────┬──────────────┬───────────┬─────────┐
//! │ Dir (2) │  Size (14)   │ Magic (8) │ Nr (8)  │
//! └─────────┴──────────────┴───────────┴─────────┘
//! ```
//!
//! ### Commands
//! - 0: SET    - Payload: key/value record
//! - 1: GET    - Payload: key/value record (value is an output buffer)
//! - 2: DEL    - Payload: key record
//! - 3: FORMAT - Payload: `int` erase result
//!
//! ### Status
//! The driver writes `status` into the record. `-1` means the key was not
//! found (get/delete) or the write was refused (set).

mod command;
mod record;
mod request;
mod status;

pub use command::{request_code, Command};
pub use record::{KeyRecord, KeyValRecord};
pub use request::{DelRequest, GetRequest, SetRequest};
pub use status::{decode_erase, decode_status, STATUS_SENTINEL};
