//! # kvlib
//!
//! User-space client for a key-value store that lives in a kernel driver:
//! - Four operations: format, set, get, delete
//! - One open, one `ioctl(2)` and one close per operation
//! - Typed errors that still map onto the driver's `-1/-2/-3` codes
//! - Latency benchmark workloads
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 kvlib-bench / kvlib-cli                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Client                                │
//! │        (validate, build request, decode status)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │ CharDevice  │          │ MemoryDevice │
//!   │  (ioctl)    │          │  (emulated)  │
//!   └──────┬──────┘          └──────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   Driver    │
//!   │  (kernel)   │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod ioctl;
pub mod device;
pub mod client;
pub mod compat;
pub mod bench;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Failure, KvError, Result};
pub use config::Config;
pub use client::Client;
pub use device::{CharDevice, Device, DeviceHandle, MemoryDevice};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvlib
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
