//! Benchmark Module
//!
//! Latency workloads driven through the client.
//!
//! ## Tests
//! - 1: read/write  - format, write all, read and compare all
//! - 2: delete      - format, write all, delete all, check all are gone
//! - 3: update      - format, write half, overwrite that half, verify
//! - 5: write only  - format, write all
//! - 6: read only   - read and compare all (expects a previous write run)
//!
//! Per-key failures are logged and counted; the run keeps going. A failed
//! format aborts the run.

mod runner;
mod workload;

pub use runner::{run, Phase, PhaseReport, Report};
pub use workload::{Workload, LARGE_TEST_SIZE, SMALL_TEST_SIZE};

use std::fmt;

/// Which benchmark to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    ReadWrite,
    Delete,
    Update,
    WriteOnly,
    ReadOnly,
}

impl TestKind {
    /// Map the numeric selector used on the command line
    pub fn from_selector(selector: u32) -> Option<Self> {
        match selector {
            1 => Some(TestKind::ReadWrite),
            2 => Some(TestKind::Delete),
            3 => Some(TestKind::Update),
            5 => Some(TestKind::WriteOnly),
            6 => Some(TestKind::ReadOnly),
            _ => None,
        }
    }

    pub fn selector(self) -> u32 {
        match self {
            TestKind::ReadWrite => 1,
            TestKind::Delete => 2,
            TestKind::Update => 3,
            TestKind::WriteOnly => 5,
            TestKind::ReadOnly => 6,
        }
    }

    /// Name used in latency lines
    pub fn label(self) -> &'static str {
        match self {
            TestKind::ReadWrite | TestKind::WriteOnly | TestKind::ReadOnly => "read-write test",
            TestKind::Delete => "delete test",
            TestKind::Update => "update test",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            TestKind::ReadWrite => "Read-Write Latency test",
            TestKind::Delete => "Delete test",
            TestKind::Update => "Update test",
            TestKind::WriteOnly => "Write Latency test",
            TestKind::ReadOnly => "Read Latency test",
        };
        f.write_str(title)
    }
}

/// Small (128 byte) or large (multi-page) entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Small,
    Large,
}

impl KeySize {
    pub fn from_flag(large: bool) -> Self {
        if large {
            KeySize::Large
        } else {
            KeySize::Small
        }
    }

    /// Entries actually used for `requested` pages
    pub fn entries_for(self, requested: u64) -> u64 {
        match self {
            KeySize::Small => requested,
            KeySize::Large => requested / 4,
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySize::Small => write!(f, "Short key({} bytes)", SMALL_TEST_SIZE),
            KeySize::Large => write!(f, "Large key(3 pages)"),
        }
    }
}
