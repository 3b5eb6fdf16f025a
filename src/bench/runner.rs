//! Benchmark runner
//!
//! Times each phase and reports milliseconds per operation.

use std::fmt;
use std::time::{Duration, Instant};

use super::{KeySize, TestKind, Workload};
use crate::client::Client;
use crate::device::Device;
use crate::error::Result;

/// One timed loop over the workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Write,
    Read,
    Update,
    Delete,
    /// Post-delete check that every key is gone
    Verify,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Write => "Write",
            Phase::Read => "Read",
            Phase::Update => "Update",
            Phase::Delete => "Delete",
            Phase::Verify => "Verify",
        };
        f.write_str(name)
    }
}

/// Outcome of one phase
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: Phase,
    pub ops: usize,
    pub failures: usize,
    pub elapsed: Duration,
}

impl PhaseReport {
    /// Mean latency per operation in milliseconds (0 for an empty phase)
    pub fn latency_ms(&self) -> f64 {
        if self.ops == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1000.0 / self.ops as f64
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone)]
pub struct Report {
    pub test: TestKind,
    pub size: KeySize,
    pub entries: usize,
    pub phases: Vec<PhaseReport>,
}

impl Report {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    /// Per-key failures across all phases
    pub fn failures(&self) -> usize {
        self.phases.iter().map(|p| p.failures).sum()
    }
}

/// Run one benchmark against `client`
///
/// Returns an error only when format fails; per-key failures are counted in
/// the report.
pub fn run<D: Device>(
    client: &Client<D>,
    test: TestKind,
    requested: u64,
    size: KeySize,
) -> Result<Report> {
    let workload = Workload::generate(requested, size);
    tracing::info!(
        "Performing {} {} for {} pages",
        size,
        test.label(),
        requested
    );

    let mut phases = Vec::new();
    match test {
        TestKind::ReadWrite | TestKind::WriteOnly | TestKind::ReadOnly => {
            let write = test != TestKind::ReadOnly;
            let read = test != TestKind::WriteOnly;
            if write {
                format(client)?;
                phases.push(write_phase(client, &workload, 0..workload.len()));
            }
            if read {
                phases.push(read_phase(client, &workload));
            }
        }
        TestKind::Delete => {
            format(client)?;
            phases.push(write_phase(client, &workload, 0..workload.len()));
            phases.push(delete_phase(client, &workload));
            phases.push(verify_deleted(client, &workload));
        }
        TestKind::Update => {
            format(client)?;
            let half = workload.len() / 2;
            phases.push(write_phase(client, &workload, 0..half));
            phases.extend(update_phases(client, &workload, half));
        }
    }

    Ok(Report {
        test,
        size,
        entries: workload.len(),
        phases,
    })
}

fn format<D: Device>(client: &Client<D>) -> Result<()> {
    match client.format() {
        Ok(()) => {
            tracing::info!("Formatting done successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Error in formatting the flash");
            Err(e)
        }
    }
}

/// Time `op` over `ops` iterations, counting `false` results as failures
fn timed(phase: Phase, ops: usize, mut op: impl FnMut(usize) -> bool) -> PhaseReport {
    let start = Instant::now();
    let failures = (0..ops).filter(|&i| !op(i)).count();
    PhaseReport {
        phase,
        ops,
        failures,
        elapsed: start.elapsed(),
    }
}

fn write_phase<D: Device>(
    client: &Client<D>,
    workload: &Workload,
    range: std::ops::Range<usize>,
) -> PhaseReport {
    let start = range.start;
    timed(Phase::Write, range.len(), |i| {
        set_key(client, workload.key(start + i), workload.value(start + i))
    })
}

fn read_phase<D: Device>(client: &Client<D>, workload: &Workload) -> PhaseReport {
    timed(Phase::Read, workload.len(), |i| {
        get_key(client, workload.key(i), workload.value(i))
    })
}

fn delete_phase<D: Device>(client: &Client<D>, workload: &Workload) -> PhaseReport {
    timed(Phase::Delete, workload.len(), |i| {
        let key = workload.key(i);
        match client.del(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %String::from_utf8_lossy(key), error = %e, "Delete failed");
                false
            }
        }
    })
}

fn verify_deleted<D: Device>(client: &Client<D>, workload: &Workload) -> PhaseReport {
    timed(Phase::Verify, workload.len(), |i| {
        let key = workload.key(i);
        match client.get(key) {
            Ok(_) => {
                tracing::warn!(key = %String::from_utf8_lossy(key), "Found deleted key on flash");
                false
            }
            Err(_) => true,
        }
    })
}

/// Overwrite keys `0..half` with the values of the upper half, then verify
fn update_phases<D: Device>(client: &Client<D>, workload: &Workload, half: usize) -> [PhaseReport; 2] {
    let offset = workload.len() - half;
    let update = timed(Phase::Update, half, |i| {
        set_key(client, workload.key(i), workload.value(i + offset))
    });
    let read = timed(Phase::Read, half, |i| {
        get_key(client, workload.key(i), workload.value(i + offset))
    });
    [update, read]
}

fn set_key<D: Device>(client: &Client<D>, key: &[u8], value: &[u8]) -> bool {
    match client.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key = %String::from_utf8_lossy(key), error = %e, "Error in writing the key");
            false
        }
    }
}

fn get_key<D: Device>(client: &Client<D>, key: &[u8], expected: &[u8]) -> bool {
    match client.get(key) {
        Ok(value) if value == expected => true,
        Ok(value) => {
            tracing::warn!(
                key = %String::from_utf8_lossy(key),
                got = %String::from_utf8_lossy(&value),
                expected = %String::from_utf8_lossy(expected),
                "Value mismatch"
            );
            false
        }
        Err(e) => {
            tracing::warn!(key = %String::from_utf8_lossy(key), error = %e, "Error in reading the key");
            false
        }
    }
}
