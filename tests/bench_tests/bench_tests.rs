//! Benchmark Tests
//!
//! Tests verify:
//! - Workload generation for small and large entries
//! - Each test kind runs its phases against the in-memory device
//! - Per-key failures are counted without aborting
//! - A failed format aborts the run

use kvlib::bench::{self, KeySize, Phase, TestKind, Workload, LARGE_TEST_SIZE};
use kvlib::{Client, Config, MemoryDevice};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_client() -> (MemoryDevice, Client<MemoryDevice>) {
    let device = MemoryDevice::new();
    let client = Client::with_device(device.clone(), Config::default()).unwrap();
    (device, client)
}

// =============================================================================
// Workload Tests
// =============================================================================

#[test]
fn test_small_workload() {
    let workload = Workload::generate(3, KeySize::Small);

    assert_eq!(workload.len(), 3);
    assert_eq!(workload.key(0), b"key0");
    assert_eq!(workload.value(2), b"val2");
}

#[test]
fn test_large_workload_uses_quarter() {
    let workload = Workload::generate(40, KeySize::Large);

    assert_eq!(workload.len(), 10);
}

#[test]
fn test_large_key_lengths_cycle() {
    let workload = Workload::generate(40, KeySize::Large);
    let lengths: Vec<usize> = workload.keys().iter().map(Vec::len).collect();

    assert_eq!(
        lengths,
        vec![256, 768, 1280, 1792, 2304, 2816, 3328, 3840, 256, 768]
    );
}

#[test]
fn test_large_pairs_fit_a_page_pair() {
    let workload = Workload::generate(40, KeySize::Large);

    for i in 0..workload.len() {
        assert_eq!(workload.key(i).len() + workload.value(i).len(), LARGE_TEST_SIZE - 2);
        assert!(workload.value(i).starts_with(i.to_string().as_bytes()));
    }
}

#[test]
fn test_large_keys_are_unique() {
    let workload = Workload::generate(200, KeySize::Large);
    let mut keys = workload.keys().to_vec();
    keys.sort();
    keys.dedup();

    assert_eq!(keys.len(), workload.len());
}

// =============================================================================
// Runner Tests
// =============================================================================

#[test]
fn test_read_write_run() {
    let (device, client) = setup_client();

    let report = bench::run(&client, TestKind::ReadWrite, 20, KeySize::Small).unwrap();

    assert_eq!(report.entries, 20);
    assert_eq!(report.phase(Phase::Write).unwrap().ops, 20);
    assert_eq!(report.phase(Phase::Read).unwrap().ops, 20);
    assert_eq!(report.failures(), 0);
    assert_eq!(device.len(), 20);
}

#[test]
fn test_write_then_read_only_run() {
    let (_device, client) = setup_client();

    let write = bench::run(&client, TestKind::WriteOnly, 8, KeySize::Large).unwrap();
    let read = bench::run(&client, TestKind::ReadOnly, 8, KeySize::Large).unwrap();

    assert!(write.phase(Phase::Read).is_none());
    assert!(read.phase(Phase::Write).is_none());
    assert_eq!(read.phase(Phase::Read).unwrap().ops, 2);
    assert_eq!(read.failures(), 0);
}

#[test]
fn test_read_only_on_empty_device_counts_failures() {
    let (_device, client) = setup_client();

    let report = bench::run(&client, TestKind::ReadOnly, 5, KeySize::Small).unwrap();

    assert_eq!(report.failures(), 5);
}

#[test]
fn test_delete_run_leaves_device_empty() {
    let (device, client) = setup_client();

    let report = bench::run(&client, TestKind::Delete, 12, KeySize::Small).unwrap();

    assert_eq!(report.phase(Phase::Delete).unwrap().ops, 12);
    assert_eq!(report.phase(Phase::Verify).unwrap().failures, 0);
    assert_eq!(report.failures(), 0);
    assert!(device.is_empty());
}

#[test]
fn test_update_run_overwrites_first_half() {
    let (device, client) = setup_client();

    let report = bench::run(&client, TestKind::Update, 10, KeySize::Small).unwrap();

    assert_eq!(report.phase(Phase::Write).unwrap().ops, 5);
    assert_eq!(report.phase(Phase::Update).unwrap().ops, 5);
    assert_eq!(report.failures(), 0);
    assert_eq!(device.len(), 5);
    assert_eq!(client.get(b"key0").unwrap(), b"val5".to_vec());
    assert_eq!(client.get(b"key4").unwrap(), b"val9".to_vec());
}

#[test]
fn test_format_failure_aborts() {
    let (device, client) = setup_client();
    device.fail_erase(Some(-5));

    let err = bench::run(&client, TestKind::ReadWrite, 4, KeySize::Small).unwrap_err();

    assert_eq!(err.code(), -3);
    assert!(device.is_empty());
}

#[test]
fn test_per_key_failures_do_not_abort() {
    let device = MemoryDevice::new();
    let config = Config::builder().max_value_len(3).build();
    let client = Client::with_device(device.clone(), config).unwrap();

    // Every "valN" is at least 4 bytes, over the 3 byte ceiling
    let report = bench::run(&client, TestKind::ReadWrite, 4, KeySize::Small).unwrap();

    assert_eq!(report.phase(Phase::Write).unwrap().failures, 4);
    assert_eq!(report.phase(Phase::Read).unwrap().failures, 4);
    assert_eq!(report.failures(), 8);
}

#[test]
fn test_latency_is_per_operation() {
    let (_device, client) = setup_client();

    let report = bench::run(&client, TestKind::WriteOnly, 0, KeySize::Small).unwrap();
    let write = report.phase(Phase::Write).unwrap();

    assert_eq!(write.ops, 0);
    assert_eq!(write.latency_ms(), 0.0);
}
