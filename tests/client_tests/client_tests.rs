//! Tests for Client
//!
//! These tests verify:
//! - Last-write-wins set/get
//! - Format, delete and missing-key behavior
//! - Mapping of open, transport and driver failures
//! - Value ceiling and NUL validation
//! - One open and one close per operation

use kvlib::client::Client;
use kvlib::config::Config;
use kvlib::device::MemoryDevice;
use kvlib::error::{Failure, KvError};
use kvlib::ioctl::Command;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_client() -> (MemoryDevice, Client<MemoryDevice>) {
    let device = MemoryDevice::new();
    let client = Client::with_device(device.clone(), Config::default()).unwrap();
    (device, client)
}

fn setup_client_with_limit(limit: usize) -> (MemoryDevice, Client<MemoryDevice>) {
    let device = MemoryDevice::new();
    let config = Config::builder().max_value_len(limit).build();
    let client = Client::with_device(device.clone(), config).unwrap();
    (device, client)
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_set_get() {
    let (_device, client) = setup_client();

    client.set(b"hello", b"world").unwrap();

    assert_eq!(client.get(b"hello").unwrap(), b"world".to_vec());
}

#[test]
fn test_get_never_written_key() {
    let (_device, client) = setup_client();

    let err = client.get(b"nonexistent").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), -3);
}

#[test]
fn test_overwrite_three_times() {
    let (_device, client) = setup_client();

    client.set(b"key1", b"val1").unwrap();
    client.set(b"key1", b"val2").unwrap();
    client.set(b"key1", b"val3").unwrap();

    assert_eq!(client.get(b"key1").unwrap(), b"val3".to_vec());
}

#[test]
fn test_multiple_keys() {
    let (device, client) = setup_client();

    client.set(b"key1", b"value1").unwrap();
    client.set(b"key2", b"value2").unwrap();
    client.set(b"key3", b"value3").unwrap();

    assert_eq!(device.len(), 3);
    assert_eq!(client.get(b"key1").unwrap(), b"value1".to_vec());
    assert_eq!(client.get(b"key2").unwrap(), b"value2".to_vec());
    assert_eq!(client.get(b"key3").unwrap(), b"value3".to_vec());
}

#[test]
fn test_delete_then_get() {
    let (_device, client) = setup_client();

    client.set(b"key", b"value").unwrap();
    client.del(b"key").unwrap();

    let err = client.get(b"key").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_delete_missing_key() {
    let (_device, client) = setup_client();

    let err = client.del(b"nonexistent").unwrap_err();

    assert!(matches!(
        err,
        KvError::Operation {
            command: Command::Del,
            failure: Failure::NotFound
        }
    ));
    assert_eq!(err.code(), -3);
}

#[test]
fn test_format_clears_everything() {
    let (device, client) = setup_client();

    client.set(b"a", b"1").unwrap();
    client.set(b"b", b"2").unwrap();

    client.format().unwrap();

    assert!(device.is_empty());
    assert!(client.get(b"a").unwrap_err().is_not_found());
    assert!(client.get(b"b").unwrap_err().is_not_found());
}

#[test]
fn test_empty_value_round_trips() {
    let (_device, client) = setup_client();

    client.set(b"empty", b"").unwrap();

    assert_eq!(client.get(b"empty").unwrap(), Vec::<u8>::new());
}

// =============================================================================
// Caller Buffer Tests
// =============================================================================

#[test]
fn test_get_into_fills_buffer() {
    let (_device, client) = setup_client();
    client.set(b"key", b"value").unwrap();

    let mut out = b"stale".to_vec();
    client.get_into(b"key", &mut out).unwrap();

    assert_eq!(out, b"value".to_vec());
}

#[test]
fn test_get_into_leaves_buffer_on_not_found() {
    let (_device, client) = setup_client();

    let mut out = b"untouched".to_vec();
    let err = client.get_into(b"missing", &mut out).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(out, b"untouched".to_vec());
}

#[test]
fn test_get_into_leaves_buffer_on_transport_failure() {
    let (device, client) = setup_client();
    client.set(b"key", b"value").unwrap();
    device.fail_transport(Some(libc::EFAULT));

    let mut out = b"untouched".to_vec();
    let err = client.get_into(b"key", &mut out).unwrap_err();

    assert_eq!(err.code(), -2);
    assert_eq!(out, b"untouched".to_vec());
}

// =============================================================================
// Failure Mapping Tests
// =============================================================================

#[test]
fn test_open_failure_maps_to_minus_one() {
    let (device, client) = setup_client();
    device.fail_open(Some(libc::ENOENT));

    for err in [
        client.format().unwrap_err(),
        client.set(b"k", b"v").unwrap_err(),
        client.get(b"k").unwrap_err(),
        client.del(b"k").unwrap_err(),
    ] {
        assert!(matches!(err, KvError::DeviceOpen { .. }));
        assert_eq!(err.code(), -1);
    }
}

#[test]
fn test_transport_failure_maps_to_minus_two() {
    let (device, client) = setup_client();
    device.fail_transport(Some(libc::EINVAL));

    let err = client.set(b"k", b"v").unwrap_err();

    match err {
        KvError::Transport { command, ref source } => {
            assert_eq!(command, Command::Set);
            assert_eq!(source.raw_os_error(), Some(libc::EINVAL));
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
    assert_eq!(err.code(), -2);
    assert!(device.is_empty());
}

#[test]
fn test_erase_failure_maps_to_minus_three() {
    let (device, client) = setup_client();
    client.set(b"k", b"v").unwrap();
    device.fail_erase(Some(5));

    let err = client.format().unwrap_err();

    assert_eq!(err.failure(), Some(Failure::EraseFailed { code: 5 }));
    assert_eq!(err.code(), -3);
    assert_eq!(device.len(), 1);
}

#[test]
fn test_faults_can_be_cleared() {
    let (device, client) = setup_client();
    device.fail_open(Some(libc::EACCES));
    assert!(client.set(b"k", b"v").is_err());

    device.fail_open(None);
    client.set(b"k", b"v").unwrap();
    assert_eq!(client.get(b"k").unwrap(), b"v".to_vec());
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_value_at_limit_is_accepted() {
    let (_device, client) = setup_client_with_limit(16);
    let value = vec![b'x'; 16];

    client.set(b"key", &value).unwrap();

    assert_eq!(client.get(b"key").unwrap(), value);
}

#[test]
fn test_value_over_limit_is_rejected_before_open() {
    let (device, client) = setup_client_with_limit(16);

    let err = client.set(b"key", &[b'x'; 17]).unwrap_err();

    assert!(matches!(err, KvError::ValueTooLarge { len: 17, limit: 16 }));
    assert_eq!(device.open_count(), 0);
}

#[test]
fn test_default_limit_is_8192() {
    let (_device, client) = setup_client();

    client.set(b"big", &vec![b'v'; 8192]).unwrap();
    let err = client.set(b"bigger", &vec![b'v'; 8193]).unwrap_err();

    assert_eq!(client.get(b"big").unwrap().len(), 8192);
    assert!(matches!(err, KvError::ValueTooLarge { .. }));
}

#[test]
fn test_interior_nul_is_rejected() {
    let (device, client) = setup_client();

    assert!(matches!(
        client.set(b"k\0ey", b"v").unwrap_err(),
        KvError::InvalidArgument(_)
    ));
    assert!(matches!(
        client.set(b"key", b"v\0al").unwrap_err(),
        KvError::InvalidArgument(_)
    ));
    assert!(matches!(
        client.get(b"k\0").unwrap_err(),
        KvError::InvalidArgument(_)
    ));
    assert_eq!(device.open_count(), 0);
}

#[test]
fn test_stored_value_larger_than_reader_limit_is_corrupt() {
    let device = MemoryDevice::new();
    let writer = Client::with_device(device.clone(), Config::default()).unwrap();
    let reader = Client::with_device(
        device.clone(),
        Config::builder().max_value_len(4).build(),
    )
    .unwrap();

    writer.set(b"key", b"longer than four").unwrap();
    let err = reader.get(b"key").unwrap_err();

    assert_eq!(err.failure(), Some(Failure::Corrupt));
}

#[test]
fn test_client_keeps_device_and_config() {
    let (device, client) = setup_client_with_limit(64);

    client.set(b"k", b"v").unwrap();

    assert_eq!(client.config().max_value_len, 64);
    assert_eq!(client.device().len(), 1);
    assert_eq!(client.device().open_count(), device.open_count());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = Config::builder().max_value_len(0).build();

    let result = Client::with_device(MemoryDevice::new(), config);

    assert!(matches!(result, Err(KvError::Config(_))));
}

// =============================================================================
// Resource Tests
// =============================================================================

#[test]
fn test_each_operation_opens_and_closes_once() {
    let (device, client) = setup_client();

    client.format().unwrap();
    client.set(b"k", b"v").unwrap();
    client.get(b"k").unwrap();
    client.del(b"k").unwrap();
    let _ = client.get(b"k");

    assert_eq!(device.open_count(), 5);
    assert_eq!(device.live_handles(), 0);
}

#[test]
fn test_handle_closed_on_failure_paths() {
    let (device, client) = setup_client();

    let _ = client.del(b"missing");
    device.fail_transport(Some(libc::EIO));
    let _ = client.get(b"k");
    let _ = client.format();

    assert_eq!(device.live_handles(), 0);
}
