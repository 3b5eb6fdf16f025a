//! Synthetic keys and values
//!
//! Small entries are `key{i}` / `val{i}`. Large entries vary the key length
//! between 256 and 3840 bytes and fill the rest of a 4 KiB pair with the
//! value.

use super::KeySize;

/// Buffer size for one small key or value
pub const SMALL_TEST_SIZE: usize = 128;

/// Buffer size for one large key or value
pub const LARGE_TEST_SIZE: usize = 2048 * 2;

const LARGE_KEY_MIN: usize = LARGE_TEST_SIZE / 16;
const LARGE_KEY_STEP: usize = 512;

/// Generated key/value pairs for one run
#[derive(Debug, Clone)]
pub struct Workload {
    keys: Vec<Vec<u8>>,
    values: Vec<Vec<u8>>,
}

impl Workload {
    /// Generate the pairs for `requested` entries
    ///
    /// Large runs use a quarter of the entries, since one large pair spans
    /// several flash pages.
    pub fn generate(requested: u64, size: KeySize) -> Self {
        let entries = size.entries_for(requested) as usize;
        let mut keys = Vec::with_capacity(entries);
        let mut values = Vec::with_capacity(entries);

        match size {
            KeySize::Small => {
                for i in 0..entries {
                    keys.push(format!("key{}", i).into_bytes());
                    values.push(format!("val{}", i).into_bytes());
                }
            }
            KeySize::Large => {
                let mut threshold = LARGE_KEY_MIN;
                for i in 0..entries {
                    keys.push(large_key(i, threshold));
                    values.push(large_value(i, LARGE_TEST_SIZE - 2 - threshold));

                    threshold += LARGE_KEY_STEP;
                    if threshold > LARGE_TEST_SIZE {
                        threshold = LARGE_KEY_MIN;
                    }
                }
            }
        }

        Self { keys, values }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key(&self, i: usize) -> &[u8] {
        &self.keys[i]
    }

    pub fn value(&self, i: usize) -> &[u8] {
        &self.values[i]
    }

    pub fn keys(&self) -> &[Vec<u8>] {
        &self.keys
    }

    pub fn values(&self) -> &[Vec<u8>] {
        &self.values
    }
}

/// `i` in decimal, padded with letters to exactly `len` bytes
///
/// Even entries pad with uppercase, odd ones with lowercase, so neighbouring
/// keys never share a suffix.
fn large_key(i: usize, len: usize) -> Vec<u8> {
    let base = if i % 2 == 0 { b'A' } else { b'a' };
    let mut key = i.to_string().into_bytes();
    for j in key.len()..len {
        key.push(base + ((j + i) % 26) as u8);
    }
    key.truncate(len);
    key
}

/// `i` in decimal, padded with `a..z` to `len` bytes
fn large_value(i: usize, len: usize) -> Vec<u8> {
    let mut value = i.to_string().into_bytes();
    for j in value.len()..len {
        value.push(b'a' + (j % 26) as u8);
    }
    value
}
