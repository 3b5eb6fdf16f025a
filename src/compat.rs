//! Integer-returning entry points
//!
//! Same operations as [`Client`], against the default configuration, for
//! callers that branch on `0` / `-1` / `-2` / `-3`. Keys and values are raw
//! bytes and are copied unchanged.

use crate::client::Client;
use crate::config::Config;
use crate::device::Device;
use crate::error::{code, Result};

fn client() -> Result<Client> {
    Client::new(Config::default())
}

/// `0` on success, `-1` open failure, `-2` ioctl failure, `-3` erase failure
pub fn format() -> i32 {
    client().map_or_else(|e| e.code(), |c| format_with(&c))
}

/// `0` on success, `-1` open failure, `-2` ioctl failure, `-3` set refused
pub fn set(key: &[u8], value: &[u8]) -> i32 {
    client().map_or_else(|e| e.code(), |c| set_with(&c, key, value))
}

/// `0` with `value` filled, `-1` open failure, `-2` ioctl failure, `-3` not
/// found. `value` is untouched unless the call returns `0`.
pub fn get(key: &[u8], value: &mut Vec<u8>) -> i32 {
    client().map_or_else(|e| e.code(), |c| get_with(&c, key, value))
}

/// `0` on success, `-1` open failure, `-2` ioctl failure, `-3` not found
pub fn del(key: &[u8]) -> i32 {
    client().map_or_else(|e| e.code(), |c| del_with(&c, key))
}

pub(crate) fn format_with<D: Device>(client: &Client<D>) -> i32 {
    code(&client.format())
}

pub(crate) fn set_with<D: Device>(client: &Client<D>, key: &[u8], value: &[u8]) -> i32 {
    code(&client.set(key, value))
}

pub(crate) fn get_with<D: Device>(client: &Client<D>, key: &[u8], value: &mut Vec<u8>) -> i32 {
    code(&client.get_into(key, value))
}

pub(crate) fn del_with<D: Device>(client: &Client<D>, key: &[u8]) -> i32 {
    code(&client.del(key))
}
