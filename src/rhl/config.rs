// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: config.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Defaults shared by the library and the `rhl` command line.

use crate::rhl::hash::DEFAULT_CHUNK_SIZE;
use crate::rhl::salt::DEFAULT_SALT_LENGTH;

/// Largest file the `file` command admits before reading it (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
/// Environment variable the pepper is read from by default.
pub const PEPPER_ENV: &str = "RHL_PEPPER";
/// Environment variable the HMAC key is read from by default.
pub const HMAC_KEY_ENV: &str = "RHL_HMAC_KEY";

/// Tunables for hashing files and loading secrets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
	/// Bytes requested per read when streaming a file.
	pub chunk_size: usize,
	/// Files larger than this are refused before any read.
	pub max_file_bytes: u64,
	/// Random bytes drawn for a generated salt.
	pub salt_length: usize,
	/// Variable consulted for the pepper.
	pub pepper_env: String,
	/// Variable consulted for the HMAC key.
	pub hmac_key_env: String,
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			chunk_size: DEFAULT_CHUNK_SIZE,
			max_file_bytes: DEFAULT_MAX_FILE_BYTES,
			salt_length: DEFAULT_SALT_LENGTH,
			pepper_env: PEPPER_ENV.to_string(),
			hmac_key_env: HMAC_KEY_ENV.to_string(),
		}
	}
}
