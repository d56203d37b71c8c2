// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: salt.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Salt generation and salt/pepper composition.
//!
//! Salts are public and must be stored next to the digest they produced.
//! Peppers are secret and are only ever received from the caller.

use crate::rhl::error::{HashLabError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use getrandom::getrandom;
use log::info;

pub const DEFAULT_SALT_LENGTH: usize = 16;
pub const SEPARATOR: char = '$';

/// Draws `byte_length` bytes from the operating system CSPRNG and
/// returns them as padded base64.
pub fn generate_salt(byte_length: usize) -> Result<String> {
	let mut buffer = vec![0u8; byte_length];
	getrandom(&mut buffer)
		.map_err(|err| HashLabError::Randomness(err.to_string()))?;
	info!("generated {}-byte salt", byte_length);
	Ok(STANDARD.encode(&buffer))
}

/// Decodes a base64 salt, rejecting malformed text.
pub fn decode_salt(salt_b64: &str) -> Result<Vec<u8>> {
	STANDARD.decode(salt_b64.trim()).map_err(|err| {
		HashLabError::invalid_input(format!("salt is not valid base64: {}", err))
	})
}

pub fn apply_salt(text: &str, salt_b64: &str) -> String {
	compose(salt_b64, text)
}

pub fn apply_pepper(text: &str, pepper: &str) -> String {
	compose(pepper, text)
}

fn compose(prefix: &str, text: &str) -> String {
	let mut out = String::with_capacity(prefix.len() + 1 + text.len());
	out.push_str(prefix);
	out.push(SEPARATOR);
	out.push_str(text);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_salt_decodes_to_requested_length() {
		for len in [1, DEFAULT_SALT_LENGTH, 32, 33] {
			let salt = generate_salt(len).unwrap();
			assert_eq!(decode_salt(&salt).unwrap().len(), len);
		}
	}

	#[test]
	fn empty_salt_length_yields_empty_text() {
		assert_eq!(generate_salt(0).unwrap(), "");
	}

	#[test]
	fn default_salt_is_24_base64_characters() {
		let salt = generate_salt(DEFAULT_SALT_LENGTH).unwrap();
		assert_eq!(salt.len(), 24);
		assert!(salt.ends_with("=="));
	}

	#[test]
	fn composition_uses_dollar_separator() {
		assert_eq!(apply_salt("x", "AAA=="), "AAA==$x");
		assert_eq!(apply_pepper("x", "p"), "p$x");
		assert_eq!(apply_salt("", ""), "$");
	}

	#[test]
	fn malformed_salt_is_rejected() {
		assert!(matches!(
			decode_salt("not base64!"),
			Err(HashLabError::InvalidInput(_))
		));
	}
}
