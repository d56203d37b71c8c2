// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: hmac.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! HMAC (RFC 2104) over the supported digest algorithms.
//!
//! SHA-1 and SHA-2 use the block-level `Hmac` construction. BLAKE2b
//! exposes only a lazy buffer core, so it goes through `SimpleHmac`;
//! both pad the key to the algorithm block size.

use crate::rhl::algorithm::{resolve, Algorithm};
use crate::rhl::encoding::TextEncoding;
use crate::rhl::error::{HashLabError, Result};
use blake2::Blake2b512;
use hmac::{Hmac, Mac, SimpleHmac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;
type HmacBlake2b = SimpleHmac<Blake2b512>;

enum HmacVariant {
	Sha1(HmacSha1),
	Sha256(HmacSha256),
	Sha512(HmacSha512),
	Blake2b(HmacBlake2b),
}

/// Keyed accumulator for one MAC computation.
pub struct HmacState {
	inner: HmacVariant,
}

impl HmacState {
	pub fn new(algorithm: Algorithm, key: &[u8]) -> Result<Self> {
		let inner = match algorithm {
			Algorithm::Sha1 => HmacVariant::Sha1(keyed(key)?),
			Algorithm::Sha256 => HmacVariant::Sha256(keyed(key)?),
			Algorithm::Sha512 => HmacVariant::Sha512(keyed(key)?),
			Algorithm::Blake2b => HmacVariant::Blake2b(keyed(key)?),
		};
		Ok(Self { inner })
	}

	pub fn update(&mut self, data: &[u8]) {
		match &mut self.inner {
			HmacVariant::Sha1(mac) => mac.update(data),
			HmacVariant::Sha256(mac) => mac.update(data),
			HmacVariant::Sha512(mac) => mac.update(data),
			HmacVariant::Blake2b(mac) => mac.update(data),
		}
	}

	pub fn finalize(self) -> Vec<u8> {
		match self.inner {
			HmacVariant::Sha1(mac) => mac.finalize().into_bytes().to_vec(),
			HmacVariant::Sha256(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			HmacVariant::Sha512(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
			HmacVariant::Blake2b(mac) => {
				mac.finalize().into_bytes().to_vec()
			}
		}
	}
}

fn keyed<M: Mac + hmac::digest::KeyInit>(key: &[u8]) -> Result<M> {
	<M as Mac>::new_from_slice(key).map_err(|_| {
		HashLabError::invalid_input("HMAC key length was rejected")
	})
}

/// MAC over raw bytes, returned as lowercase hex.
pub fn hmac_bytes(
	message: &[u8],
	key: &[u8],
	algorithm: &str,
) -> Result<String> {
	let handle = resolve(algorithm)?;
	let mut state = HmacState::new(handle.algorithm(), key)?;
	state.update(message);
	Ok(hex::encode(state.finalize()))
}

/// MAC over `text` keyed with `key`, both encoded with `encoding`.
pub fn hmac_text(
	text: &str,
	key: &str,
	algorithm: &str,
	encoding: &str,
) -> Result<String> {
	let handle = resolve(algorithm)?;
	let encoding = encoding.parse::<TextEncoding>()?;
	let key = encoding.encode(key)?;
	let message = encoding.encode(text)?;
	let mut state = HmacState::new(handle.algorithm(), &key)?;
	state.update(&message);
	Ok(hex::encode(state.finalize()))
}
