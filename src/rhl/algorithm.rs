// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: algorithm.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Closed mapping from algorithm identifiers to digest constructors.
//!
//! Only the identifiers listed in [`Algorithm`] are accepted. Names are
//! matched case-insensitively and anything else is rejected at the
//! boundary with [`HashLabError::UnsupportedAlgorithm`].

use crate::rhl::error::{HashLabError, Result};
use blake2::Blake2b512;
use digest::{Digest, DynDigest};
use log::debug;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

pub const DEFAULT_ALGORITHM: &str = "sha256";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter)]
pub enum Algorithm {
	Sha256,
	Sha1,
	Sha512,
	Blake2b,
}

impl Algorithm {
	pub fn identifier(self) -> &'static str {
		match self {
			Self::Sha256 => "sha256",
			Self::Sha1 => "sha1",
			Self::Sha512 => "sha512",
			Self::Blake2b => "blake2b",
		}
	}

	pub fn display_name(self) -> &'static str {
		match self {
			Self::Sha256 => "SHA-256",
			Self::Sha1 => "SHA-1",
			Self::Sha512 => "SHA-512",
			Self::Blake2b => "BLAKE2b-512",
		}
	}

	/// Digest size in bytes.
	pub fn output_len(self) -> usize {
		match self {
			Self::Sha1 => 20,
			Self::Sha256 => 32,
			Self::Sha512 | Self::Blake2b => 64,
		}
	}

	/// Length of the lowercase hexadecimal digest.
	pub fn hex_len(self) -> usize {
		self.output_len() * 2
	}

	/// Internal block size, which is also the HMAC key pad width.
	pub fn block_size(self) -> usize {
		match self {
			Self::Sha1 | Self::Sha256 => 64,
			Self::Sha512 | Self::Blake2b => 128,
		}
	}

	pub fn all() -> impl Iterator<Item = Algorithm> {
		Self::iter()
	}

	pub fn identifiers() -> Vec<&'static str> {
		Self::iter().map(Self::identifier).collect()
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.identifier())
	}
}

impl FromStr for Algorithm {
	type Err = HashLabError;

	fn from_str(name: &str) -> Result<Self> {
		Self::iter()
			.find(|alg| alg.identifier().eq_ignore_ascii_case(name))
			.ok_or_else(|| {
				HashLabError::UnsupportedAlgorithm(name.to_string())
			})
	}
}

macro_rules! create_hasher {
	($alg:expr, $($pattern:pat => $hasher:expr),+ $(,)?) => {
		match $alg {
			$(
				$pattern => Box::new($hasher),
			)+
		}
	};
}

/// Resolved algorithm able to build fresh accumulators on demand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AlgorithmHandle {
	algorithm: Algorithm,
}

impl AlgorithmHandle {
	pub fn new(algorithm: Algorithm) -> Self {
		Self { algorithm }
	}

	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Builds a new, empty accumulator. Accumulators are never shared
	/// between calls.
	pub fn accumulator(&self) -> Accumulator {
		let digest: Box<dyn DynDigest> = create_hasher!(self.algorithm,
			Algorithm::Sha256 => Sha256::new(),
			Algorithm::Sha1 => Sha1::new(),
			Algorithm::Sha512 => Sha512::new(),
			Algorithm::Blake2b => Blake2b512::new(),
		);
		Accumulator {
			algorithm: self.algorithm,
			digest,
		}
	}
}

/// Incremental hash state for a single computation.
pub struct Accumulator {
	algorithm: Algorithm,
	digest: Box<dyn DynDigest>,
}

impl Accumulator {
	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	pub fn update(&mut self, data: &[u8]) {
		self.digest.update(data);
	}

	pub fn finalize(self) -> Vec<u8> {
		self.digest.finalize().into_vec()
	}

	pub fn finalize_hex(self) -> String {
		hex::encode(self.finalize())
	}
}

impl fmt::Debug for Accumulator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Accumulator")
			.field("algorithm", &self.algorithm)
			.finish_non_exhaustive()
	}
}

/// Looks up `name` in the supported set.
pub fn resolve(name: &str) -> Result<AlgorithmHandle> {
	let algorithm = name.parse::<Algorithm>()?;
	debug!("resolved algorithm `{}` to {}", name, algorithm.display_name());
	Ok(AlgorithmHandle::new(algorithm))
}
