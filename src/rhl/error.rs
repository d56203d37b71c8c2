// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: error.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Error taxonomy shared by the digest, salt, HMAC and comparison helpers.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HashLabError>;

#[derive(Debug, Error)]
pub enum HashLabError {
	#[error("unsupported algorithm `{0}` (expected one of sha256, sha1, sha512, blake2b)")]
	UnsupportedAlgorithm(String),
	#[error("unsupported text encoding `{0}`")]
	UnsupportedEncoding(String),
	#[error("character {character:?} at position {position} cannot be encoded as {encoding}")]
	Unencodable {
		encoding: &'static str,
		character: char,
		position: usize,
	},
	#[error("invalid input: {0}")]
	InvalidInput(String),
	#[error("secure random source failed: {0}")]
	Randomness(String),
	#[error("failed to read input stream: {0}")]
	Io(#[from] io::Error),
}

impl HashLabError {
	pub fn invalid_input(message: impl Into<String>) -> Self {
		Self::InvalidInput(message.into())
	}
}
