// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: lib.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

pub mod rhl {
	pub mod algorithm;
	pub mod app;
	pub mod compare;
	pub mod config;
	pub mod encoding;
	pub mod error;
	pub mod export;
	pub mod file;
	pub mod hash;
	pub mod hmac;
	pub mod salt;
	pub mod secret;
	pub mod weak;
}

pub use rhl::algorithm::{resolve, Algorithm, AlgorithmHandle};
pub use rhl::compare::compare;
pub use rhl::error::{HashLabError, Result};
pub use rhl::hash::{
	hash_bytes, hash_file_chunked, hash_reader, hash_text, Chunk,
	ChunkSource, ReadSource, TextSource,
};
pub use rhl::hmac::{hmac_bytes, hmac_text};
pub use rhl::salt::{apply_pepper, apply_salt, generate_salt};
