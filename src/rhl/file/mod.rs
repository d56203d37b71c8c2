// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: mod.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! File hashing with size admission control ahead of the chunked reader.

pub mod progress;

use crate::rhl::algorithm::resolve;
use crate::rhl::error::HashLabError;
use crate::rhl::hash::{hash_reader, ProgressFn};
use log::debug;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use progress::{ProgressConfig, ProgressEmitter, ProgressMode};

#[derive(Debug, Error)]
pub enum FileError {
	#[error("file too large: {size} bytes > {limit} bytes")]
	TooLarge { size: u64, limit: u64 },
	#[error("`{0}` is not a regular file")]
	NotAFile(PathBuf),
	#[error("failed to access `{path}`: {source}")]
	Io { path: PathBuf, source: io::Error },
	#[error(transparent)]
	Hash(#[from] HashLabError),
}

/// What to hash and under which limits.
#[derive(Clone, Debug)]
pub struct FileHashPlan {
	pub path: PathBuf,
	pub algorithm: String,
	pub chunk_size: usize,
	pub max_bytes: u64,
}

/// Outcome of hashing one file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileDigest {
	pub path: PathBuf,
	pub algorithm: String,
	pub size_bytes: u64,
	pub digest: String,
}

/// Returns the file size if `path` is a regular file within `limit`.
pub fn admit(path: &Path, limit: u64) -> Result<u64, FileError> {
	let metadata = std::fs::metadata(path).map_err(|source| {
		FileError::Io {
			path: path.to_path_buf(),
			source,
		}
	})?;
	if !metadata.is_file() {
		return Err(FileError::NotAFile(path.to_path_buf()));
	}
	let size = metadata.len();
	if size > limit {
		return Err(FileError::TooLarge { size, limit });
	}
	Ok(size)
}

/// Admits and hashes the planned file without loading it into memory.
pub fn digest_file(
	plan: &FileHashPlan,
	on_progress: Option<ProgressFn<'_>>,
) -> Result<FileDigest, FileError> {
	resolve(&plan.algorithm)?;
	let size_bytes = admit(&plan.path, plan.max_bytes)?;
	digest_admitted(plan, size_bytes, on_progress)
}

/// Hashes a file that already passed [`admit`], reporting `size_bytes`.
pub fn digest_admitted(
	plan: &FileHashPlan,
	size_bytes: u64,
	on_progress: Option<ProgressFn<'_>>,
) -> Result<FileDigest, FileError> {
	let handle = resolve(&plan.algorithm)?;
	debug!(
		"hashing {} ({} bytes) with {}",
		plan.path.display(),
		size_bytes,
		handle.algorithm()
	);
	let file = File::open(&plan.path).map_err(|source| FileError::Io {
		path: plan.path.clone(),
		source,
	})?;
	let digest = hash_reader(
		BufReader::new(file),
		handle.algorithm().identifier(),
		plan.chunk_size,
		on_progress,
	)?;
	Ok(FileDigest {
		path: plan.path.clone(),
		algorithm: handle.algorithm().identifier().to_string(),
		size_bytes,
		digest,
	})
}
