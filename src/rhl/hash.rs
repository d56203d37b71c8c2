// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: hash.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Digest engine: one-shot text hashing and chunked stream hashing.

use crate::rhl::algorithm::resolve;
use crate::rhl::encoding::TextEncoding;
use crate::rhl::error::{HashLabError, Result};
use log::{trace, warn};
use std::io::{self, Read};
use std::panic::{self, AssertUnwindSafe};

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Upper bound on the buffer a [`ReadSource`] allocates for one read.
pub const MAX_READ_BUFFER: usize = 1 << 20;

/// Error type a progress callback may report. It is never propagated.
pub type ProgressError = Box<dyn std::error::Error + Send + Sync>;

pub type ProgressResult = std::result::Result<(), ProgressError>;

/// Progress callback receiving the cumulative number of bytes hashed.
pub type ProgressFn<'a> = &'a mut dyn FnMut(u64) -> ProgressResult;

/// A single read from a [`ChunkSource`]. An empty chunk means end of data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Chunk<'a> {
	Bytes(&'a [u8]),
	Text(&'a str),
}

impl<'a> Chunk<'a> {
	/// Raw bytes of the chunk; text is taken as UTF-8.
	pub fn as_bytes(&self) -> &'a [u8] {
		match *self {
			Chunk::Bytes(bytes) => bytes,
			Chunk::Text(text) => text.as_bytes(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.as_bytes().is_empty()
	}
}

/// Sequential source consumed in bounded reads.
pub trait ChunkSource {
	/// Returns the next chunk of at most `max_len` units, or an empty
	/// chunk once the source is exhausted.
	fn read_chunk(&mut self, max_len: usize) -> io::Result<Chunk<'_>>;
}

/// Adapts any [`Read`] into a byte [`ChunkSource`], reusing one buffer.
///
/// A single read is capped at [`MAX_READ_BUFFER`] bytes no matter how
/// large a chunk is requested.
pub struct ReadSource<R> {
	reader: R,
	buffer: Vec<u8>,
}

impl<R: Read> ReadSource<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			buffer: Vec::new(),
		}
	}
}

impl<R: Read> ChunkSource for ReadSource<R> {
	fn read_chunk(&mut self, max_len: usize) -> io::Result<Chunk<'_>> {
		let capacity = max_len.min(MAX_READ_BUFFER);
		if self.buffer.len() != capacity {
			self.buffer.resize(capacity, 0);
		}
		let count = loop {
			match self.reader.read(&mut self.buffer) {
				Ok(count) => break count,
				Err(err) if err.kind() == io::ErrorKind::Interrupted => {
					continue
				}
				Err(err) => return Err(err),
			}
		};
		Ok(Chunk::Bytes(&self.buffer[..count]))
	}
}

/// Text stream over a borrowed string, yielding up to `max_len`
/// characters per read.
#[derive(Clone, Debug)]
pub struct TextSource<'a> {
	remaining: &'a str,
}

impl<'a> TextSource<'a> {
	pub fn new(text: &'a str) -> Self {
		Self { remaining: text }
	}
}

impl ChunkSource for TextSource<'_> {
	fn read_chunk(&mut self, max_len: usize) -> io::Result<Chunk<'_>> {
		let split = self
			.remaining
			.char_indices()
			.nth(max_len)
			.map_or(self.remaining.len(), |(index, _)| index);
		let (head, tail) = self.remaining.split_at(split);
		self.remaining = tail;
		Ok(Chunk::Text(head))
	}
}

/// Hashes `text` after encoding it, in a single update.
pub fn hash_text(
	text: &str,
	algorithm: &str,
	encoding: &str,
) -> Result<String> {
	let handle = resolve(algorithm)?;
	let encoding = encoding.parse::<TextEncoding>()?;
	let bytes = encoding.encode(text)?;
	let mut accumulator = handle.accumulator();
	accumulator.update(&bytes);
	Ok(accumulator.finalize_hex())
}

pub fn hash_bytes(data: &[u8], algorithm: &str) -> Result<String> {
	let mut accumulator = resolve(algorithm)?.accumulator();
	accumulator.update(data);
	Ok(accumulator.finalize_hex())
}

/// Hashes everything `source` yields, `chunk_size` units at a time.
///
/// `on_progress` is called with the running byte total after every
/// chunk. Whatever it returns or raises stays inside the progress
/// boundary: failures are logged and hashing carries on.
pub fn hash_file_chunked<S>(
	source: &mut S,
	algorithm: &str,
	chunk_size: usize,
	mut on_progress: Option<ProgressFn<'_>>,
) -> Result<String>
where
	S: ChunkSource + ?Sized,
{
	let handle = resolve(algorithm)?;
	if chunk_size == 0 {
		return Err(HashLabError::invalid_input(
			"chunk size must be greater than zero",
		));
	}
	let mut accumulator = handle.accumulator();
	let mut total: u64 = 0;
	loop {
		let chunk = source.read_chunk(chunk_size)?;
		if chunk.is_empty() {
			break;
		}
		let bytes = chunk.as_bytes();
		accumulator.update(bytes);
		total += bytes.len() as u64;
		trace!("hashed chunk of {} bytes ({} total)", bytes.len(), total);
		if let Some(callback) = on_progress.as_deref_mut() {
			notify_progress(callback, total);
		}
	}
	Ok(accumulator.finalize_hex())
}

/// Convenience wrapper for [`hash_file_chunked`] over a [`Read`].
pub fn hash_reader<R: Read>(
	reader: R,
	algorithm: &str,
	chunk_size: usize,
	on_progress: Option<ProgressFn<'_>>,
) -> Result<String> {
	let mut source = ReadSource::new(reader);
	hash_file_chunked(&mut source, algorithm, chunk_size, on_progress)
}

fn notify_progress(
	callback: &mut dyn FnMut(u64) -> ProgressResult,
	total: u64,
) {
	match panic::catch_unwind(AssertUnwindSafe(|| callback(total))) {
		Ok(Ok(())) => {}
		Ok(Err(err)) => {
			warn!("progress callback failed at {} bytes: {}", total, err)
		}
		Err(_) => warn!("progress callback panicked at {} bytes", total),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn text_source_splits_on_character_boundaries() {
		let mut source = TextSource::new("añb€");
		assert_eq!(source.read_chunk(2).unwrap(), Chunk::Text("añ"));
		assert_eq!(source.read_chunk(2).unwrap(), Chunk::Text("b€"));
		assert!(source.read_chunk(2).unwrap().is_empty());
	}

	#[test]
	fn read_source_honours_max_len() {
		let mut source = ReadSource::new(Cursor::new(vec![7u8; 10]));
		assert_eq!(source.read_chunk(4).unwrap().as_bytes().len(), 4);
		assert_eq!(source.read_chunk(4).unwrap().as_bytes().len(), 4);
		assert_eq!(source.read_chunk(4).unwrap().as_bytes().len(), 2);
		assert!(source.read_chunk(4).unwrap().is_empty());
	}

	#[test]
	fn zero_chunk_size_is_invalid_input() {
		let mut source = ReadSource::new(Cursor::new(b"abc".to_vec()));
		let err = hash_file_chunked(&mut source, "sha256", 0, None)
			.unwrap_err();
		assert!(matches!(err, HashLabError::InvalidInput(_)));
	}

	#[test]
	fn unsupported_algorithm_wins_over_chunk_validation() {
		let mut source = TextSource::new("abc");
		let err =
			hash_file_chunked(&mut source, "md999", 0, None).unwrap_err();
		assert!(matches!(err, HashLabError::UnsupportedAlgorithm(_)));
	}

	#[test]
	fn progress_reports_running_totals() {
		let mut seen = Vec::new();
		let mut record = |total: u64| -> ProgressResult {
			seen.push(total);
			Ok(())
		};
		hash_reader(
			Cursor::new(vec![0u8; 10]),
			"sha1",
			4,
			Some(&mut record),
		)
		.unwrap();
		assert_eq!(seen, vec![4, 8, 10]);
	}

	#[test]
	fn io_errors_surface_to_the_caller() {
		struct Broken;
		impl Read for Broken {
			fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
				Err(io::Error::other("disk gone"))
			}
		}
		let err = hash_reader(Broken, "sha256", 16, None).unwrap_err();
		assert!(matches!(err, HashLabError::Io(_)));
	}
}
