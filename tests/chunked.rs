// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab

use proptest::prelude::*;
use rusthashlab::rhl::hash::{
	ProgressError, ProgressResult, DEFAULT_CHUNK_SIZE, MAX_READ_BUFFER,
};
use rusthashlab::{
	hash_bytes, hash_file_chunked, hash_reader, hash_text, Chunk,
	ChunkSource, HashLabError, TextSource,
};
use std::io::{self, Cursor, Read};

const ALGORITHMS: [&str; 4] = ["sha256", "sha1", "sha512", "blake2b"];

/// Deterministic byte generator that records the largest read request.
struct PatternReader {
	remaining: usize,
	next: u8,
	largest_request: usize,
}

impl PatternReader {
	fn new(len: usize) -> Self {
		Self {
			remaining: len,
			next: 0,
			largest_request: 0,
		}
	}
}

impl Read for PatternReader {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.largest_request = self.largest_request.max(buf.len());
		let count = buf.len().min(self.remaining);
		for byte in &mut buf[..count] {
			*byte = self.next;
			self.next = self.next.wrapping_mul(31).wrapping_add(7);
		}
		self.remaining -= count;
		Ok(count)
	}
}

/// Source delivering a fixed sequence of text and byte chunks.
struct MixedSource {
	chunks: Vec<Chunk<'static>>,
}

impl ChunkSource for MixedSource {
	fn read_chunk(&mut self, _max_len: usize) -> io::Result<Chunk<'_>> {
		if self.chunks.is_empty() {
			return Ok(Chunk::Bytes(&[]));
		}
		Ok(self.chunks.remove(0))
	}
}

#[test]
fn empty_stream_yields_empty_input_digest() {
	for alg in ALGORITHMS {
		let streamed = hash_reader(
			Cursor::new(Vec::<u8>::new()),
			alg,
			DEFAULT_CHUNK_SIZE,
			None,
		)
		.unwrap();
		assert_eq!(streamed, hash_text("", alg, "utf-8").unwrap());
	}
}

#[test]
fn reads_never_exceed_chunk_size() {
	let len = 4 * 1024 * 1024 + 17;
	let mut reader = PatternReader::new(len);
	let streamed = hash_reader(&mut reader, "sha256", 4096, None).unwrap();
	assert!(reader.largest_request <= 4096);

	let mut whole = vec![0u8; len];
	PatternReader::new(len).read_exact(&mut whole).unwrap();
	assert_eq!(streamed, hash_bytes(&whole, "sha256").unwrap());
}

#[test]
fn oversized_chunk_size_reads_in_bounded_pieces() {
	let expected = hash_bytes(b"abc", "sha256").unwrap();
	let streamed =
		hash_reader(Cursor::new(b"abc".to_vec()), "sha256", usize::MAX, None)
			.unwrap();
	assert_eq!(streamed, expected);

	let len = MAX_READ_BUFFER * 2 + 5;
	let mut reader = PatternReader::new(len);
	let streamed = hash_reader(&mut reader, "sha1", 1 << 40, None).unwrap();
	assert!(reader.largest_request <= MAX_READ_BUFFER);
	let mut whole = vec![0u8; len];
	PatternReader::new(len).read_exact(&mut whole).unwrap();
	assert_eq!(streamed, hash_bytes(&whole, "sha1").unwrap());
}

#[test]
fn text_chunks_are_hashed_as_utf8() {
	let mut source = MixedSource {
		chunks: vec![
			Chunk::Text("hola "),
			Chunk::Bytes(b"mun"),
			Chunk::Text("do ñ"),
		],
	};
	let digest = hash_file_chunked(&mut source, "blake2b", 3, None).unwrap();
	assert_eq!(digest, hash_text("hola mundo ñ", "blake2b", "utf-8").unwrap());
}

#[test]
fn failing_progress_callback_does_not_interrupt_hashing() {
	let data = vec![42u8; 10_000];
	let expected = hash_bytes(&data, "sha512").unwrap();
	let mut calls = 0;
	let mut failing = |_total: u64| -> ProgressResult {
		calls += 1;
		Err(ProgressError::from("display went away"))
	};
	let digest =
		hash_reader(Cursor::new(&data), "sha512", 1000, Some(&mut failing))
			.unwrap();
	assert_eq!(digest, expected);
	assert_eq!(calls, 10);
}

#[test]
fn panicking_progress_callback_does_not_interrupt_hashing() {
	let data = b"panic-tolerant progress".to_vec();
	let mut panicking = |total: u64| -> ProgressResult {
		panic!("progress bar exploded at {total}")
	};
	let digest =
		hash_reader(Cursor::new(&data), "sha1", 4, Some(&mut panicking))
			.unwrap();
	assert_eq!(digest, hash_bytes(&data, "sha1").unwrap());
}

#[test]
fn text_source_hashes_like_hash_text() {
	let text = "Les naïfs ægithales hâtifs pondant à Noël où il gèle";
	for alg in ALGORITHMS {
		let mut source = TextSource::new(text);
		let digest = hash_file_chunked(&mut source, alg, 5, None).unwrap();
		assert_eq!(digest, hash_text(text, alg, "utf-8").unwrap());
	}
}

#[test]
fn unsupported_algorithm_before_reading() {
	let mut reader = PatternReader::new(16);
	let err = hash_reader(&mut reader, "md999", 8, None).unwrap_err();
	assert!(matches!(err, HashLabError::UnsupportedAlgorithm(_)));
	assert_eq!(reader.largest_request, 0);
}

#[test]
fn concurrent_callers_agree() {
	let handles: Vec<_> = (0..8)
		.map(|i| {
			std::thread::spawn(move || {
				let data = vec![7u8; 50_000];
				hash_reader(Cursor::new(data), "blake2b", 100 + i, None).unwrap()
			})
		})
		.collect();
	let digests: Vec<String> =
		handles.into_iter().map(|h| h.join().unwrap()).collect();
	assert!(digests.windows(2).all(|pair| pair[0] == pair[1]));
}

proptest! {
	#[test]
	fn chunk_size_never_changes_the_digest(
		data in proptest::collection::vec(any::<u8>(), 0..2048),
		chunk_size in 1usize..300,
		alg in proptest::sample::select(ALGORITHMS.to_vec()),
	) {
		let expected = hash_bytes(&data, alg).unwrap();
		let streamed =
			hash_reader(Cursor::new(&data), alg, chunk_size, None).unwrap();
		prop_assert_eq!(streamed, expected);
	}

	#[test]
	fn text_streams_match_one_shot_hashing(
		text in "\\PC{0,200}",
		chunk_size in 1usize..40,
	) {
		let mut source = TextSource::new(&text);
		let streamed =
			hash_file_chunked(&mut source, "sha256", chunk_size, None).unwrap();
		prop_assert_eq!(streamed, hash_text(&text, "sha256", "utf-8").unwrap());
	}
}
