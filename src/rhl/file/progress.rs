// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: progress.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use crate::rhl::hash::ProgressResult;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// When to print progress lines while a file is hashed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
	/// Only when stderr is a terminal.
	Auto,
	Enabled,
	Disabled,
}

#[derive(Clone, Copy, Debug)]
pub struct ProgressConfig {
	pub mode: ProgressMode,
	pub throttle: Duration,
}

impl ProgressConfig {
	pub fn new(mode: ProgressMode) -> Self {
		Self {
			mode,
			throttle: Duration::from_millis(200),
		}
	}

	/// Resolves `Auto` against whether stderr is a terminal.
	pub fn should_emit(&self, is_tty: bool) -> bool {
		match self.mode {
			ProgressMode::Disabled => false,
			ProgressMode::Enabled => true,
			ProgressMode::Auto => is_tty,
		}
	}
}

/// Renders byte-count progress for a single file to stderr.
pub struct ProgressEmitter {
	config: ProgressConfig,
	expected_bytes: u64,
	processed_bytes: u64,
	last_emit: Option<Instant>,
	start: Instant,
}

impl ProgressEmitter {
	pub fn new(config: ProgressConfig, expected_bytes: u64) -> Self {
		Self {
			config,
			expected_bytes,
			processed_bytes: 0,
			last_emit: None,
			start: Instant::now(),
		}
	}

	/// Records the running total; suitable as a hashing progress callback.
	pub fn record(&mut self, total: u64) -> ProgressResult {
		self.processed_bytes = total;
		self.maybe_emit()
	}

	/// Completed fraction in percent, capped at 100.
	pub fn percent(&self) -> u8 {
		if self.expected_bytes == 0 {
			return 100;
		}
		let ratio =
			self.processed_bytes as f64 / self.expected_bytes as f64;
		(ratio.min(1.0) * 100.0) as u8
	}

	pub fn maybe_emit(&mut self) -> ProgressResult {
		if let Some(last) = self.last_emit {
			if last.elapsed() < self.config.throttle {
				return Ok(());
			}
		}
		self.emit_message()
	}

	/// Prints the closing line regardless of the throttle.
	pub fn emit_final(&mut self) -> ProgressResult {
		self.emit_message()
	}

	pub fn message(&self) -> String {
		let elapsed = self.start.elapsed().as_secs_f64().max(0.001);
		let throughput = (self.processed_bytes as f64) / elapsed;
		format!(
			"{} bytes read ({}%, {:.1} KiB/s)",
			self.processed_bytes,
			self.percent(),
			throughput / 1024.0,
		)
	}

	fn emit_message(&mut self) -> ProgressResult {
		self.last_emit = Some(Instant::now());
		writeln!(io::stderr(), "{}", self.message())?;
		Ok(())
	}
}
