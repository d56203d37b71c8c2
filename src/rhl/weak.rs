// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// Module: weak algorithm warnings helper
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Warnings for supported algorithms that should not protect anything
//! important.

use crate::rhl::algorithm::Algorithm;
use colored::Colorize;

const NIST_REFERENCE: &str = "https://doi.org/10.6028/NIST.SP.800-131Ar2";
const SHATTERED_REFERENCE: &str = "https://shattered.io/";

const REFERENCES: &[&str] = &[NIST_REFERENCE, SHATTERED_REFERENCE];

/// A supported algorithm flagged as weak, with what to use instead.
#[derive(Debug, Clone)]
pub struct WeakAlgorithmMetadata {
	pub algorithm: Algorithm,
	/// Suggested replacements, shown in the warning body.
	pub replacement_hint: &'static str,
}

/// Warning text rendered before a weak algorithm is used.
#[derive(Debug, Clone)]
pub struct WarningMessage {
	pub severity_icon: &'static str,
	pub headline: String,
	pub body: String,
	/// Published advisories backing the warning.
	pub references: &'static [&'static str],
}

impl WarningMessage {
	/// Icon, headline and body on a single line.
	pub fn banner(&self) -> String {
		format!("{} {} {}", self.severity_icon, self.headline, self.body)
	}
}

const WEAK_ALGORITHMS: &[WeakAlgorithmMetadata] = &[WeakAlgorithmMetadata {
	algorithm: Algorithm::Sha1,
	replacement_hint: "Use SHA-256, SHA-512 or BLAKE2b",
}];

/// Weak-algorithm entry for `algorithm`, if it has one.
pub fn metadata_for(
	algorithm: Algorithm,
) -> Option<&'static WeakAlgorithmMetadata> {
	WEAK_ALGORITHMS.iter().find(|entry| entry.algorithm == algorithm)
}

/// Whether `algorithm` should carry a warning.
pub fn is_weak(algorithm: Algorithm) -> bool {
	metadata_for(algorithm).is_some()
}

/// Builds the warning for `algorithm`, or `None` when it is not weak.
pub fn warning_for(algorithm: Algorithm) -> Option<WarningMessage> {
	let metadata = metadata_for(algorithm)?;
	Some(WarningMessage {
		severity_icon: "⚠",
		headline: format!(
			"WARNING: {} is a weak algorithm (collisions known)",
			algorithm.display_name()
		),
		body: format!(
			"Do not use it where security matters. {}.",
			metadata.replacement_hint
		),
		references: REFERENCES,
	})
}

/// Prints the banner and references to stderr.
pub fn emit_warning_banner(message: &WarningMessage) {
	let references = message.references.join(" | ");
	eprintln!("{}", message.banner().yellow().bold());
	eprintln!("{}", format!("References: {}", references).yellow());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_sha1_is_flagged() {
		let flagged: Vec<_> =
			Algorithm::all().filter(|alg| is_weak(*alg)).collect();
		assert_eq!(flagged, vec![Algorithm::Sha1]);
	}

	#[test]
	fn sha1_banner_names_the_algorithm() {
		let warning = warning_for(Algorithm::Sha1).unwrap();
		assert!(warning.banner().contains("SHA-1"));
		assert!(warning.body.contains("SHA-256"));
		assert!(warning_for(Algorithm::Blake2b).is_none());
	}
}
