// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: secret.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Loading peppers and HMAC keys from environment variables, files or
//! stdin. Secrets stay in zeroizing buffers and are never printed.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum SecretError {
	#[error("{kind} not configured: environment variable `{var}` is unset")]
	MissingEnv { kind: &'static str, var: String },
	#[error("environment variable `{0}` does not hold valid UTF-8")]
	NotUnicode(String),
	#[error("failed to read {kind} from `{path}`: {source}")]
	File {
		kind: &'static str,
		path: PathBuf,
		source: io::Error,
	},
	#[error("failed to read {kind} from stdin: {source}")]
	Stdin {
		kind: &'static str,
		source: io::Error,
	},
	#[error("{0} must not be empty")]
	Empty(&'static str),
}

/// Where a secret is read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SecretSource {
	/// Name of an environment variable holding the value.
	Env(String),
	/// File whose contents, minus trailing newlines, are the value.
	File(PathBuf),
	/// Standard input, read to the end.
	Stdin,
}

/// Secret text held in memory that is wiped on drop.
pub struct Secret {
	inner: Zeroizing<String>,
}

impl Secret {
	/// Borrows the secret text for the single operation that needs it.
	pub fn expose(&self) -> &str {
		self.inner.as_str()
	}
}

impl fmt::Debug for Secret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Secret(****)")
	}
}

/// Loads a secret, labelled `kind` ("pepper", "HMAC key") in errors.
pub fn load_secret(
	source: &SecretSource,
	kind: &'static str,
) -> Result<Secret, SecretError> {
	let value = match source {
		SecretSource::Env(var) => match std::env::var(var) {
			Ok(value) => Zeroizing::new(value),
			Err(std::env::VarError::NotPresent) => {
				return Err(SecretError::MissingEnv {
					kind,
					var: var.clone(),
				})
			}
			Err(std::env::VarError::NotUnicode(_)) => {
				return Err(SecretError::NotUnicode(var.clone()))
			}
		},
		SecretSource::File(path) => {
			let raw = fs::read_to_string(path).map_err(|source| {
				SecretError::File {
					kind,
					path: path.clone(),
					source,
				}
			})?;
			strip_line_ending(Zeroizing::new(raw))
		}
		SecretSource::Stdin => {
			let mut raw = Zeroizing::new(String::new());
			io::stdin()
				.read_to_string(&mut raw)
				.map_err(|source| SecretError::Stdin { kind, source })?;
			strip_line_ending(raw)
		}
	};
	if value.is_empty() {
		return Err(SecretError::Empty(kind));
	}
	Ok(Secret { inner: value })
}

fn strip_line_ending(mut raw: Zeroizing<String>) -> Zeroizing<String> {
	while raw.ends_with('\n') || raw.ends_with('\r') {
		raw.pop();
	}
	raw
}
