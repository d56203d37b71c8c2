// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: encoding.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Text-to-bytes encodings accepted by the text hashing and HMAC helpers.

use crate::rhl::error::{HashLabError, Result};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ENCODING: &str = "utf-8";

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextEncoding {
	Utf8,
	/// Little-endian with a leading byte-order mark.
	Utf16,
	Utf16Le,
	Utf16Be,
	Latin1,
	Ascii,
}

impl TextEncoding {
	pub fn label(self) -> &'static str {
		match self {
			Self::Utf8 => "utf-8",
			Self::Utf16 => "utf-16",
			Self::Utf16Le => "utf-16-le",
			Self::Utf16Be => "utf-16-be",
			Self::Latin1 => "latin-1",
			Self::Ascii => "ascii",
		}
	}

	/// Encodes `text`, borrowing it unchanged when the encoding is UTF-8.
	pub fn encode<'a>(self, text: &'a str) -> Result<Cow<'a, [u8]>> {
		match self {
			Self::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
			Self::Utf16 => {
				let mut out =
					Vec::with_capacity(2 + text.len() * 2);
				out.extend_from_slice(&UTF16_LE_BOM);
				out.extend(
					text.encode_utf16().flat_map(u16::to_le_bytes),
				);
				Ok(Cow::Owned(out))
			}
			Self::Utf16Le => Ok(Cow::Owned(
				text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
			)),
			Self::Utf16Be => Ok(Cow::Owned(
				text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
			)),
			Self::Latin1 => self.encode_single_byte(text, 0xFF),
			Self::Ascii => {
				if text.is_ascii() {
					Ok(Cow::Borrowed(text.as_bytes()))
				} else {
					self.encode_single_byte(text, 0x7F)
				}
			}
		}
	}

	fn encode_single_byte<'a>(
		self,
		text: &'a str,
		max: u32,
	) -> Result<Cow<'a, [u8]>> {
		let mut out = Vec::with_capacity(text.len());
		for (position, character) in text.chars().enumerate() {
			let code = u32::from(character);
			if code > max {
				return Err(HashLabError::Unencodable {
					encoding: self.label(),
					character,
					position,
				});
			}
			out.push(code as u8);
		}
		Ok(Cow::Owned(out))
	}
}

impl Default for TextEncoding {
	fn default() -> Self {
		Self::Utf8
	}
}

impl fmt::Display for TextEncoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

impl FromStr for TextEncoding {
	type Err = HashLabError;

	fn from_str(raw: &str) -> Result<Self> {
		let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
		match normalized.as_str() {
			"utf-8" | "utf8" => Ok(Self::Utf8),
			"utf-16" | "utf16" => Ok(Self::Utf16),
			"utf-16-le" | "utf-16le" | "utf16le" => Ok(Self::Utf16Le),
			"utf-16-be" | "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
			"latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => {
				Ok(Self::Latin1)
			}
			"ascii" | "us-ascii" => Ok(Self::Ascii),
			_ => Err(HashLabError::UnsupportedEncoding(raw.to_string())),
		}
	}
}
