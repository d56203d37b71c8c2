// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: export.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Label/digest result sheets exported as CSV.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

/// Media type used for the `data:` URI.
pub const CSV_MIME: &str = "text/csv";

/// Failures while collecting or writing result entries.
#[derive(Debug, Error)]
pub enum ExportError {
	#[error("both a label and a hash are required")]
	MissingField,
	#[error("expected LABEL=HASH, got `{0}`")]
	Malformed(String),
	#[error("failed to write CSV: {0}")]
	Csv(#[from] csv::Error),
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// One CSV row: what was hashed and its digest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResultEntry {
	/// Free-form name such as a file name; never empty.
	pub label: String,
	/// Hex digest as printed by the other commands; never empty.
	pub hash: String,
}

impl ResultEntry {
	/// Parses a `LABEL=HASH` pair; the label may not contain `=`.
	pub fn parse(raw: &str) -> Result<Self, ExportError> {
		let (label, hash) = raw
			.split_once('=')
			.ok_or_else(|| ExportError::Malformed(raw.to_string()))?;
		let label = label.trim();
		let hash = hash.trim();
		if label.is_empty() || hash.is_empty() {
			return Err(ExportError::MissingField);
		}
		Ok(Self {
			label: label.to_string(),
			hash: hash.to_string(),
		})
	}
}

/// Ordered collection of results, exported as one CSV document.
#[derive(Clone, Debug, Default)]
pub struct ResultSheet {
	entries: Vec<ResultEntry>,
}

impl ResultSheet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an entry after the existing ones.
	pub fn push(&mut self, entry: ResultEntry) {
		self.entries.push(entry);
	}

	pub fn entries(&self) -> &[ResultEntry] {
		&self.entries
	}

	/// Writes a `label,hash` header followed by one row per entry.
	pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
		let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
		if self.entries.is_empty() {
			wtr.write_record(["label", "hash"])?;
		}
		for entry in &self.entries {
			wtr.serialize(entry)?;
		}
		wtr.flush()?;
		Ok(())
	}

	/// The CSV document as a string.
	pub fn to_csv(&self) -> Result<String, ExportError> {
		let mut buffer = Vec::new();
		self.write_csv(&mut buffer)?;
		Ok(String::from_utf8_lossy(&buffer).into_owned())
	}

	/// The CSV embedded in a base64 `data:` URI for download links.
	pub fn to_data_uri(&self) -> Result<String, ExportError> {
		let csv = self.to_csv()?;
		Ok(format!("data:{};base64,{}", CSV_MIME, STANDARD.encode(csv)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn csv_has_header_and_rows() {
		let mut sheet = ResultSheet::new();
		sheet.push(ResultEntry::parse("archivo.txt=abc123").unwrap());
		sheet.push(ResultEntry::parse(" with,comma = def456").unwrap());
		assert_eq!(
			sheet.to_csv().unwrap(),
			"label,hash\narchivo.txt,abc123\n\"with,comma\",def456\n"
		);
	}

	#[test]
	fn empty_sheet_still_has_header() {
		assert_eq!(ResultSheet::new().to_csv().unwrap(), "label,hash\n");
	}

	#[test]
	fn blank_fields_are_rejected() {
		assert!(matches!(
			ResultEntry::parse("=abc"),
			Err(ExportError::MissingField)
		));
		assert!(matches!(
			ResultEntry::parse("label=  "),
			Err(ExportError::MissingField)
		));
	}

	#[test]
	fn entries_parse_from_pairs() {
		let entry = ResultEntry::parse("notes.txt=ff00").unwrap();
		assert_eq!(entry.label, "notes.txt");
		assert_eq!(entry.hash, "ff00");
		assert!(matches!(
			ResultEntry::parse("no-separator"),
			Err(ExportError::Malformed(_))
		));
	}

	#[test]
	fn data_uri_wraps_base64_csv() {
		let mut sheet = ResultSheet::new();
		sheet.push(ResultEntry::parse("a=b").unwrap());
		let uri = sheet.to_data_uri().unwrap();
		let payload = uri.strip_prefix("data:text/csv;base64,").unwrap();
		let decoded = STANDARD.decode(payload).unwrap();
		assert_eq!(decoded, b"label,hash\na,b\n");
	}
}
