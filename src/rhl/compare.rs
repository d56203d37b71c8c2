// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: compare.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use subtle::ConstantTimeEq;

/// Constant-time string equality.
///
/// Running time depends only on the input lengths, never on where the
/// first differing byte sits. Inputs of different length compare unequal.
pub fn compare(a: &str, b: &str) -> bool {
	a.as_bytes().ct_eq(b.as_bytes()).into()
}
