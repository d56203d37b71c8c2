// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab

use rusthashlab::rhl::algorithm::Algorithm;
use rusthashlab::rhl::weak::{is_weak, metadata_for, warning_for};
use std::process::Command;

#[test]
fn registry_flags_sha1_only() {
	assert!(metadata_for(Algorithm::Sha1).is_some());
	assert!(is_weak(Algorithm::Sha1));
	for alg in [Algorithm::Sha256, Algorithm::Sha512, Algorithm::Blake2b] {
		assert!(warning_for(alg).is_none(), "{alg}");
	}
}

#[test]
fn cli_text_emits_single_warning_banner(
) -> Result<(), Box<dyn std::error::Error>> {
	let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("rhl"));
	cmd.env("NO_COLOR", "1")
		.args(["text", "-a", "sha1", "secret"]);
	let output = cmd.output()?;
	assert!(output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	let warning_lines: Vec<_> = stderr
		.lines()
		.filter(|line| line.contains("weak algorithm"))
		.collect();
	assert_eq!(
		warning_lines.len(),
		1,
		"expected single warning banner, got `{}`",
		stderr
	);
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("e5e9fa1ba31ecd1ae84f75caaa474f3a663f05f4"));
	Ok(())
}

#[test]
fn cli_sha256_stays_quiet() -> Result<(), Box<dyn std::error::Error>> {
	let output = Command::new(assert_cmd::cargo::cargo_bin("rhl"))
		.env("NO_COLOR", "1")
		.args(["text", "-a", "sha256", "secret"])
		.output()?;
	assert!(output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(!stderr.contains("weak algorithm"));
	Ok(())
}
