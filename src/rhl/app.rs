// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: app.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use crate::rhl::algorithm::{resolve, Algorithm, DEFAULT_ALGORITHM};
use crate::rhl::compare::compare;
use crate::rhl::config::Settings;
use crate::rhl::encoding::DEFAULT_ENCODING;
use crate::rhl::export::{ResultEntry, ResultSheet};
use crate::rhl::file::{
	admit, digest_admitted, FileHashPlan, ProgressConfig, ProgressEmitter,
	ProgressMode,
};
use crate::rhl::hash::{hash_text, ProgressResult};
use crate::rhl::hmac::hmac_text;
use crate::rhl::salt::{apply_pepper, apply_salt, decode_salt, generate_salt};
use crate::rhl::secret::{load_secret, SecretSource};
use crate::rhl::weak;
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use clap_complete::{generate, Shell};
use std::error::Error;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

/// How a successful run ends.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
	Success,
	/// `compare` found the two digests differ.
	Mismatch,
}

impl From<Status> for ExitCode {
	fn from(status: Status) -> Self {
		match status {
			Status::Success => ExitCode::SUCCESS,
			Status::Mismatch => ExitCode::from(1),
		}
	}
}

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
Written by {author-with-newline}{about-with-newline}
Primary command families:
  rhl text -a sha256 'hola mundo'       Hash a string
  rhl file -a blake2b ./notes.txt       Hash a file in chunks
  rhl salted / peppered / hmac          Salt, pepper and keyed hashing
  rhl compare <HASH1> <HASH2>           Constant-time digest comparison
{usage-heading} {usage}

{all-args}{after-help}
";

pub const GUIDE: &str = "\
Hashing best practices
- A hash is not encryption: the original text cannot be recovered from a digest.
- Salt: public, unique per entry, stored next to the digest. It defeats rainbow tables.
- Pepper: an extra secret kept outside the data store (environment, secret manager). Never commit it.
- HMAC: proves origin and integrity when the key is a shared secret.
- SHA-1: practical collisions are known. Do not rely on it for security.
- Passwords: use a slow key derivation function such as PBKDF2 or Argon2 with a salt
  and many iterations. This toolkit does not implement one.
";

fn algorithm_arg() -> Arg {
	Arg::new("algorithm")
		.short('a')
		.long("algorithm")
		.help("Digest algorithm (sha256, sha1, sha512, blake2b)")
		.default_value(DEFAULT_ALGORITHM)
}

fn encoding_arg() -> Arg {
	Arg::new("encoding")
		.short('e')
		.long("encoding")
		.help("Text encoding (utf-8, utf-16, utf-16-le, utf-16-be, latin-1, ascii)")
		.default_value(DEFAULT_ENCODING)
}

fn input_arg(help: &'static str) -> Arg {
	Arg::new("input").help(help).required(true)
}

pub fn build_cli() -> clap::Command {
	let settings = Settings::default();
	clap::Command::new(crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name("rhl")
		.version(clap::crate_version!())
		.author(clap::crate_authors!())
		.about("Hashing, salting, peppering and HMAC for learners")
		.subcommand_required(true)
		.arg_required_else_help(true)
		.subcommand(
			clap::Command::new("text")
				.about("Hash a provided string")
				.arg(algorithm_arg())
				.arg(encoding_arg())
				.arg(input_arg("String to hash")),
		)
		.subcommand(
			clap::Command::new("file")
				.about("Hash a file by streaming it in fixed-size chunks")
				.arg(algorithm_arg())
				.arg(
					Arg::new("chunk-size")
						.long("chunk-size")
						.value_parser(clap::value_parser!(usize))
						.help("Bytes read per chunk")
						.default_value(settings.chunk_size.to_string()),
				)
				.arg(
					Arg::new("max-size")
						.long("max-size")
						.value_parser(clap::value_parser!(u64))
						.help("Reject files larger than this many bytes")
						.default_value(settings.max_file_bytes.to_string()),
				)
				.arg(
					Arg::new("progress")
						.long("progress")
						.value_parser(clap::value_parser!(ProgressMode))
						.help("Show bytes read on stderr")
						.default_value("auto"),
				)
				.arg(
					Arg::new("path")
						.help("File to hash")
						.required(true)
						.value_parser(clap::value_parser!(PathBuf)),
				),
		)
		.subcommand(
			clap::Command::new("compare")
				.about("Compare two digests in constant time")
				.arg(Arg::new("first").help("First digest").required(true))
				.arg(Arg::new("second").help("Second digest").required(true)),
		)
		.subcommand(
			clap::Command::new("salt")
				.about("Generate a random base64 salt")
				.arg(
					Arg::new("length")
						.short('l')
						.long("length")
						.value_parser(clap::value_parser!(usize))
						.help("Salt length in bytes")
						.default_value(settings.salt_length.to_string()),
				),
		)
		.subcommand(
			clap::Command::new("salted")
				.about("Hash `salt$text`, generating a salt unless one is given")
				.arg(algorithm_arg())
				.arg(
					Arg::new("salt")
						.short('s')
						.long("salt")
						.help("Existing base64 salt to reuse"),
				)
				.arg(input_arg("String to salt and hash")),
		)
		.subcommand(
			clap::Command::new("peppered")
				.about("Hash `pepper$text` with a pepper from the environment or a file")
				.arg(algorithm_arg())
				.arg(
					Arg::new("pepper-env")
						.long("pepper-env")
						.help("Environment variable holding the pepper")
						.default_value(settings.pepper_env.clone()),
				)
				.arg(
					Arg::new("pepper-file")
						.long("pepper-file")
						.value_parser(clap::value_parser!(PathBuf))
						.help("File holding the pepper"),
				)
				.arg(input_arg("String to pepper and hash")),
		)
		.subcommand(
			clap::Command::new("hmac")
				.about("Compute an HMAC with a key from the environment, a file or stdin")
				.arg(algorithm_arg())
				.arg(encoding_arg())
				.arg(
					Arg::new("key-env")
						.long("key-env")
						.help("Environment variable holding the key")
						.default_value(settings.hmac_key_env.clone()),
				)
				.arg(
					Arg::new("key-file")
						.long("key-file")
						.value_parser(clap::value_parser!(PathBuf))
						.conflicts_with("key-stdin")
						.help("File holding the key"),
				)
				.arg(
					Arg::new("key-stdin")
						.long("key-stdin")
						.action(ArgAction::SetTrue)
						.help("Read the key from stdin"),
				)
				.arg(input_arg("Message to authenticate")),
		)
		.subcommand(
			clap::Command::new("export")
				.about("Export label/hash pairs as CSV")
				.arg(
					Arg::new("output")
						.short('o')
						.long("output")
						.value_parser(clap::value_parser!(PathBuf))
						.help("Write the CSV to this file instead of stdout"),
				)
				.arg(
					Arg::new("data-uri")
						.long("data-uri")
						.action(ArgAction::SetTrue)
						.conflicts_with("output")
						.help("Print a base64 data URI instead of raw CSV"),
				)
				.arg(
					Arg::new("entries")
						.help("Pairs in LABEL=HASH form")
						.num_args(1..)
						.required(true),
				),
		)
		.subcommand(
			clap::Command::new("algorithms")
				.about("List supported algorithms"),
		)
		.subcommand(
			clap::Command::new("guide")
				.about("Print hashing best-practice notes"),
		)
		.subcommand(
			clap::Command::new("completions")
				.about("Generate shell completion scripts")
				.arg(
					Arg::new("shell")
						.required(true)
						.value_parser(clap::value_parser!(Shell)),
				),
		)
}

/// Parses the command line and runs the selected subcommand.
pub fn run() -> Result<Status, Box<dyn Error>> {
	let matches = build_cli().get_matches();
	dispatch(&matches)
}

/// Runs a parsed subcommand. Only `compare` ends in something other
/// than [`Status::Success`] without an error.
pub fn dispatch(matches: &ArgMatches) -> Result<Status, Box<dyn Error>> {
	match matches.subcommand() {
		Some(("text", args)) => handle_text(args)?,
		Some(("file", args)) => handle_file(args)?,
		Some(("compare", args)) => return Ok(handle_compare(args)),
		Some(("salt", args)) => {
			let length = *args
				.get_one::<usize>("length")
				.expect("length has a default");
			println!("{}", generate_salt(length)?);
		}
		Some(("salted", args)) => handle_salted(args)?,
		Some(("peppered", args)) => handle_peppered(args)?,
		Some(("hmac", args)) => handle_hmac(args)?,
		Some(("export", args)) => handle_export(args)?,
		Some(("algorithms", _)) => {
			for alg in Algorithm::all() {
				let marker = if weak::is_weak(alg) { " (weak)" } else { "" };
				println!(
					"{:<8} {:<12} {:>3} hex chars{}",
					alg.identifier(),
					alg.display_name(),
					alg.hex_len(),
					marker
				);
			}
		}
		Some(("guide", _)) => print!("{}", GUIDE),
		Some(("completions", args)) => {
			let shell = *args
				.get_one::<Shell>("shell")
				.expect("shell is required");
			generate(shell, &mut build_cli(), "rhl", &mut io::stdout());
		}
		_ => {}
	}
	Ok(Status::Success)
}

fn string_arg<'a>(args: &'a ArgMatches, name: &str) -> &'a str {
	args.get_one::<String>(name)
		.map(String::as_str)
		.unwrap_or_default()
}

/// Resolves the algorithm up front and warns about weak choices.
fn checked_algorithm(args: &ArgMatches) -> Result<Algorithm, Box<dyn Error>> {
	let algorithm = resolve(string_arg(args, "algorithm"))?.algorithm();
	if let Some(message) = weak::warning_for(algorithm) {
		weak::emit_warning_banner(&message);
	}
	Ok(algorithm)
}

fn handle_text(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let algorithm = checked_algorithm(args)?;
	let digest = hash_text(
		string_arg(args, "input"),
		algorithm.identifier(),
		string_arg(args, "encoding"),
	)?;
	println!("{}", digest);
	eprintln!(
		"algorithm: {} | length: {} hex chars",
		algorithm.identifier(),
		digest.len()
	);
	Ok(())
}

fn handle_file(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let algorithm = checked_algorithm(args)?;
	let plan = FileHashPlan {
		path: args
			.get_one::<PathBuf>("path")
			.cloned()
			.expect("path is required"),
		algorithm: algorithm.identifier().to_string(),
		chunk_size: *args
			.get_one::<usize>("chunk-size")
			.expect("chunk-size has a default"),
		max_bytes: *args
			.get_one::<u64>("max-size")
			.expect("max-size has a default"),
	};
	let mode = *args
		.get_one::<ProgressMode>("progress")
		.expect("progress has a default");
	let config = ProgressConfig::new(mode);
	let show_progress = config.should_emit(io::stderr().is_terminal());
	let expected = admit(&plan.path, plan.max_bytes)?;
	let mut emitter = ProgressEmitter::new(config, expected);
	let mut record = |total: u64| -> ProgressResult { emitter.record(total) };
	let result = if show_progress {
		digest_admitted(&plan, expected, Some(&mut record))?
	} else {
		digest_admitted(&plan, expected, None)?
	};
	if show_progress {
		emitter.emit_final().map_err(|err| err as Box<dyn Error>)?;
	}
	println!("{} {}", result.digest, result.path.display());
	eprintln!(
		"algorithm: {} | size: {} bytes",
		result.algorithm, result.size_bytes
	);
	Ok(())
}

fn handle_compare(args: &ArgMatches) -> Status {
	let first = string_arg(args, "first").trim();
	let second = string_arg(args, "second").trim();
	if compare(first, second) {
		println!("match");
		Status::Success
	} else {
		println!("mismatch");
		Status::Mismatch
	}
}

fn handle_salted(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let algorithm = checked_algorithm(args)?;
	let salt = match args.get_one::<String>("salt") {
		Some(salt) => {
			decode_salt(salt)?;
			salt.trim().to_string()
		}
		None => generate_salt(Settings::default().salt_length)?,
	};
	let combined = apply_salt(string_arg(args, "input"), &salt);
	let digest =
		hash_text(&combined, algorithm.identifier(), DEFAULT_ENCODING)?;
	println!("salt: {}", salt);
	println!("digest: {}", digest);
	eprintln!("note: store the salt next to the digest to verify later");
	Ok(())
}

fn handle_peppered(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let algorithm = checked_algorithm(args)?;
	let source = match args.get_one::<PathBuf>("pepper-file") {
		Some(path) => SecretSource::File(path.clone()),
		None => SecretSource::Env(string_arg(args, "pepper-env").to_string()),
	};
	let pepper = load_secret(&source, "pepper")?;
	let combined = apply_pepper(string_arg(args, "input"), pepper.expose());
	let digest =
		hash_text(&combined, algorithm.identifier(), DEFAULT_ENCODING)?;
	println!("{}", digest);
	Ok(())
}

fn handle_hmac(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let algorithm = checked_algorithm(args)?;
	let source = if args.get_flag("key-stdin") {
		SecretSource::Stdin
	} else if let Some(path) = args.get_one::<PathBuf>("key-file") {
		SecretSource::File(path.clone())
	} else {
		SecretSource::Env(string_arg(args, "key-env").to_string())
	};
	let key = load_secret(&source, "HMAC key")?;
	let mac = hmac_text(
		string_arg(args, "input"),
		key.expose(),
		algorithm.identifier(),
		string_arg(args, "encoding"),
	)?;
	println!("{}", mac);
	Ok(())
}

fn handle_export(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let mut sheet = ResultSheet::new();
	for raw in args.get_many::<String>("entries").into_iter().flatten() {
		sheet.push(ResultEntry::parse(raw)?);
	}
	if args.get_flag("data-uri") {
		println!("{}", sheet.to_data_uri()?);
	} else if let Some(path) = args.get_one::<PathBuf>("output") {
		sheet.write_csv(File::create(path)?)?;
		eprintln!(
			"wrote {} entries to {}",
			sheet.entries().len(),
			path.display()
		);
	} else {
		sheet.write_csv(io::stdout().lock())?;
	}
	Ok(())
}
