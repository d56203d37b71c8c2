// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: rusthashlab
// File: main.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use env_logger::Env;
use rusthashlab::rhl::app;
use std::process::ExitCode;

fn main() -> ExitCode {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
		.init();
	match app::run() {
		Ok(status) => status.into(),
		Err(err) => {
			eprintln!("error: {}", err);
			ExitCode::from(2)
		}
	}
}
