mod check;
mod config;
mod error;
mod eval;
mod global;
mod input;
mod job;
mod logger;
mod parser;
mod plan;
mod redirect;
mod types;

use std::io;
use std::io::Write;
use std::process;

use log::{debug,error};

use crate::config::Config;
use crate::error::ShellError;
use crate::eval::EvalResult;

fn run(config: &Config) -> Result<(), ShellError> {
	global::install()?;
	let mut stdout = io::stdout();
	let mut reader = input::LineReader::new(libc::STDIN_FILENO);
	loop {
		global::disarm();
		stdout.write_all(config.prompt.as_bytes())?;
		stdout.flush()?;
		let line = match reader.read_line()? {
			Some(line) => line,
			None => {
				stdout.write_all(b"\n")?;
				stdout.flush()?;
				return Ok(());
			},
		};
		let mut tokens = parser::tokenize(&line);
		if tokens.is_empty() {
			continue;
		}
		match eval::eval(&mut tokens)? {
			EvalResult::Rejected(e) => {
				writeln!(stdout, "{}", e)?;
				stdout.flush()?;
			},
			EvalResult::Done(job) => debug!("exit code {:?}", job.code()),
		}
	}
}

fn main() {
	let config: Config = argh::from_env();
	logger::init(config.level());
	if let Err(e) = run(&config) {
		error!("{}", e);
		let _ = writeln!(io::stderr(), "{}", e);
		process::exit(1);
	}
}
