use std::env;

use argh::FromArgs;
use log::LevelFilter;

pub const DEFAULT_PROMPT: &str = "penn-sh> ";
pub const LOG_ENV: &str = "PENNSH_LOG";

/// Interactive shell that runs one foreground command or two-stage pipeline per line.
#[derive(FromArgs, Debug, PartialEq)]
pub struct Config {
	/// prompt written before each line is read
	#[argh(option, default = "String::from(DEFAULT_PROMPT)")]
	pub prompt: String,

	/// diagnostics written to stderr: off, error, warn, info, debug or trace (default: $PENNSH_LOG, else off)
	#[argh(option)]
	pub log_level: Option<LevelFilter>,
}

impl Config {
	pub fn level(&self) -> LevelFilter {
		self.log_level
			.or_else(|| env::var(LOG_ENV).ok().and_then(|v| v.parse().ok()))
			.unwrap_or(LevelFilter::Off)
	}
}
