use std::io;
use std::io::Write;
use std::process;

use log::{LevelFilter,Log,Metadata,Record};

/// `log` backend for stderr. Stdout belongs to the prompt, the diagnostics
/// and the children.
struct StderrLogger;

impl Log for StderrLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		let _ = writeln!(io::stderr(), "[{} {} {}] {}",
		                 record.level(), record.target(), process::id(), record.args());
	}

	fn flush(&self) {
		let _ = io::stderr().flush();
	}
}

static LOGGER: StderrLogger = StderrLogger;

pub fn init(level: LevelFilter) {
	if log::set_logger(&LOGGER).is_ok() {
		log::set_max_level(level);
	}
}
