use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;

use log::debug;
use nix::unistd;

use crate::check;
use crate::error::{StageError,SyntaxError};
use crate::types::{Command,Operator,Redirect,RedirectType,Stage,TokenList};

/// Pick the redirects out of a stage. Operators and their file names are
/// dropped from the argument vector; everything else is kept in order.
pub fn resolve<'a>(tokens: &'a TokenList, stage: &Stage) -> Result<Command<'a>, SyntaxError> {
	if !check::redirects_agree(tokens, stage.range.clone()) {
		return Err(SyntaxError::Redirection);
	}

	let mut arguments: Vec<&'a [u8]> = vec![];
	let mut redirects: Vec<Redirect<'a>> = vec![];
	let mut i = stage.range.start;
	while i < stage.range.end {
		let typ = match tokens.operator(i) {
			Some(Operator::Input) => RedirectType::Input,
			Some(Operator::Output) => RedirectType::Output,
			_ => {
				if let Some(word) = tokens.get(i) {
					arguments.push(word);
				}
				i += 1;
				continue;
			},
		};
		let target = match tokens.get(i + 1) {
			Some(t) if i + 1 < stage.range.end && Operator::of(t).is_none() => t,
			_ => { return Err(SyntaxError::Redirection); },
		};
		redirects.push(Redirect { target, from: typ.stream(), typ });
		i += 2;
	}
	Ok(Command { arguments, redirects })
}

fn open(redirect: &Redirect) -> Result<fs::File, StageError> {
	let path = OsStr::from_bytes(redirect.target);
	let mut oopt = fs::OpenOptions::new();
	match redirect.typ {
		RedirectType::Input => oopt.read(true).open(path).map_err(|e| StageError::OpenInput {
			path: path.to_string_lossy().into_owned(),
			source: e,
		}),
		RedirectType::Output => oopt.write(true).create(true).truncate(true).mode(0o644).open(path).map_err(|e| StageError::OpenOutput {
			path: path.to_string_lossy().into_owned(),
			source: e,
		}),
	}
}

/// Rebind the current process's standard streams. Runs in the child,
/// after any pipe ends are in place, so a file always wins.
pub fn apply(command: &Command) -> Result<(), StageError> {
	for redirect in &command.redirects {
		let file = open(redirect)?;
		unistd::dup2(file.as_raw_fd(), redirect.from).map_err(StageError::Dup)?;
		debug!("fd {} <- {}", redirect.from, OsStr::from_bytes(redirect.target).to_string_lossy());
	}
	Ok(())
}
