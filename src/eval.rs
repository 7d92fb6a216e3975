use std::convert::Infallible;
use std::ffi::{CString,OsStr};
use std::io;
use std::io::Write;
use std::os::fd::OwnedFd;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd,RawFd};

use log::{debug,error};
use nix::fcntl::OFlag;
use nix::unistd::{self,ForkResult};

use crate::check;
use crate::error::{ShellError,StageError,SyntaxError};
use crate::global;
use crate::job::{Job,JobBuilder};
use crate::plan;
use crate::redirect;
use crate::types::{Stage,TokenList};

fn do_exec_stage(tokens: &TokenList, stage: &Stage, pipe_stdin: Option<RawFd>, pipe_stdout: Option<RawFd>) -> Result<Infallible, StageError> {
	let command = redirect::resolve(tokens, stage)?;
	if let Some(fd) = pipe_stdout {
		unistd::dup2(fd, libc::STDOUT_FILENO).map_err(StageError::Dup)?;
	}
	if let Some(fd) = pipe_stdin {
		unistd::dup2(fd, libc::STDIN_FILENO).map_err(StageError::Dup)?;
	}
	redirect::apply(&command)?;

	if command.name().is_none() {
		return Err(StageError::Empty);
	}
	let argv: Result<Vec<CString>, _> = command.arguments.iter().map(|&s| CString::new(s)).collect();
	let argv: Vec<CString> = argv?;
	let name = &argv[0];
	match unistd::execvp(name, &argv) {
		Ok(never) => match never {},
		Err(e) => Err(StageError::Exec {
			name: OsStr::from_bytes(name.as_bytes()).to_string_lossy().into_owned(),
			source: e,
		}),
	}
}

/// Body of a forked child. Never returns into shell logic.
fn exec_stage(tokens: &TokenList, stage: &Stage, pipe_stdin: Option<RawFd>, pipe_stdout: Option<RawFd>) -> ! {
	let _ = global::reset_child_signals();
	let e = match do_exec_stage(tokens, stage, pipe_stdin, pipe_stdout) {
		Ok(never) => match never {},
		Err(e) => e,
	};
	match e {
		StageError::Syntax(e) => {
			let mut stdout = io::stdout();
			let _ = writeln!(stdout, "{}", e);
			let _ = stdout.flush();
		},
		e => {
			error!("{}", e);
			let _ = writeln!(io::stderr(), "{}", e);
		},
	}
	unsafe { libc::_exit(1) }
}

/// Fork one child per stage, joined by pipes. The parent keeps no pipe end
/// once the child needing it exists, so each reader sees end of file as
/// soon as its writer is gone.
fn spawn_stages(tokens: &TokenList, stages: &[Stage]) -> Result<Job, ShellError> {
	let mut job_builder = JobBuilder::new(stages.len());
	let mut pipe_stdin: Option<OwnedFd> = None;
	for (i, stage) in stages.iter().enumerate() {
		let is_last = i + 1 == stages.len();
		let pipe = if is_last {
			None
		} else {
			Some(unistd::pipe2(OFlag::O_CLOEXEC).map_err(ShellError::Pipe)?)
		};
		io::stdout().flush()?;
		match job_builder.push_fork()? {
			ForkResult::Parent { .. } => {},
			ForkResult::Child => {
				exec_stage(tokens, stage,
				           pipe_stdin.as_ref().map(|fd| fd.as_raw_fd()),
				           pipe.as_ref().map(|(_, write)| write.as_raw_fd()));
			},
		}
		pipe_stdin = pipe.map(|(read, _write)| read);
	}
	Ok(job_builder.build())
}

#[derive(Debug)]
pub enum EvalResult {
	Rejected(SyntaxError),
	Done(Job),
}

/// Run one tokenized line in the foreground. Only fatal OS failures are
/// returned as errors; everything else ends up in the result.
pub fn eval(tokens: &mut TokenList) -> Result<EvalResult, ShellError> {
	if let Err(e) = check::validate(tokens) {
		debug!("rejected: {}", e);
		return Ok(EvalResult::Rejected(e));
	}
	let stages = plan::plan(tokens);
	let mut job = spawn_stages(tokens, &stages)?;
	job.wait()?;
	debug!("job done with code {:?}", job.code());
	Ok(EvalResult::Done(job))
}
