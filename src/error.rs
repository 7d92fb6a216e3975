use std::{ffi,io};

use thiserror::Error;

/// A line rejected before any process is created.
///
/// The display text is the diagnostic printed on standard output.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum SyntaxError {
	#[error("Invalid redirection")]
	Redirection,
	#[error("Invalid pipe")]
	Pipe,
	#[error("Invalid double input")]
	DoubleInput,
	#[error("Invalid double output")]
	DoubleOutput,
}

/// Failures confined to one child; the child reports and exits with status 1.
#[derive(Debug, Error)]
pub enum StageError {
	#[error(transparent)]
	Syntax(#[from] SyntaxError),
	#[error("Invalid input redirect: {path}: {source}")]
	OpenInput { path: String, source: io::Error },
	#[error("Invalid output redirect: {path}: {source}")]
	OpenOutput { path: String, source: io::Error },
	#[error("Error in dup2: {0}")]
	Dup(nix::Error),
	#[error("Error in execve: empty command")]
	Empty,
	#[error("Nul char error: {0}")]
	Nul(#[from] ffi::NulError),
	#[error("Error in execve: {name}: {source}")]
	Exec { name: String, source: nix::Error },
}

/// OS failures that end the shell.
#[derive(Debug, Error)]
pub enum ShellError {
	#[error("Error in creating child process: {0}")]
	Fork(nix::Error),
	#[error("Error in creating pipe: {0}")]
	Pipe(nix::Error),
	#[error("Error in child process termination: {0}")]
	Wait(nix::Error),
	#[error("Error in signal: {0}")]
	Signal(nix::Error),
	#[error("Error in read: {0}")]
	Read(nix::Error),
	#[error("Error in write: {0}")]
	Write(#[from] io::Error),
}
