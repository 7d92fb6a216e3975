use std::ops::Range;

use crate::error::SyntaxError;
use crate::types::{Operator,TokenList};

/// More than one redirect of a kind is only accepted when every one of them
/// names the same file.
pub fn redirects_agree(tokens: &TokenList, range: Range<usize>) -> bool {
	let mut inputs: Vec<Option<&[u8]>> = vec![];
	let mut outputs: Vec<Option<&[u8]>> = vec![];
	for i in range.clone() {
		let operand = if i + 1 < range.end { tokens.get(i + 1) } else { None };
		match tokens.operator(i) {
			Some(Operator::Input) => inputs.push(operand),
			Some(Operator::Output) => outputs.push(operand),
			_ => {},
		}
	}
	let agree = |targets: &[Option<&[u8]>]| targets.windows(2).all(|w| w[0] == w[1]);
	agree(&inputs) && agree(&outputs)
}

fn check_pipe_dangling(tokens: &TokenList) -> Result<(), SyntaxError> {
	match tokens.len().checked_sub(1).and_then(|last| tokens.operator(last)) {
		Some(Operator::Pipe) => Err(SyntaxError::Pipe),
		_ => Ok(()),
	}
}

/// Two-token lookahead only: `| x <` and `> x |` are conflicts, operators
/// further apart are left to the later stages. A pipe straight into an
/// output redirect leaves the second stage without a command.
fn check_pipe_redirect_conflict(tokens: &TokenList) -> Result<(), SyntaxError> {
	for i in 0 .. tokens.len() {
		match tokens.operator(i) {
			Some(Operator::Pipe) => {
				if tokens.operator(i + 1) == Some(Operator::Output) {
					return Err(SyntaxError::DoubleOutput);
				}
				if tokens.operator(i + 2) == Some(Operator::Input) {
					return Err(SyntaxError::DoubleInput);
				}
			},
			Some(Operator::Output) => {
				if tokens.operator(i + 2) == Some(Operator::Pipe) {
					return Err(SyntaxError::DoubleOutput);
				}
			},
			_ => {},
		}
	}
	Ok(())
}

/// Reject a whole line before anything is opened or forked.
pub fn validate(tokens: &TokenList) -> Result<(), SyntaxError> {
	check_pipe_dangling(tokens)?;
	check_pipe_redirect_conflict(tokens)?;
	if !redirects_agree(tokens, 0 .. tokens.len()) {
		return Err(SyntaxError::Redirection);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parser::tokenize;

	fn check(line: &str) -> Result<(), SyntaxError> {
		validate(&tokenize(line.as_bytes()))
	}

	#[test]
	fn plain_commands_pass() {
		assert_eq!(check("ls -l /tmp"), Ok(()));
		assert_eq!(check("echo hi > /tmp/f"), Ok(()));
		assert_eq!(check("cat < /tmp/f"), Ok(()));
		assert_eq!(check("echo a | cat"), Ok(()));
		assert_eq!(check("cat < in | sort > out"), Ok(()));
	}

	#[test]
	fn double_redirect_needs_identical_targets() {
		assert_eq!(check("echo a > /tmp/x > /tmp/y"), Err(SyntaxError::Redirection));
		assert_eq!(check("echo a > /tmp/x > /tmp/x"), Ok(()));
		assert_eq!(check("cat < a < b"), Err(SyntaxError::Redirection));
		assert_eq!(check("cat < a < a < a"), Ok(()));
		assert_eq!(check("cat < a < a < b"), Err(SyntaxError::Redirection));
	}

	#[test]
	fn kinds_are_checked_independently() {
		assert_eq!(check("cat < x > y < x"), Ok(()));
		assert_eq!(check("cat < x > y > y"), Ok(()));
		assert_eq!(check("cat < x > y > x"), Err(SyntaxError::Redirection));
	}

	#[test]
	fn double_redirect_with_missing_target() {
		assert_eq!(check("echo a > x >"), Err(SyntaxError::Redirection));
	}

	#[test]
	fn trailing_pipe_is_rejected() {
		assert_eq!(check("echo a |"), Err(SyntaxError::Pipe));
		assert_eq!(check("|"), Err(SyntaxError::Pipe));
		assert_eq!(check("cat > f |"), Err(SyntaxError::Pipe));
		assert_eq!(check("cat < a < b |"), Err(SyntaxError::Pipe));
	}

	#[test]
	fn input_two_after_pipe_is_rejected() {
		assert_eq!(check("cat f | cat < g"), Err(SyntaxError::DoubleInput));
		assert_eq!(check("cat f | cat -n < g"), Ok(()));
	}

	#[test]
	fn pipe_two_after_output_is_rejected() {
		assert_eq!(check("echo a > f | cat"), Err(SyntaxError::DoubleOutput));
		assert_eq!(check("echo a > f b | cat"), Ok(()));
	}

	#[test]
	fn pipe_into_output_redirect_is_rejected() {
		assert_eq!(check("echo a | > /tmp/x"), Err(SyntaxError::DoubleOutput));
	}

	#[test]
	fn diagnostics_text() {
		assert_eq!(SyntaxError::Redirection.to_string(), "Invalid redirection");
		assert_eq!(SyntaxError::Pipe.to_string(), "Invalid pipe");
		assert_eq!(SyntaxError::DoubleInput.to_string(), "Invalid double input");
		assert_eq!(SyntaxError::DoubleOutput.to_string(), "Invalid double output");
	}
}
