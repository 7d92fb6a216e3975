use std::os::unix::io::RawFd;

use log::trace;
use nix::errno::Errno;
use nix::unistd;

use crate::error::ShellError;

pub const LINE_MAX: usize = 255;

/// Reads lines straight from a descriptor, one byte per read(2).
///
/// Nothing past the newline is consumed: children inherit the same
/// descriptor and must find the rest of the input untouched.
pub struct LineReader {
	fd: RawFd,
	max: usize,
}

impl LineReader {
	pub fn new(fd: RawFd) -> LineReader {
		LineReader { fd, max: LINE_MAX }
	}

	fn read_byte(&mut self) -> Result<Option<u8>, ShellError> {
		let mut buf = [0u8; 1];
		loop {
			match unistd::read(self.fd, &mut buf) {
				Ok(0) => { return Ok(None); },
				Ok(_) => { return Ok(Some(buf[0])); },
				Err(Errno::EINTR) => { continue; },
				Err(e) => { return Err(ShellError::Read(e)); },
			}
		}
	}

	/// The next line without its newline, truncated to `LINE_MAX` bytes.
	/// `None` once the input is exhausted.
	pub fn read_line(&mut self) -> Result<Option<Vec<u8>>, ShellError> {
		let mut line: Vec<u8> = vec![];
		let mut seen = false;
		loop {
			match self.read_byte()? {
				None => { return Ok(if seen { Some(line) } else { None }); },
				Some(b'\n') => { break; },
				Some(c) => {
					seen = true;
					if line.len() < self.max {
						line.push(c);
					}
				},
			}
		}
		if seen && line.len() == self.max {
			trace!("line truncated to {} bytes", self.max);
		}
		Ok(Some(line))
	}
}
