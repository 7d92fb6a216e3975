use std::ops::Range;
use std::os::unix::io::RawFd;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator { Pipe, Input, Output }

impl Operator {
	pub fn of(token: &[u8]) -> Option<Operator> {
		match token {
			b"|" => Some(Operator::Pipe),
			b"<" => Some(Operator::Input),
			b">" => Some(Operator::Output),
			_ => None,
		}
	}
}

/// Words of one input line.
///
/// Consumed tokens are erased in place rather than removed, so every index
/// handed out by the planner stays valid. An erased slot ends a stage.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TokenList {
	slots: Vec<Option<Vec<u8>>>,
}

impl TokenList {
	pub fn new(tokens: Vec<Vec<u8>>) -> TokenList {
		TokenList { slots: tokens.into_iter().map(Some).collect() }
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// `None` both past the end and for an erased slot.
	pub fn get(&self, i: usize) -> Option<&[u8]> {
		self.slots.get(i).and_then(|s| s.as_deref())
	}

	pub fn operator(&self, i: usize) -> Option<Operator> {
		self.get(i).and_then(Operator::of)
	}

	pub fn erase(&mut self, i: usize) {
		if let Some(slot) = self.slots.get_mut(i) {
			*slot = None;
		}
	}

	/// The stage starting at `start`: everything up to the next erased slot.
	pub fn stage(&self, start: usize) -> Stage {
		let start = start.min(self.len());
		let end = (start .. self.len()).find(|&i| self.slots[i].is_none()).unwrap_or(self.len());
		Stage { range: start .. end }
	}
}

/// A view over a contiguous run of the token list.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Stage {
	pub range: Range<usize>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectType { Input, Output }

impl RedirectType {
	pub fn stream(self) -> RawFd {
		match self {
			RedirectType::Input => libc::STDIN_FILENO,
			RedirectType::Output => libc::STDOUT_FILENO,
		}
	}
}

#[derive(Debug, PartialEq, Eq)]
pub struct Redirect<'a> {
	pub target: &'a [u8],
	pub from: RawFd,
	pub typ: RedirectType,
}

/// A stage with its operators resolved: what gets exec'd, and how its
/// standard streams are rebound first.
#[derive(Debug, PartialEq, Eq)]
pub struct Command<'a> {
	pub arguments: Vec<&'a [u8]>,
	pub redirects: Vec<Redirect<'a>>,
}

impl<'a> Command<'a> {
	pub fn name(&self) -> Option<&'a [u8]> {
		self.arguments.first().copied()
	}
}

/// Role of a launched child within its pipeline.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role { First, Second, Only }

impl Role {
	pub fn of(index: usize, count: usize) -> Role {
		match (index, count) {
			(_, 1) => Role::Only,
			(0, _) => Role::First,
			_ => Role::Second,
		}
	}
}
