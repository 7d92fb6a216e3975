use crate::types::TokenList;

struct Parser<'a> {
	line: &'a [u8],
	i: usize,
}

impl<'a> Parser<'a> {
	fn proceed_while<F>(&mut self, f: F) where F: Fn(u8) -> bool {
		while let Some(c) = self.line.get(self.i) {
			if !f(*c) { break; }
			self.i += 1;
		}
	}

	fn is_whitespace(c: u8) -> bool {
		matches!(c, b' ' | b'\t' | b'\n' | b'\r')
	}

	fn is_operator(c: u8) -> bool {
		matches!(c, b'>' | b'<' | b'|')
	}

	fn is_letter(c: u8) -> bool {
		!Parser::is_operator(c) && !Parser::is_whitespace(c)
	}

	fn skip_whitespaces(&mut self) {
		self.proceed_while(Parser::is_whitespace);
	}

	fn read_word(&mut self) -> &'a [u8] {
		let orig = self.i;
		self.proceed_while(Parser::is_letter);
		&self.line[orig .. self.i]
	}

	fn read_token(&mut self) -> Option<&'a [u8]> {
		self.skip_whitespaces();
		let c = *self.line.get(self.i)?;
		if Parser::is_operator(c) {
			self.i += 1;
			return Some(&self.line[self.i - 1 .. self.i]);
		}
		Some(self.read_word())
	}
}

/// Split a line into words. `<`, `>` and `|` always stand alone.
pub fn tokenize(line: &[u8]) -> TokenList {
	let mut parser = Parser { line, i: 0 };
	let mut tokens: Vec<Vec<u8>> = vec![];
	while let Some(token) = parser.read_token() {
		tokens.push(token.to_vec());
	}
	TokenList::new(tokens)
}
