use log::debug;

use crate::types::{Operator,Stage,TokenList};

/// Erase the first pipe token and return where the second stage starts,
/// or 0 for a single stage. Later pipe tokens are left alone.
pub fn split_pipe(tokens: &mut TokenList) -> usize {
	match (0 .. tokens.len()).find(|&i| tokens.operator(i) == Some(Operator::Pipe)) {
		Some(i) => {
			tokens.erase(i);
			i + 1
		},
		None => 0,
	}
}

/// Split a validated line into its stages, in launch order.
pub fn plan(tokens: &mut TokenList) -> Vec<Stage> {
	let second = split_pipe(tokens);
	let mut stages = vec![tokens.stage(0)];
	if second > 0 {
		stages.push(tokens.stage(second));
	}
	debug!("planned {} stage(s): {:?}", stages.len(), stages);
	stages
}
