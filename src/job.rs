use log::{debug,warn};
use nix::errno::Errno;
use nix::sys::wait::{self,WaitStatus};
use nix::unistd::{self,ForkResult,Pid};

use crate::error::ShellError;
use crate::global;
use crate::types::Role;

pub trait WaitStatusExt {
	fn get_pid(self) -> Option<Pid>;
	fn is_terminated(self) -> bool;
}

impl WaitStatusExt for WaitStatus {
	fn get_pid(self) -> Option<Pid> {
		self.pid()
	}

	/// Only a normal exit or a fatal signal ends a stage. Stop and
	/// continue notifications are not job control events here.
	fn is_terminated(self) -> bool {
		matches!(self, WaitStatus::Exited(..) | WaitStatus::Signaled(..))
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Process {
	pub pid: Pid,
	pub role: Role,
	pub status: WaitStatus,
}

/// The children of one command line, in launch order.
#[derive(Debug, PartialEq, Eq)]
pub struct Job {
	pub processes: Vec<Process>,
}

impl Job {
	pub fn is_done(&self) -> bool {
		self.processes.iter().all(|pr| pr.status.is_terminated())
	}

	/// The most recently launched child that has not been reaped.
	pub fn newest_live(&self) -> Option<Pid> {
		self.processes.iter().rev().find(|pr| !pr.status.is_terminated()).map(|pr| pr.pid)
	}

	/// Record a reaped status and return the role of that child, `None`
	/// for a pid outside this job.
	pub fn update(&mut self, status: WaitStatus) -> Option<Role> {
		let pid = status.get_pid()?;
		let pr = self.processes.iter_mut().find(|pr| pr.pid == pid)?;
		pr.status = status;
		Some(pr.role)
	}

	/// Exit code of the last stage, 128 + signal number when it was killed.
	pub fn code(&self) -> Option<i32> {
		match self.processes.last()?.status {
			WaitStatus::Exited(_, code) => Some(code),
			WaitStatus::Signaled(_, sig, _) => Some(128 + sig as i32),
			_ => None,
		}
	}

	fn rearm(&self) {
		match self.newest_live() {
			Some(pid) => global::arm(pid),
			None => global::disarm(),
		}
	}

	/// Reap every stage. The foreground slot always names a child that is
	/// still unreaped, and is disarmed on return.
	pub fn wait(&mut self) -> Result<(), ShellError> {
		self.rearm();
		while !self.is_done() {
			let status = match wait::wait() {
				Ok(status) => status,
				Err(Errno::EINTR) => { continue; },
				Err(e) => {
					global::disarm();
					return Err(ShellError::Wait(e));
				},
			};
			if !status.is_terminated() {
				continue;
			}
			match self.update(status) {
				Some(role) => debug!("reaped {:?} stage: {:?}", role, status),
				None => warn!("reaped unknown child {:?}", status),
			}
			self.rearm();
		}
		global::disarm();
		Ok(())
	}
}

#[derive(Debug)]
pub struct JobBuilder {
	imp: Job,
	count: usize,
}

impl JobBuilder {
	pub fn new(count: usize) -> JobBuilder {
		JobBuilder {
			imp: Job { processes: Vec::with_capacity(count) },
			count,
		}
	}

	pub fn push_fork(&mut self) -> Result<ForkResult, ShellError> {
		let role = Role::of(self.imp.processes.len(), self.count);
		let r = unsafe { unistd::fork() }.map_err(ShellError::Fork)?;
		if let ForkResult::Parent { child } = r {
			debug!("forked {:?} stage as {}", role, child);
			self.imp.processes.push(Process { pid: child, role, status: WaitStatus::StillAlive });
		}
		Ok(r)
	}

	pub fn build(self) -> Job {
		self.imp
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nix::sys::signal::Signal;

	fn job(pids: &[i32]) -> Job {
		let count = pids.len();
		Job {
			processes: pids.iter().enumerate().map(|(i, &pid)| Process {
				pid: Pid::from_raw(pid),
				role: Role::of(i, count),
				status: WaitStatus::StillAlive,
			}).collect(),
		}
	}

	#[test]
	fn roles_follow_launch_order() {
		let j = job(&[10, 11]);
		assert_eq!(j.processes[0].role, Role::First);
		assert_eq!(j.processes[1].role, Role::Second);
		assert_eq!(job(&[10]).processes[0].role, Role::Only);
	}

	#[test]
	fn newest_live_moves_back_as_stages_finish() {
		let mut j = job(&[10, 11]);
		assert_eq!(j.newest_live(), Some(Pid::from_raw(11)));
		assert_eq!(j.update(WaitStatus::Exited(Pid::from_raw(11), 0)), Some(Role::Second));
		assert_eq!(j.newest_live(), Some(Pid::from_raw(10)));
		assert!(!j.is_done());
		assert_eq!(j.update(WaitStatus::Signaled(Pid::from_raw(10), Signal::SIGKILL, false)), Some(Role::First));
		assert_eq!(j.newest_live(), None);
		assert!(j.is_done());
	}

	#[test]
	fn unknown_pid_is_not_recorded() {
		let mut j = job(&[10]);
		assert_eq!(j.update(WaitStatus::Exited(Pid::from_raw(99), 0)), None);
		assert!(!j.is_done());
	}

	#[test]
	fn stop_does_not_terminate() {
		assert!(!WaitStatus::Stopped(Pid::from_raw(10), Signal::SIGTSTP).is_terminated());
		assert!(!WaitStatus::Continued(Pid::from_raw(10)).is_terminated());
		assert!(WaitStatus::Exited(Pid::from_raw(10), 1).is_terminated());
	}

	#[test]
	fn code_of_last_stage() {
		let mut j = job(&[10, 11]);
		assert_eq!(j.code(), None);
		j.update(WaitStatus::Exited(Pid::from_raw(10), 0));
		j.update(WaitStatus::Exited(Pid::from_raw(11), 3));
		assert_eq!(j.code(), Some(3));
		j.update(WaitStatus::Signaled(Pid::from_raw(11), Signal::SIGKILL, false));
		assert_eq!(j.code(), Some(137));
	}
}
