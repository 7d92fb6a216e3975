//! Process-wide state shared with the SIGINT handler.
//!
//! The only thing the handler may touch is the foreground slot: a child pid
//! while a command runs (armed), 0 otherwise (disarmed). Every access is a
//! single atomic load or store, so the handler can run at any point.

use std::sync::atomic::{AtomicI32,Ordering};

use log::trace;
use nix::sys::signal::{self,SaFlags,SigAction,SigHandler,SigSet,Signal};
use nix::unistd::Pid;

use crate::error::ShellError;

static FOREGROUND: AtomicI32 = AtomicI32::new(0);

pub fn arm(pid: Pid) {
	FOREGROUND.store(pid.as_raw(), Ordering::SeqCst);
	trace!("foreground armed with {}", pid);
}

pub fn disarm() {
	FOREGROUND.store(0, Ordering::SeqCst);
	trace!("foreground disarmed");
}

const KILL_FAILED: &[u8] = b"Error in kill\n";

extern "C" fn forward_interrupt(_: libc::c_int) {
	let pid = FOREGROUND.load(Ordering::SeqCst);
	if pid == 0 {
		return;
	}
	// Only async-signal-safe calls from here on.
	unsafe {
		if libc::kill(pid, libc::SIGKILL) == -1 {
			libc::write(libc::STDERR_FILENO, KILL_FAILED.as_ptr() as *const libc::c_void, KILL_FAILED.len());
			libc::_exit(1);
		}
	}
}

/// Route SIGINT to the foreground child instead of the shell.
pub fn install() -> Result<(), ShellError> {
	let action = SigAction::new(SigHandler::Handler(forward_interrupt), SaFlags::SA_RESTART, SigSet::empty());
	unsafe { signal::sigaction(Signal::SIGINT, &action) }.map_err(ShellError::Signal)?;
	Ok(())
}

/// Called in a freshly forked child: SIGINT loses the forwarding handler and
/// SIGPIPE, ignored by the Rust runtime, must not stay ignored across exec.
pub fn reset_child_signals() -> nix::Result<()> {
	let action = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
	for sig in [Signal::SIGINT, Signal::SIGPIPE] {
		unsafe { signal::sigaction(sig, &action) }?;
	}
	Ok(())
}
