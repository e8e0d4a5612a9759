use std::io::{self, Write};

use nix::{
    sys::wait::waitpid,
    unistd::{fork, ForkResult, Pid},
};

use crate::prelude::*;

/// Forks a child that runs `body` and exits with the status it returns.
///
/// Only the parent returns from this call; it gets the child's pid.
pub fn spawn<F>(body: F) -> Pid
where
    F: FnOnce() -> MishExitStatus,
{
    // anything still buffered would otherwise be written twice
    flush_std_streams();

    // SAFETY: the engine never runs more than one thread of its own; the
    // child only evaluates its subtree and then exits or replaces its image.
    match unsafe { fork() }.or_die(MishError::Fork) {
        ForkResult::Child => {
            let status = body();
            exit(status)
        }
        ForkResult::Parent { child } => {
            debug!(%child, "spawned child");
            child
        }
    }
}

/// Blocks until `pid` terminates and converts its wait report into a status.
pub fn wait(pid: Pid) -> MishExitStatus {
    let report = waitpid(pid, None).or_die(|source| MishError::Wait { pid, source });
    trace!(?report, "child terminated");
    report.into()
}

/// Terminates the current process with `status` as its exit code.
pub fn exit(status: MishExitStatus) -> ! {
    flush_std_streams();
    std::process::exit(status.code())
}

fn flush_std_streams() {
    io::stdout().flush().ok();
    io::stderr().flush().ok();
}
