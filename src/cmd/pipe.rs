use nix::{
    libc::{STDIN_FILENO, STDOUT_FILENO},
    unistd::pipe,
};

use super::evaluate::{evaluate, ExecutionContext};
use crate::{
    prelude::*,
    process::{
        child,
        fd::{close_fd, move_onto},
    },
};

/// Runs `left | right` in two processes joined by an anonymous pipe.
///
/// The result is the right side's status; the left side's is discarded.
pub fn run_pipe(left: &Command, right: &Command, ctx: ExecutionContext) -> MishExitStatus {
    let (read_end, write_end) = match pipe() {
        Ok(ends) => ends,
        Err(source) => {
            let err = MishError::Pipe(source);
            warn!(%err, "pipeline not started");
            eprintln!("mish: {err}");
            return MishExitStatus::FAILURE;
        }
    };

    trace!("PIPE: spawning left side");
    let left_pid = child::spawn(|| {
        close_fd(read_end);
        move_onto(write_end, STDOUT_FILENO);
        evaluate(Some(left), ctx)
    });

    trace!("PIPE: spawning right side");
    let right_pid = child::spawn(|| {
        close_fd(write_end);
        move_onto(read_end, STDIN_FILENO);
        evaluate(Some(right), ctx)
    });

    // the launcher is not a data participant
    close_fd(read_end);
    close_fd(write_end);

    let left = child::wait(left_pid);
    let right = child::wait(right_pid);
    debug!(%left, %right, "pipeline finished");

    right
}
