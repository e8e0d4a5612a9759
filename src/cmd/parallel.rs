use super::evaluate::{evaluate, ExecutionContext};
use crate::{prelude::*, process::child};

/// Runs both subtrees in their own processes and waits for them in creation
/// order. Returns `true` on failure, i.e. unless both sides succeeded.
pub fn run_parallel(left: &Command, right: &Command, ctx: ExecutionContext) -> bool {
    trace!("PARALLEL: spawning left");
    let left_pid = child::spawn(|| evaluate(Some(left), ctx));
    trace!("PARALLEL: spawning right");
    let right_pid = child::spawn(|| evaluate(Some(right), ctx));

    let left = child::wait(left_pid);
    let right = child::wait(right_pid);
    debug!(%left, %right, "parallel branches finished");

    !(left.success() && right.success())
}
