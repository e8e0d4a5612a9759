use super::{parallel::run_parallel, pipe::run_pipe, simple};
use crate::prelude::*;

/// Diagnostic breadcrumbs threaded through the recursion. Nothing decides on them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionContext {
    pub depth: i32,
    pub parent: Option<Operator>,
}

impl ExecutionContext {
    fn nested(self, parent: Operator) -> Self {
        Self {
            depth: self.depth + 1,
            parent: Some(parent),
        }
    }
}

pub fn evaluate(node: Option<&Command>, ctx: ExecutionContext) -> MishExitStatus {
    let Some(node) = node else {
        return MishExitStatus::INVALID_TREE;
    };
    if ctx.depth < 0 {
        return MishExitStatus::INVALID_TREE;
    }

    let _span = trace_span!("evaluate", depth = ctx.depth, parent = ?ctx.parent).entered();

    match node {
        Command::Leaf(cmd) => simple::run(cmd),
        Command::Binary(op, left, right) => {
            let (left, right) = (left.as_ref(), right.as_ref());
            let inner = ctx.nested(*op);
            match op {
                Operator::Sequential => {
                    trace!("SEQUENTIAL: executing left");
                    evaluate(Some(left), inner);
                    trace!("SEQUENTIAL: executing right");
                    evaluate(Some(right), inner)
                }
                Operator::Or => {
                    trace!("OR: executing left");
                    let status = evaluate(Some(left), inner);

                    trace!(%status, "OR: left finished, checking exit status");
                    if status.success() {
                        status
                    } else {
                        evaluate(Some(right), inner)
                    }
                }
                Operator::And => {
                    trace!("AND: executing left");
                    let status = evaluate(Some(left), inner);

                    trace!(%status, "AND: left finished, checking exit status");
                    if status.success() {
                        evaluate(Some(right), inner)
                    } else {
                        status
                    }
                }
                Operator::Parallel => {
                    MishExitStatus::from_failure(run_parallel(left, right, inner))
                }
                Operator::Pipe => run_pipe(left, right, inner),
            }
        }
        Command::Dummy => {
            warn!("refusing to evaluate a dummy node");
            MishExitStatus::INVALID_TREE
        }
    }
}

impl Command {
    pub fn evaluate(&self) -> MishExitStatus {
        evaluate(Some(self), ExecutionContext::default())
    }
}
