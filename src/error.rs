use std::os::unix::io::RawFd;

use nix::unistd::Pid;
use thiserror::Error;

use crate::process::status::MishExitStatus;

/// Operating-system resource failures. All of them are fatal to the process they occur in.
#[derive(Debug, Error)]
pub enum MishError {
    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),
    #[error("failed to create pipe: {0}")]
    Pipe(#[source] nix::Error),
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: nix::Error,
    },
    #[error("failed to duplicate descriptor {fd} onto {onto}: {source}")]
    Dup {
        fd: RawFd,
        onto: RawFd,
        #[source]
        source: nix::Error,
    },
    #[error("failed to close descriptor {fd}: {source}")]
    Close {
        fd: RawFd,
        #[source]
        source: nix::Error,
    },
    #[error("failed to wait for child {pid}: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: nix::Error,
    },
}

/// Report `err` and terminate the current process.
pub fn die(err: MishError) -> ! {
    error!(%err, "fatal resource failure");
    eprintln!("mish: {err}");
    crate::process::child::exit(MishExitStatus::FAILURE)
}

pub trait OrDie<T> {
    /// Unwraps the value, or reports the error built by `wrap` and terminates.
    fn or_die(self, wrap: impl FnOnce(nix::Error) -> MishError) -> T;
}

impl<T> OrDie<T> for nix::Result<T> {
    fn or_die(self, wrap: impl FnOnce(nix::Error) -> MishError) -> T {
        match self {
            Ok(value) => value,
            Err(err) => die(wrap(err)),
        }
    }
}
