use nix::{
    fcntl::{open, OFlag},
    libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO},
    sys::stat::Mode,
};

use super::fd::{close_fd, dup_onto};
use crate::prelude::*;

/// One standard stream of a command and the file it should be bound to.
#[derive(Debug, Clone, Copy)]
pub struct Stream<'a> {
    pub target: Option<&'a Word>,
    pub fd: RawFd,
    pub append: bool,
}

impl<'a> Stream<'a> {
    pub fn stdin(cmd: &'a SimpleCommand) -> Self {
        Self {
            target: cmd.stdin.as_ref(),
            fd: STDIN_FILENO,
            append: false,
        }
    }

    pub fn stdout(cmd: &'a SimpleCommand) -> Self {
        Self {
            target: cmd.stdout.as_ref(),
            fd: STDOUT_FILENO,
            append: cmd.append_stdout,
        }
    }

    pub fn stderr(cmd: &'a SimpleCommand) -> Self {
        Self {
            target: cmd.stderr.as_ref(),
            fd: STDERR_FILENO,
            append: cmd.append_stderr,
        }
    }

    fn shares_target_with(&self, other: &Stream<'_>) -> bool {
        match (self.target, other.target) {
            (Some(ours), Some(theirs)) => ours.raw() == theirs.raw(),
            _ => false,
        }
    }
}

/// Opens redirection targets and, when actuating, binds them onto the
/// current process's standard descriptors.
///
/// An inert redirector only produces the filesystem side effects (creation,
/// truncation) and leaves the descriptor table alone; `cd` relies on this.
#[derive(Debug)]
pub struct Redirector {
    actuate: bool,
    sibling_done: bool,
}

impl Redirector {
    pub fn actuating() -> Self {
        Self {
            actuate: true,
            sibling_done: false,
        }
    }

    pub fn inert() -> Self {
        Self {
            actuate: false,
            sibling_done: false,
        }
    }

    /// Whether a combined redirection already covered the sibling stream.
    pub fn sibling_done(&self) -> bool {
        self.sibling_done
    }

    pub fn input(&mut self, stream: Stream<'_>) {
        let Some(target) = stream.target else {
            return;
        };
        if self.sibling_done {
            return;
        }

        let fd = open_target(target, OFlag::O_RDONLY);
        self.bind(fd, &[stream.fd]);
    }

    /// Applies an output redirection. When `sibling` names the same file, it
    /// is opened once for both streams and the sibling's own call is skipped.
    pub fn output(&mut self, stream: Stream<'_>, sibling: Option<Stream<'_>>) {
        let Some(target) = stream.target else {
            return;
        };
        if self.sibling_done {
            return;
        }

        if let Some(sibling) = sibling.filter(|sibling| stream.shares_target_with(sibling)) {
            trace!(path = %target, "combined redirection");
            let fd = open_target(target, write_flags(stream.append || sibling.append));
            self.bind(fd, &[stream.fd, sibling.fd]);
            self.sibling_done = true;
            return;
        }

        let fd = open_target(target, write_flags(stream.append));
        self.bind(fd, &[stream.fd]);
    }

    /// Creates `target` if needed and empties it, without binding it anywhere.
    pub fn truncate(target: &Word) {
        let fd = open_target(target, write_flags(false));
        close_fd(fd);
    }

    fn bind(&self, fd: RawFd, destinations: &[RawFd]) {
        if self.actuate {
            for &onto in destinations {
                dup_onto(fd, onto);
            }
            if destinations.contains(&fd) {
                return;
            }
        }
        close_fd(fd);
    }
}

fn write_flags(append: bool) -> OFlag {
    let mode = if append {
        OFlag::O_APPEND
    } else {
        OFlag::O_TRUNC
    };
    OFlag::O_CREAT | OFlag::O_WRONLY | mode
}

// rw-r--r--
fn file_mode() -> Mode {
    Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH
}

fn open_target(target: &Word, flags: OFlag) -> RawFd {
    let path = target.concat();
    trace!(%path, ?flags, "opening redirection target");
    open(path.as_str(), flags, file_mode()).or_die(|source| MishError::Open { path, source })
}
