use nix::unistd::{close, dup2};

use crate::prelude::*;

pub fn close_fd(fd: RawFd) {
    close(fd).or_die(|source| MishError::Close { fd, source });
}

pub fn dup_onto(fd: RawFd, onto: RawFd) {
    if fd != onto {
        dup2(fd, onto).or_die(|source| MishError::Dup { fd, onto, source });
    }
}

/// Makes `onto` refer to `fd`'s open file and releases `fd` itself.
pub fn move_onto(fd: RawFd, onto: RawFd) {
    if fd != onto {
        dup_onto(fd, onto);
        close_fd(fd);
    }
}
