pub use std::os::unix::io::RawFd;

pub use crate::{
    cmd::{
        tree::{Command, Operator, SimpleCommand},
        word::{Fragment, Word},
    },
    error::{MishError, OrDie},
    process::status::MishExitStatus,
};
