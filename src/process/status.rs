use std::fmt;

use nix::sys::wait::WaitStatus;

/// Result of one evaluation. Zero is success; negative codes are control sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MishExitStatus(i32);

impl MishExitStatus {
    pub const SUCCESS: Self = Self(0);
    pub const FAILURE: Self = Self(1);
    pub const NOT_EXECUTABLE: Self = Self(127);
    /// Absent, dummy or otherwise malformed command tree.
    pub const INVALID_TREE: Self = Self(-1);
    /// `exit`/`quit`: the driver should stop reading input.
    pub const REQUEST_EXIT: Self = Self(-100);

    pub fn from_failure(failed: bool) -> Self {
        if failed {
            Self::FAILURE
        } else {
            Self::SUCCESS
        }
    }

    pub fn code(&self) -> i32 {
        self.0
    }

    pub fn success(&self) -> bool {
        self.0 == 0
    }

    pub fn failure(&self) -> bool {
        !self.success()
    }

    pub fn is_request_exit(&self) -> bool {
        *self == Self::REQUEST_EXIT
    }
}

impl From<WaitStatus> for MishExitStatus {
    fn from(value: WaitStatus) -> Self {
        match value {
            WaitStatus::Exited(_, code) => Self(code),
            WaitStatus::Signaled(_, signal, _) => Self(128 + signal as i32),
            _ => Self::FAILURE,
        }
    }
}

impl fmt::Display for MishExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::REQUEST_EXIT => f.write_str("exit requested"),
            Self::INVALID_TREE => f.write_str("invalid command tree"),
            Self(code) => write!(f, "{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use nix::{sys::signal::Signal, unistd::Pid};

    use super::*;

    #[test]
    fn exited_child_keeps_its_code() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            MishExitStatus::from(WaitStatus::Exited(pid, 0)),
            MishExitStatus::SUCCESS
        );
        assert_eq!(MishExitStatus::from(WaitStatus::Exited(pid, 3)).code(), 3);
    }

    #[test]
    fn signalled_child_is_a_failure() {
        let status = MishExitStatus::from(WaitStatus::Signaled(
            Pid::from_raw(42),
            Signal::SIGKILL,
            false,
        ));
        assert!(status.failure());
        assert_eq!(status.code(), 137);
    }

    #[test]
    fn sentinels_are_not_success() {
        assert!(MishExitStatus::REQUEST_EXIT.failure());
        assert!(MishExitStatus::INVALID_TREE.failure());
        assert!(MishExitStatus::REQUEST_EXIT.is_request_exit());
        assert!(!MishExitStatus::FAILURE.is_request_exit());
    }
}
