use super::BuiltinCommand;
use crate::prelude::*;

#[derive(Debug, Default)]
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn run(&self, _cmd: &SimpleCommand) -> MishExitStatus {
        trace!("exit requested");
        MishExitStatus::REQUEST_EXIT
    }
}

#[derive(Debug, Default)]
pub struct Quit;

impl BuiltinCommand for Quit {
    fn name(&self) -> &'static str {
        "quit"
    }

    fn run(&self, _cmd: &SimpleCommand) -> MishExitStatus {
        trace!("quit requested");
        MishExitStatus::REQUEST_EXIT
    }
}
