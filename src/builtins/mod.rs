use enum_dispatch::enum_dispatch;
use strum::{EnumIter, IntoEnumIterator};

use crate::prelude::*;

pub mod cd;
pub mod exit;

#[enum_dispatch(BuiltinCommands)]
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, cmd: &SimpleCommand) -> MishExitStatus;
}

#[enum_dispatch]
#[derive(Debug, EnumIter)]
pub enum BuiltinCommands {
    Cd(cd::Cd),
    Exit(exit::Exit),
    Quit(exit::Quit),
}

impl BuiltinCommands {
    /// Builtins match on the start of the verb, so `cd` also claims `cdrom`.
    pub fn from_verb(verb: &str) -> Option<Self> {
        Self::iter().find(|cmd| verb.starts_with(cmd.name()))
    }
}
