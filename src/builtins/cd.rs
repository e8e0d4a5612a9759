use super::BuiltinCommand;
use crate::{
    prelude::*,
    process::redirect::{Redirector, Stream},
};

#[derive(Debug, Default)]
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn run(&self, cmd: &SimpleCommand) -> MishExitStatus {
        trace!("executing cd builtin: {:?}", cmd.parameters);

        // cd never writes through its streams, but the target files must
        // still appear exactly as they would for a real command
        let mut redirector = Redirector::inert();
        redirector.output(Stream::stdout(cmd), Some(Stream::stderr(cmd)));
        redirector.output(Stream::stderr(cmd), Some(Stream::stdout(cmd)));
        if let Some(target) = &cmd.stderr {
            Redirector::truncate(target);
        }

        let Some(dir) = cmd.parameters.first() else {
            warn!("cd: missing directory operand");
            return MishExitStatus::FAILURE;
        };
        let dir = dir.concat();

        trace!("cd: {:?}", dir);

        match std::env::set_current_dir(&dir) {
            Ok(_) => MishExitStatus::SUCCESS,
            Err(err) => {
                error!("failed to cd: {}", err);
                MishExitStatus::FAILURE
            }
        }
    }
}
