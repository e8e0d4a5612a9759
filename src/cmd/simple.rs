use std::ffi::CString;

use itertools::Itertools;
use nix::unistd::execvp;

use super::word::lookup;
use crate::{
    builtins::{BuiltinCommand, BuiltinCommands},
    prelude::*,
    process::{
        child,
        redirect::{Redirector, Stream},
    },
};

/// Runs one leaf: a builtin, an environment assignment or an external program.
pub fn run(cmd: &SimpleCommand) -> MishExitStatus {
    let verb = cmd.verb.concat();

    if let Some(builtin) = BuiltinCommands::from_verb(&verb) {
        trace!(builtin = builtin.name(), "running builtin");
        return builtin.run(cmd);
    }

    if let Some((name, value)) = cmd.verb.as_assignment() {
        return assign(name, value);
    }

    run_external(cmd)
}

/// A value that still starts with `$` after expansion names the variable to copy.
fn assign(name: &str, value: &[Fragment]) -> MishExitStatus {
    let expanded = value.iter().map(Fragment::expand).join("");
    let value = match expanded.strip_prefix('$') {
        Some(source) => lookup(source),
        None => expanded,
    };

    if value.contains('\0') {
        warn!(%name, "refusing to assign a value containing NUL");
        return MishExitStatus::FAILURE;
    }

    trace!(%name, %value, "assigning variable");
    std::env::set_var(name, value);

    MishExitStatus::SUCCESS
}

fn run_external(cmd: &SimpleCommand) -> MishExitStatus {
    let pid = child::spawn(|| {
        let mut redirector = Redirector::actuating();
        redirector.input(Stream::stdin(cmd));
        redirector.output(Stream::stdout(cmd), Some(Stream::stderr(cmd)));
        redirector.output(Stream::stderr(cmd), None);

        replace_image(cmd)
    });

    child::wait(pid)
}

/// Only returns if the new image could not be loaded.
fn replace_image(cmd: &SimpleCommand) -> MishExitStatus {
    let verb = cmd.verb.concat();

    let argv = match cmd
        .argv()
        .into_iter()
        .map(CString::new)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(argv) => argv,
        Err(err) => {
            eprintln!("Execution failed for '{verb}': {err}");
            return MishExitStatus::NOT_EXECUTABLE;
        }
    };

    match execvp(&argv[0], &argv) {
        Ok(never) => match never {},
        Err(err) => {
            debug!(%verb, %err, "exec failed");
            eprintln!("Execution failed for '{verb}'");
            MishExitStatus::NOT_EXECUTABLE
        }
    }
}
