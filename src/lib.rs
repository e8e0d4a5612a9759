#[macro_use]
extern crate tracing;

pub mod builtins;
pub mod cmd;
pub mod config;
pub mod error;
pub mod parse;
pub mod prelude;
pub mod process;

pub use cmd::{
    evaluate::{evaluate, ExecutionContext},
    tree::{Command, Operator, SimpleCommand},
    word::{Fragment, Word},
};
pub use process::status::MishExitStatus;
