use strum::Display;

use super::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operator {
    #[strum(serialize = ";")]
    Sequential,
    #[strum(serialize = "&")]
    Parallel,
    #[strum(serialize = "|")]
    Pipe,
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
}

/// One directly executable unit: a builtin, an assignment or an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleCommand {
    pub verb: Word,
    pub parameters: Vec<Word>,
    pub stdin: Option<Word>,
    pub stdout: Option<Word>,
    pub stderr: Option<Word>,
    pub append_stdout: bool,
    pub append_stderr: bool,
}

impl SimpleCommand {
    pub fn new(verb: Word) -> Self {
        Self {
            verb,
            parameters: Vec::new(),
            stdin: None,
            stdout: None,
            stderr: None,
            append_stdout: false,
            append_stderr: false,
        }
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Word>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// `argv[0]` is the verb, followed by one string per parameter word.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(&self.verb)
            .chain(&self.parameters)
            .map(Word::concat)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Leaf(SimpleCommand),
    Binary(Operator, Box<Command>, Box<Command>),
    Dummy,
}

impl Command {
    pub fn binary(op: Operator, left: Command, right: Command) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }
}

impl From<SimpleCommand> for Command {
    fn from(value: SimpleCommand) -> Self {
        Self::Leaf(value)
    }
}
