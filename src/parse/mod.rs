use logos::Logos;
use thiserror::Error;

use crate::{cmd::word::is_name, prelude::*};

use self::token::{LexerError, Token};

pub mod token;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandParseError {
    #[error("{error} at byte {position}")]
    Lexer { error: LexerError, position: usize },
    #[error("unterminated quote starting at byte {0}")]
    UnterminatedQuote(usize),
    #[error("expected a file name after `{0}`")]
    MissingTarget(String),
    #[error("expected a command, found {0}")]
    ExpectedCommand(String),
}

/// Parses one input line into a command tree. Blank and comment-only lines yield `None`.
pub fn parse_command(input: &str) -> Result<Option<Command>, CommandParseError> {
    let items = group_words(input)?;

    if items.is_empty() {
        return Ok(None);
    }

    let mut parser = Parser { items, pos: 0 };
    let command = parser.list()?;

    match parser.peek() {
        None => Ok(Some(command)),
        Some(item) => Err(CommandParseError::ExpectedCommand(item.describe())),
    }
}

#[derive(Debug)]
enum Item<'a> {
    Word(Word),
    Op(Token<'a>),
}

impl Item<'_> {
    fn describe(&self) -> String {
        match self {
            Self::Word(word) => format!("`{word}`"),
            Self::Op(token) => format!("`{token}`"),
        }
    }
}

/// Lexes `input`, dropping comments and joining adjacent word tokens into single words.
fn group_words(input: &str) -> Result<Vec<Item<'_>>, CommandParseError> {
    let mut items = Vec::new();
    let mut current: Option<(WordBuilder, usize)> = None;

    for (token, span) in Token::lexer(input).spanned() {
        let token = token.map_err(|error| match input[span.start..].chars().next() {
            Some('"' | '\'') => CommandParseError::UnterminatedQuote(span.start),
            _ => CommandParseError::Lexer {
                error,
                position: span.start,
            },
        })?;

        if token.is_word() {
            let builder = match current.take() {
                Some((builder, end)) if end == span.start => builder,
                Some((builder, _)) => {
                    items.push(Item::Word(builder.finish()));
                    WordBuilder::default()
                }
                None => WordBuilder::default(),
            };
            current = Some((builder.push(&token), span.end));
            continue;
        }

        if let Some((builder, _)) = current.take() {
            items.push(Item::Word(builder.finish()));
        }

        if !matches!(token, Token::Comment(_)) {
            items.push(Item::Op(token));
        }
    }

    if let Some((builder, _)) = current {
        items.push(Item::Word(builder.finish()));
    }

    Ok(items)
}

#[derive(Default)]
struct WordBuilder {
    fragments: Vec<Fragment>,
}

impl WordBuilder {
    fn push(mut self, token: &Token<'_>) -> Self {
        match token {
            Token::Bare(text) => self.push_text(text, |_| true),
            Token::DoubleQuotedString(text) => {
                self.push_text(text, |c| matches!(c, '"' | '\\' | '$' | '`'))
            }
            Token::SingleQuotedString(text) => self.push_literal(text),
            _ => unreachable!("only word tokens are grouped"),
        }
        self
    }

    /// Resolves backslash escapes accepted by `escapable` and splits out `$NAME` references.
    fn push_text(&mut self, text: &str, escapable: impl Fn(char) -> bool) {
        let mut literal = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.peek() {
                    Some(&next) if escapable(next) => {
                        literal.push(next);
                        chars.next();
                    }
                    _ => literal.push(c),
                },
                '$' if chars
                    .peek()
                    .is_some_and(|next| next.is_ascii_alphabetic() || *next == '_') =>
                {
                    self.push_literal(&std::mem::take(&mut literal));
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if !(next.is_ascii_alphanumeric() || next == '_') {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }
                    self.fragments.push(Fragment::Variable(name));
                }
                c => literal.push(c),
            }
        }

        self.push_literal(&literal);
    }

    fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(Fragment::Literal(last)) => last.push_str(text),
            _ => self.fragments.push(Fragment::literal(text)),
        }
    }

    /// A leading `NAME=` becomes the `NAME`, `=`, `VALUE...` assignment chain.
    fn finish(mut self) -> Word {
        let assignment = match self.fragments.first() {
            Some(Fragment::Literal(head)) => head
                .split_once('=')
                .filter(|(name, _)| is_name(name))
                .map(|(name, value)| (name.to_owned(), value.to_owned())),
            _ => None,
        };

        if let Some((name, value)) = assignment {
            let mut chain = vec![Fragment::Literal(name), Fragment::literal("=")];
            if !value.is_empty() || self.fragments.len() == 1 {
                chain.push(Fragment::Literal(value));
            }
            self.fragments.splice(0..1, chain);
        }

        Word::new(self.fragments).unwrap_or_else(|| Word::literal(""))
    }
}

/// Recursive descent over the grouped items. Precedence from loosest to
/// tightest: `;`, `&`, `&&`/`||`, `|`. Everything is left associative.
struct Parser<'a> {
    items: Vec<Item<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Item<'a>> {
        self.items.get(self.pos)
    }

    fn peek_op(&self) -> Option<&Token<'a>> {
        match self.peek() {
            Some(Item::Op(token)) => Some(token),
            _ => None,
        }
    }

    fn at_end_or(&self, terminators: &[Token<'a>]) -> bool {
        match self.peek_op() {
            Some(token) => terminators.contains(token),
            None => self.peek().is_none(),
        }
    }

    fn list(&mut self) -> Result<Command, CommandParseError> {
        let mut left = self.parallel()?;

        while self.peek_op() == Some(&Token::Semi) {
            self.pos += 1;
            if self.at_end_or(&[]) {
                break;
            }
            let right = self.parallel()?;
            left = Command::binary(Operator::Sequential, left, right);
        }

        Ok(left)
    }

    fn parallel(&mut self) -> Result<Command, CommandParseError> {
        let mut left = self.conditional()?;

        while self.peek_op() == Some(&Token::Amp) {
            self.pos += 1;
            if self.at_end_or(&[Token::Semi]) {
                break;
            }
            let right = self.conditional()?;
            left = Command::binary(Operator::Parallel, left, right);
        }

        Ok(left)
    }

    fn conditional(&mut self) -> Result<Command, CommandParseError> {
        let mut left = self.pipeline()?;

        loop {
            let op = match self.peek_op() {
                Some(Token::And) => Operator::And,
                Some(Token::Or) => Operator::Or,
                _ => break,
            };
            self.pos += 1;
            let right = self.pipeline()?;
            left = Command::binary(op, left, right);
        }

        Ok(left)
    }

    fn pipeline(&mut self) -> Result<Command, CommandParseError> {
        let mut left = self.simple()?;

        while self.peek_op() == Some(&Token::Pipe) {
            self.pos += 1;
            let right = self.simple()?;
            left = Command::binary(Operator::Pipe, left, right);
        }

        Ok(left)
    }

    fn simple(&mut self) -> Result<Command, CommandParseError> {
        let mut words = Vec::new();
        let mut cmd = Redirections::default();

        loop {
            match self.items.get_mut(self.pos) {
                Some(Item::Word(word)) => {
                    words.push(std::mem::replace(word, Word::literal("")));
                    self.pos += 1;
                }
                Some(Item::Op(token)) if token.is_redirect() => {
                    let op = token.clone();
                    self.pos += 1;
                    let target = match self.items.get(self.pos) {
                        Some(Item::Word(word)) => word.clone(),
                        _ => return Err(CommandParseError::MissingTarget(op.to_string())),
                    };
                    self.pos += 1;
                    cmd.apply(&op, target);
                }
                _ => break,
            }
        }

        let mut words = words.into_iter();
        let Some(verb) = words.next() else {
            let found = self
                .peek()
                .map(Item::describe)
                .unwrap_or_else(|| "end of input".into());
            return Err(CommandParseError::ExpectedCommand(found));
        };

        Ok(cmd.into_command(verb, words.collect()))
    }
}

#[derive(Default)]
struct Redirections {
    stdin: Option<Word>,
    stdout: Option<Word>,
    stderr: Option<Word>,
    append_stdout: bool,
    append_stderr: bool,
}

impl Redirections {
    fn apply(&mut self, op: &Token<'_>, target: Word) {
        match op {
            Token::Read => self.stdin = Some(target),
            Token::Write | Token::Append => {
                self.append_stdout = *op == Token::Append;
                self.stdout = Some(target);
            }
            Token::ErrWrite | Token::ErrAppend => {
                self.append_stderr = *op == Token::ErrAppend;
                self.stderr = Some(target);
            }
            Token::BothWrite | Token::BothAppend => {
                let append = *op == Token::BothAppend;
                self.append_stdout = append;
                self.append_stderr = append;
                self.stdout = Some(target.clone());
                self.stderr = Some(target);
            }
            _ => unreachable!("not a redirection: {op}"),
        }
    }

    fn into_command(self, verb: Word, parameters: Vec<Word>) -> Command {
        Command::Leaf(SimpleCommand {
            verb,
            parameters,
            stdin: self.stdin,
            stdout: self.stdout,
            stderr: self.stderr,
            append_stdout: self.append_stdout,
            append_stderr: self.append_stderr,
        })
    }
}
