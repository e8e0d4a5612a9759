use std::fmt;

use itertools::Itertools;

/// One piece of a [`Word`]: either literal text or a `$NAME` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Literal(String),
    Variable(String),
}

impl Fragment {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Unset variables expand to the empty string.
    pub fn expand(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Variable(name) => lookup(name),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Variable(name) => write!(f, "${name}"),
        }
    }
}

/// An ordered, non-empty chain of fragments that concatenate into one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word(Vec<Fragment>);

impl Word {
    pub fn new(fragments: Vec<Fragment>) -> Option<Self> {
        (!fragments.is_empty()).then_some(Self(fragments))
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self(vec![Fragment::literal(text)])
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.0
    }

    /// The atomic token this word evaluates to right now.
    pub fn concat(&self) -> String {
        self.0.iter().map(Fragment::expand).join("")
    }

    /// The word as written, with variable references left unexpanded.
    pub fn raw(&self) -> String {
        self.0.iter().join("")
    }

    /// Splits a `NAME`, `=`, `VALUE...` chain into the name and the value fragments.
    pub fn as_assignment(&self) -> Option<(&str, &[Fragment])> {
        match self.0.as_slice() {
            [Fragment::Literal(name), Fragment::Literal(eq), value @ ..]
                if eq == "=" && is_name(name) && !value.is_empty() =>
            {
                Some((name, value))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, the only names an assignment may set.
pub(crate) fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn lookup(name: &str) -> String {
    std::env::var_os(name)
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_list_is_not_a_word() {
        assert_eq!(Word::new(Vec::new()), None);
    }

    #[test]
    fn concat_expands_variables_in_place() {
        std::env::set_var("MISH_WORD_TEST_DIR", "/opt");
        let word = Word::new(vec![
            Fragment::variable("MISH_WORD_TEST_DIR"),
            Fragment::literal("/bin"),
        ])
        .unwrap();

        assert_eq!(word.concat(), "/opt/bin");
        assert_eq!(word.raw(), "$MISH_WORD_TEST_DIR/bin");
    }

    #[test]
    fn unset_variable_concats_to_nothing() {
        let word = Word::new(vec![
            Fragment::literal("a"),
            Fragment::variable("MISH_WORD_TEST_NEVER_SET"),
            Fragment::literal("b"),
        ])
        .unwrap();

        assert_eq!(word.concat(), "ab");
    }

    #[test]
    fn assignment_needs_name_equals_and_value() {
        let word = Word::new(vec![
            Fragment::literal("X"),
            Fragment::literal("="),
            Fragment::variable("Y"),
        ])
        .unwrap();
        let (name, value) = word.as_assignment().unwrap();
        assert_eq!(name, "X");
        assert_eq!(value, &[Fragment::variable("Y")]);

        assert!(Word::literal("X=1").as_assignment().is_none());
        assert!(Word::new(vec![Fragment::literal("X"), Fragment::literal("=")])
            .unwrap()
            .as_assignment()
            .is_none());
    }

    #[test]
    fn assignment_rejects_names_the_environment_cannot_hold() {
        for name in ["A=B", "X\0", "1X", "has space", ""] {
            let word = Word::new(vec![
                Fragment::literal(name),
                Fragment::literal("="),
                Fragment::literal("value"),
            ])
            .unwrap();
            assert!(word.as_assignment().is_none(), "{name:?} accepted");
        }

        let word = Word::new(vec![
            Fragment::literal("_PATH2"),
            Fragment::literal("="),
            Fragment::literal("value"),
        ])
        .unwrap();
        assert_eq!(word.as_assignment().map(|(name, _)| name), Some("_PATH2"));
    }
}
