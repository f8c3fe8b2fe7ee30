use std::collections::BTreeMap;

use crate::variable::Variable;

/// A partial or complete mapping from variables to the words placed in them.
///
/// Assignments are extended by value with [`Assignment::extended`], so a search frame never shares
/// its assignment with a sibling branch.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    words: BTreeMap<Variable, String>,
}

impl Assignment {
    /// The empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of `self` which additionally places `word` in `variable`.
    pub fn extended(&self, variable: Variable, word: impl Into<String>) -> Self {
        let mut words = self.words.clone();
        words.insert(variable, word.into());
        Self { words }
    }

    /// The word placed in `variable`, if any.
    pub fn get(&self, variable: &Variable) -> Option<&str> {
        self.words.get(variable).map(String::as_str)
    }

    /// Whether `variable` has a word yet.
    #[inline]
    pub fn contains(&self, variable: &Variable) -> bool {
        self.words.contains_key(variable)
    }

    /// Number of variables with a word.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no variable has a word.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Placed words in row-major order of their variables.
    pub fn iter(&self) -> impl Iterator<Item=(&Variable, &str)> {
        self.words.iter().map(|(variable, word)| (variable, word.as_str()))
    }
}

impl FromIterator<(Variable, String)> for Assignment {
    fn from_iter<T: IntoIterator<Item=(Variable, String)>>(iter: T) -> Self {
        Self { words: iter.into_iter().collect() }
    }
}
