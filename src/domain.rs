use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::variable::Variable;

/// The length of `word` in letters, i.e. the number of cells it fills.
#[inline]
pub(crate) fn letter_count(word: &str) -> usize {
    word.chars().count()
}

/// The letter of `word` written in its `index`th cell.
#[inline]
pub(crate) fn letter_at(word: &str, index: usize) -> Option<char> {
    word.chars().nth(index)
}

/// The current candidate words for each variable.
///
/// Domains only ever shrink: words are removed by node and arc consistency, never added back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Domains {
    candidates: BTreeMap<Variable, BTreeSet<String>>,
}

impl Domains {
    /// Seed every variable with the words of matching length.
    pub fn init<'a>(variables: impl IntoIterator<Item=&'a Variable>, words: &BTreeSet<String>) -> Self {
        Self {
            candidates: variables.into_iter()
                .map(|variable| (
                    *variable,
                    words.iter()
                        .filter(|word| letter_count(word) == variable.length)
                        .cloned()
                        .collect(),
                ))
                .collect(),
        }
    }

    /// Seed every variable with every word regardless of length. [`Self::enforce_node_consistency`] tightens this.
    pub fn unfiltered<'a>(variables: impl IntoIterator<Item=&'a Variable>, words: &BTreeSet<String>) -> Self {
        Self {
            candidates: variables.into_iter()
                .map(|variable| (*variable, words.clone()))
                .collect(),
        }
    }

    /// Drop every word whose length differs from its variable's. Idempotent.
    ///
    /// Returns the number of words removed.
    pub fn enforce_node_consistency(&mut self) -> usize {
        let mut removed = 0;

        for (variable, words) in self.candidates.iter_mut() {
            let before = words.len();
            words.retain(|word| letter_count(word) == variable.length);
            removed += before - words.len();
        }

        debug!("node consistency removed {} candidates", removed);
        removed
    }

    /// The candidates of `variable`. Unknown variables have no candidates.
    pub fn get(&self, variable: &Variable) -> Option<&BTreeSet<String>> {
        self.candidates.get(variable)
    }

    /// The number of candidates left for `variable`.
    pub fn size(&self, variable: &Variable) -> usize {
        self.candidates.get(variable).map_or(0, BTreeSet::len)
    }

    /// Keep only the candidates of `variable` for which `keep` holds, returning how many were removed.
    pub(crate) fn retain<F>(&mut self, variable: &Variable, keep: F) -> usize
    where
        F: FnMut(&String) -> bool,
    {
        match self.candidates.get_mut(variable) {
            None => 0,
            Some(words) => {
                let before = words.len();
                words.retain(keep);
                before - words.len()
            }
        }
    }

    /// The first variable, in row-major order, with no candidates left.
    pub fn first_empty(&self) -> Option<Variable> {
        self.candidates.iter()
            .find(|(_, words)| words.is_empty())
            .map(|(variable, _)| *variable)
    }

    /// Every variable with its candidates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item=(&Variable, &BTreeSet<String>)> {
        self.candidates.iter()
    }

    /// Total candidates over all variables.
    pub fn total(&self) -> usize {
        self.candidates.values().map(BTreeSet::len).sum()
    }
}
