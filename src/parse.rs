use std::collections::BTreeSet;

use itertools::Itertools;

use crate::builder::StructureInvalidReason;
use crate::structure::Structure;

/// Reasons text input may be rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseInvalidReason {
    /// The structure text has no cells at all.
    EmptyStructure,
    /// The structure text parsed to an unusable matrix.
    Structure(StructureInvalidReason),
    /// A word list line held more than one word.
    MalformedWord {
        /// 1-based line number.
        line: usize,
    },
}

impl From<StructureInvalidReason> for ParseInvalidReason {
    fn from(reason: StructureInvalidReason) -> Self {
        Self::Structure(reason)
    }
}

/// Read a structure drawn as text, one line per row.
///
/// `_` marks a fillable cell and any other character a blocked one.
/// The grid is as wide as its longest line; shorter lines are padded with blocked cells.
pub fn parse_structure(text: &str) -> Result<Structure, ParseInvalidReason> {
    let lines = text.lines().collect_vec();
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    if width == 0 {
        return Err(ParseInvalidReason::EmptyStructure);
    }

    let rows = lines.iter()
        .map(|line| {
            let mut row = line.chars().map(|c| c == '_').collect_vec();
            row.resize(width, false);
            row
        })
        .collect_vec();

    Ok(Structure::from_matrix(width, rows.len(), rows)?)
}

/// Read a word list, one word per line.
///
/// Words are trimmed and upper-cased, blank lines are skipped and repeats collapse.
pub fn parse_words(text: &str) -> Result<BTreeSet<String>, ParseInvalidReason> {
    let mut words = BTreeSet::new();

    for (index, line) in text.lines().enumerate() {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if word.chars().any(char::is_whitespace) {
            return Err(ParseInvalidReason::MalformedWord { line: index + 1 });
        }

        words.insert(word.to_uppercase());
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use crate::location::Location;
    use crate::parse::{parse_structure, parse_words, ParseInvalidReason};

    #[test]
    fn structure_pads_short_lines() {
        let structure = parse_structure("#___\n_\n\n").unwrap();

        assert_eq!((structure.width(), structure.height()), (4, 3));
        assert!(structure.is_open(Location(1, 0)));
        assert!(structure.is_open(Location(0, 1)));
        assert!(!structure.is_open(Location(1, 1)));
        assert!(!structure.is_open(Location(0, 2)));
        assert_eq!(structure.variables().len(), 1);
    }

    #[test]
    fn any_other_character_blocks() {
        let structure = parse_structure("_X_\n_ _\r\n").unwrap();
        assert!(!structure.is_open(Location(1, 0)));
        assert!(!structure.is_open(Location(1, 1)));
        assert_eq!(structure.variables().len(), 2);
    }

    #[test]
    fn empty_structure_is_rejected() {
        assert_eq!(parse_structure("").unwrap_err(), ParseInvalidReason::EmptyStructure);
        assert_eq!(parse_structure("\n\n").unwrap_err(), ParseInvalidReason::EmptyStructure);
    }

    #[test]
    fn words_are_normalized() {
        let words = parse_words("  cat\nDog\n\ncat \r\nemu\n").unwrap();
        assert_eq!(words.into_iter().collect::<Vec<_>>(), vec!["CAT", "DOG", "EMU"]);
    }

    #[test]
    fn two_words_on_a_line_are_rejected() {
        assert_eq!(parse_words("ONE\n\nTWO WORDS\n").unwrap_err(), ParseInvalidReason::MalformedWord { line: 3 });
    }
}
