use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::assignment::Assignment;
use crate::structure::Structure;

/// A cell of a laid out grid, frozen for output or printing.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    /// No letter may go here.
    #[default]
    Blocked,
    /// Fillable, but no assigned word covers it.
    Empty,
    /// Fillable and covered by an assigned word.
    Letter(char),
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Cell::Blocked => '█',
            Cell::Empty => ' ',
            Cell::Letter(letter) => *letter,
        })
    }
}

/// Dump a grid row by row, each row terminated by a newline.
pub(crate) fn print(grid: &Array2<Cell>) -> String {
    let mut out = String::with_capacity(grid.nrows() * (grid.ncols() + 1));

    for row in grid.rows() {
        for cell in row {
            out.push_str(&cell.to_string());
        }
        out.push('\n');
    }

    out
}

/// An assignment laid out on its structure, ready to print.
///
/// Blocked cells print as `█`, fillable cells no word covers as a space, and every row ends with a newline.
#[derive(Clone, Copy, Debug)]
pub struct Solution<'a> {
    /// The grid the words are laid out on.
    pub structure: &'a Structure,
    /// The words to lay out.
    pub assignment: &'a Assignment,
}

impl<'a> Solution<'a> {
    /// Pair `assignment` with the `structure` it fills.
    pub fn new(structure: &'a Structure, assignment: &'a Assignment) -> Self {
        Self { structure, assignment }
    }
}

impl Display for Solution<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(&self.structure.letter_grid(self.assignment)))
    }
}

#[cfg(test)]
mod tests {
    use crate::assignment::Assignment;
    use crate::cell::{print, Cell, Solution};
    use crate::parse::parse_structure;
    use crate::variable::{Direction, Variable};

    #[test]
    fn cells_print_as_glyphs() {
        assert_eq!(format!("{}{}{}", Cell::Blocked, Cell::Empty, Cell::Letter('Q')), "█ Q");
    }

    #[test]
    fn partial_assignment_leaves_blanks() {
        let structure = parse_structure("___\n_##\n_##\n").unwrap();
        let assignment = Assignment::new().extended(Variable::new(0, 0, Direction::Across, 3), "CAT");

        assert_eq!(format!("{}", Solution::new(&structure, &assignment)), "CAT\n ██\n ██\n");
        assert_eq!(print(&structure.letter_grid(&Assignment::new())), "   \n ██\n ██\n");
    }
}
