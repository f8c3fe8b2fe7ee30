use std::num::NonZero;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};
use strum::VariantArray;

use crate::assignment::Assignment;
use crate::builder::StructureInvalidReason;
use crate::cell::Cell;
use crate::location::{Dimension, Location};
use crate::variable::{Direction, Variable};

/// The fixed layout of a crossword: which cells are fillable, and the slots those cells form.
///
/// [`Structure`]s are built with a [`StructureBuilder`](crate::builder::StructureBuilder), from a raw matrix
/// with [`Structure::from_matrix`], or by [`parse_structure`](crate::parse::parse_structure).
#[derive(Clone, Debug)]
pub struct Structure {
    // width, height
    pub(crate) dims: (Dimension, Dimension),
    // row major; true where a letter goes
    pub(crate) cells: Array2<bool>,
    pub(crate) variables: Vec<Variable>,
}

impl Structure {
    pub(crate) fn from_cells(dims: (Dimension, Dimension), cells: Array2<bool>) -> Self {
        let variables = derive_variables(&cells);
        Self { dims, cells, variables }
    }

    /// Build a structure from `height` rows of `width` booleans each, `true` marking a fillable cell.
    pub fn from_matrix(width: usize, height: usize, rows: Vec<Vec<bool>>) -> Result<Self, StructureInvalidReason> {
        let (Some(w), Some(h)) = (NonZero::new(width), NonZero::new(height)) else {
            return Err(StructureInvalidReason::ZeroDimension);
        };

        if rows.len() != height {
            return Err(StructureInvalidReason::DimensionMismatch { expected: (width, height), found: (width, rows.len()) });
        }
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(StructureInvalidReason::DimensionMismatch { expected: (width, height), found: (row.len(), height) });
        }

        let cells = Array2::from_shape_vec((height, width), rows.into_iter().flatten().collect_vec())
            .map_err(|_| StructureInvalidReason::DimensionMismatch { expected: (width, height), found: (width, height) })?;

        Ok(Self::from_cells((w, h), cells))
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// Whether a letter goes at `location`. Locations off the grid are not fillable.
    pub fn is_open(&self, location: Location) -> bool {
        self.cells.get(location.as_index()).copied().unwrap_or(false)
    }

    /// Every slot of the grid, in row-major order of their first cells.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Lay the words of `assignment` out on the grid.
    pub fn letter_grid(&self, assignment: &Assignment) -> Array2<Cell> {
        let mut grid = self.cells.map(|open| if *open { Cell::Empty } else { Cell::Blocked });

        for (variable, word) in assignment.iter() {
            for (location, letter) in variable.cells().zip(word.chars()) {
                if let Some(cell) = grid.get_mut(location.as_index()) {
                    cell.assign_elem(Cell::Letter(letter));
                }
            }
        }

        grid
    }
}

/// Every maximal run of two or more fillable cells, along rows and down columns, anchored at its first cell.
fn derive_variables(cells: &Array2<bool>) -> Vec<Variable> {
    let is_open = |location: Location| cells.get(location.as_index()).copied().unwrap_or(false);
    let mut variables = Vec::new();

    for ((row, column), open) in cells.indexed_iter() {
        if !*open {
            continue;
        }
        let location = Location(column, row);

        for direction in Direction::VARIANTS {
            // only start counting where the run starts
            let continues_run = match direction {
                Direction::Across => column > 0 && is_open(Location(column - 1, row)),
                Direction::Down => row > 0 && is_open(Location(column, row - 1)),
            };
            if continues_run {
                continue;
            }

            let length = (0..)
                .take_while(|k| is_open(direction.attempt_from(location, *k)))
                .count();

            if length >= 2 {
                variables.push(Variable::new(row, column, *direction, length));
            }
        }
    }

    variables.sort();
    variables
}

#[cfg(test)]
mod tests {
    use crate::builder::StructureInvalidReason;
    use crate::location::Location;
    use crate::structure::Structure;
    use crate::variable::{Direction, Variable};

    fn matrix(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter().map(|row| row.chars().map(|c| c == '_').collect()).collect()
    }

    #[test]
    fn derives_runs_of_at_least_two() {
        // _ _ _ #
        // _ # _ _
        // _ # # _
        let structure = Structure::from_matrix(4, 3, matrix(&["___#", "_#__", "_##_"])).unwrap();

        assert_eq!(structure.variables(), &[
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 0, Direction::Down, 3),
            Variable::new(0, 2, Direction::Down, 2),
            Variable::new(1, 2, Direction::Across, 2),
            Variable::new(1, 3, Direction::Down, 2),
        ]);
    }

    #[test]
    fn single_cells_are_not_variables() {
        let structure = Structure::from_matrix(3, 3, matrix(&["_#_", "###", "_#_"])).unwrap();
        assert!(structure.variables().is_empty());
    }

    #[test]
    fn rejects_inconsistent_dims() {
        assert_eq!(
            Structure::from_matrix(3, 2, matrix(&["___"])).unwrap_err(),
            StructureInvalidReason::DimensionMismatch { expected: (3, 2), found: (3, 1) }
        );
        assert_eq!(
            Structure::from_matrix(3, 2, matrix(&["___", "__"])).unwrap_err(),
            StructureInvalidReason::DimensionMismatch { expected: (3, 2), found: (2, 2) }
        );
        assert_eq!(
            Structure::from_matrix(0, 0, vec![]).unwrap_err(),
            StructureInvalidReason::ZeroDimension
        );
    }

    #[test]
    fn off_grid_is_closed() {
        let structure = Structure::from_matrix(2, 1, matrix(&["__"])).unwrap();
        assert!(structure.is_open(Location(1, 0)));
        assert!(!structure.is_open(Location(2, 0)));
        assert!(!structure.is_open(Location(0, 1)));
    }
}
