use strum::{Display, VariantArray};

use crate::location::{Coord, Location};

/// The direction in which a slot's word is read.
#[derive(Copy, Clone, VariantArray, Display, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Direction {
    /// Step `distance` cells from `location` in this direction.
    pub(crate) fn attempt_from(&self, location: Location, distance: Coord) -> Location {
        match self {
            Self::Across => location.offset_by((distance, 0)),
            Self::Down => location.offset_by((0, distance)),
        }
    }

    /// [`Self::attempt_from`], or [`None`] if the step leaves the coordinate space.
    pub(crate) fn checked_attempt_from(&self, location: Location, distance: Coord) -> Option<Location> {
        match self {
            Self::Across => location.checked_offset_by((distance, 0)),
            Self::Down => location.checked_offset_by((0, distance)),
        }
    }

    /// How far `location` lies from `origin` along this direction, if it lies on that line at all.
    pub(crate) fn distance_between(&self, origin: Location, location: Location) -> Option<Coord> {
        match self {
            Self::Across if location.1 == origin.1 => location.0.checked_sub(origin.0),
            Self::Down if location.0 == origin.0 => location.1.checked_sub(origin.1),
            _ => None,
        }
    }
}

/// A slot in the grid: a maximal run of fillable cells, to which exactly one word is assigned.
///
/// Variables are plain values; two variables are the same slot iff all four fields agree.
/// The derived ordering is row-major on the start cell, then direction, then length, and serves as the
/// deterministic tie-break during search.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct Variable {
    /// Row of the first cell.
    pub row: Coord,
    /// Column of the first cell.
    pub column: Coord,
    /// Reading direction.
    pub direction: Direction,
    /// Number of cells, always at least 2 for derived variables.
    pub length: usize,
}

impl Variable {
    /// Construct a variable starting at `(row, column)`.
    pub fn new(row: Coord, column: Coord, direction: Direction, length: usize) -> Self {
        Self { row, column, direction, length }
    }

    /// The first cell of this slot.
    pub fn start(&self) -> Location {
        Location(self.column, self.row)
    }

    /// Every cell of this slot, in reading order.
    pub fn cells(&self) -> impl Iterator<Item=Location> + '_ {
        (0..self.length).map(|k| self.direction.attempt_from(self.start(), k))
    }

    /// The position within this slot's word of the letter written at `location`, if the slot covers it.
    pub fn index_of(&self, location: Location) -> Option<usize> {
        self.direction.distance_between(self.start(), location)
            .filter(|k| *k < self.length)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::location::Location;
    use crate::variable::{Direction, Variable};

    #[test]
    fn cells_follow_direction() {
        let across = Variable::new(1, 2, Direction::Across, 3);
        assert_eq!(across.cells().collect_vec(), vec![Location(2, 1), Location(3, 1), Location(4, 1)]);

        let down = Variable::new(1, 2, Direction::Down, 2);
        assert_eq!(down.cells().collect_vec(), vec![Location(2, 1), Location(2, 2)]);
    }

    #[test]
    fn index_of_covered_and_uncovered_cells() {
        let down = Variable::new(0, 4, Direction::Down, 5);
        assert_eq!(down.index_of(Location(4, 0)), Some(0));
        assert_eq!(down.index_of(Location(4, 3)), Some(3));
        assert_eq!(down.index_of(Location(4, 5)), None);
        assert_eq!(down.index_of(Location(3, 3)), None);

        let across = Variable::new(2, 1, Direction::Across, 3);
        assert_eq!(across.index_of(Location(0, 2)), None);
        assert_eq!(across.index_of(Location(3, 2)), Some(2));
    }

    #[test]
    fn equality_is_structural() {
        let a = Variable::new(0, 0, Direction::Across, 3);
        let b = Variable { row: 0, column: 0, direction: Direction::Across, length: 3 };
        assert_eq!(a, b);
        assert_ne!(a, Variable::new(0, 0, Direction::Down, 3));
        assert_ne!(a, Variable::new(0, 0, Direction::Across, 4));
    }

    #[test]
    fn ordering_is_row_major() {
        let sorted = vec![
            Variable::new(1, 0, Direction::Across, 2),
            Variable::new(0, 3, Direction::Down, 2),
            Variable::new(0, 0, Direction::Down, 3),
            Variable::new(0, 0, Direction::Across, 3),
        ].into_iter().sorted().collect_vec();

        assert_eq!(sorted, vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 0, Direction::Down, 3),
            Variable::new(0, 3, Direction::Down, 2),
            Variable::new(1, 0, Direction::Across, 2),
        ]);
    }
}
