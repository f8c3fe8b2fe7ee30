use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A nonzero grid extent, used for both width and height.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a grid, i.e. `(column, row)`. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// Index into a row-major [`ndarray::Array2`].
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (Coord, Coord)) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }

    /// [`Self::offset_by`], or [`None`] if either coordinate would overflow.
    pub(crate) fn checked_offset_by(self, rhs: (Coord, Coord)) -> Option<Self> {
        Some(Self(self.0.checked_add(rhs.0)?, self.1.checked_add(rhs.1)?))
    }

    pub(crate) fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
