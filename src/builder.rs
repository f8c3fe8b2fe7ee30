use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};

use crate::location::{Dimension, Location};
use crate::structure::Structure;
use crate::variable::Direction;

/// Reasons a structure may be invalid, either while being built or when given as a raw matrix.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StructureInvalidReason {
    /// A cell was opened or blocked outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// A raw matrix does not have the claimed `(width, height)`.
    DimensionMismatch {
        /// The claimed `(width, height)`.
        expected: (usize, usize),
        /// The first disagreeing `(width, height)` found in the matrix.
        found: (usize, usize),
    },
    /// A claimed width or height was zero.
    ZeroDimension,
}

/// A builder for crossword structures.
///
/// Every cell starts out blocked; open the cells letters go in.
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone)]
pub struct StructureBuilder {
    // width, height
    dims: (Dimension, Dimension),
    cells: Array2<bool>,
    invalid_reasons: Vec<StructureInvalidReason>,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl StructureBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(width, height)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            // row major
            cells: Array2::from_elem((dims.1.get(), dims.0.get()), false),
            invalid_reasons: Default::default(),
        }
    }

    fn set(&mut self, location: Location, open: bool) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !location.within(self.dims) {
            self.invalid_reasons.push(StructureInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.cells.index_mut(location.as_index()).assign_elem(open);
        self
    }

    /// Mark `location` as fillable.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](StructureInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn open(&mut self, location: Location) -> &mut Self {
        self.set(location, true)
    }

    /// Mark `location` as blocked, undoing any earlier [`Self::open`].
    ///
    /// Same conditions as [`Self::open`].
    pub fn block(&mut self, location: Location) -> &mut Self {
        self.set(location, false)
    }

    /// Shorthand for `length` calls to [`Self::open`], starting at `location` and stepping in `direction`.
    ///
    /// The whole run must fit; otherwise the builder becomes invalid and nothing is opened.
    pub fn open_run(&mut self, location: Location, direction: Direction, length: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let fits = length == 0 || direction.checked_attempt_from(location, length - 1)
            .is_some_and(|last| last.within(self.dims));
        if !fits {
            self.invalid_reasons.push(StructureInvalidReason::FeatureOutOfBounds);
            return self;
        }

        for k in 0..length {
            self.open(direction.attempt_from(location, k));
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`StructureInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<StructureInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<StructureInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Structure`], deriving its variables.
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`StructureInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Structure, &Vec<StructureInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(Structure::from_cells(self.dims, self.cells.clone()))
    }
}
