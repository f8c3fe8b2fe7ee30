use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use log::debug;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::location::Location;
use crate::structure::Structure;
use crate::variable::Variable;

/// Reasons a word source may be rejected when building a [`ConstraintModel`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ModelInvalidReason {
    /// The word list contained an empty word.
    EmptyWord,
    /// A word contained whitespace, which can never be placed in a grid.
    Whitespace {
        /// The offending word.
        word: String,
    },
}

/// The grid cell two crossing variables share.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Crossing {
    /// Where the two slots cross.
    pub cell: Location,
}

impl Crossing {
    /// The letter index of the shared cell within `variable`'s word.
    ///
    /// # Panics
    /// If `variable` does not cover the shared cell, which means the crossing was recorded for the wrong pair.
    pub fn index_in(&self, variable: &Variable) -> usize {
        variable.index_of(self.cell)
            .unwrap_or_else(|| panic!("crossing at {:?} lies outside {:?}", self.cell, variable))
    }
}

/// A crossword as a constraint satisfaction problem: the structure's variables, the constraint graph
/// linking each pair of crossing variables, and the candidate words.
///
/// [`ConstraintModel`]s are built with [`build`] and are never mutated afterward.
#[derive(Clone, Debug)]
pub struct ConstraintModel {
    pub(crate) structure: Structure,
    // node for every variable, edge for every pair sharing a cell
    pub(crate) graph: UnGraphMap<Variable, Crossing>,
    pub(crate) words: BTreeSet<String>,
}

/// Derive the constraint graph of `structure` and pair it with the candidate `words`.
///
/// Duplicate words are collapsed.
/// Returns [`Err`] with a [`ModelInvalidReason`] if any word can never be placed in a grid.
pub fn build<I, S>(structure: Structure, words: I) -> Result<ConstraintModel, ModelInvalidReason>
where
    I: IntoIterator<Item=S>,
    S: Into<String>,
{
    let words = words.into_iter().map(Into::into).collect::<BTreeSet<String>>();

    if words.iter().any(String::is_empty) {
        return Err(ModelInvalidReason::EmptyWord);
    }
    if let Some(word) = words.iter().find(|word| word.chars().any(char::is_whitespace)) {
        return Err(ModelInvalidReason::Whitespace { word: word.clone() });
    }

    // which variables cover each cell
    let mut coverage: HashMap<Location, Vec<Variable>> = HashMap::new();
    for variable in structure.variables() {
        for location in variable.cells() {
            coverage.entry(location).or_default().push(*variable);
        }
    }

    let mut graph = UnGraphMap::with_capacity(
        structure.variables().len(),
        // at most one crossing per cell
        coverage.len(),
    );
    for variable in structure.variables() {
        graph.add_node(*variable);
    }

    for (location, covering) in coverage.iter().sorted_by_key(|(location, _)| location.as_index()) {
        for (a, b) in covering.iter().tuple_combinations() {
            graph.add_edge(*a, *b, Crossing { cell: *location });
        }
    }

    debug!(
        "built model: {} variables, {} crossings, {} words",
        graph.node_count(),
        graph.edge_count(),
        words.len()
    );

    Ok(ConstraintModel { structure, graph, words })
}

impl ConstraintModel {
    /// The structure this model was derived from.
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Every variable, in row-major order.
    pub fn variables(&self) -> &[Variable] {
        self.structure.variables()
    }

    /// The candidate words, deduplicated.
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    /// The overlap of `x` with `y`: `Some((kx, ky))` if letter `kx` of `x`'s word and letter `ky` of `y`'s word
    /// share a cell, [`None`] if the two slots never meet.
    pub fn overlap(&self, x: Variable, y: Variable) -> Option<(usize, usize)> {
        if x == y {
            return None;
        }

        self.graph.edge_weight(x, y)
            .map(|crossing| (crossing.index_in(&x), crossing.index_in(&y)))
    }

    /// Every variable crossing `variable`. Derived fresh from the graph on every call.
    pub fn neighbors(&self, variable: Variable) -> impl Iterator<Item=Variable> + '_ {
        self.graph.neighbors(variable)
    }

    /// The number of variables crossing `variable`.
    pub fn degree(&self, variable: Variable) -> usize {
        self.graph.neighbors(variable).count()
    }

    /// The overlap table: every crossing pair and the cell it shares.
    pub fn crossings(&self) -> impl Iterator<Item=(UnorderedPair<Variable>, Crossing)> + '_ {
        self.graph.all_edges()
            .map(|(a, b, crossing)| (UnorderedPair(a, b), *crossing))
    }

    /// Every ordered arc `(x, y)` with a defined overlap, both directions of each crossing.
    pub fn arcs(&self) -> Vec<(Variable, Variable)> {
        self.crossings()
            .flat_map(|(UnorderedPair(a, b), _)| [(a, b), (b, a)])
            .collect_vec()
    }
}
