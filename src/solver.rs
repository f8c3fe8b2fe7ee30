use std::cmp::Reverse;

use instant::{Duration, Instant};
use itertools::Itertools;
use log::{debug, trace};
use unordered_pair::UnorderedPair;

use crate::assignment::Assignment;
use crate::consistency::ac3;
use crate::domain::{letter_at, letter_count, Domains};
use crate::model::ConstraintModel;
use crate::variable::Variable;

/// Reasons a [`Solver`] may fail to produce a complete assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverFailure {
    /// Node or arc consistency left `variable` without candidates, so the puzzle is unsatisfiable under this
    /// word list. Search was never attempted.
    Inconsistent {
        /// The first variable found without candidates.
        variable: Variable,
    },
    /// Search tried every candidate at every choice point without finding a complete assignment.
    Exhausted,
    /// The [`SearchBudget`] ran out before search finished; a solution may still exist.
    BudgetExceeded,
}

/// Limits on how long search may run. The default is unlimited.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchBudget {
    max_nodes: Option<u64>,
    timeout: Option<Duration>,
}

impl SearchBudget {
    /// No limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Give up after visiting `max_nodes` search nodes.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Give up once `timeout` has elapsed since the solve began.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Counters gathered over one [`Solver::run`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Search nodes visited, i.e. calls of the backtracking step.
    pub nodes: u64,
    /// Search nodes which ran out of candidates.
    pub backtracks: u64,
    /// Revisions during arc consistency which removed something.
    pub revisions: u64,
    /// Candidates removed by node and arc consistency.
    pub pruned: u64,
    /// Wall time of the run.
    pub duration: Duration,
}

/// Backtracking search over the domains of a [`ConstraintModel`], after node and arc consistency have pruned them.
///
/// The solver owns its [`Domains`]; the model is only read, so any number of solvers may share one model.
/// Use [`Self::run`] to attempt to find a solution, or the [`solve`] shorthand.
pub struct Solver<'a> {
    model: &'a ConstraintModel,
    domains: Domains,
    budget: SearchBudget,
    deadline: Option<Instant>,
    statistics: Statistics,
}

impl<'a> From<&'a ConstraintModel> for Solver<'a> {
    fn from(model: &'a ConstraintModel) -> Self {
        Self::with_domains(model, Domains::init(model.variables(), model.words()))
    }
}

impl<'a> Solver<'a> {
    /// A solver starting from the given `domains` rather than the model's full word list.
    pub fn with_domains(model: &'a ConstraintModel, domains: Domains) -> Self {
        Self {
            model,
            domains,
            budget: SearchBudget::default(),
            deadline: None,
            statistics: Statistics::default(),
        }
    }

    /// Replace the search budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// The current domains. After [`Self::run`] these are node and arc consistent, unless a domain was emptied.
    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Counters from the last [`Self::run`].
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Choose the next variable to assign: fewest candidates left, then most crossings, then row-major order.
    ///
    /// Returns [`None`] once every variable is assigned.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<Variable> {
        self.model.variables().iter()
            .filter(|variable| !assignment.contains(variable))
            .min_by_key(|variable| (
                self.domains.size(variable),
                Reverse(self.model.degree(**variable)),
                **variable,
            ))
            .copied()
    }

    /// Every candidate of `variable`, ordered so that those ruling out the fewest candidates of unassigned
    /// neighbors come first. Ties keep the domain's order.
    pub fn order_domain_values(&self, variable: Variable, assignment: &Assignment) -> Vec<String> {
        let open_neighbors = self.model.neighbors(variable)
            .filter(|neighbor| !assignment.contains(neighbor))
            .filter_map(|neighbor| self.model.overlap(variable, neighbor).map(|overlap| (neighbor, overlap)))
            .collect_vec();

        self.domains.get(&variable)
            .into_iter()
            .flatten()
            .map(|word| {
                let ruled_out: usize = open_neighbors.iter()
                    .map(|(neighbor, (kx, ky))| {
                        let letter = letter_at(word, *kx);
                        self.domains.get(neighbor)
                            .into_iter()
                            .flatten()
                            .filter(|other| letter_at(other, *ky) != letter)
                            .count()
                    })
                    .sum();
                (ruled_out, word)
            })
            .sorted_by_key(|(ruled_out, _)| *ruled_out)
            .map(|(_, word)| word.clone())
            .collect_vec()
    }

    /// Whether `assignment` breaks no constraint: every word fits its slot, no word is used twice, and every
    /// pair of assigned crossing slots agrees on the shared letter. Unassigned slots constrain nothing.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        assignment.iter().all(|(variable, word)| letter_count(word) == variable.length)
            && assignment.iter().map(|(_, word)| word).all_unique()
            && self.model.crossings().all(|(UnorderedPair(a, b), crossing)| {
                match (assignment.get(&a), assignment.get(&b)) {
                    (Some(word_a), Some(word_b)) => {
                        letter_at(word_a, crossing.index_in(&a)) == letter_at(word_b, crossing.index_in(&b))
                    }
                    _ => true,
                }
            })
    }

    fn check_budget(&self) -> Result<(), SolverFailure> {
        if self.budget.max_nodes.is_some_and(|max_nodes| self.statistics.nodes > max_nodes) {
            debug!("node budget of {:?} exhausted", self.budget.max_nodes);
            return Err(SolverFailure::BudgetExceeded);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() > deadline) {
            debug!("time budget of {:?} exhausted", self.budget.timeout);
            return Err(SolverFailure::BudgetExceeded);
        }
        Ok(())
    }

    /// Extend a consistent `assignment` until it is complete.
    ///
    /// `Ok(None)` means no completion exists below this point and the caller should try its next candidate.
    /// [`Err`] is only ever [`SolverFailure::BudgetExceeded`] and unwinds the whole search.
    pub fn backtrack(&mut self, assignment: Assignment) -> Result<Option<Assignment>, SolverFailure> {
        self.statistics.nodes += 1;
        self.check_budget()?;

        if assignment.len() == self.model.variables().len() {
            return Ok(Some(assignment));
        }

        let Some(variable) = self.select_unassigned_variable(&assignment) else {
            return Ok(None);
        };
        let candidates = self.order_domain_values(variable, &assignment);
        trace!("depth {}: {:?} with {} candidates", assignment.len(), variable, candidates.len());

        for word in candidates {
            // a fresh assignment per candidate; siblings never see each other's choices
            let extended = assignment.extended(variable, word);
            if !self.consistent(&extended) {
                continue;
            }

            if let Some(found) = self.backtrack(extended)? {
                return Ok(Some(found));
            }
        }

        self.statistics.backtracks += 1;
        Ok(None)
    }

    /// Enforce node consistency, then arc consistency over every arc, then search.
    ///
    /// Returns a complete, consistent [`Assignment`], or why there is none.
    /// An emptied domain short-circuits to [`SolverFailure::Inconsistent`] without searching.
    pub fn run(&mut self) -> Result<Assignment, SolverFailure> {
        let start = Instant::now();
        self.statistics = Statistics::default();
        self.deadline = self.budget.timeout.map(|timeout| start + timeout);

        self.statistics.pruned += self.domains.enforce_node_consistency() as u64;

        let result = match ac3(self.model, &mut self.domains, None) {
            Err(failure) => Err(failure),
            Ok(propagation) => {
                self.statistics.revisions += propagation.revisions;
                self.statistics.pruned += propagation.pruned;

                self.backtrack(Assignment::new())
                    .and_then(|found| found.ok_or(SolverFailure::Exhausted))
            }
        };

        self.statistics.duration = start.elapsed();
        debug!("search finished with {:?}: {:?}", result.as_ref().map(Assignment::len), self.statistics);

        result
    }
}

/// Solve `model` with an unlimited budget, returning a complete assignment or [`None`] if there is none.
pub fn solve(model: &ConstraintModel) -> Option<Assignment> {
    Solver::from(model).run().ok()
}
