use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::domain::{letter_at, Domains};
use crate::model::ConstraintModel;
use crate::solver::SolverFailure;
use crate::variable::Variable;

/// An ordered pair `(x, y)`: "every candidate of `x` must have a partner among the candidates of `y`".
pub type Arc = (Variable, Variable);

/// What a successful propagation did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Propagation {
    /// Calls to [`revise`] that removed at least one candidate.
    pub revisions: u64,
    /// Candidates removed in total.
    pub pruned: u64,
}

/// Make `x` arc consistent with `y`: drop every candidate of `x` whose letter at the shared cell appears in
/// no candidate of `y` at that cell.
///
/// Returns whether anything was removed. Pairs that do not cross are left alone.
pub fn revise(model: &ConstraintModel, domains: &mut Domains, x: Variable, y: Variable) -> bool {
    revise_counting(model, domains, x, y) > 0
}

fn revise_counting(model: &ConstraintModel, domains: &mut Domains, x: Variable, y: Variable) -> usize {
    let Some((kx, ky)) = model.overlap(x, y) else {
        return 0;
    };

    let supported = domains.get(&y)
        .into_iter()
        .flatten()
        .filter_map(|word| letter_at(word, ky))
        .collect::<HashSet<char>>();

    domains.retain(&x, |word| letter_at(word, kx).is_some_and(|letter| supported.contains(&letter)))
}

struct ArcQueue {
    queue: VecDeque<Arc>,
    queued: HashSet<Arc>,
}

impl ArcQueue {
    fn with_initial_queue<Arcs>(arcs: Arcs) -> Self
    where
        Arcs: IntoIterator<Item=Arc>,
    {
        let mut queue = Self { queue: VecDeque::new(), queued: HashSet::new() };
        arcs.into_iter().for_each(|arc| queue.enqueue(arc));
        queue
    }

    fn enqueue(&mut self, arc: Arc) {
        if self.queued.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.queued.remove(&arc);
        Some(arc)
    }
}

/// Enforce arc consistency over `domains` with AC-3.
///
/// The queue starts as `arcs`, or every arc of the model when `arcs` is [`None`].
/// Whenever revising `(x, y)` removes candidates from `x`, every other neighbor `z` of `x` may have lost its
/// support, so `(z, x)` is queued again for each `z` other than `y`.
///
/// Returns [`SolverFailure::Inconsistent`] as soon as any variable runs out of candidates, including a
/// variable that had none to begin with.
pub fn ac3(model: &ConstraintModel, domains: &mut Domains, arcs: Option<Vec<Arc>>) -> Result<Propagation, SolverFailure> {
    if let Some(variable) = domains.first_empty() {
        debug!("{:?} has no candidates before propagation", variable);
        return Err(SolverFailure::Inconsistent { variable });
    }

    let mut queue = ArcQueue::with_initial_queue(arcs.unwrap_or_else(|| model.arcs()));
    let mut propagation = Propagation::default();

    while let Some((x, y)) = queue.pop_front() {
        let removed = revise_counting(model, domains, x, y);
        if removed == 0 {
            continue;
        }

        propagation.revisions += 1;
        propagation.pruned += removed as u64;
        trace!("revised {:?} against {:?}: {} removed, {} left", x, y, removed, domains.size(&x));

        if domains.size(&x) == 0 {
            debug!("propagation emptied {:?}", x);
            return Err(SolverFailure::Inconsistent { variable: x });
        }

        // neighbors are re-derived from the graph on every revision
        for z in model.neighbors(x).filter(|z| *z != y) {
            queue.enqueue((z, x));
        }
    }

    debug!("arc consistency: {} revisions, {} candidates pruned", propagation.revisions, propagation.pruned);
    Ok(propagation)
}

#[cfg(test)]
mod tests {
    use crate::consistency::{ac3, revise};
    use crate::domain::Domains;
    use crate::model::{build, ConstraintModel};
    use crate::parse::parse_structure;
    use crate::solver::SolverFailure;
    use crate::variable::{Direction, Variable};

    fn model(structure: &str, words: &[&str]) -> ConstraintModel {
        build(parse_structure(structure).unwrap(), words.iter().copied()).unwrap()
    }

    fn domains_of(model: &ConstraintModel) -> Domains {
        Domains::init(model.variables(), model.words())
    }

    /// Each remaining candidate has a partner in every neighbor's domain.
    fn assert_arc_consistent(model: &ConstraintModel, domains: &Domains) {
        for (x, candidates) in domains.iter() {
            for y in model.neighbors(*x) {
                let (kx, ky) = model.overlap(*x, y).unwrap();
                for word in candidates {
                    let letter = word.chars().nth(kx).unwrap();
                    assert!(
                        domains.get(&y).unwrap().iter().any(|other| other.chars().nth(ky) == Some(letter)),
                        "{} in {:?} has no partner in {:?}", word, x, y
                    );
                }
            }
        }
    }

    // ___
    // _##
    // _##
    const CORNER: &str = "___\n_##\n_##\n";

    #[test]
    fn revise_removes_unsupported_words() {
        let model = model(CORNER, &["CAT", "CAR", "DOG"]);
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 0, Direction::Down, 3);

        let mut domains = domains_of(&model);
        // DOG still supports itself
        assert!(!revise(&model, &mut domains, across, down));

        let mut domains = Domains::init(model.variables(), model.words());
        domains.retain(&down, |word| word.starts_with('C'));
        assert!(revise(&model, &mut domains, across, down));
        assert_eq!(domains.size(&across), 2);
        assert!(!revise(&model, &mut domains, across, down));
    }

    #[test]
    fn revise_without_overlap_is_a_no_op() {
        let model = model("___\n###\n__#\n", &["ABC", "XY"]);
        let mut domains = domains_of(&model);
        let before = domains.clone();

        assert!(!revise(&model, &mut domains, model.variables()[0], model.variables()[1]));
        assert_eq!(domains, before);
    }

    #[test]
    fn ac3_prunes_to_arc_consistency() {
        // _____
        // _#_#_
        // _____
        let model = model("_____\n_#_#_\n_____\n", &[
            "ABODE", "ALONE", "EARTH", "OPERA",
            "ACE", "OAR", "ETH", "BIT", "TUB",
        ]);
        let mut domains = domains_of(&model);
        let before = domains.clone();

        let propagation = ac3(&model, &mut domains, None).unwrap();
        assert!(propagation.revisions > 0);
        assert_eq!(domains.get(&Variable::new(2, 0, Direction::Across, 5)).unwrap().iter().collect::<Vec<_>>(), vec!["EARTH"]);
        assert_eq!(domains.get(&Variable::new(0, 4, Direction::Down, 3)).unwrap().iter().collect::<Vec<_>>(), vec!["ETH"]);
        assert_eq!(domains.size(&Variable::new(0, 0, Direction::Across, 5)), 2);
        assert_eq!(propagation.pruned as usize, before.total() - domains.total());
        assert_arc_consistent(&model, &domains);

        // monotonic
        for (variable, words) in domains.iter() {
            assert!(words.is_subset(before.get(variable).unwrap()));
        }

        // idempotent
        let settled = domains.clone();
        let again = ac3(&model, &mut domains, None).unwrap();
        assert_eq!(again.revisions, 0);
        assert_eq!(domains, settled);
    }

    #[test]
    fn ac3_reports_wipeout() {
        let model = model(CORNER, &["CAT", "DOG"]);
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 0, Direction::Down, 3);

        let mut domains = domains_of(&model);
        domains.retain(&across, |word| word == "CAT");
        domains.retain(&down, |word| word == "DOG");

        assert_eq!(
            ac3(&model, &mut domains, None),
            Err(SolverFailure::Inconsistent { variable: across })
        );
    }

    #[test]
    fn ac3_fails_on_initially_empty_domain() {
        let model = model(CORNER, &[]);
        let mut domains = domains_of(&model);
        assert!(matches!(ac3(&model, &mut domains, None), Err(SolverFailure::Inconsistent { .. })));
    }

    #[test]
    fn ac3_accepts_a_partial_queue() {
        let model = model(CORNER, &["CAT", "COT", "DOG"]);
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 0, Direction::Down, 3);

        let mut domains = domains_of(&model);
        domains.retain(&down, |word| word == "COT");

        // only the arc into `down` is queued, and `down` is already consistent with `across`
        let propagation = ac3(&model, &mut domains, Some(vec![(down, across)])).unwrap();
        assert_eq!(propagation.revisions, 0);
        assert_eq!(domains.size(&across), 3);

        let propagation = ac3(&model, &mut domains, Some(vec![(across, down)])).unwrap();
        assert_eq!(propagation.revisions, 1);
        assert_eq!(domains.size(&across), 2);
    }
}
