use itertools::Itertools;
use log::{debug, info, trace};
use varisat::{ExtendFormula, Lit, Solver};

use crate::acyclic::find_cycle;
use crate::adjacency::Adjacency;
use crate::board::SolvedBoard;
use crate::config::{Refinement, SolveConfig};
use crate::encoder::Encoder;
use crate::error::SolveError;
use crate::model::Model;
use crate::puzzle::Puzzle;
use crate::variable::VariableIndex;

#[derive(Clone, Debug)]
enum SearchState {
    Searching,
    /// Holds the accepted candidate, or [`None`] once no more acyclic candidates exist.
    Done(Option<Model>),
}

/// Counters describing a [`Search`] so far.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Variables in the formula.
    pub variables: usize,
    /// Clauses in the formula, including those added while searching.
    pub clauses: usize,
    /// Candidates drawn from the SAT solver, accepted or not.
    pub candidates: usize,
    /// Candidates accepted as solutions.
    pub solutions: usize,
}

/// A search for acyclic solutions of a [`Puzzle`].
///
/// The puzzle is encoded once and handed to an incremental SAT solver.
/// Each candidate the solver produces is checked for cycles; a cyclic candidate is ruled out according to [`SolveConfig::refinement`] and the solver is asked again.
/// The first acyclic candidate is the solution.
///
/// [`Search`] is also an [`Iterator`] over every distinct solution: after a solution is accepted, its choice of edges is blocked and the search resumes.
pub struct Search<'a> {
    puzzle: &'a Puzzle,
    index: VariableIndex,
    adjacency: Adjacency,
    config: SolveConfig,
    solver: Solver<'static>,
    state: SearchState,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    /// Encode `puzzle` and prepare to search according to `config`.
    pub fn new(puzzle: &'a Puzzle, config: SolveConfig) -> Self {
        let encoder = Encoder::new(puzzle, config.edge_coloring);
        let formula = encoder.encode();
        let index = *encoder.index();

        let mut solver = Solver::new();
        solver.add_formula(&formula);

        Self {
            puzzle,
            index,
            adjacency: Adjacency::new(puzzle.dims(), &index),
            config,
            solver,
            state: SearchState::Searching,
            stats: SearchStats {
                variables: formula.var_count(),
                clauses: formula.len(),
                ..Default::default()
            },
        }
    }

    /// Find the first acyclic solution.
    ///
    /// Fails with [`SolveError::Unsatisfiable`] if the solver never produced a candidate, and [`SolveError::NoAcyclicSolution`] if every candidate had a cycle.
    pub fn solve(mut self) -> Result<SolvedBoard, SolveError> {
        match self.next_solution()? {
            Some(board) => Ok(board),
            None if self.stats.candidates == 0 => Err(SolveError::Unsatisfiable),
            None => Err(SolveError::NoAcyclicSolution { candidates: self.stats.candidates }),
        }
    }

    /// Find the next acyclic solution, or [`None`] if there are no more.
    pub fn next_solution(&mut self) -> Result<Option<SolvedBoard>, SolveError> {
        match &self.state {
            SearchState::Done(None) => return Ok(None),
            SearchState::Done(Some(model)) => {
                // move on to solutions with different edges
                let clause = self.block_edges(model);
                self.add_clause(&clause);
                self.state = SearchState::Searching;
            }
            SearchState::Searching => {}
        }

        debug!("searching for solution #{}", self.stats.solutions + 1);

        loop {
            if let Some(limit) = self.config.max_candidates {
                if self.stats.candidates >= limit {
                    self.state = SearchState::Done(None);
                    return Err(SolveError::CandidateLimit { limit });
                }
            }

            let model = match self.next_candidate() {
                Ok(Some(model)) => model,
                Ok(None) => {
                    debug!("no more candidates after {}", self.stats.candidates);
                    self.state = SearchState::Done(None);
                    return Ok(None);
                }
                Err(err) => {
                    self.state = SearchState::Done(None);
                    return Err(err);
                }
            };

            match find_cycle(&model, &self.adjacency) {
                None => {
                    info!("accepted candidate #{} as solution #{}", self.stats.candidates, self.stats.solutions + 1);
                    self.stats.solutions += 1;
                    let board = SolvedBoard::from_model(self.puzzle, &self.index, &model);
                    self.state = SearchState::Done(Some(model));
                    return Ok(Some(board));
                }
                Some(cycle) => {
                    trace!("rejected candidate #{} with a cycle of {} edges", self.stats.candidates, cycle.len());
                    let clause = match self.config.refinement {
                        Refinement::BlockModel => self.block_edges(&model),
                        Refinement::ForbidCycle => cycle.iter().map(|var| var.negative()).collect_vec(),
                    };
                    self.add_clause(&clause);
                }
            }
        }
    }

    fn next_candidate(&mut self) -> Result<Option<Model>, SolveError> {
        if !self.solver.solve()? {
            return Ok(None);
        }
        self.stats.candidates += 1;

        Ok(Some(Model::from_lits(&self.solver.model().unwrap_or_default(), self.index.var_count())))
    }

    /// A clause ruling out exactly the edges selected by `model`, whatever the colors.
    fn block_edges(&self, model: &Model) -> Vec<Lit> {
        self.adjacency.edge_vars().map(|var| !model.lit(var)).collect_vec()
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.solver.add_clause(clause);
        self.stats.clauses += 1;
    }

    /// The most recently accepted candidate, if the search is resting on one.
    pub fn accepted_model(&self) -> Option<&Model> {
        match &self.state {
            SearchState::Done(model) => model.as_ref(),
            SearchState::Searching => None,
        }
    }

    /// Whether the search has run out of solutions.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, SearchState::Done(None))
    }

    /// Counters for the search so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The variable numbering of the encoded puzzle.
    pub fn index(&self) -> &VariableIndex {
        &self.index
    }

    /// The cell graph used to check candidates for cycles.
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }
}

impl Iterator for Search<'_> {
    type Item = Result<SolvedBoard, SolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution().transpose()
    }
}

impl Puzzle {
    /// Solve this puzzle with the default [`SolveConfig`].
    pub fn solve(&self) -> Result<SolvedBoard, SolveError> {
        self.solve_with(SolveConfig::default())
    }

    /// Solve this puzzle according to `config`.
    pub fn solve_with(&self, config: SolveConfig) -> Result<SolvedBoard, SolveError> {
        Search::new(self, config).solve()
    }
}
