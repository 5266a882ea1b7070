use std::fmt::Debug;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{BoundedNumber, Constraint, Objective, OError};

/// The results of the evaluation function for one candidate tour. This is the output of
/// [`Evaluator::evaluate`] and is owned by the search driver that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// The objective values, in the same order as [`Evaluator::objectives`].
    pub objectives: Vec<f64>,
    /// The constraint values, in the same order as [`Evaluator::constraints`]. A value smaller or
    /// equal to zero means that the constraint is satisfied.
    pub constraints: Vec<f64>,
}

impl EvaluationResult {
    /// Whether all the constraint values are satisfied, using the $g(x) \leq 0$ convention.
    ///
    /// return: `bool`
    pub fn is_feasible(&self) -> bool {
        self.constraints.iter().all(|g| *g <= 0.0)
    }

    /// Calculate the overall amount of violation of the constraints. This is 0.0 for a feasible
    /// solution, otherwise a positive number.
    ///
    /// # Arguments
    ///
    /// * `constraints`: The constraints the values were evaluated for.
    ///
    /// return: `f64`
    pub fn constraint_violation(&self, constraints: &[Constraint]) -> f64 {
        constraints
            .iter()
            .zip(&self.constraints)
            .map(|(c, value)| c.constraint_violation(*value))
            .sum()
    }
}

/// The trait an external multi-objective algorithm uses to evaluate candidate tours. The
/// implementor is read-only after construction, so the evaluation can run from many threads at
/// once.
pub trait Evaluator: Sync + Send + Debug {
    /// The objectives the evaluation returns a value for.
    ///
    /// return: `Vec<Objective>`
    fn objectives(&self) -> Vec<Objective>;

    /// The constraints the evaluation returns a value for.
    ///
    /// return: `Vec<Constraint>`
    fn constraints(&self) -> Vec<Constraint>;

    /// The inclusive range of values for each position of a candidate.
    ///
    /// return: `Vec<BoundedNumber<usize>>`
    fn bounds(&self) -> Vec<BoundedNumber<usize>>;

    /// Evaluate the objectives and constraints of one candidate. This returns an error if the
    /// candidate cannot be evaluated at all (for example when it has the wrong length).
    ///
    /// # Arguments
    ///
    /// * `candidate`: The candidate to evaluate.
    ///
    /// returns: `Result<EvaluationResult, OError>`
    fn evaluate(&self, candidate: &[usize]) -> Result<EvaluationResult, OError>;

    /// The number of variables in a candidate.
    ///
    /// return: `usize`
    fn number_of_variables(&self) -> usize {
        self.bounds().len()
    }

    /// The number of objectives.
    ///
    /// return: `usize`
    fn number_of_objectives(&self) -> usize {
        self.objectives().len()
    }

    /// The number of constraints.
    ///
    /// return: `usize`
    fn number_of_constraints(&self) -> usize {
        self.constraints().len()
    }

    /// Evaluate a batch of candidates. The results are returned in the same order as the
    /// candidates and are identical to calling [`Evaluator::evaluate`] on each of them. This
    /// returns the first error raised by any evaluation.
    ///
    /// # Arguments
    ///
    /// * `candidates`: The candidates to evaluate.
    /// * `parallel`: Whether to run the evaluations in threads.
    ///
    /// returns: `Result<Vec<EvaluationResult>, OError>`
    fn evaluate_all(
        &self,
        candidates: &[Vec<usize>],
        parallel: bool,
    ) -> Result<Vec<EvaluationResult>, OError> {
        let evaluate = |(idx, c): (usize, &Vec<usize>)| {
            debug!("Evaluating candidate #{} - {:?}", idx + 1, c);
            self.evaluate(c)
        };
        if parallel {
            candidates.par_iter().enumerate().map(evaluate).collect()
        } else {
            candidates.iter().enumerate().map(evaluate).collect()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Serialised description of a problem: its objectives, constraints and variables.
pub struct ProblemExport {
    /// The problem name.
    pub name: String,
    /// The problem objectives.
    pub objectives: Vec<Objective>,
    /// The problem constraints.
    pub constraints: Vec<Constraint>,
    /// The bounds of the problem variables.
    pub variables: Vec<BoundedNumber<usize>>,
    /// The number of objectives
    pub number_of_objectives: usize,
    /// The number of constraints
    pub number_of_constraints: usize,
    /// The number of variables
    pub number_of_variables: usize,
}
