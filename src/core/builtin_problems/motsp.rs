use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::builtin_problems::DistanceMatrix;
use crate::core::utils::get_rng;
use crate::core::{
    BoundedNumber, Constraint, EvaluationResult, Evaluator, Objective, ObjectiveDirection, OError,
    ProblemExport, RelationalOperator,
};

/// The name of the constraint on the tour composition.
pub const PERMUTATION_CONSTRAINT: &str = "permutation";

/// Input arguments to create a [`MOTSPProblem`] with random distances.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MOTSPArg {
    /// The number of cities to visit. This must be at least 2.
    pub number_of_cities: usize,
    /// The number of objectives, one distance matrix per objective. This must be at least 1.
    pub number_of_objectives: usize,
    /// The seed used to generate the distance matrices. When `None`, a different instance is
    /// generated at each run.
    pub seed: Option<u64>,
}

/// Serialised data of a [`MOTSPProblem`], with the distance matrices needed to rebuild it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MOTSPExport {
    /// The problem description.
    pub problem: ProblemExport,
    /// The distance matrix of each objective.
    pub distance_matrices: Vec<DistanceMatrix>,
}

/// The multi-objective travelling salesman problem (MOTSP). The same set of $N$ cities is
/// visited once in a closed tour and each objective $k$ measures the tour length on its own
/// distance matrix $D_k$:
///
///  $$$ Min\ f_k(x) = \sum_{i=0}^{N-1} D_k[x_{i-1}][x_i] $
///
/// where $x$ is the sequence of city indexes and $x_{-1}$ is the last city in the tour. The
/// random matrices are symmetric, have a zero diagonal and their entries are in [0, 1), so each
/// objective is an independent cost landscape over the same cities.
///
/// Each of the $N$ variables is an integer bounded to $[0, N-1]$. The problem has one constraint,
/// named [`PERMUTATION_CONSTRAINT`], with the $g(x) \leq 0$ convention:
///
///  $$$ g(x) = -|\{ i : sort(x)_i \neq i \}| $
///
/// Its magnitude is the number of positions where the sorted tour differs from the identity
/// permutation. Because the value is never positive, the constraint never marks a candidate as
/// infeasible; use [`MOTSPProblem::is_permutation`] to check whether a tour visits every city
/// exactly once.
///
/// # Example
/// ```
///  use motsp::core::builtin_problems::{DistanceMatrix, MOTSPProblem};
///  use motsp::core::Evaluator;
///
///  let d = DistanceMatrix::from_rows(&[
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 3.0],
///     vec![2.0, 3.0, 0.0],
///  ]).unwrap();
///  let problem = MOTSPProblem::from_matrices(vec![d]).unwrap();
///  assert_eq!(problem.tour_cost(&[0, 1, 2], 0).unwrap(), 6.0);
///
///  let result = problem.evaluate(&[0, 1, 2]).unwrap();
///  assert_eq!(result.objectives, vec![6.0]);
///  assert_eq!(result.constraints, vec![0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct MOTSPProblem {
    /// The distance matrix of each objective.
    distance_matrices: Vec<DistanceMatrix>,
    /// One minimised objective per distance matrix.
    objectives: Vec<Objective>,
    /// The constraint on the tour composition.
    constraint: Constraint,
    /// The value range of each tour position.
    bounds: Vec<BoundedNumber<usize>>,
}

impl MOTSPProblem {
    /// Create a problem with random distance matrices. This returns an error if there are fewer
    /// than 2 cities or no objectives.
    ///
    /// # Arguments
    ///
    /// * `number_of_cities`: The number of cities.
    /// * `number_of_objectives`: The number of objectives.
    /// * `rng`: The source of the uniform random numbers.
    ///
    /// returns: `Result<MOTSPProblem, OError>`
    pub fn new<R: Rng + ?Sized>(
        number_of_cities: usize,
        number_of_objectives: usize,
        rng: &mut R,
    ) -> Result<Self, OError> {
        Self::check_dimensions(number_of_cities, number_of_objectives)?;

        let distance_matrices = (0..number_of_objectives)
            .map(|_| DistanceMatrix::random_symmetric(number_of_cities, &mut *rng))
            .collect();
        Self::build(distance_matrices)
    }

    /// Create a problem with random distance matrices generated from a seed.
    ///
    /// # Arguments
    ///
    /// * `number_of_cities`: The number of cities.
    /// * `number_of_objectives`: The number of objectives.
    /// * `seed`: The optional seed. If `None`, matrices change at each call.
    ///
    /// returns: `Result<MOTSPProblem, OError>`
    pub fn create(
        number_of_cities: usize,
        number_of_objectives: usize,
        seed: Option<u64>,
    ) -> Result<Self, OError> {
        let mut rng = get_rng(seed);
        Self::new(number_of_cities, number_of_objectives, &mut rng)
    }

    /// Create a problem from its arguments.
    ///
    /// # Arguments
    ///
    /// * `args`: The problem arguments.
    ///
    /// returns: `Result<MOTSPProblem, OError>`
    pub fn from_args(args: &MOTSPArg) -> Result<Self, OError> {
        Self::create(args.number_of_cities, args.number_of_objectives, args.seed)
    }

    /// Create a problem from known distance matrices, one per objective. This returns an error if
    /// no matrix is given, the matrices have fewer than two cities or different sizes, or any
    /// matrix is not symmetric, has a non-zero diagonal or contains negative or non-finite
    /// distances.
    ///
    /// # Arguments
    ///
    /// * `distance_matrices`: The matrices.
    ///
    /// returns: `Result<MOTSPProblem, OError>`
    pub fn from_matrices(distance_matrices: Vec<DistanceMatrix>) -> Result<Self, OError> {
        let number_of_cities = distance_matrices.first().map_or(0, |m| m.size());
        Self::check_dimensions(number_of_cities, distance_matrices.len())?;

        for (k, m) in distance_matrices.iter().enumerate() {
            if m.size() != number_of_cities {
                return Err(OError::InvalidMatrix(
                    k,
                    format!(
                        "it has {} cities but the first matrix has {number_of_cities}",
                        m.size()
                    ),
                ));
            }
            if !m.is_finite() {
                return Err(OError::InvalidMatrix(
                    k,
                    "it contains non-finite distances".to_string(),
                ));
            }
            if m.rows().iter().flatten().any(|d| *d < 0.0) {
                return Err(OError::InvalidMatrix(
                    k,
                    "it contains negative distances".to_string(),
                ));
            }
            if !m.is_symmetric() {
                return Err(OError::InvalidMatrix(k, "it is not symmetric".to_string()));
            }
            if !m.has_zero_diagonal() {
                return Err(OError::InvalidMatrix(
                    k,
                    "the diagonal is not zero".to_string(),
                ));
            }
        }
        Self::build(distance_matrices)
    }

    /// Check the problem size.
    fn check_dimensions(
        number_of_cities: usize,
        number_of_objectives: usize,
    ) -> Result<(), OError> {
        if number_of_cities < 2 {
            return Err(OError::InvalidDimension(
                "cities".to_string(),
                number_of_cities,
                2,
            ));
        }
        if number_of_objectives < 1 {
            return Err(OError::InvalidDimension(
                "objectives".to_string(),
                number_of_objectives,
                1,
            ));
        }
        Ok(())
    }

    /// Set up the objectives, constraint and bounds around valid matrices.
    fn build(distance_matrices: Vec<DistanceMatrix>) -> Result<Self, OError> {
        let number_of_cities = distance_matrices[0].size();

        let mut objectives = Vec::with_capacity(distance_matrices.len());
        for k in 0..distance_matrices.len() {
            let objective = Objective::new(&format!("distance_{k}"), ObjectiveDirection::Minimise);
            info!("Adding objective '{}' - {}", objective.name(), objective);
            objectives.push(objective);
        }

        let constraint = Constraint::new(
            PERMUTATION_CONSTRAINT,
            RelationalOperator::LessOrEqualTo,
            0.0,
        );
        info!("Adding constraint '{}' - {}", constraint.name(), constraint);

        let bounds = (0..number_of_cities)
            .map(|i| BoundedNumber::new(&format!("city_at_{i}"), 0, number_of_cities - 1))
            .collect::<Result<Vec<_>, _>>()?;

        let problem = Self {
            distance_matrices,
            objectives,
            constraint,
            bounds,
        };
        info!("Created {}", problem);
        Ok(problem)
    }

    /// The number of cities.
    ///
    /// return: `usize`
    pub fn number_of_cities(&self) -> usize {
        self.bounds.len()
    }

    /// The distance matrices, one per objective.
    ///
    /// return: `&[DistanceMatrix]`
    pub fn distance_matrices(&self) -> &[DistanceMatrix] {
        &self.distance_matrices
    }

    /// The distance matrix of an objective. This returns an error if the objective does not
    /// exist.
    ///
    /// # Arguments
    ///
    /// * `objective_index`: The objective index.
    ///
    /// return: `Result<&DistanceMatrix, OError>`
    pub fn distance_matrix(&self, objective_index: usize) -> Result<&DistanceMatrix, OError> {
        self.distance_matrices
            .get(objective_index)
            .ok_or_else(|| OError::NonExistingIndex("objective".to_string(), objective_index))
    }

    /// Check that a tour has one entry per city and that all entries are valid city indexes.
    fn check_tour(&self, tour: &[usize]) -> Result<(), OError> {
        if tour.len() != self.number_of_cities() {
            return Err(OError::InvalidLength(self.number_of_cities(), tour.len()));
        }
        for (position, (city, bound)) in tour.iter().zip(&self.bounds).enumerate() {
            if !bound.contains(city) {
                return Err(OError::IndexOutOfRange(
                    *city,
                    position,
                    bound.max_value(),
                ));
            }
        }
        Ok(())
    }

    /// The length of the closed tour on the distance matrix of one objective. The tour does not
    /// need to be a permutation. This returns an error if the tour length differs from the
    /// number of cities, an entry is not a city index or the objective does not exist.
    ///
    /// # Arguments
    ///
    /// * `tour`: The city indexes in visiting order.
    /// * `objective_index`: The objective index.
    ///
    /// returns: `Result<f64, OError>`
    pub fn tour_cost(&self, tour: &[usize], objective_index: usize) -> Result<f64, OError> {
        self.check_tour(tour)?;
        Ok(self.distance_matrix(objective_index)?.cycle_length(tour))
    }

    /// The value of the permutation constraint: minus the number of positions where the sorted
    /// tour differs from `[0, 1, ..., N-1]`. This is zero for any permutation of the cities and
    /// negative otherwise. The entries are not checked.
    ///
    /// # Arguments
    ///
    /// * `tour`: The city indexes in visiting order.
    ///
    /// returns: `f64`
    pub fn permutation_constraint(tour: &[usize]) -> f64 {
        let mut sorted = tour.to_vec();
        sorted.sort_unstable();
        let mismatches = sorted
            .iter()
            .enumerate()
            .filter(|(position, city)| *position != **city)
            .count();
        // adding 0.0 turns -0.0 into 0.0 for permutations
        -(mismatches as f64) + 0.0
    }

    /// Whether the tour visits every city of the problem exactly once.
    ///
    /// # Arguments
    ///
    /// * `tour`: The city indexes in visiting order.
    ///
    /// returns: `bool`
    pub fn is_permutation(&self, tour: &[usize]) -> bool {
        let n = self.number_of_cities();
        let mut visited = vec![false; n];
        tour.len() == n
            && tour
                .iter()
                .all(|city| *city < n && !std::mem::replace(&mut visited[*city], true))
    }

    /// Serialise the problem data.
    ///
    /// return: `MOTSPExport`
    pub fn serialise(&self) -> MOTSPExport {
        MOTSPExport {
            problem: ProblemExport {
                name: "MOTSP".to_string(),
                objectives: self.objectives.clone(),
                constraints: vec![self.constraint.clone()],
                variables: self.bounds.clone(),
                number_of_objectives: self.number_of_objectives(),
                number_of_constraints: self.number_of_constraints(),
                number_of_variables: self.number_of_variables(),
            },
            distance_matrices: self.distance_matrices.clone(),
        }
    }

    /// Save the problem data, including the distance matrices, to a JSON file in the
    /// `destination` folder. This returns an error if the folder does not exist or the file
    /// cannot be written.
    ///
    /// # Arguments
    ///
    /// * `destination`: The folder where to save the file.
    /// * `file_prefix`: A prefix to prepend to the file name. This is "MOTSP" when `None`.
    ///
    /// returns: `Result<PathBuf, OError>` The path to the new file.
    pub fn save_to_json(
        &self,
        destination: &Path,
        file_prefix: Option<&str>,
    ) -> Result<PathBuf, OError> {
        if !destination.is_dir() {
            return Err(OError::Export(format!(
                "The destination folder '{:?}' does not exist",
                destination
            )));
        }
        let data = serde_json::to_string_pretty(&self.serialise()).map_err(|e| {
            OError::Export(format!(
                "The following error occurred while converting the problem: {e}"
            ))
        })?;

        let file = destination.join(format!(
            "{}_{}cities_{}obj.json",
            file_prefix.unwrap_or("MOTSP"),
            self.number_of_cities(),
            self.number_of_objectives()
        ));
        info!("Saving JSON file {:?}", file);
        fs::write(&file, data).map_err(|e| {
            OError::Export(format!(
                "The following error occurred while writing the JSON file: {e}"
            ))
        })?;
        Ok(file)
    }

    /// Create the problem from a JSON file previously exported with
    /// [`MOTSPProblem::save_to_json`]. The matrices are validated as in
    /// [`MOTSPProblem::from_matrices`].
    ///
    /// # Arguments
    ///
    /// * `file`: The path to the JSON file.
    ///
    /// returns: `Result<MOTSPProblem, OError>`
    pub fn read_from_json(file: &Path) -> Result<Self, OError> {
        if !file.exists() {
            return Err(OError::Generic(format!("The file {:?} does not exist", file)));
        }
        let data = fs::read_to_string(file)
            .map_err(|e| OError::Export(format!("Cannot read the JSON file because: {e}")))?;
        let export: MOTSPExport = serde_json::from_str(&data)
            .map_err(|e| OError::Export(format!("Cannot parse the JSON file because: {e}")))?;
        Self::from_matrices(export.distance_matrices)
    }
}

impl Display for MOTSPProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MOTSP problem with {} cities, {} objectives and {} constraints",
            self.number_of_cities(),
            self.number_of_objectives(),
            self.number_of_constraints(),
        )
    }
}

impl Evaluator for MOTSPProblem {
    fn objectives(&self) -> Vec<Objective> {
        self.objectives.clone()
    }

    fn constraints(&self) -> Vec<Constraint> {
        vec![self.constraint.clone()]
    }

    fn bounds(&self) -> Vec<BoundedNumber<usize>> {
        self.bounds.clone()
    }

    /// Calculate the tour length on each distance matrix and the permutation constraint. A tour
    /// that is not a permutation is still evaluated. This returns an error if the tour length
    /// differs from the number of cities or an entry is not a city index.
    fn evaluate(&self, tour: &[usize]) -> Result<EvaluationResult, OError> {
        self.check_tour(tour)?;
        let objectives: Vec<f64> = self
            .distance_matrices
            .iter()
            .map(|m| m.cycle_length(tour))
            .collect();
        let constraints = vec![Self::permutation_constraint(tour)];
        debug!("Tour {:?} - objectives {:?}", tour, objectives);

        Ok(EvaluationResult {
            objectives,
            constraints,
        })
    }

    fn number_of_variables(&self) -> usize {
        self.bounds.len()
    }

    fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    fn number_of_constraints(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod test {
    use std::env;
    use std::sync::Arc;
    use std::thread;

    use float_cmp::assert_approx_eq;
    use rand::seq::SliceRandom;

    use crate::core::builtin_problems::{DistanceMatrix, MOTSPArg, MOTSPExport, MOTSPProblem};
    use crate::core::test_utils::assert_approx_array_eq;
    use crate::core::utils::get_rng;
    use crate::core::{Evaluator, OError, RelationalOperator};

    fn sample_problem() -> MOTSPProblem {
        let d = DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap();
        MOTSPProblem::from_matrices(vec![d]).unwrap()
    }

    #[test]
    /// Test the problem size checks.
    fn test_invalid_dimension() {
        assert!(matches!(
            MOTSPProblem::create(1, 2, Some(1)),
            Err(OError::InvalidDimension(_, 1, 2))
        ));
        assert!(matches!(
            MOTSPProblem::create(0, 2, None),
            Err(OError::InvalidDimension(_, 0, 2))
        ));
        assert!(matches!(
            MOTSPProblem::create(5, 0, Some(1)),
            Err(OError::InvalidDimension(_, 0, 1))
        ));
        assert!(MOTSPProblem::create(2, 1, Some(1)).is_ok());
    }

    #[test]
    /// The random matrices are symmetric, with a zero diagonal and distances in [0, 1).
    fn test_random_matrices() {
        let problem = MOTSPProblem::create(12, 3, Some(4)).unwrap();
        assert_eq!(problem.number_of_cities(), 12);
        assert_eq!(problem.number_of_objectives(), 3);
        assert_eq!(problem.distance_matrices().len(), 3);

        for m in problem.distance_matrices() {
            assert_eq!(m.size(), 12);
            for i in 0..12 {
                assert_eq!(m.get(i, i), 0.0);
                for j in 0..12 {
                    assert_eq!(m.get(i, j), m.get(j, i));
                    assert!((0.0..1.0).contains(&m.get(i, j)));
                }
            }
        }
        // objectives have independent landscapes
        assert_ne!(problem.distance_matrices()[0], problem.distance_matrices()[1]);
    }

    #[test]
    fn test_seeded_instances() {
        let args = MOTSPArg {
            number_of_cities: 8,
            number_of_objectives: 2,
            seed: Some(10),
        };
        let a = MOTSPProblem::from_args(&args).unwrap();
        let b = MOTSPProblem::create(8, 2, Some(10)).unwrap();
        let c = MOTSPProblem::create(8, 2, Some(11)).unwrap();
        assert_eq!(a.distance_matrices(), b.distance_matrices());
        assert_ne!(a.distance_matrices(), c.distance_matrices());
    }

    #[test]
    fn test_bounds() {
        let problem = MOTSPProblem::create(4, 2, Some(1)).unwrap();
        let bounds = problem.bounds();
        assert_eq!(bounds.len(), 4);
        assert!(bounds.iter().all(|b| b.bounds() == (0, 3)));
        assert_eq!(bounds[2].name(), "city_at_2");
        assert_eq!(problem.number_of_variables(), 4);
    }

    #[test]
    fn test_objectives_and_constraint() {
        let problem = MOTSPProblem::create(4, 3, Some(1)).unwrap();
        let names: Vec<String> = problem.objectives().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["distance_0", "distance_1", "distance_2"]);
        assert!(problem.objectives().iter().all(|o| o.is_minimised()));

        let constraints = problem.constraints();
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].name(), "permutation");
        assert_eq!(constraints[0].operator(), RelationalOperator::LessOrEqualTo);
        assert_eq!(constraints[0].target(), 0.0);
    }

    #[test]
    /// Test the tour cost on a known matrix.
    fn test_tour_cost() {
        let problem = sample_problem();
        assert_eq!(problem.tour_cost(&[0, 1, 2], 0).unwrap(), 6.0);
        assert_eq!(problem.tour_cost(&[2, 1, 0], 0).unwrap(), 6.0);
        // repeated cities are evaluated too
        assert_eq!(problem.tour_cost(&[0, 0, 2], 0).unwrap(), 4.0);
    }

    #[test]
    fn test_tour_cost_errors() {
        let problem = sample_problem();
        assert!(matches!(
            problem.tour_cost(&[0, 1], 0),
            Err(OError::InvalidLength(3, 2))
        ));
        assert!(matches!(
            problem.tour_cost(&[0, 1, 2, 0], 0),
            Err(OError::InvalidLength(3, 4))
        ));
        assert!(matches!(
            problem.tour_cost(&[0, 3, 1], 0),
            Err(OError::IndexOutOfRange(3, 1, 2))
        ));
        assert!(matches!(
            problem.tour_cost(&[0, 1, 2], 1),
            Err(OError::NonExistingIndex(_, 1))
        ));
    }

    #[test]
    /// The tour length does not depend on the starting city or on the direction.
    fn test_rotation_and_reversal() {
        let problem = MOTSPProblem::create(15, 2, Some(7)).unwrap();
        let mut rng = get_rng(Some(2));

        for _ in 0..10 {
            let mut tour: Vec<usize> = (0..15).collect();
            tour.shuffle(&mut rng);

            for k in 0..2 {
                let cost = problem.tour_cost(&tour, k).unwrap();
                for shift in 1..15 {
                    let mut rotated = tour.clone();
                    rotated.rotate_left(shift);
                    let rotated_cost = problem.tour_cost(&rotated, k).unwrap();
                    assert_approx_eq!(f64, cost, rotated_cost, epsilon = 1e-12);
                }
                let reversed: Vec<usize> = tour.iter().rev().copied().collect();
                let reversed_cost = problem.tour_cost(&reversed, k).unwrap();
                assert_approx_eq!(f64, cost, reversed_cost, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_evaluate() {
        let problem = MOTSPProblem::create(6, 2, Some(3)).unwrap();
        let tour = [3, 1, 0, 5, 2, 4];
        let result = problem.evaluate(&tour).unwrap();

        let expected: Vec<f64> = (0..2).map(|k| problem.tour_cost(&tour, k).unwrap()).collect();
        assert_approx_array_eq(&result.objectives, &expected);
        assert!(result.objectives.iter().all(|f| *f >= 0.0));
        assert_eq!(result.constraints, vec![0.0]);
        assert!(result.is_feasible());

        // evaluation is deterministic
        assert_eq!(problem.evaluate(&tour).unwrap(), result);
    }

    #[test]
    fn test_evaluate_errors() {
        let problem = sample_problem();
        assert!(matches!(
            problem.evaluate(&[0, 1, 2, 0]),
            Err(OError::InvalidLength(3, 4))
        ));
        assert!(matches!(
            problem.evaluate(&[0, 1, 7]),
            Err(OError::IndexOutOfRange(7, 2, 2))
        ));
    }

    #[test]
    /// Test the value of the permutation constraint.
    fn test_permutation_constraint() {
        // the identity and any permutation match everywhere
        assert_eq!(MOTSPProblem::permutation_constraint(&[0, 1, 2, 3]), 0.0);
        assert!(MOTSPProblem::permutation_constraint(&[0, 1, 2, 3]).is_sign_positive());
        assert_eq!(MOTSPProblem::permutation_constraint(&[2, 0, 3, 1]), 0.0);
        // sorted [0, 0, 2, 3] differs from [0, 1, 2, 3] at one position
        assert_eq!(MOTSPProblem::permutation_constraint(&[0, 0, 2, 3]), -1.0);
        assert_eq!(MOTSPProblem::permutation_constraint(&[3, 3, 3, 3]), -3.0);
        assert_eq!(MOTSPProblem::permutation_constraint(&[1, 1, 1, 1]), -3.0);

        // the constraint is still met, the tour is not a permutation though
        let problem = MOTSPProblem::create(4, 1, Some(1)).unwrap();
        let result = problem.evaluate(&[0, 0, 2, 3]).unwrap();
        assert_eq!(result.constraints, vec![-1.0]);
        assert!(result.is_feasible());
        assert_eq!(result.constraint_violation(&problem.constraints()), 0.0);
        assert!(!problem.is_permutation(&[0, 0, 2, 3]));
    }

    #[test]
    fn test_is_permutation() {
        let problem = MOTSPProblem::create(4, 1, Some(1)).unwrap();
        assert!(problem.is_permutation(&[0, 1, 2, 3]));
        assert!(problem.is_permutation(&[3, 0, 2, 1]));
        assert!(!problem.is_permutation(&[0, 1, 2]));
        assert!(!problem.is_permutation(&[0, 1, 2, 3, 0]));
        assert!(!problem.is_permutation(&[0, 1, 2, 4]));
        assert!(!problem.is_permutation(&[1, 1, 2, 3]));
    }

    #[test]
    fn test_from_matrices_errors() {
        assert!(matches!(
            MOTSPProblem::from_matrices(vec![]),
            Err(OError::InvalidDimension(_, 0, 2))
        ));

        let single = DistanceMatrix::from_rows(&[vec![0.0]]).unwrap();
        assert!(matches!(
            MOTSPProblem::from_matrices(vec![single]),
            Err(OError::InvalidDimension(_, 1, 2))
        ));

        let d3 = DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap();
        let d2 = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert!(matches!(
            MOTSPProblem::from_matrices(vec![d3.clone(), d2]),
            Err(OError::InvalidMatrix(1, _))
        ));

        let mut asymmetric = d3.clone();
        asymmetric.set(0, 1, 0.5);
        assert!(matches!(
            MOTSPProblem::from_matrices(vec![d3.clone(), asymmetric]),
            Err(OError::InvalidMatrix(1, _))
        ));

        let mut diagonal = d3.clone();
        diagonal.set(1, 1, 0.5);
        assert!(matches!(
            MOTSPProblem::from_matrices(vec![diagonal]),
            Err(OError::InvalidMatrix(0, _))
        ));

        let mut negative = d3.clone();
        negative.set(0, 2, -2.0);
        negative.set(2, 0, -2.0);
        assert!(matches!(
            MOTSPProblem::from_matrices(vec![negative]),
            Err(OError::InvalidMatrix(0, _))
        ));

        let mut nan = d3;
        nan.set(0, 2, f64::NAN);
        assert!(matches!(
            MOTSPProblem::from_matrices(vec![nan]),
            Err(OError::InvalidMatrix(0, _))
        ));
    }

    #[test]
    /// Batched evaluation matches the single evaluations, in threads or not.
    fn test_evaluate_all() {
        let problem = MOTSPProblem::create(10, 3, Some(5)).unwrap();
        let mut rng = get_rng(Some(6));
        let tours: Vec<Vec<usize>> = (0..50)
            .map(|_| {
                let mut t: Vec<usize> = (0..10).collect();
                t.shuffle(&mut rng);
                t
            })
            .collect();

        let expected: Vec<_> = tours.iter().map(|t| problem.evaluate(t).unwrap()).collect();
        assert_eq!(problem.evaluate_all(&tours, false).unwrap(), expected);
        assert_eq!(problem.evaluate_all(&tours, true).unwrap(), expected);

        let mut wrong = tours.clone();
        wrong[20] = vec![0, 1];
        assert!(matches!(
            problem.evaluate_all(&wrong, true),
            Err(OError::InvalidLength(10, 2))
        ));
    }

    #[test]
    /// The problem can be shared between threads.
    fn test_concurrent_evaluation() {
        let problem = Arc::new(MOTSPProblem::create(7, 2, Some(9)).unwrap());
        let tour = vec![6, 5, 4, 3, 2, 1, 0];
        let expected = problem.evaluate(&tour).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let problem = problem.clone();
                let tour = tour.clone();
                thread::spawn(move || problem.evaluate(&tour).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_as_trait_object() {
        let problem: Box<dyn Evaluator> = Box::new(sample_problem());
        assert_eq!(problem.number_of_variables(), 3);
        assert_eq!(problem.number_of_constraints(), 1);
        assert_eq!(problem.evaluate(&[1, 2, 0]).unwrap().objectives, vec![6.0]);
    }

    #[test]
    fn test_serialise() {
        let problem = MOTSPProblem::create(5, 2, Some(1)).unwrap();
        let export = problem.serialise();
        assert_eq!(export.problem.name, "MOTSP");
        assert_eq!(export.problem.number_of_variables, 5);
        assert_eq!(export.problem.number_of_objectives, 2);
        assert_eq!(export.problem.number_of_constraints, 1);
        assert_eq!(export.problem.objectives, problem.objectives());
        assert_eq!(export.problem.variables, problem.bounds());
        assert_eq!(export.distance_matrices, problem.distance_matrices());
        assert_eq!(
            problem.to_string(),
            "MOTSP problem with 5 cities, 2 objectives and 1 constraints"
        );
    }

    #[test]
    /// Export the problem to a JSON file and import it back.
    fn test_json_export() {
        let problem = MOTSPProblem::create(6, 2, Some(12)).unwrap();
        let destination = env::temp_dir();
        let file = problem
            .save_to_json(&destination, Some("test_json_export"))
            .unwrap();
        assert!(file.ends_with("test_json_export_6cities_2obj.json"));

        let imported = MOTSPProblem::read_from_json(&file).unwrap();
        assert_eq!(imported.distance_matrices(), problem.distance_matrices());
        let tour = [5, 3, 1, 0, 2, 4];
        assert_eq!(imported.evaluate(&tour).unwrap(), problem.evaluate(&tour).unwrap());
        std::fs::remove_file(file).unwrap();
    }

    #[test]
    fn test_json_export_errors() {
        let problem = sample_problem();
        let missing = env::temp_dir().join("motsp_missing_folder").join("nested");
        assert!(matches!(
            problem.save_to_json(&missing, None),
            Err(OError::Export(_))
        ));
        assert!(matches!(
            MOTSPProblem::read_from_json(&missing.join("file.json")),
            Err(OError::Generic(_))
        ));
    }

    #[test]
    /// The JSON export keeps every distance bit for bit.
    fn test_json_export_exact_distances() {
        for seed in 0..10 {
            let problem = MOTSPProblem::create(30, 3, Some(seed)).unwrap();
            let data = serde_json::to_string_pretty(&problem.serialise()).unwrap();
            let export: MOTSPExport = serde_json::from_str(&data).unwrap();
            assert_eq!(export, problem.serialise());

            let imported = MOTSPProblem::from_matrices(export.distance_matrices).unwrap();
            assert_eq!(imported.distance_matrices(), problem.distance_matrices());
        }
    }

    #[test]
    /// A file with a truncated matrix is rejected with an error.
    fn test_json_export_truncated_matrix() {
        let problem = MOTSPProblem::create(3, 1, Some(1)).unwrap();
        let mut data = serde_json::to_value(problem.serialise()).unwrap();
        data["distance_matrices"][0]["data"] = serde_json::json!([0.0, 0.5]);

        let file = env::temp_dir().join("test_json_export_truncated_matrix.json");
        std::fs::write(&file, data.to_string()).unwrap();
        let imported = MOTSPProblem::read_from_json(&file);
        std::fs::remove_file(&file).unwrap();
        assert!(matches!(imported, Err(OError::Export(_))));
    }
}
