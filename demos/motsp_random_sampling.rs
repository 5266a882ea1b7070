use std::env;
use std::error::Error;

use log::{info, LevelFilter};
use rand::seq::SliceRandom;

use motsp::core::builtin_problems::{MOTSPArg, MOTSPProblem};
use motsp::core::utils::get_rng;
use motsp::core::{EvaluationResult, Evaluator};

/// Build a 2-objective travelling salesman problem with 30 cities and evaluate a batch of random
/// tours, the same way a multi-objective algorithm evaluates its population at each generation.
/// The best tour for each objective is reported and the problem is exported to a JSON file in the
/// system temporary folder, so that the same instance can be loaded by another solver.
///
/// `cargo run --example motsp_random_sampling --release`
fn main() -> Result<(), Box<dyn Error>> {
    // Add log
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let args = MOTSPArg {
        number_of_cities: 30,
        number_of_objectives: 2,
        // to reproduce results
        seed: Some(10),
    };
    let problem = MOTSPProblem::from_args(&args)?;

    // Sample random permutations within the problem bounds
    let mut rng = get_rng(Some(1));
    let cities: Vec<usize> = problem
        .bounds()
        .first()
        .map(|b| (b.min_value()..=b.max_value()).collect())
        .unwrap_or_default();
    let tours: Vec<Vec<usize>> = (0..1000)
        .map(|_| {
            let mut tour = cities.clone();
            tour.shuffle(&mut rng);
            tour
        })
        .collect();

    let results = problem.evaluate_all(&tours, true)?;
    let feasible = results.iter().filter(|r| r.is_feasible()).count();
    info!("Evaluated {} tours, {} are feasible", results.len(), feasible);

    for (k, objective) in problem.objectives().iter().enumerate() {
        if let Some((idx, best)) = best_for_objective(&results, k) {
            info!(
                "Best tour for {} has length {:.4}: {:?}",
                objective.name(),
                best.objectives[k],
                tours[idx]
            );
        }
    }

    let file = problem.save_to_json(&env::temp_dir(), None)?;
    info!("Problem exported to {:?}", file);
    Ok(())
}

/// Find the result with the smallest value of the `k`-th objective.
fn best_for_objective(results: &[EvaluationResult], k: usize) -> Option<(usize, &EvaluationResult)> {
    results
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.objectives[k].total_cmp(&b.objectives[k]))
}
