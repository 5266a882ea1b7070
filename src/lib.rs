//! A multi-objective travelling salesman problem (MOTSP) ready to be solved by multi-objective
//! evolutionary algorithms.
//!
//! Each objective is the length of a closed tour measured on its own random, symmetric distance
//! matrix. The problem exposes the variable bounds, the objectives and a soft permutation
//! constraint through the [`core::Evaluator`] trait, so that any external search driver
//! (NSGA-II, MOEA/D, random sampling, ...) can evaluate candidate tours.
//!
//! # Example
//! ```
//! use motsp::core::builtin_problems::MOTSPProblem;
//! use motsp::core::Evaluator;
//!
//! let problem = MOTSPProblem::create(5, 2, Some(1)).unwrap();
//! let result = problem.evaluate(&[0, 1, 2, 3, 4]).unwrap();
//! assert_eq!(result.objectives.len(), 2);
//! assert!(result.is_feasible());
//! ```
pub mod core;
