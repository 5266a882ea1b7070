pub use constraint::{Constraint, RelationalOperator};
pub use error::OError;
pub use objective::{Objective, ObjectiveDirection};
pub use problem::{EvaluationResult, Evaluator, ProblemExport};
pub use variable::BoundedNumber;

pub mod builtin_problems;
mod constraint;
mod error;
mod objective;
mod problem;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod utils;
mod variable;
