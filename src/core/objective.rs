use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Whether the objective should be minimised or maximised. Default is minimise.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveDirection {
    #[default]
    /// Minimise an objective.
    Minimise,
    /// Maximise an objective.
    Maximise,
}

impl Display for ObjectiveDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveDirection::Minimise => f.write_str("minimised"),
            ObjectiveDirection::Maximise => f.write_str("maximised"),
        }
    }
}

/// Describe a problem objective. Solvers use the direction to decide how two objective values
/// compare; the position in the problem's objective list matches the position of the value in
/// [`crate::core::EvaluationResult::objectives`].
///
/// # Example
/// ```
///  use motsp::core::{Objective, ObjectiveDirection};
///
///  let o = Objective::new("distance_0", ObjectiveDirection::Minimise);
///  assert!(o.is_minimised());
///  println!("{}", o);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Objective {
    /// The objective name.
    name: String,
    /// Whether the objective should be minimised or maximised.
    direction: ObjectiveDirection,
}

impl Objective {
    /// Create a new objective.
    ///
    /// # Arguments
    ///
    /// * `name`: The objective name.
    /// * `direction`:  Whether the objective should be minimised or maximised.
    ///
    /// returns: `Objective`
    pub fn new(name: &str, direction: ObjectiveDirection) -> Self {
        Self {
            name: name.to_string(),
            direction,
        }
    }

    /// Get the objective name.
    ///
    /// return: `String`
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Get the objective direction.
    ///
    /// return: `ObjectiveDirection`
    pub fn direction(&self) -> ObjectiveDirection {
        self.direction
    }

    /// Whether lower values of the objective are better.
    pub fn is_minimised(&self) -> bool {
        self.direction == ObjectiveDirection::Minimise
    }
}

impl Display for Objective {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Objective '{}' is {}", self.name, self.direction)
    }
}

#[cfg(test)]
mod test {
    use crate::core::{Objective, ObjectiveDirection};

    #[test]
    fn test_direction() {
        let o = Objective::new("distance_1", ObjectiveDirection::Minimise);
        assert!(o.is_minimised());
        assert_eq!(o.name(), "distance_1");
        assert_eq!(o.to_string(), "Objective 'distance_1' is minimised");

        let o = Objective::new("gain", ObjectiveDirection::Maximise);
        assert!(!o.is_minimised());
        assert_eq!(o.direction(), ObjectiveDirection::Maximise);
    }
}
