use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Operator used to compare a constraint value against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationalOperator {
    /// Value must equal the constraint target.
    EqualTo,
    /// Value must be less or equal to the constraint target.
    LessOrEqualTo,
    /// Value must be greater or equal to the constraint target.
    GreaterOrEqualTo,
}

/// Describe a constraint whose evaluated value is compared with a target:
///  - Equality operator ([`RelationalOperator::EqualTo`]): value == target
///  - Less or equal to operator ([`RelationalOperator::LessOrEqualTo`]): value <= target
///  - Greater or equal to operator ([`RelationalOperator::GreaterOrEqualTo`]): value >= target
///
/// The inequality constraints of the MOTSP follow the $g(x) \leq 0$ convention, i.e. they use
/// [`RelationalOperator::LessOrEqualTo`] with a zero target.
///
/// # Example
///
/// ```
///   use motsp::core::{Constraint, RelationalOperator};
///   let c = Constraint::new("permutation", RelationalOperator::LessOrEqualTo, 0.0);
///   assert!(c.is_met(-2.0));
///   assert!(!c.is_met(1.0));
///   assert_eq!(c.constraint_violation(1.0), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// The constraint name.
    name: String,
    /// The relational operator to use to compare a value against the constraint target value.
    operator: RelationalOperator,
    /// The constraint target.
    target: f64,
}

impl Constraint {
    /// Create a new relational constraint.
    ///
    /// # Arguments
    ///
    /// * `name`: The constraint name.
    /// * `operator`: The relational operator to use to compare a value against the constraint
    ///    target value.
    /// * `target`: The constraint target.
    ///
    /// returns: `Constraint`
    pub fn new(name: &str, operator: RelationalOperator, target: f64) -> Self {
        Self {
            name: name.to_owned(),
            operator,
            target,
        }
    }

    /// Get the constraint name.
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Get the constraint target.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Get the constraint operator.
    pub fn operator(&self) -> RelationalOperator {
        self.operator
    }

    /// Check whether the constraint is met by an evaluated value.
    ///
    /// # Arguments
    ///
    /// * `value`: The value to check against the constraint target.
    ///
    /// returns: `bool`
    pub fn is_met(&self, value: f64) -> bool {
        match self.operator {
            RelationalOperator::EqualTo => value == self.target,
            RelationalOperator::LessOrEqualTo => value <= self.target,
            RelationalOperator::GreaterOrEqualTo => value >= self.target,
        }
    }

    /// Calculate how far a value is from meeting the constraint. This is 0.0 when the constraint
    /// is met, otherwise the absolute distance between `value` and the target. Solvers that use
    /// the constrained-dominance principle rank infeasible solutions by this amount.
    ///
    /// See: Kalyanmoy Deb & Samir Agrawal. (2002). <https://doi.org/10.1007/978-3-7091-6384-9_40>.
    ///
    /// # Arguments
    ///
    /// * `value`: The value to check against the constraint target.
    ///
    /// return: `f64`
    pub fn constraint_violation(&self, value: f64) -> f64 {
        if self.is_met(value) {
            0.0
        } else {
            f64::abs(self.target - value)
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = match self.operator {
            RelationalOperator::EqualTo => "==",
            RelationalOperator::LessOrEqualTo => "<=",
            RelationalOperator::GreaterOrEqualTo => ">=",
        };
        f.write_fmt(format_args!("{} {} {}", self.name, sign, self.target))
    }
}
