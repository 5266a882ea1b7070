use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::core::OError;

pub trait BoundedNumberTrait: PartialOrd + Display + Clone {}
impl<T: PartialOrd + Display + Clone> BoundedNumberTrait for T {}

/// A decision variable whose value lies between an inclusive lower and upper bound. This is how
/// a problem tells a solver which values it may generate for each variable.
///
/// # Example
/// ```
///  use motsp::core::BoundedNumber;
///
///  let v = BoundedNumber::new("city_at_0", 0_usize, 9).unwrap();
///  assert_eq!(v.bounds(), (0, 9));
///  assert!(v.contains(&9));
///  assert!(!v.contains(&10));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundedNumber<N: BoundedNumberTrait> {
    /// The variable name
    name: String,
    /// The minimum value bound.
    min_value: N,
    /// The maximum value bound.
    max_value: N,
}

impl<N: BoundedNumberTrait> BoundedNumber<N> {
    /// Create a new decision variable using a number bounded between a lower and upper bound.
    /// This returns an error if `min_value` is not strictly smaller than `max_value`.
    ///
    /// # Arguments
    ///
    /// * `name`: The variable name.
    /// * `min_value`: The lower bound.
    /// * `max_value`: The upper bound.
    ///
    /// returns: `Result<BoundedNumber, OError>`
    pub fn new(name: &str, min_value: N, max_value: N) -> Result<Self, OError> {
        if min_value >= max_value {
            return Err(OError::TooLargeLowerBound(
                min_value.to_string(),
                max_value.to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            min_value,
            max_value,
        })
    }

    /// The variable name.
    ///
    /// return: `String`
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// The variable lower bound.
    ///
    /// return: `N`
    pub fn min_value(&self) -> N {
        self.min_value.clone()
    }

    /// The variable upper bound.
    ///
    /// return: `N`
    pub fn max_value(&self) -> N {
        self.max_value.clone()
    }

    /// The variable lower and upper bound.
    ///
    /// return: `(N, N)`
    pub fn bounds(&self) -> (N, N) {
        (self.min_value.clone(), self.max_value.clone())
    }

    /// Whether `value` lies within the bounds (inclusive).
    ///
    /// # Arguments
    ///
    /// * `value`: The value to check.
    ///
    /// returns: `bool`
    pub fn contains(&self, value: &N) -> bool {
        *value >= self.min_value && *value <= self.max_value
    }
}

impl<N: BoundedNumberTrait> Display for BoundedNumber<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundedNumber '{}' to [{}; {}]",
            self.name, self.min_value, self.max_value
        )
    }
}
