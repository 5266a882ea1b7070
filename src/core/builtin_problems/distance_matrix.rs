use rand::Rng;
use serde::{Deserialize, Serialize};

/// A dense `n × n` matrix with the distance between each pair of cities, stored in row-major
/// order.
///
/// # Example
/// ```
///  use motsp::core::builtin_problems::DistanceMatrix;
///
///  let m = DistanceMatrix::from_rows(&[
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 3.0],
///     vec![2.0, 3.0, 0.0],
///  ]).unwrap();
///  assert_eq!(m.get(2, 1), 3.0);
///  assert!(m.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistanceMatrixData")]
pub struct DistanceMatrix {
    /// The number of cities.
    size: usize,
    /// The matrix data, row after row.
    data: Vec<f64>,
}

/// The serialised fields of a [`DistanceMatrix`], before their length is checked.
#[derive(Deserialize)]
struct DistanceMatrixData {
    size: usize,
    data: Vec<f64>,
}

impl TryFrom<DistanceMatrixData> for DistanceMatrix {
    type Error = String;

    fn try_from(value: DistanceMatrixData) -> Result<Self, Self::Error> {
        let expected = value.size.checked_mul(value.size);
        if expected != Some(value.data.len()) {
            return Err(format!(
                "a matrix of size {} needs {} values, but {} were given",
                value.size,
                value.size.saturating_mul(value.size),
                value.data.len()
            ));
        }
        Ok(Self {
            size: value.size,
            data: value.data,
        })
    }
}

impl DistanceMatrix {
    /// Create a matrix of the given size with all the distances set to zero.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of cities.
    ///
    /// returns: `DistanceMatrix`
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Generate a random symmetric matrix with a zero diagonal. A full matrix of uniform numbers
    /// in [0, 1) is drawn row by row; then the strict lower triangle is mirrored onto the upper
    /// one, so that `M[i][j] = M[j][i] = raw[i][j]` for `i > j`.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of cities.
    /// * `rng`: The random number generator.
    ///
    /// returns: `DistanceMatrix`
    pub fn random_symmetric<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let raw: Vec<f64> = (0..size * size).map(|_| rng.gen::<f64>()).collect();

        let mut m = Self::new(size);
        for i in 0..size {
            for j in 0..i {
                let d = raw[i * size + j];
                m.set(i, j, d);
                m.set(j, i, d);
            }
        }
        m
    }

    /// Create a matrix from its rows. This returns `None` if the rows do not form a square
    /// matrix.
    ///
    /// # Arguments
    ///
    /// * `rows`: The matrix rows.
    ///
    /// returns: `Option<DistanceMatrix>`
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            data: rows.concat(),
        })
    }

    /// The distance between city `from` and city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Set the distance between city `from` and city `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// The number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The matrix rows.
    ///
    /// returns: `Vec<Vec<f64>>`
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(|r| r.to_vec()).collect()
    }

    /// Whether `M[i][j] == M[j][i]` for all the city pairs.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Whether the distance of each city to itself is zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0.0)
    }

    /// Whether all the distances are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|d| d.is_finite())
    }

    /// The length of a closed tour: the sum of `M[tour[i-1]][tour[i]]` for each position `i`,
    /// where the position before the first one is the last one. The city indexes are not
    /// checked.
    ///
    /// # Arguments
    ///
    /// * `tour`: The city indexes in visiting order.
    ///
    /// returns: `f64`
    pub fn cycle_length(&self, tour: &[usize]) -> f64 {
        let Some(last) = tour.last() else {
            return 0.0;
        };
        tour.iter()
            .scan(*last, |prev, city| {
                let d = self.get(*prev, *city);
                *prev = *city;
                Some(d)
            })
            .sum()
    }
}
