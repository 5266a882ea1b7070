use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Get the random number generator. If no seed is provided, the generator is seeded from the
/// operating system entropy and results are not reproducible.
///
/// # Arguments
///
/// * `seed`: The optional seed number.
///
/// returns: `ChaCha8Rng`
pub fn get_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        None => ChaCha8Rng::from_entropy(),
        Some(s) => ChaCha8Rng::seed_from_u64(s),
    }
}
