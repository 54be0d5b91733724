//! Seeded train/test index splitting.

use super::TableError;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Shuffle `0..n_rows` with a seeded RNG and cut it into `(train, test)`.
///
/// The test side takes the first `ceil(test_size * n_rows)` shuffled indices,
/// the train side takes the rest. The same `(n_rows, test_size, seed)` always
/// yields the same split.
///
/// # Errors
/// [`TableError::Unsplittable`] if `test_size` is outside (0, 1) or either
/// partition would be empty.
pub fn split_indices(
    n_rows: usize,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), TableError> {
    let unsplittable = TableError::Unsplittable {
        rows: n_rows,
        test_size,
    };

    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(unsplittable);
    }

    let n_test = (test_size * n_rows as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(unsplittable);
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}
