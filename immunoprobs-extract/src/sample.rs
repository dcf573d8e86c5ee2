use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::consts::SAMPLE_SEED;
use crate::errors::{ExtractError, ExtractResult};

///
/// Pick `n` rows without replacement using a fixed seed. The picked rows keep
/// their input order.
///
/// # Errors
///
/// [ExtractError::InvalidSampleSize] unless `1 <= n <= items.len()`.
///
pub fn sample_rows<T: Clone>(items: &[T], n: usize) -> ExtractResult<Vec<T>> {
    if n == 0 || n > items.len() {
        return Err(ExtractError::InvalidSampleSize {
            requested: n,
            available: items.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
    let mut picked = index::sample(&mut rng, items.len(), n).into_vec();
    picked.sort_unstable();

    Ok(picked.into_iter().map(|i| items[i].clone()).collect())
}
