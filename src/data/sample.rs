//! Row subsampling without replacement.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::data::dataset::DataSet;
use crate::error::AppError;

/// Draw `size` distinct row indices from `0..num_rows`, sorted ascending.
pub fn subsample_rows<R: Rng + ?Sized>(
    num_rows: usize,
    size: usize,
    rng: &mut R,
) -> Result<Vec<usize>, AppError> {
    if size == 0 {
        return Err(AppError::config(format!(
            "Subsample size is 0 for a dataset with {num_rows} rows; increase percentSubsampleSize."
        )));
    }
    if size > num_rows {
        return Err(AppError::config(format!(
            "Subsample size {size} exceeds the {num_rows} available rows."
        )));
    }

    let mut rows = index::sample(rng, num_rows, size).into_vec();
    rows.sort_unstable();
    Ok(rows)
}

/// Materialize a subsample of `size` rows drawn without replacement.
pub fn subsample<R: Rng + ?Sized>(
    data: &DataSet,
    size: usize,
    rng: &mut R,
) -> Result<DataSet, AppError> {
    let rows = subsample_rows(data.num_rows(), size, rng)?;
    data.select_rows(&rows)
}

/// Independent RNG for subsample `index` under base `seed`.
///
/// Streams depend only on `(seed, index)`, never on which worker runs the task,
/// so counts are reproducible for any pool size. The mix is fixed (splitmix64)
/// so an exported seed replays the same subsamples on any toolchain.
pub fn subsample_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(index as u64)))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
