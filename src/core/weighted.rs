/// Weighted random selection over ordered `(key, weight)` pairs.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;
use thiserror::Error;

/// Returned when every weight is zero or there is nothing to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot sample from an empty distribution")]
pub struct EmptyDistribution;

/// Pick one key with probability `weight / total`.
///
/// `WeightedIndex` draws uniformly from `[0, total)` and takes the first
/// entry whose cumulative weight exceeds the draw, in slice order. The same
/// slice and the same RNG state always yield the same key.
pub fn weighted_choice<'a, K, R>(
    choices: &'a [(K, u32)],
    rng: &mut R,
) -> Result<&'a K, EmptyDistribution>
where
    R: Rng + ?Sized,
{
    let dist: WeightedIndex<u32> = WeightedIndex::new(choices.iter().map(|(_, weight)| *weight))
        .map_err(|_| EmptyDistribution)?;
    Ok(&choices[dist.sample(rng)].0)
}
