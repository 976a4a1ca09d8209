use rand::{
    seq::{index, SliceRandom},
    Rng,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, ops::RangeInclusive};

/// How many-to-many links are drawn for one movie.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FanOutPolicy {
    /// Draw the requested count with replacement and drop repeated picks,
    /// so a movie may end up with fewer links than requested.
    #[default]
    Lenient,
    /// Sample distinct entities, capped at the pool size.
    Exact,
}

/// Pick the entity ids one movie links to. The count is drawn uniformly from
/// `count`; an empty pool yields no links.
pub fn pick_links<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[i32],
    count: RangeInclusive<usize>,
    policy: FanOutPolicy,
) -> Vec<i32> {
    if pool.is_empty() {
        return Vec::new();
    }
    let requested = rng.gen_range(count);

    match policy {
        FanOutPolicy::Lenient => {
            let mut seen = HashSet::with_capacity(requested);
            (0..requested)
                .filter_map(|_| pool.choose(rng).copied())
                .filter(|id| seen.insert(*id))
                .collect()
        }
        FanOutPolicy::Exact => index::sample(rng, pool.len(), requested.min(pool.len()))
            .into_iter()
            .map(|i| pool[i])
            .collect(),
    }
}
