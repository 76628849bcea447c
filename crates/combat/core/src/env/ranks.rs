//! Rank table oracle.

use crate::rank::{HunterRank, RankFeatures};

/// Oracle providing per-rank features.
///
/// Implementations must report a foreign malus that strictly decreases with
/// rank and is zero at the top rank.
pub trait RankOracle: Send + Sync {
    fn features(&self, rank: HunterRank) -> RankFeatures;
}
