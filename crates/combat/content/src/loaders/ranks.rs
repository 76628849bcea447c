//! Rank feature table loader.
//!
//! TOML format: one table per rank letter.
//!
//! ```toml
//! [C]
//! module_count = 2
//! affinity_cap = 2
//! specialization_unlocked = true
//! foreign_malus = 0.3
//! exclusive_cost = { min = 40, max = 60 }
//! exclusive_cooldown = { min = 30, max = 40 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use combat_core::{HunterRank, RankFeatures, RankOracle};

use crate::loaders::{LoadResult, read_file};

/// Number of hunter ranks, E through S.
const RANK_COUNT: usize = HunterRank::TOP.index() + 1;

/// A validated rank table.
///
/// Every rank is present, module counts stay within one to three, and the
/// foreign malus strictly decreases with rank down to zero at S.
#[derive(Debug, Clone, PartialEq)]
pub struct RankTable {
    rows: [RankFeatures; RANK_COUNT],
}

impl RankTable {
    /// Builds a table from one row per rank, validating it.
    pub fn from_rows(rows: impl IntoIterator<Item = (HunterRank, RankFeatures)>) -> LoadResult<Self> {
        let mut slots: [Option<RankFeatures>; RANK_COUNT] = [None; RANK_COUNT];
        for (rank, features) in rows {
            if slots[rank.index()].replace(features).is_some() {
                anyhow::bail!("rank {} defined twice", rank);
            }
        }

        let mut table = Vec::with_capacity(RANK_COUNT);
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(features) => table.push(features),
                None => anyhow::bail!("rank table is missing rank #{}", index),
            }
        }
        let rows: [RankFeatures; RANK_COUNT] = table
            .try_into()
            .map_err(|_| anyhow::anyhow!("rank table has the wrong number of rows"))?;

        let table = Self { rows };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> LoadResult<()> {
        for (index, features) in self.rows.iter().enumerate() {
            if !(1..=3).contains(&features.module_count) {
                anyhow::bail!(
                    "rank #{} unlocks {} modules (expected 1 to 3)",
                    index,
                    features.module_count
                );
            }
            if !(0.0..1.0).contains(&features.foreign_malus) {
                anyhow::bail!(
                    "rank #{} foreign_malus {} is outside [0, 1)",
                    index,
                    features.foreign_malus
                );
            }
        }

        if let Some(pair) = self
            .rows
            .windows(2)
            .position(|w| w[1].foreign_malus >= w[0].foreign_malus)
        {
            anyhow::bail!(
                "foreign_malus must strictly decrease with rank (rank #{} to #{})",
                pair,
                pair + 1
            );
        }
        if self.rows[HunterRank::TOP.index()].foreign_malus != 0.0 {
            anyhow::bail!("foreign_malus must be zero at rank {}", HunterRank::TOP);
        }
        Ok(())
    }
}

impl RankOracle for RankTable {
    fn features(&self, rank: HunterRank) -> RankFeatures {
        self.rows[rank.index()]
    }
}

/// Loader for rank tables from TOML files.
pub struct RankLoader;

impl RankLoader {
    pub fn load(path: &Path) -> LoadResult<RankTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load rank table {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<RankTable> {
        let raw: BTreeMap<String, RankFeatures> = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rank table TOML: {}", e))?;

        let mut rows = Vec::with_capacity(raw.len());
        for (key, features) in raw {
            let rank = HunterRank::from_str(&key)
                .map_err(|_| anyhow::anyhow!("unknown rank '{}'", key))?;
            rows.push((rank, features));
        }
        RankTable::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::StandardRanks;

    fn standard_rows() -> Vec<(HunterRank, RankFeatures)> {
        [
            HunterRank::E,
            HunterRank::D,
            HunterRank::C,
            HunterRank::B,
            HunterRank::A,
            HunterRank::S,
        ]
        .into_iter()
        .map(|rank| (rank, StandardRanks::table(rank)))
        .collect()
    }

    #[test]
    fn test_standard_table_validates() {
        let table = RankTable::from_rows(standard_rows()).expect("standard table is valid");
        assert_eq!(table.features(HunterRank::C), StandardRanks::table(HunterRank::C));
    }

    #[test]
    fn test_missing_rank_rejected() {
        let mut rows = standard_rows();
        rows.pop();
        assert!(RankTable::from_rows(rows).is_err());
    }

    #[test]
    fn test_malus_must_strictly_decrease() {
        let mut rows = standard_rows();
        rows[2].1.foreign_malus = rows[1].1.foreign_malus;
        assert!(RankTable::from_rows(rows).is_err());
    }

    #[test]
    fn test_top_rank_malus_must_be_zero() {
        let mut rows = standard_rows();
        rows[5].1.foreign_malus = 0.01;
        assert!(RankTable::from_rows(rows).is_err());
    }

    #[test]
    fn test_unknown_rank_key_rejected() {
        let err = RankLoader::parse(
            "[Z]\nmodule_count = 1\naffinity_cap = 1\nspecialization_unlocked = false\n\
             foreign_malus = 0.5\nexclusive_cost = { min = 0, max = 0 }\n\
             exclusive_cooldown = { min = 0, max = 0 }\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown rank"));
    }
}
