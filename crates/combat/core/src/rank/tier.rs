/// Progression tier of a character, lowest to highest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HunterRank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    /// Full mastery.
    S,
}

impl HunterRank {
    pub const TOP: Self = Self::S;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_top(self) -> bool {
        matches!(self, Self::S)
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::E => Some(Self::D),
            Self::D => Some(Self::C),
            Self::C => Some(Self::B),
            Self::B => Some(Self::A),
            Self::A => Some(Self::S),
            Self::S => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ranks_are_ordered_and_chained() {
        let ranks: Vec<_> = HunterRank::iter().collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert!(ranks.windows(2).all(|w| w[0].next() == Some(w[1])));
        assert!(HunterRank::TOP.is_top());
        assert_eq!(HunterRank::TOP.next(), None);
    }

    #[test]
    fn parses_from_letter() {
        assert_eq!("B".parse::<HunterRank>().ok(), Some(HunterRank::B));
        assert!("Z".parse::<HunterRank>().is_err());
    }
}
