use bitflags::bitflags;

/// Character class. Skills native to a role run at full effectiveness.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Fighter,
    Tank,
    Assassin,
    Ranger,
    Mage,
    Healer,
    Summoner,
    Berserker,
}

bitflags! {
    /// Set of roles a skill is native to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct RoleSet: u8 {
        const FIGHTER = 1 << 0;
        const TANK = 1 << 1;
        const ASSASSIN = 1 << 2;
        const RANGER = 1 << 3;
        const MAGE = 1 << 4;
        const HEALER = 1 << 5;
        const SUMMONER = 1 << 6;
        const BERSERKER = 1 << 7;
    }
}

impl RoleSet {
    /// Native to `role`. The empty set is native to everyone.
    pub fn admits(self, role: Role) -> bool {
        self.is_empty() || self.contains(RoleSet::from(role))
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        match role {
            Role::Fighter => Self::FIGHTER,
            Role::Tank => Self::TANK,
            Role::Assassin => Self::ASSASSIN,
            Role::Ranger => Self::RANGER,
            Role::Mage => Self::MAGE,
            Role::Healer => Self::HEALER,
            Role::Summoner => Self::SUMMONER,
            Role::Berserker => Self::BERSERKER,
        }
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, role| set | Self::from(role))
    }
}
