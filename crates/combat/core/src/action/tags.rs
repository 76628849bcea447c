use bitflags::bitflags;

bitflags! {
    /// Behavior tags carried by an action.
    ///
    /// Tags drive counter rules (interrupt, block, dodge), the tag
    /// interaction table, and telegraph presentation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ActionTags: u16 {
        const STRIKE = 1 << 0;
        const PIERCE = 1 << 1;
        const MAGIC = 1 << 2;
        const CHANNEL = 1 << 3;
        const RITUAL = 1 << 4;
        const PROJECTILE = 1 << 5;
        const AREA = 1 << 6;
        const BLOCK = 1 << 7;
        const DODGE = 1 << 8;
        const INTERRUPT = 1 << 9;
        const SHIELD = 1 << 10;
        /// Ignores an in-flight block.
        const PIERCING_THROUGH = 1 << 11;
    }
}

impl ActionTags {
    /// Channels and rituals can be interrupted while preparing.
    pub const INTERRUPTIBLE: Self = Self::CHANNEL.union(Self::RITUAL);

    pub fn is_interruptible(self) -> bool {
        self.intersects(Self::INTERRUPTIBLE)
    }

    /// Attack kinds a block reduces.
    pub fn is_blockable(self) -> bool {
        self.intersects(Self::STRIKE | Self::PIERCE) && !self.contains(Self::PIERCING_THROUGH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_and_ritual_are_interruptible() {
        assert!(ActionTags::CHANNEL.is_interruptible());
        assert!((ActionTags::RITUAL | ActionTags::MAGIC).is_interruptible());
        assert!(!ActionTags::STRIKE.is_interruptible());
    }

    #[test]
    fn piercing_through_ignores_block() {
        assert!(ActionTags::STRIKE.is_blockable());
        assert!(!(ActionTags::PIERCE | ActionTags::PIERCING_THROUGH).is_blockable());
        assert!(!ActionTags::MAGIC.is_blockable());
    }
}
