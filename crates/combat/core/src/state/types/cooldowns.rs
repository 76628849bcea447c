/// Remaining cooldown ticks, one slot per owned action.
///
/// Slot `i` belongs to the combatant's `i`-th action; the combatant keeps the
/// two vectors the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    remaining: Vec<u32>,
}

impl Cooldowns {
    pub fn with_slots(slots: usize) -> Self {
        Self {
            remaining: vec![0; slots],
        }
    }

    pub fn push_slot(&mut self) {
        self.remaining.push(0);
    }

    pub fn remaining(&self, slot: usize) -> u32 {
        self.remaining.get(slot).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, slot: usize) -> bool {
        self.remaining(slot) == 0
    }

    pub fn set(&mut self, slot: usize, ticks: u32) {
        if let Some(remaining) = self.remaining.get_mut(slot) {
            *remaining = ticks;
        }
    }

    /// Decrements every slot by one tick.
    pub fn tick_down(&mut self) {
        for remaining in self.remaining.iter_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
