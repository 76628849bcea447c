use crate::state::{CombatState, Victor};

/// Player defeat is checked first, so a mutual knockout is an enemy win.
pub(super) fn check(state: &CombatState) -> Option<Victor> {
    if state.player.is_defeated() {
        Some(Victor::Enemy)
    } else if state.living_enemies().next().is_none() {
        Some(Victor::Player)
    } else {
        None
    }
}
