//! Action catalog oracle.

use crate::action::CombatAction;
use crate::rank::Role;
use crate::state::ActionId;

/// Oracle providing action definitions.
///
/// Definitions are immutable catalog data, usually loaded from RON by the
/// content crate.
pub trait ActionOracle: Send + Sync {
    /// Returns the definition for `id`, if the catalog has one.
    fn action(&self, id: ActionId) -> Option<CombatAction>;

    /// Returns every action native to `role`, in catalog order.
    fn actions_for_role(&self, role: Role) -> Vec<CombatAction>;
}
