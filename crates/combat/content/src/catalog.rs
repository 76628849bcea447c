//! In-memory action catalog.

use std::collections::HashMap;

use combat_core::{ActionId, ActionOracle, CombatAction, Role};

/// Catalog of action definitions keyed by id.
///
/// Keeps insertion order so role queries list actions the way the data file
/// does.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: Vec<CombatAction>,
    index: HashMap<ActionId, usize>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids.
    pub fn from_actions(actions: impl IntoIterator<Item = CombatAction>) -> Result<Self, String> {
        let mut catalog = Self::new();
        for action in actions {
            catalog.insert(action)?;
        }
        Ok(catalog)
    }

    /// Adds a definition. Fails if the id is already registered.
    pub fn insert(&mut self, action: CombatAction) -> Result<(), String> {
        if let Some(&existing) = self.index.get(&action.id) {
            return Err(format!(
                "Duplicate {}: '{}' and '{}'",
                action.id, self.actions[existing].name, action.name
            ));
        }
        self.index.insert(action.id, self.actions.len());
        self.actions.push(action);
        Ok(())
    }

    pub fn get(&self, id: ActionId) -> Option<&CombatAction> {
        self.index.get(&id).map(|&slot| &self.actions[slot])
    }

    /// Looks an action up by display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&CombatAction> {
        self.actions
            .iter()
            .find(|action| action.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatAction> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionOracle for ActionCatalog {
    fn action(&self, id: ActionId) -> Option<CombatAction> {
        self.get(id).cloned()
    }

    fn actions_for_role(&self, role: Role) -> Vec<CombatAction> {
        self.actions
            .iter()
            .filter(|action| action.requirements.roles.admits(role))
            .cloned()
            .collect()
    }
}
