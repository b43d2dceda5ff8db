use std::collections::HashMap;

use combat_core::{ConfigError, TacticalRole};
use tracing::debug;

use super::{Tactics, create_tactics};

/// Lazily created, cached tactics instances, one per role.
///
/// Repeated lookups of a role return the same instance, so bookkeeping kept
/// by a policy survives role switches.
#[derive(Debug, Default)]
pub struct TacticsRegistry {
    instances: HashMap<TacticalRole, Box<dyn Tactics>>,
    created: usize,
}

impl TacticsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached instance for `role`, creating it on first use.
    pub fn get_or_create(&mut self, role: TacticalRole) -> &mut dyn Tactics {
        let created = &mut self.created;
        self.instances
            .entry(role)
            .or_insert_with(|| {
                *created += 1;
                debug!("creating {} tactics", role);
                create_tactics(role)
            })
            .as_mut()
    }

    /// Like [`Self::get_or_create`] but keyed by role name.
    pub fn get_or_create_by_name(&mut self, name: &str) -> Result<&mut dyn Tactics, ConfigError> {
        let role = TacticalRole::parse(name)?;
        Ok(self.get_or_create(role))
    }

    /// Cached instance for `role`, if it was ever requested.
    pub fn get(&self, role: TacticalRole) -> Option<&dyn Tactics> {
        self.instances.get(&role).map(|tactics| tactics.as_ref())
    }

    /// Number of instances built over the registry's lifetime.
    pub fn instances_created(&self) -> usize {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lookup_returns_cached_instance() {
        let mut registry = TacticsRegistry::new();
        let first: *const () = std::ptr::from_ref(&*registry.get_or_create(TacticalRole::Tank)).cast();
        let second: *const () = std::ptr::from_ref(&*registry.get_or_create(TacticalRole::Tank)).cast();
        assert!(std::ptr::addr_eq(first, second));
        assert_eq!(registry.instances_created(), 1);

        registry.get_or_create(TacticalRole::Support);
        assert_eq!(registry.instances_created(), 2);
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = TacticsRegistry::new();
        let role = registry.get_or_create_by_name("Magic_DPS").map(|t| t.role());
        assert_eq!(role, Ok(TacticalRole::MagicDps));
        assert_eq!(
            registry.get_or_create_by_name("necromancer").map(|t| t.role()),
            Err(ConfigError::UnknownRole("necromancer".into()))
        );
        assert!(registry.get(TacticalRole::Tank).is_none());
    }
}
