//! Strategy-aware lookups over the roster

use realm_core::IdStrategy;
use realm_interfaces::{RealmError, Result};
use std::collections::BTreeSet;

use crate::roster::{Roster, RosterEntry};

/// Lookup engine over roster text.
///
/// The roster is re-parsed on every lookup so results always reflect the
/// text exactly; rosters are small fixtures.
#[derive(Debug, Clone)]
pub struct IdentityIndex {
    data: String,
    user_strategy: IdStrategy,
    group_strategy: IdStrategy,
}

impl IdentityIndex {
    pub fn new(data: impl Into<String>, user_strategy: IdStrategy, group_strategy: IdStrategy) -> Self {
        Self {
            data: data.into(),
            user_strategy,
            group_strategy,
        }
    }

    /// Parse the current roster text
    pub fn roster(&self) -> Roster {
        Roster::parse(&self.data, self.user_strategy, self.group_strategy)
    }

    /// Find the entry whose name equals `name` under the user strategy
    pub fn find_user(&self, name: &str) -> Result<RosterEntry> {
        self.roster()
            .get(&self.user_strategy.key_for(name))
            .cloned()
            .ok_or_else(|| RealmError::UnknownIdentity(name.to_string()))
    }

    /// Canonical spelling of a group: the first stored spelling equal to
    /// `group` under the group strategy.
    pub fn find_group(&self, group: &str) -> Result<String> {
        Self::canonical_group(&self.roster(), self.group_strategy, group)
            .ok_or_else(|| RealmError::UnknownGroup(group.to_string()))
    }

    /// Canonical group name plus the names of every identity holding it
    pub fn find_group_members(&self, group: &str) -> Result<(String, BTreeSet<String>)> {
        let roster = self.roster();
        let canonical = Self::canonical_group(&roster, self.group_strategy, group)
            .ok_or_else(|| RealmError::UnknownGroup(group.to_string()))?;

        let members = roster
            .entries()
            .filter(|entry| entry.groups().iter().any(|g| self.group_strategy.equals(g, &canonical)))
            .map(|entry| entry.name().to_string())
            .collect();

        Ok((canonical, members))
    }

    fn canonical_group(roster: &Roster, strategy: IdStrategy, group: &str) -> Option<String> {
        roster
            .entries()
            .flat_map(|entry| entry.groups().iter())
            .find(|g| strategy.equals(g, group))
            .cloned()
    }
}
