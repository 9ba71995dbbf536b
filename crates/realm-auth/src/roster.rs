//! Roster text parsing
//!
//! A roster is operator-authored fixture text, one identity per line:
//!
//! ```text
//! alice/wonder admin
//! bob dev
//! debbie admin qa
//! ```
//!
//! The first token names the identity, optionally followed by `/` and a
//! credential; the remaining tokens are group names. Without an explicit
//! credential the identity name doubles as its credential.

use realm_core::IdStrategy;
use std::collections::BTreeMap;

/// One identity parsed from the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    name: String,
    credential: String,
    groups: Vec<String>,
}

impl RosterEntry {
    /// Identity name as spelled in the roster
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Group names, unique under the group strategy (first spelling kept),
    /// in code point order of those spellings
    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

/// Parsed roster keyed by the user strategy.
///
/// Holds at most one entry per identity under that strategy.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: BTreeMap<String, RosterEntry>,
}

impl Roster {
    /// Parse roster text. Never fails: blank lines are skipped and a line
    /// without a usable identity is dropped. When an identity appears twice
    /// the later line replaces the earlier one.
    pub fn parse(text: &str, user_strategy: IdStrategy, group_strategy: IdStrategy) -> Self {
        let mut entries = BTreeMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut tokens = line.split(' ').filter(|t| !t.is_empty());
            let Some(specifier) = tokens.next() else {
                continue;
            };

            let (name, credential) = match specifier.split_once('/') {
                Some((name, credential)) if !credential.is_empty() => (name, credential),
                Some((name, _)) => (name, name),
                None => (specifier, specifier),
            };
            if name.is_empty() {
                continue;
            }

            let mut groups = BTreeMap::new();
            for group in tokens {
                groups
                    .entry(group_strategy.key_for(group).into_owned())
                    .or_insert_with(|| group.to_string());
            }

            let mut groups: Vec<String> = groups.into_values().collect();
            groups.sort();

            entries.insert(
                user_strategy.key_for(name).into_owned(),
                RosterEntry {
                    name: name.to_string(),
                    credential: credential.to_string(),
                    groups,
                },
            );
        }

        Self { entries }
    }

    /// Look up an entry by its strategy key
    pub(crate) fn get(&self, key: &str) -> Option<&RosterEntry> {
        self.entries.get(key)
    }

    /// Entries in user strategy order
    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
