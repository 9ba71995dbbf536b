//! Common interfaces between a hosting authentication framework and a
//! security realm.
//!
//! The framework asks a realm three questions per request: authenticate
//! these credentials, load this user, load this group. Answers come back as
//! plain value types; failures come back as [`RealmError`].

mod error;

pub use error::{RealmError, Result};

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{self, Debug};

/// Authority granted to every successfully resolved identity
pub const AUTHENTICATED_AUTHORITY: &str = "authenticated";

/// A single authorization grant held by an identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    /// Create an authority with the given name
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    /// The generic authority carried by every resolved identity
    pub fn authenticated() -> Self {
        Self::new(AUTHENTICATED_AUTHORITY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved identity together with its authorization grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetails {
    username: String,
    authorities: Vec<GrantedAuthority>,
}

impl UserDetails {
    /// Build details for `username` holding the generic authenticated grant
    /// followed by one grant per group, in the order given.
    pub fn new<I, S>(username: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut authorities = vec![GrantedAuthority::authenticated()];
        authorities.extend(groups.into_iter().map(GrantedAuthority::new));
        Self {
            username: username.into(),
            authorities,
        }
    }

    /// Canonical username as stored by the realm
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn authorities(&self) -> &[GrantedAuthority] {
        &self.authorities
    }

    /// Group memberships, i.e. every authority except the generic one
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.authorities.iter().skip(1).map(GrantedAuthority::as_str)
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }

    /// Mock identities are never locked, expired or disabled
    pub fn is_enabled(&self) -> bool {
        true
    }
}

/// A resolved group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDetails {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    members: Option<BTreeSet<String>>,
}

impl GroupDetails {
    pub fn new(name: impl Into<String>, members: Option<BTreeSet<String>>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Canonical group name as spelled in the roster
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in lexicographic order, present only when they were requested
    pub fn members(&self) -> Option<&BTreeSet<String>> {
        self.members.as_ref()
    }
}

/// Security realm interface consumed by a hosting framework
#[async_trait]
pub trait SecurityRealm: Send + Sync + Debug {
    /// Human readable realm name
    fn display_name(&self) -> &str;

    /// Authenticate a user, returning the resolved identity
    async fn authenticate(&self, username: &str, credential: &str) -> Result<UserDetails>;

    /// Load a user and its group memberships
    async fn load_user_by_username(&self, username: &str) -> Result<UserDetails>;

    /// Load a group, materializing its members only when asked to
    async fn load_group_by_groupname(&self, groupname: &str, fetch_members: bool) -> Result<GroupDetails>;
}
