//! Mock security realm with no actual security

use async_trait::async_trait;
use realm_core::RealmConfig;
use realm_interfaces::{GroupDetails, RealmError, Result, SecurityRealm, UserDetails};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::index::IdentityIndex;
use crate::roster::RosterEntry;
use crate::simulator::{Entropy, LatencySimulator};

const DISPLAY_NAME: &str = "Mock Security Realm";

/// Security realm answering from an in-memory roster.
///
/// Accepts any credential listed in the roster (or the username itself
/// when none is listed) and can simulate latency and backend outages. Meant
/// to stand in for a real identity backend in tests and demos.
#[derive(Debug)]
pub struct MockSecurityRealm {
    config: RealmConfig,
    index: IdentityIndex,
    simulator: LatencySimulator,
}

impl MockSecurityRealm {
    pub fn new(config: RealmConfig) -> Self {
        let index = IdentityIndex::new(config.data(), config.user_id_strategy(), config.group_id_strategy());
        let simulator = LatencySimulator::new(config.delay(), config.is_random_delay());

        info!(
            "Mock security realm ready: users {}, groups {}, delay {:?}, random delay {}",
            config.user_id_strategy(),
            config.group_id_strategy(),
            config.delay(),
            config.is_random_delay()
        );

        Self {
            config,
            index,
            simulator,
        }
    }

    /// Create a realm drawing delay jitter from the given source
    pub fn with_entropy(config: RealmConfig, entropy: Arc<dyn Entropy>) -> Self {
        let mut realm = Self::new(config);
        realm.simulator = realm.simulator.with_entropy(entropy);
        realm
    }

    /// Configuration the realm was built from
    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    /// Simulate the identity backend going down (`true`) or recovering
    pub fn set_outage(&self, outage: bool) {
        warn!("Simulated outage {}", if outage { "started" } else { "cleared" });
        self.simulator.set_outage(outage);
    }

    pub fn is_outage(&self) -> bool {
        self.simulator.is_outage()
    }

    fn user_details(entry: &RosterEntry) -> UserDetails {
        UserDetails::new(entry.name(), entry.groups().iter().cloned())
    }
}

#[async_trait]
impl SecurityRealm for MockSecurityRealm {
    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    async fn authenticate(&self, username: &str, credential: &str) -> Result<UserDetails> {
        self.simulator.gate("authenticate").await?;
        debug!("Authenticating user: {}", username);

        let entry = self.index.find_user(username)?;
        if entry.credential() != credential {
            debug!("Authentication failed for user: {}", username);
            return Err(RealmError::BadCredentials(entry.name().to_string()));
        }

        debug!("Authentication successful for user: {}", entry.name());
        Ok(Self::user_details(&entry))
    }

    async fn load_user_by_username(&self, username: &str) -> Result<UserDetails> {
        self.simulator.gate("user lookup").await?;
        debug!("Loading user: {}", username);

        let entry = self.index.find_user(username)?;
        Ok(Self::user_details(&entry))
    }

    async fn load_group_by_groupname(&self, groupname: &str, fetch_members: bool) -> Result<GroupDetails> {
        self.simulator.gate("group lookup").await?;
        debug!("Loading group: {} (members: {})", groupname, fetch_members);

        if fetch_members {
            let (name, members) = self.index.find_group_members(groupname)?;
            Ok(GroupDetails::new(name, Some(members)))
        } else {
            let name = self.index.find_group(groupname)?;
            Ok(GroupDetails::new(name, None))
        }
    }
}
