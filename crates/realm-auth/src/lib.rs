//! Mock authentication for the security realm.
//!
//! Deliberately insecure: identities, credentials and group memberships are
//! read from a flat roster, and lookups can be slowed down or made to fail
//! as if the identity backend were unavailable.
//!
//! - [`Roster`]: parses roster text
//! - [`IdentityIndex`]: strategy-aware user and group lookups
//! - [`LatencySimulator`]: simulated latency and outages
//! - [`MockSecurityRealm`]: the [`SecurityRealm`] implementation

mod index;
mod realm;
mod roster;
mod simulator;

pub use index::IdentityIndex;
pub use realm::MockSecurityRealm;
pub use roster::{Roster, RosterEntry};
pub use simulator::{Entropy, LatencySimulator, StdEntropy};

use realm_core::RealmConfig;
use realm_interfaces::SecurityRealm;
use std::sync::Arc;

/// Convenience function to create a realm from config
pub fn create_security_realm(config: RealmConfig) -> Arc<dyn SecurityRealm> {
    Arc::new(MockSecurityRealm::new(config))
}
