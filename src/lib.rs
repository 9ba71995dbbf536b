pub mod cli;

pub use realm_auth::{create_security_realm, Entropy, IdentityIndex, LatencySimulator, MockSecurityRealm, Roster, StdEntropy};
pub use realm_core::{ConfigError, IdStrategy, RealmConfig, RealmConfigBuilder};
pub use realm_interfaces::{GrantedAuthority, GroupDetails, RealmError, SecurityRealm, UserDetails};

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

// The binary entry point is in main.rs; this file is the library entry
// point for tests and for harnesses embedding the realm directly.

/// Mock security realm library
///
/// A deliberately insecure identity provider for integration tests and
/// demos. The primary interface is [`MockSecurityRealm`], usually consumed
/// through the [`SecurityRealm`] trait.
pub struct MockRealm;

impl MockRealm {
    /// Get the version of the mock security realm
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

/// Initialize logging for the application
pub fn init_logging(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(fmt::layer()
            // stdout belongs to the operator console
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact())
        .init();
}
