//! Simulated latency and backend outages around realm lookups

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use realm_interfaces::{RealmError, Result};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of randomness for delay jitter
#[cfg_attr(test, mockall::automock)]
pub trait Entropy: Send + Sync {
    /// A value uniformly distributed in `[0, bound)`; `0` when `bound` is `0`
    fn next_below(&self, bound: u64) -> u64;
}

/// [`Entropy`] backed by a standard RNG
pub struct StdEntropy {
    rng: Mutex<StdRng>,
}

impl StdEntropy {
    /// Seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl Entropy for StdEntropy {
    fn next_below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // a poisoned generator is still a generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..bound)
    }
}

/// Gate run before every lookup: refuses while an outage is simulated,
/// otherwise waits out the configured delay.
///
/// The outage flag is the only mutable state; the jitter spread is derived
/// once on first use.
pub struct LatencySimulator {
    delay: Option<Duration>,
    random_delay: bool,
    spread: OnceLock<u64>,
    entropy: Arc<dyn Entropy>,
    outage: AtomicBool,
}

impl LatencySimulator {
    /// `delay` of `None` or zero disables waiting regardless of `random_delay`
    pub fn new(delay: Option<Duration>, random_delay: bool) -> Self {
        Self {
            delay: delay.filter(|d| !d.is_zero()),
            random_delay,
            spread: OnceLock::new(),
            entropy: Arc::new(StdEntropy::new()),
            outage: AtomicBool::new(false),
        }
    }

    /// Replace the jitter source
    pub fn with_entropy(mut self, entropy: Arc<dyn Entropy>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn set_outage(&self, outage: bool) {
        self.outage.store(outage, Ordering::SeqCst);
    }

    pub fn is_outage(&self) -> bool {
        self.outage.load(Ordering::SeqCst)
    }

    /// Half-width of the jitter range: the integer square root of the delay
    /// in milliseconds. `None` unless randomized delay is active.
    pub fn spread(&self) -> Option<u64> {
        let delay = self.delay?;
        if !self.random_delay {
            return None;
        }
        Some(*self.spread.get_or_init(|| (delay.as_millis() as f64).sqrt().floor() as u64))
    }

    /// How long the next lookup should wait
    pub fn next_delay(&self) -> Option<Duration> {
        let delay = self.delay?;
        match self.spread() {
            Some(spread) => {
                let millis = delay.as_millis() as u64;
                let jitter = self.entropy.next_below(spread * 2);
                Some(Duration::from_millis(millis - spread + jitter))
            }
            None => Some(delay),
        }
    }

    /// Fail fast during an outage, then sleep for the simulated latency.
    ///
    /// Only the calling task waits; no lock is held while sleeping.
    pub async fn gate(&self, operation: &str) -> Result<()> {
        if self.is_outage() {
            warn!("Refusing {} during simulated outage", operation);
            return Err(RealmError::BackendUnavailable);
        }

        if let Some(delay) = self.next_delay() {
            debug!("Delaying {} by {:?}", operation, delay);
            tokio::time::sleep(delay).await;
        }

        Ok(())
    }
}

impl fmt::Debug for LatencySimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatencySimulator")
            .field("delay", &self.delay)
            .field("random_delay", &self.random_delay)
            .field("spread", &self.spread.get())
            .field("outage", &self.is_outage())
            .finish()
    }
}
