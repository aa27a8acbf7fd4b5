//! Process-wide cancellation signal and the fixed-interval tick loop.
//!
//! Every polling loop sleeps on the shared [`Shutdown`] condvar instead of a
//! plain `thread::sleep`, so a shutdown request wakes all loops at once and
//! none of them writes LED state after observing it.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Cloneable cancellation handle.
#[derive(Clone, Default)]
pub struct Shutdown {
    signal: Arc<(Mutex<bool>, Condvar)>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake every waiter.
    pub fn request(&self) {
        let (lock, cvar) = &*self.signal;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    pub fn is_requested(&self) -> bool {
        *self
            .signal
            .0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for up to `timeout`. Returns `true` if shutdown was requested
    /// (before or during the wait), `false` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.signal;
        let mut requested = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            // Unrepresentable deadline: wait for the request alone.
            while !*requested {
                requested = cvar.wait(requested).unwrap_or_else(PoisonError::into_inner);
            }
            return true;
        };
        while !*requested {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            requested = match cvar.wait_timeout(requested, deadline - now) {
                Ok((guard, _)) => guard,
                Err(e) => e.into_inner().0,
            };
        }
        true
    }
}

/// Longest interval any loop sleeps between ticks.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Interval from a configured number of seconds, with a fallback for values ≤ 0.
/// Anything longer than [`MAX_INTERVAL`] is capped.
pub fn interval_secs(configured: f64, fallback: f64) -> Duration {
    let secs = if configured > 0.0 && configured.is_finite() {
        configured
    } else {
        fallback
    };
    Duration::try_from_secs_f64(secs)
        .unwrap_or(MAX_INTERVAL)
        .min(MAX_INTERVAL)
}

/// Run `tick` every `interval` until shutdown.
///
/// The first tick fires one interval after the call. Returns as soon as
/// shutdown is observed; `tick` is never entered after that point.
pub fn run_every(interval: Duration, shutdown: &Shutdown, mut tick: impl FnMut()) {
    while !shutdown.wait_timeout(interval) {
        tick();
    }
}
