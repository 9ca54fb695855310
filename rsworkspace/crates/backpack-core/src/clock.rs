//! Wall-clock access in unix seconds.
//!
//! | | Production | Test |
//! |---|---|---|
//! | [`UnixClock`] | [`SystemClock`] | [`FixedClock`]* |
//!
//! *Available with `#[cfg(test)]` or the `"test-support"` feature.

#[cfg(any(test, feature = "test-support"))]
use std::sync::Arc;
#[cfg(any(test, feature = "test-support"))]
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub trait UnixClock: Send + Sync {
    fn unix_now(&self) -> i64;
}

/// Wall-clock seconds from `SystemTime`.
pub struct SystemClock;

impl UnixClock for SystemClock {
    #[inline]
    fn unix_now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default()
    }
}

/// Time only moves when you call [`set`](FixedClock::set) or
/// [`advance`](FixedClock::advance). Clones share the same reading.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone)]
pub struct FixedClock {
    current: Arc<AtomicI64>,
}

#[cfg(any(test, feature = "test-support"))]
impl FixedClock {
    pub fn at(unix_secs: i64) -> Self {
        Self {
            current: Arc::new(AtomicI64::new(unix_secs)),
        }
    }

    pub fn set(&self, unix_secs: i64) {
        self.current.store(unix_secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl UnixClock for FixedClock {
    fn unix_now(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }
}
