//! Fixed-window rate limiting for generation traffic.
//!
//! A keyed in-memory counter: each key (typically a client IP) gets a
//! counter that resets entirely at a fixed future timestamp. State is
//! process-local and does not survive restart or shard across instances;
//! that is an accepted limitation of the in-process design.
//!
//! The limiter is an explicit instance with constructor-injected policy and
//! clock, owned by the hosting application's startup/shutdown hooks. Pair it
//! with [`crate::maintenance`] to bound memory over long uptimes.

pub mod keys;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

// ── Clock ───────────────────────────────────────────────────────

/// Source of "now" in epoch milliseconds.
///
/// Injected so tests can simulate window expiry deterministically without
/// real sleeps.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Manually advanced clock for tests and simulations.
#[derive(Debug)]
pub struct ManualClock {
    ms: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            ms: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: u64) {
        self.ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.load(Ordering::SeqCst)
    }
}

// ── Policy and results ──────────────────────────────────────────

/// Admission policy: how many requests a key may make per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    pub fn per_hour(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(3600))
    }
}

/// Outcome of a single admission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window after this decision.
    pub remaining: u32,
    /// When the current window resets, epoch milliseconds.
    pub reset_at_ms: u64,
    /// Seconds until retry is worthwhile; set only on denial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

/// Read-only view of a key's current window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub count: u32,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_ms: u64,
}

/// Snapshot of the limiter's stored keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterStats {
    pub total_keys: usize,
    pub active_keys: usize,
    pub expired_keys: usize,
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at_ms: u64,
}

// ── Limiter ─────────────────────────────────────────────────────

/// Keyed fixed-window admission gate.
///
/// `check` is both a check and a consume: admitting mutates the key's
/// counter. The entry guard serializes each key's read-modify-write, so two
/// concurrent requests cannot both observe `count < limit` and overshoot.
pub struct FixedWindowLimiter {
    policy: RateLimitPolicy,
    entries: DashMap<String, WindowEntry>,
    clock: Arc<dyn Clock>,
}

impl FixedWindowLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            entries: DashMap::new(),
            clock,
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Check and consume one request for `key`.
    ///
    /// Expired entries are treated as absent: the first request after a
    /// window lapses starts a fresh one. Denials do not increment the
    /// counter, and a zero-request policy denies without storing anything.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = self.clock.now_ms();
        let window_ms = self.policy.window.as_millis() as u64;
        let limit = self.policy.limit;

        if limit == 0 {
            return self.denied(now + window_ms, now);
        }

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if now > entry.reset_at_ms {
                    *entry = WindowEntry {
                        count: 1,
                        reset_at_ms: now + window_ms,
                    };
                    self.admitted(limit - 1, entry.reset_at_ms)
                } else if entry.count >= limit {
                    tracing::debug!("rate limit exceeded for key '{key}'");
                    self.denied(entry.reset_at_ms, now)
                } else {
                    entry.count += 1;
                    self.admitted(limit - entry.count, entry.reset_at_ms)
                }
            }
            Entry::Vacant(vacant) => {
                let reset_at_ms = now + window_ms;
                vacant.insert(WindowEntry {
                    count: 1,
                    reset_at_ms,
                });
                self.admitted(limit - 1, reset_at_ms)
            }
        }
    }

    /// Read a key's window without creating or mutating anything.
    ///
    /// Absent and expired keys yield the hypothetical fresh view
    /// (`count = 0`, full remaining), so status endpoints and dashboards
    /// never consume quota just by looking.
    pub fn info(&self, key: &str) -> RateLimitInfo {
        let now = self.clock.now_ms();
        let limit = self.policy.limit;

        match self.entries.get(key) {
            Some(entry) if now <= entry.reset_at_ms => RateLimitInfo {
                count: entry.count,
                limit,
                remaining: limit.saturating_sub(entry.count),
                reset_at_ms: entry.reset_at_ms,
            },
            _ => RateLimitInfo {
                count: 0,
                limit,
                remaining: limit,
                reset_at_ms: now + self.policy.window.as_millis() as u64,
            },
        }
    }

    /// Unconditionally delete the entry for `key`.
    pub fn reset(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Classify all stored entries by expiry. No cleanup side effect.
    pub fn stats(&self) -> LimiterStats {
        let now = self.clock.now_ms();
        let total_keys = self.entries.len();
        let expired_keys = self
            .entries
            .iter()
            .filter(|entry| now > entry.reset_at_ms)
            .count();
        LimiterStats {
            total_keys,
            active_keys: total_keys.saturating_sub(expired_keys),
            expired_keys,
        }
    }

    /// Delete expired entries, returning how many were removed.
    ///
    /// Purely a memory bound: expired entries already read as absent, so
    /// this has no observable effect on `check` or `info`.
    pub fn remove_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now <= entry.reset_at_ms);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!("cleanup removed {removed} expired key(s)");
        }
        removed
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored keys, including expired ones not yet cleaned up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header name/value pairs for translating a decision into an HTTP
    /// response (429-style on denial). The crate carries no HTTP framework;
    /// route handlers copy these verbatim.
    pub fn header_pairs(&self, decision: &RateLimitDecision) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("X-RateLimit-Limit", self.policy.limit.to_string()),
            ("X-RateLimit-Remaining", decision.remaining.to_string()),
            ("X-RateLimit-Reset", decision.reset_at_ms.to_string()),
        ];
        if let Some(retry_after) = decision.retry_after_secs {
            headers.push(("Retry-After", retry_after.to_string()));
        }
        headers
    }

    fn admitted(&self, remaining: u32, reset_at_ms: u64) -> RateLimitDecision {
        RateLimitDecision {
            allowed: true,
            remaining,
            reset_at_ms,
            retry_after_secs: None,
        }
    }

    fn denied(&self, reset_at_ms: u64, now: u64) -> RateLimitDecision {
        RateLimitDecision {
            allowed: false,
            remaining: 0,
            reset_at_ms,
            retry_after_secs: Some(ceil_secs(reset_at_ms.saturating_sub(now))),
        }
    }
}

fn ceil_secs(delta_ms: u64) -> u64 {
    delta_ms.div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(limit: u32, window_ms: u64) -> (FixedWindowLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let policy = RateLimitPolicy::new(limit, Duration::from_millis(window_ms));
        (
            FixedWindowLimiter::with_clock(policy, clock.clone()),
            clock,
        )
    }

    #[test]
    fn test_admits_until_limit_then_denies() {
        let (limiter, _clock) = limiter(3, 1000);
        for expected_remaining in [2, 1, 0] {
            let decision = limiter.check("10.0.0.1");
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }
        let denied = limiter.check("10.0.0.1");
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.retry_after_secs, Some(1));
    }

    #[test]
    fn test_denial_does_not_increment() {
        let (limiter, clock) = limiter(1, 1000);
        assert!(limiter.check("k").allowed);
        for _ in 0..10 {
            assert!(!limiter.check("k").allowed);
        }
        // A single admitted request was recorded; the window still resets
        // at its original time.
        clock.advance(1001);
        assert!(limiter.check("k").allowed);
    }

    #[test]
    fn test_window_expiry_starts_fresh() {
        let (limiter, clock) = limiter(3, 1000);
        limiter.check("k");
        limiter.check("k");
        limiter.check("k");
        assert!(!limiter.check("k").allowed);

        clock.advance(1001);
        let fresh = limiter.check("k");
        assert!(fresh.allowed);
        assert_eq!(fresh.remaining, 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let (limiter, _clock) = limiter(1, 1000);
        assert!(limiter.check("a").allowed);
        assert!(!limiter.check("a").allowed);
        assert!(limiter.check("b").allowed);
    }

    #[test]
    fn test_info_is_read_only() {
        let (limiter, _clock) = limiter(5, 1000);
        for _ in 0..3 {
            let info = limiter.info("fresh");
            assert_eq!(info.count, 0);
            assert_eq!(info.remaining, 5);
        }
        assert!(limiter.is_empty());

        // The first real check still starts a fresh window.
        let decision = limiter.check("fresh");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);

        let info = limiter.info("fresh");
        assert_eq!(info.count, 1);
        assert_eq!(info.remaining, 4);
        assert_eq!(info.reset_at_ms, decision.reset_at_ms);
    }

    #[test]
    fn test_reset_reopens_the_gate() {
        let (limiter, _clock) = limiter(2, 1000);
        limiter.check("k");
        limiter.check("k");
        assert!(!limiter.check("k").allowed);

        limiter.reset("k");
        let decision = limiter.check("k");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[test]
    fn test_zero_limit_always_denies_without_storing() {
        let (limiter, _clock) = limiter(0, 1000);
        let decision = limiter.check("k");
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_stats_classify_by_expiry() {
        let (limiter, clock) = limiter(5, 1000);
        limiter.check("old");
        clock.advance(2000);
        limiter.check("new");

        let stats = limiter.stats();
        assert_eq!(stats.total_keys, 2);
        assert_eq!(stats.active_keys, 1);
        assert_eq!(stats.expired_keys, 1);

        // stats() itself performs no cleanup.
        assert_eq!(limiter.len(), 2);
    }

    #[test]
    fn test_remove_expired_counts_removals() {
        let (limiter, clock) = limiter(5, 1000);
        limiter.check("a");
        limiter.check("b");
        clock.advance(2000);
        limiter.check("c");

        assert_eq!(limiter.remove_expired(), 2);
        assert_eq!(limiter.len(), 1);
        assert_eq!(limiter.remove_expired(), 0);
    }

    #[test]
    fn test_clear_drops_everything() {
        let (limiter, _clock) = limiter(5, 1000);
        limiter.check("a");
        limiter.check("b");
        limiter.clear();
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_header_pairs_on_denial() {
        let (limiter, _clock) = limiter(1, 30_000);
        limiter.check("k");
        let denied = limiter.check("k");
        let headers = limiter.header_pairs(&denied);

        let get = |name: &str| {
            headers
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("X-RateLimit-Limit").unwrap(), "1");
        assert_eq!(get("X-RateLimit-Remaining").unwrap(), "0");
        assert_eq!(get("X-RateLimit-Reset").unwrap(), denied.reset_at_ms.to_string());
        assert_eq!(get("Retry-After").unwrap(), "30");
    }

    #[test]
    fn test_header_pairs_omit_retry_after_when_admitted() {
        let (limiter, _clock) = limiter(2, 1000);
        let admitted = limiter.check("k");
        let headers = limiter.header_pairs(&admitted);
        assert!(headers.iter().all(|(name, _)| *name != "Retry-After"));
    }
}
