use std::collections::{HashMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

const RATE_WINDOW_MS: u64 = 1000;

/// Incoming command limits: a per-user cooldown on each command plus a
/// global requests-per-second cap across all users
#[derive(Debug)]
pub struct CommandRateLimiter {
    cooldown_secs: u64,
    global_limit: usize,
    /// (user, command) -> last accepted use, in seconds
    cooldowns: Mutex<HashMap<(u64, String), u64>>,
    /// (user, command) -> when we last told the user about the cooldown
    warnings: Mutex<HashMap<(u64, String), u64>>,
    /// Accepted request timestamps (ms) in the last second
    global_requests: Mutex<VecDeque<u64>>,
}

impl CommandRateLimiter {
    pub fn new(cooldown_secs: u64, global_limit: usize) -> Self {
        Self {
            cooldown_secs,
            global_limit: global_limit.max(1),
            cooldowns: Mutex::new(HashMap::new()),
            warnings: Mutex::new(HashMap::new()),
            global_requests: Mutex::new(VecDeque::new()),
        }
    }

    /// Check if a user can execute a command.
    ///
    /// `Err((remaining_seconds, should_warn))` while on cooldown; `should_warn`
    /// is only true the first time within one cooldown period.
    pub async fn check_cooldown(&self, user_id: u64, command: &str) -> Result<(), (u64, bool)> {
        self.check_cooldown_at(user_id, command, now_secs()).await
    }

    async fn check_cooldown_at(&self, user_id: u64, command: &str, now: u64) -> Result<(), (u64, bool)> {
        let key = (user_id, command.to_string());
        let mut cooldowns = self.cooldowns.lock().await;

        if let Some(&last_time) = cooldowns.get(&key) {
            let elapsed = now.saturating_sub(last_time);
            if elapsed < self.cooldown_secs {
                let remaining = self.cooldown_secs - elapsed;

                let mut warnings = self.warnings.lock().await;
                let should_warn = match warnings.get(&key) {
                    Some(&last_warning) => last_warning < last_time,
                    None => true,
                };
                if should_warn {
                    warnings.insert(key, now);
                }

                return Err((remaining, should_warn));
            }
        }

        // Expired entries are dropped so the maps stay bounded by active users
        cooldowns.retain(|_, last_time| now.saturating_sub(*last_time) < self.cooldown_secs);
        self.warnings.lock().await.retain(|key, _| cooldowns.contains_key(key));

        cooldowns.insert(key, now);
        Ok(())
    }

    /// Check the global rate limit; `Err(remaining_ms)` when exceeded
    pub async fn check_global(&self) -> Result<(), u64> {
        self.check_global_at(now_millis()).await
    }

    async fn check_global_at(&self, now: u64) -> Result<(), u64> {
        let window_start = now.saturating_sub(RATE_WINDOW_MS);
        let mut requests = self.global_requests.lock().await;

        while requests.front().is_some_and(|&timestamp| timestamp <= window_start) {
            requests.pop_front();
        }

        if requests.len() >= self.global_limit {
            let oldest_leaves_at = requests.front().copied().unwrap_or(now) + RATE_WINDOW_MS;
            return Err(oldest_leaves_at.saturating_sub(now));
        }

        requests.push_back(now);
        Ok(())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
