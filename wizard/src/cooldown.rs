use chrono::{DateTime, Duration, Utc};

/// Minimum interval between two successful contact form sends.
pub const COOLDOWN_SECONDS: i64 = 30;

/// A resubmission landed inside the cooldown window. Surfaced as a
/// user-facing warning, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownActive {
    pub retry_in_secs: i64,
}

/// Client-side rate limit: a plain timestamp comparison against the last
/// successful send. Nothing here is server-enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitCooldown {
    last_success: Option<DateTime<Utc>>,
}

impl SubmitCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passes when no send happened yet or the window has elapsed. The
    /// caller checks this before issuing the network request, so a
    /// rejected attempt produces no request at all.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), CooldownActive> {
        if let Some(last) = self.last_success {
            let elapsed = now.signed_duration_since(last);
            if elapsed < Duration::seconds(COOLDOWN_SECONDS) {
                return Err(CooldownActive {
                    retry_in_secs: COOLDOWN_SECONDS - elapsed.num_seconds(),
                });
            }
        }
        Ok(())
    }

    /// Recorded only after the server confirmed the send.
    pub fn record_success(&mut self, now: DateTime<Utc>) {
        self.last_success = Some(now);
    }
}
