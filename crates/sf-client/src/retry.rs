//! Bounded re-authentication policy.
//!
//! A call answered with 401 may refresh the session and replay the request.
//! The number of replays per logical call is capped here; nothing else is
//! ever retried (connect and authentication failures are terminal).

/// Configuration for re-authentication behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of re-authenticate-and-replay cycles per call.
    pub max_reauth_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_reauth_attempts: 1,
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of re-authentication attempts.
    pub fn with_max_reauth_attempts(mut self, attempts: u32) -> Self {
        self.max_reauth_attempts = attempts;
        self
    }

    /// Disable re-authentication.
    pub fn no_retry() -> Self {
        Self {
            max_reauth_attempts: 0,
        }
    }
}

/// Per-call retry budget. Create one per logical call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Number of re-authentications consumed so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns true if another re-authentication is allowed.
    pub fn should_retry(&self) -> bool {
        self.attempt < self.config.max_reauth_attempts
    }

    /// Consume one re-authentication. Returns false once the budget is spent.
    pub fn next_attempt(&mut self) -> bool {
        if !self.should_retry() {
            return false;
        }
        self.attempt += 1;
        true
    }
}
