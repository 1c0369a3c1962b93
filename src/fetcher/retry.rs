use std::time::Duration;

/// Retry policy for throttled requests: a fixed delay before each retry,
/// up to a maximum number of retries per request.
///
/// The delay is deliberately not exponential. One long fixed wait is enough
/// to clear a rate-limit window, and a second throttle after that usually
/// means the budget is gone for the whole run anyway.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        RetryPolicy { max_retries, delay }
    }

    /// Whether another attempt is allowed after `retries_used` retries.
    pub fn should_retry(&self, retries_used: u32) -> bool {
        retries_used < self.max_retries
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_max_retries() {
        let policy = RetryPolicy::new(2, Duration::from_secs(3));
        assert!(policy.should_retry(0));
        assert!(policy.should_retry(1));
        assert!(!policy.should_retry(2));
    }

    #[test]
    fn zero_retries_never_retries() {
        let policy = RetryPolicy::new(0, Duration::from_secs(3));
        assert!(!policy.should_retry(0));
    }

    #[test]
    fn delay_is_fixed_across_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1500));
        assert_eq!(policy.delay(), Duration::from_millis(1500));
    }
}
