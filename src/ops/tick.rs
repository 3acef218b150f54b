use std::time::{Duration, Instant};

/// Fixed-interval poll timer driven from the UI frame loop.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last: Option<Instant>,
    stopped: bool,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: None,
            stopped: false,
        }
    }

    /// Returns true at most once per period. The first poll only arms the timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.stopped {
            return false;
        }
        match self.last {
            None => {
                self.last = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= self.period => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self
                .period
                .saturating_sub(now.saturating_duration_since(last)),
            None => self.period,
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_fires_once_per_period() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1));

        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(500)));
        assert!(ticker.poll(start + Duration::from_millis(1000)));
        assert!(!ticker.poll(start + Duration::from_millis(1500)));
        assert!(ticker.poll(start + Duration::from_millis(2100)));
    }

    #[test]
    fn test_until_next() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1));
        assert_eq!(ticker.until_next(start), Duration::from_secs(1));
        ticker.poll(start);
        assert_eq!(
            ticker.until_next(start + Duration::from_millis(300)),
            Duration::from_millis(700)
        );
        assert_eq!(
            ticker.until_next(start + Duration::from_secs(5)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_stopped_ticker_never_fires() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(10));
        ticker.poll(start);
        ticker.stop();
        assert!(ticker.is_stopped());
        assert!(!ticker.poll(start + Duration::from_secs(10)));
    }
}
