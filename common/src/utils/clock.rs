use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;

    /// Seconds since the unix epoch, zero for clocks set before it.
    fn unix_timestamp(&self) -> u64 {
        self.now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    struct MockClock {
        timestamp: i64,
    }

    impl Clock for MockClock {
        fn now(&self) -> SystemTime {
            SystemTime::from(DateTime::from_timestamp(self.timestamp, 0).unwrap())
        }
    }

    #[test]
    fn test_unix_timestamp() {
        let clock = MockClock {
            timestamp: 1_700_000_000,
        };
        assert_eq!(clock.unix_timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_unix_timestamp_before_epoch_is_zero() {
        let clock = MockClock { timestamp: -5 };
        assert_eq!(clock.unix_timestamp(), 0);
    }
}
