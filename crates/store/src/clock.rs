//! Business-date source.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use gestor_shared::{AppResult, LedgerConfig};

/// Supplies "today" to the ledger.
pub trait Clock: Send + Sync + 'static {
    /// Current business date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the business time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// Creates a clock for `tz`.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Clock in UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self::new(chrono_tz::UTC)
    }

    /// Creates a clock for the configured time zone.
    pub fn from_config(config: &LedgerConfig) -> AppResult<Self> {
        Ok(Self::new(config.time_zone()?))
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Creates a clock stuck at `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Moves the clock.
    pub fn set(&self, today: NaiveDate) {
        let mut guard = self.today.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<C: Clock> Clock for std::sync::Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_moves_only_when_set() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        clock.set(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn test_system_clock_from_config() {
        let config = LedgerConfig::default();
        assert!(SystemClock::from_config(&config).is_ok());

        let bad = LedgerConfig {
            timezone: "Mars/Olympus".into(),
            ..LedgerConfig::default()
        };
        assert!(matches!(
            SystemClock::from_config(&bad),
            Err(gestor_shared::AppError::Config(_))
        ));
    }
}
