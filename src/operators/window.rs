use serde::{Deserialize, Serialize};

use crate::context::period_from_f64;
use crate::errors::{Result, ScheduleError};

/// inclusive range of periods an operator is active in.
/// an open end keeps the operator active until the schedule finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: u32,
    #[serde(default)]
    pub end: Option<u32>,
}

impl PeriodWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end: Some(end) }
    }

    /// active in a single period
    pub fn at(period: u32) -> Self {
        Self::new(period, period)
    }

    /// active from `start` to the end of the schedule
    pub fn from_period(start: u32) -> Self {
        Self { start, end: None }
    }

    /// build from loosely typed bounds, rejecting NaN, negative and fractional periods
    pub fn from_f64(start: f64, end: Option<f64>) -> Result<Self> {
        let window = Self {
            start: period_from_f64(start)?,
            end: end.map(period_from_f64).transpose()?,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn contains(&self, period: u32) -> bool {
        period >= self.start && self.end.map_or(true, |end| period <= end)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(end) = self.end {
            if end < self.start {
                return Err(ScheduleError::InvalidConfiguration {
                    message: format!("operator window ends at {} before it starts at {}", end, self.start),
                });
            }
        }
        Ok(())
    }
}

impl From<u32> for PeriodWindow {
    fn from(start: u32) -> Self {
        PeriodWindow::from_period(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_bounds() {
        let window = PeriodWindow::new(3, 5);
        assert!(!window.contains(2));
        assert!(window.contains(3));
        assert!(window.contains(5));
        assert!(!window.contains(6));
    }

    #[test]
    fn test_single_period_and_open_end() {
        assert!(PeriodWindow::at(7).contains(7));
        assert!(!PeriodWindow::at(7).contains(8));
        assert!(PeriodWindow::from_period(13).contains(10_000));
        assert!(!PeriodWindow::from(13).contains(12));
    }

    #[test]
    fn test_from_f64_validation() {
        assert_eq!(PeriodWindow::from_f64(2.0, Some(4.0)).unwrap(), PeriodWindow::new(2, 4));
        assert_eq!(PeriodWindow::from_f64(2.0, None).unwrap(), PeriodWindow::from_period(2));
        assert!(matches!(
            PeriodWindow::from_f64(f64::NAN, None),
            Err(ScheduleError::InvalidPeriod { .. })
        ));
        assert!(PeriodWindow::from_f64(1.0, Some(2.5)).is_err());
        assert!(matches!(
            PeriodWindow::from_f64(4.0, Some(2.0)),
            Err(ScheduleError::InvalidConfiguration { .. })
        ));
    }
}
