//! Data frequency vocabulary of the forecasting service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Error for frequency codes outside the service vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data frequency [{0}]")]
pub struct UnknownFrequency(pub String);

/// Interval between records, using the service's frequency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataFrequency {
    /// One minute (`1min`).
    OneMinute,
    /// Five minutes (`5min`).
    FiveMinutes,
    /// Ten minutes (`10min`).
    TenMinutes,
    /// Fifteen minutes (`15min`).
    FifteenMinutes,
    /// Thirty minutes (`30min`).
    ThirtyMinutes,
    /// One hour (`H`).
    Hourly,
    /// One day (`D`).
    Daily,
    /// One week (`W`).
    Weekly,
    /// One month (`M`).
    Monthly,
    /// One year (`Y`).
    Yearly,
}

impl DataFrequency {
    /// Returns the service's code for this frequency.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1min",
            Self::FiveMinutes => "5min",
            Self::TenMinutes => "10min",
            Self::FifteenMinutes => "15min",
            Self::ThirtyMinutes => "30min",
            Self::Hourly => "H",
            Self::Daily => "D",
            Self::Weekly => "W",
            Self::Monthly => "M",
            Self::Yearly => "Y",
        }
    }

    /// Seconds covered by one interval of this frequency.
    ///
    /// `1min` is accepted by dataset creation but has no entry in the
    /// interval table, so horizon derivation cannot use it.
    #[must_use]
    pub fn interval_seconds(self) -> Option<u32> {
        match self {
            Self::OneMinute => None,
            Self::FiveMinutes => Some(5 * 60),
            Self::TenMinutes => Some(10 * 60),
            Self::FifteenMinutes => Some(15 * 60),
            Self::ThirtyMinutes => Some(30 * 60),
            Self::Hourly => Some(60 * 60),
            Self::Daily => Some(60 * 60 * 24),
            Self::Weekly => Some(60 * 60 * 24 * 7),
            Self::Monthly => Some(60 * 60 * 24 * 30),
            Self::Yearly => Some(60 * 60 * 24 * 365),
        }
    }

    /// Picks the coarsest frequency that still covers `window`.
    #[must_use]
    pub fn for_window(window: Duration) -> Self {
        const ONE_MINUTE: Duration = Duration::from_secs(60);
        const FIVE_MINUTES: Duration = Duration::from_secs(5 * 60);
        const TEN_MINUTES: Duration = Duration::from_secs(10 * 60);
        const FIFTEEN_MINUTES: Duration = Duration::from_secs(15 * 60);
        const THIRTY_MINUTES: Duration = Duration::from_secs(30 * 60);
        const ONE_HOUR: Duration = Duration::from_secs(60 * 60);
        const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);
        const ONE_WEEK: Duration = Duration::from_secs(60 * 60 * 24 * 7);
        const ONE_MONTH: Duration = Duration::from_secs(60 * 60 * 24 * 30);

        if window <= ONE_MINUTE {
            Self::OneMinute
        } else if window <= FIVE_MINUTES {
            Self::FiveMinutes
        } else if window <= TEN_MINUTES {
            Self::TenMinutes
        } else if window <= FIFTEEN_MINUTES {
            Self::FifteenMinutes
        } else if window <= THIRTY_MINUTES {
            Self::ThirtyMinutes
        } else if window <= ONE_HOUR {
            Self::Hourly
        } else if window <= ONE_DAY {
            Self::Daily
        } else if window <= ONE_WEEK {
            Self::Weekly
        } else if window <= ONE_MONTH {
            Self::Monthly
        } else {
            Self::Yearly
        }
    }
}

impl fmt::Display for DataFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFrequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1min" => Ok(Self::OneMinute),
            "5min" => Ok(Self::FiveMinutes),
            "10min" => Ok(Self::TenMinutes),
            "15min" => Ok(Self::FifteenMinutes),
            "30min" => Ok(Self::ThirtyMinutes),
            "H" => Ok(Self::Hourly),
            "D" => Ok(Self::Daily),
            "W" => Ok(Self::Weekly),
            "M" => Ok(Self::Monthly),
            "Y" => Ok(Self::Yearly),
            other => Err(UnknownFrequency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_seconds_table() {
        assert_eq!(DataFrequency::FiveMinutes.interval_seconds(), Some(300));
        assert_eq!(DataFrequency::ThirtyMinutes.interval_seconds(), Some(1800));
        assert_eq!(DataFrequency::Hourly.interval_seconds(), Some(3600));
        assert_eq!(DataFrequency::Daily.interval_seconds(), Some(86_400));
        assert_eq!(DataFrequency::Weekly.interval_seconds(), Some(604_800));
        assert_eq!(DataFrequency::Monthly.interval_seconds(), Some(2_592_000));
        assert_eq!(DataFrequency::Yearly.interval_seconds(), Some(31_536_000));
    }

    #[test]
    fn test_one_minute_has_no_interval_entry() {
        assert_eq!(DataFrequency::OneMinute.interval_seconds(), None);
    }

    #[test]
    fn test_for_window_ladder() {
        assert_eq!(
            DataFrequency::for_window(Duration::from_secs(30)),
            DataFrequency::OneMinute
        );
        assert_eq!(
            DataFrequency::for_window(Duration::from_secs(60)),
            DataFrequency::OneMinute
        );
        // 2000 seconds lands between 30 minutes and an hour.
        assert_eq!(
            DataFrequency::for_window(Duration::from_secs(2000)),
            DataFrequency::Hourly
        );
        assert_eq!(
            DataFrequency::for_window(Duration::from_secs(1800)),
            DataFrequency::ThirtyMinutes
        );
        assert_eq!(
            DataFrequency::for_window(Duration::from_secs(60 * 60 * 24 * 3)),
            DataFrequency::Weekly
        );
        assert_eq!(
            DataFrequency::for_window(Duration::from_secs(60 * 60 * 24 * 40)),
            DataFrequency::Yearly
        );
    }

    #[test]
    fn test_round_trip_codes() {
        for freq in [
            DataFrequency::OneMinute,
            DataFrequency::FiveMinutes,
            DataFrequency::TenMinutes,
            DataFrequency::FifteenMinutes,
            DataFrequency::ThirtyMinutes,
            DataFrequency::Hourly,
            DataFrequency::Daily,
            DataFrequency::Weekly,
            DataFrequency::Monthly,
            DataFrequency::Yearly,
        ] {
            assert_eq!(freq.as_str().parse::<DataFrequency>().unwrap(), freq);
        }
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "2min".parse::<DataFrequency>().unwrap_err();
        assert_eq!(err, UnknownFrequency("2min".to_string()));
    }
}
